use tracing::instrument;

use crate::{
    problem::{delivery_problem::DeliveryProblem, order::OrderIdx},
    solution::{
        optimization_result::OptimizationResult,
        route::{Route, StopEta},
    },
    solver::{eta::RouteTiming, sequencing::SequencedRoute},
    utils::round::round_to,
};

const DISTANCE_DECIMALS: i32 = 3;
const MINUTES_DECIMALS: i32 = 1;

/// Everything computed for one truck before it is turned into a [`Route`].
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// Zero-based truck slot; reported as `route_id = truck + 1`.
    pub truck: usize,
    pub load_kg: f64,
    pub sequence: SequencedRoute,
    pub timing: RouteTiming,
}

pub fn build_route(problem: &DeliveryProblem, plan: &RoutePlan) -> Route {
    let stop_sequence: Vec<String> = plan
        .sequence
        .order_ids(problem)
        .map(|order_id| problem.order(order_id).id.clone())
        .collect();

    let stop_etas = plan
        .timing
        .stops
        .iter()
        .zip(&stop_sequence)
        .map(|(timing, order_id)| StopEta {
            order_id: order_id.clone(),
            eta_minutes: round_to(timing.eta.as_secs_f64() / 60.0, MINUTES_DECIMALS),
            distance_from_depot_km: round_to(timing.distance_from_depot, DISTANCE_DECIMALS),
        })
        .collect();

    Route {
        route_id: plan.truck + 1,
        stop_sequence,
        truck_load: plan.load_kg,
        total_distance_km: round_to(plan.timing.total_distance(), DISTANCE_DECIMALS),
        total_duration_min: round_to(
            plan.timing.total_duration.as_secs_f64() / 60.0,
            MINUTES_DECIMALS,
        ),
        stop_etas,
        delivery_polyline: plan.sequence.delivery_polyline(problem),
        return_polyline: plan.sequence.return_polyline(problem),
        polyline: plan.sequence.polyline(problem),
    }
}

/// Collects the per-truck plans and the leftovers into the response shape.
///
/// Trucks without stops are left out of `routes`. Pure aggregation, no optimization.
#[instrument(skip_all, level = "debug")]
pub fn assemble(
    problem: &DeliveryProblem,
    plans: &[RoutePlan],
    unassigned: &[OrderIdx],
) -> OptimizationResult {
    let routes: Vec<Route> = plans
        .iter()
        .filter(|plan| !plan.sequence.stops().is_empty())
        .map(|plan| build_route(problem, plan))
        .collect();

    let total_distance_km = round_to(
        routes.iter().map(|route| route.total_distance_km).sum(),
        DISTANCE_DECIMALS,
    );

    OptimizationResult {
        routes,
        unassigned_orders: unassigned
            .iter()
            .map(|&order_id| problem.order(order_id).clone())
            .collect(),
        total_distance_km,
        truck_capacity_kg: problem.fleet().truck_capacity_kg(),
        num_trucks: problem.fleet().num_trucks(),
        num_orders: problem.orders().len(),
    }
}
