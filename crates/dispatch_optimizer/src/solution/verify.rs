use fxhash::{FxHashMap, FxHashSet};

use crate::{
    error::SolveError,
    problem::delivery_problem::DeliveryProblem,
    solution::optimization_result::OptimizationResult,
};

const CAPACITY_TOLERANCE: f64 = 1e-9;

/// Re-checks the result invariants. Any failure is a bug in the solver, reported as
/// [`SolveError::Internal`].
pub fn verify_result(
    problem: &DeliveryProblem,
    result: &OptimizationResult,
) -> Result<(), SolveError> {
    let depot = problem.depot().to_lat_lng();
    let capacity = problem.fleet().truck_capacity_kg();

    let mut seen: FxHashMap<&str, usize> = FxHashMap::default();
    let mut route_ids = FxHashSet::default();

    for route in &result.routes {
        if route.route_id == 0 || route.route_id > problem.fleet().num_trucks() {
            return Err(SolveError::internal(format!(
                "route id {} is outside 1..={}",
                route.route_id,
                problem.fleet().num_trucks()
            )));
        }

        if !route_ids.insert(route.route_id) {
            return Err(SolveError::internal(format!(
                "route id {} used twice",
                route.route_id
            )));
        }

        if route.truck_load > capacity + CAPACITY_TOLERANCE {
            return Err(SolveError::internal(format!(
                "route {} carries {} kg, capacity is {} kg",
                route.route_id, route.truck_load, capacity
            )));
        }

        if route.stop_etas.len() != route.stop_sequence.len()
            || route
                .stop_etas
                .iter()
                .zip(&route.stop_sequence)
                .any(|(eta, id)| &eta.order_id != id)
        {
            return Err(SolveError::internal(format!(
                "route {} stop_etas do not follow stop_sequence",
                route.route_id
            )));
        }

        if route.delivery_polyline.first() != Some(&depot)
            || route.return_polyline.last() != Some(&depot)
        {
            return Err(SolveError::internal(format!(
                "route {} polylines are not anchored at the depot",
                route.route_id
            )));
        }

        for id in &route.stop_sequence {
            *seen.entry(id.as_str()).or_default() += 1;
        }
    }

    for order in &result.unassigned_orders {
        *seen.entry(order.id.as_str()).or_default() += 1;
    }

    for order in problem.orders() {
        match seen.remove(order.id.as_str()) {
            Some(1) => {}
            Some(count) => {
                return Err(SolveError::internal(format!(
                    "order {} appears {} times in the result",
                    order.id, count
                )));
            }
            None => {
                return Err(SolveError::internal(format!(
                    "order {} is missing from the result",
                    order.id
                )));
            }
        }
    }

    if let Some(unknown) = seen.keys().next() {
        return Err(SolveError::internal(format!(
            "result contains unknown order {unknown}"
        )));
    }

    if result.num_orders != problem.orders().len() {
        return Err(SolveError::internal(format!(
            "result reports {} orders, input had {}",
            result.num_orders,
            problem.orders().len()
        )));
    }

    Ok(())
}
