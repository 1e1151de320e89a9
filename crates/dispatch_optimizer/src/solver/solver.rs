use rayon::{
    ThreadPool, ThreadPoolBuilder,
    iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator},
};
use tracing::{info, instrument, warn};

use crate::{
    error::SolveError,
    json::types::JsonOptimizeRequest,
    problem::{
        delivery_problem::DeliveryProblem,
        order::{Order, OrderIdx},
    },
    solution::{
        assembler::{RoutePlan, assemble},
        optimization_result::OptimizationResult,
        verify::verify_result,
    },
    solver::{
        assignment::{Assignment, TruckLoad, UnassignedReason, assign_orders},
        eta,
        sequencing::sequence_route,
        solver_params::{SolverParams, Threads},
    },
    timer_debug,
};

/// Stateless CVRP heuristic: every call to [`Solver::solve`] builds its problem from scratch,
/// so one solver can serve concurrent requests.
pub struct Solver {
    params: SolverParams,
    thread_pool: Option<ThreadPool>,
}

impl Solver {
    pub fn new(params: SolverParams) -> Self {
        let thread_pool = match params.sequencing_threads {
            Threads::Multi(threads) => match ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|index| format!("sequencing-{index}"))
                .build()
            {
                Ok(pool) => Some(pool),
                Err(error) => {
                    warn!(%error, "could not build the sequencing pool, using the global one");
                    None
                }
            },
            Threads::Single | Threads::Auto => None,
        };

        Solver {
            params,
            thread_pool,
        }
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn solve_request(
        &self,
        request: JsonOptimizeRequest,
    ) -> Result<OptimizationResult, SolveError> {
        let num_trucks = request.truck_count()?;
        self.solve(request.orders, num_trucks)
    }

    #[instrument(skip_all, fields(orders = orders.len(), num_trucks = num_trucks))]
    pub fn solve(
        &self,
        orders: Vec<Order>,
        num_trucks: usize,
    ) -> Result<OptimizationResult, SolveError> {
        let problem = timer_debug!(
            "build problem",
            DeliveryProblem::new(orders, num_trucks, &self.params)
        )?;

        if problem.orders().is_empty() {
            return Ok(OptimizationResult::empty(
                num_trucks,
                problem.fleet().truck_capacity_kg(),
            ));
        }

        let assignment = timer_debug!("assign orders", assign_orders(&problem, &self.params));
        let plans = timer_debug!("sequence routes", self.plan_routes(&problem, &assignment));

        let overweight = assignment.unassigned_count(UnassignedReason::Overweight);
        let fleet_full = assignment.unassigned_count(UnassignedReason::FleetFull);
        let unassigned: Vec<OrderIdx> = assignment
            .unassigned
            .iter()
            .map(|unassigned| unassigned.order_id)
            .collect();

        let result = assemble(&problem, &plans, &unassigned);
        verify_result(&problem, &result)?;

        info!(
            routes = result.routes.len(),
            unassigned = result.unassigned_orders.len(),
            overweight,
            fleet_full,
            total_distance_km = result.total_distance_km,
            "optimization finished"
        );

        Ok(result)
    }

    // Trucks are independent, so each one is sequenced and timed on its own worker.
    // `collect` keeps truck order, the output does not depend on scheduling.
    fn plan_routes(&self, problem: &DeliveryProblem, assignment: &Assignment) -> Vec<RoutePlan> {
        let params = &self.params;
        let plan = |(truck, load): (usize, &TruckLoad)| {
            let sequence = sequence_route(problem, load.orders(), params);
            let timing = eta::project(problem.matrix(), sequence.stops());

            RoutePlan {
                truck,
                load_kg: load.load_kg(),
                sequence,
                timing,
            }
        };

        match (self.params.sequencing_threads, &self.thread_pool) {
            (Threads::Single, _) => assignment.trucks.iter().enumerate().map(plan).collect(),
            (_, Some(pool)) => {
                pool.install(|| assignment.trucks.par_iter().enumerate().map(plan).collect())
            }
            (_, None) => assignment.trucks.par_iter().enumerate().map(plan).collect(),
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SolverParams::default())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{SolveError, ValidationError},
        json::types::JsonOptimizeRequest,
        problem::order::Order,
        solver::solver_params::{SolverParams, Threads},
        test_utils::order_offset,
    };

    use super::Solver;

    #[test]
    fn test_solve_single_truck_takes_everything() {
        let orders = vec![
            order_offset("A", 0.01, 0.0, 100.0),
            order_offset("B", 0.0, 0.01, 100.0),
            order_offset("C", -0.01, 0.0, 100.0),
        ];

        let result = Solver::default().solve(orders, 1).unwrap();

        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].route_id, 1);
        assert_eq!(result.routes[0].stop_sequence.len(), 3);
        assert_eq!(result.routes[0].truck_load, 300.0);
        assert!(result.unassigned_orders.is_empty());
        assert_eq!(result.total_distance_km, result.routes[0].total_distance_km);
    }

    #[test]
    fn test_solve_huge_fleet_single_order() {
        let num_trucks = usize::MAX >> 8;
        let orders = vec![order_offset("A", 0.01, 0.0, 10.0)];

        let result = Solver::default().solve(orders, num_trucks).unwrap();

        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].route_id, 1);
        assert_eq!(result.routes[0].stop_sequence, vec!["A".to_string()]);
        assert_eq!(result.num_trucks, num_trucks);
        assert!(result.unassigned_orders.is_empty());
    }

    #[test]
    fn test_solve_no_orders() {
        let result = Solver::default().solve(vec![], 3).unwrap();

        assert!(result.routes.is_empty());
        assert!(result.unassigned_orders.is_empty());
        assert_eq!(result.num_trucks, 3);
        assert_eq!(result.total_distance_km, 0.0);
    }

    #[test]
    fn test_solve_rejects_invalid_orders() {
        let result = Solver::default().solve(vec![Order::new("A", 200.0, 0.0, 1.0)], 1);

        assert!(matches!(
            result,
            Err(SolveError::InvalidInput(ValidationError::InvalidCoordinate { .. }))
        ));
    }

    #[test]
    fn test_solve_request_rejects_negative_trucks() {
        let request = JsonOptimizeRequest {
            orders: vec![order_offset("A", 0.01, 0.0, 1.0)],
            num_trucks: -2,
        };

        assert!(matches!(
            Solver::default().solve_request(request),
            Err(SolveError::InvalidInput(ValidationError::InvalidTruckCount(-2)))
        ));
    }

    #[test]
    fn test_thread_settings_give_the_same_result() {
        let orders: Vec<Order> = (0..30)
            .map(|i| {
                let angle = i as f64 * 0.7;
                order_offset(
                    &format!("ORD-{i:03}"),
                    0.05 * angle.sin(),
                    0.05 * angle.cos(),
                    50.0 + (i % 7) as f64 * 20.0,
                )
            })
            .collect();

        let single = Solver::new(SolverParams {
            sequencing_threads: Threads::Single,
            ..SolverParams::default()
        })
        .solve(orders.clone(), 4)
        .unwrap();

        let multi = Solver::new(SolverParams {
            sequencing_threads: Threads::Multi(3),
            ..SolverParams::default()
        })
        .solve(orders, 4)
        .unwrap();

        assert_eq!(single, multi);
    }
}
