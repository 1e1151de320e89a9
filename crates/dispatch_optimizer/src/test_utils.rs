use crate::{
    problem::{delivery_problem::DeliveryProblem, order::Order},
    solver::solver_params::{DEFAULT_DEPOT_LAT, DEFAULT_DEPOT_LNG, SolverParams},
};

/// Order placed `dlat`/`dlng` degrees away from the default depot.
pub fn order_offset(id: &str, dlat: f64, dlng: f64, weight_kg: f64) -> Order {
    Order::new(
        id,
        DEFAULT_DEPOT_LAT + dlat,
        DEFAULT_DEPOT_LNG + dlng,
        weight_kg,
    )
}

pub fn create_test_problem(orders: Vec<Order>, num_trucks: usize) -> DeliveryProblem {
    DeliveryProblem::new(orders, num_trucks, &SolverParams::default()).unwrap()
}

pub fn create_test_problem_with_capacity(
    orders: Vec<Order>,
    num_trucks: usize,
    truck_capacity_kg: f64,
) -> DeliveryProblem {
    let params = SolverParams {
        truck_capacity_kg,
        ..SolverParams::default()
    };

    DeliveryProblem::new(orders, num_trucks, &params).unwrap()
}
