use dispatch_optimizer::{
    problem::order::Order,
    solver::solver_params::{DEFAULT_DEPOT_LAT, DEFAULT_DEPOT_LNG},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

pub fn order_offset(id: &str, dlat: f64, dlng: f64, weight_kg: f64) -> Order {
    Order::new(
        id,
        DEFAULT_DEPOT_LAT + dlat,
        DEFAULT_DEPOT_LNG + dlng,
        weight_kg,
    )
}

/// Orders scattered in a ~0.15 degree box around the depot.
pub fn create_random_orders(count: usize, max_weight_kg: f64, seed: u64) -> Vec<Order> {
    let mut rng = SmallRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            order_offset(
                &format!("ORD-{i:04}"),
                rng.random_range(-0.15..0.15),
                rng.random_range(-0.15..0.15),
                rng.random_range(1.0..max_weight_kg),
            )
        })
        .collect()
}
