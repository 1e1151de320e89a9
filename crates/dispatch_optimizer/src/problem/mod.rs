pub mod delivery_problem;
pub mod fleet;
pub mod kmh;
pub mod location;
pub mod order;
pub mod travel_matrix;
