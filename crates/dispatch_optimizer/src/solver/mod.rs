pub mod assignment;
pub mod eta;
pub mod sequencing;
#[allow(clippy::module_inception)]
pub mod solver;
pub mod solver_params;
