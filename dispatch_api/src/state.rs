use std::{sync::Arc, time::Duration};

use dispatch_optimizer::solver::solver::Solver;

pub struct AppState {
    pub solver: Arc<Solver>,
    /// Wall-clock bound on a single solve, enforced around the blocking task.
    pub solve_timeout: Duration,
}

impl AppState {
    pub fn new(solver: Solver, solve_timeout: Duration) -> Self {
        AppState {
            solver: Arc::new(solver),
            solve_timeout,
        }
    }
}
