use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use dispatch_optimizer::{
    json::types::JsonOptimizeRequest, solution::optimization_result::OptimizationResult,
};
use jiff::Timestamp;
use tracing::{Instrument, Span, error, info, info_span, warn};
use uuid::Uuid;

use crate::{error::ApiError, state::AppState};

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<JsonOptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizationResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

    if request.orders.is_empty() {
        return Err(ApiError::BadRequest(
            "Orders list cannot be empty".to_string(),
        ));
    }

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "optimize",
        %request_id,
        orders = request.orders.len(),
        num_trucks = request.num_trucks
    );

    solve(state, request).instrument(span).await.map(Json)
}

async fn solve(
    state: Arc<AppState>,
    request: JsonOptimizeRequest,
) -> Result<OptimizationResult, ApiError> {
    let started = Timestamp::now();
    let solver = Arc::clone(&state.solver);
    let span = Span::current();

    let task =
        tokio::task::spawn_blocking(move || span.in_scope(|| solver.solve_request(request)));

    let result = match tokio::time::timeout(state.solve_timeout, task).await {
        Ok(Ok(result)) => result?,
        Ok(Err(join_error)) => {
            error!(%join_error, "solver task failed");
            return Err(ApiError::InternalServerError(format!(
                "Optimization failed: {join_error}"
            )));
        }
        Err(_) => {
            warn!(timeout = ?state.solve_timeout, "optimization timed out");
            return Err(ApiError::GatewayTimeout(format!(
                "Optimization did not finish within {} seconds",
                state.solve_timeout.as_secs()
            )));
        }
    };

    info!(
        elapsed = ?Timestamp::now().duration_since(started),
        routes = result.routes.len(),
        unassigned = result.unassigned_orders.len(),
        "request solved"
    );

    Ok(result)
}
