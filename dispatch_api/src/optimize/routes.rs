use std::sync::Arc;

use axum::{Router, routing::post};

use crate::{optimize::post_handler::post_handler, state::AppState};

pub fn optimize_routes() -> Router<Arc<AppState>> {
    Router::new().route("/optimize-routes", post(post_handler))
}
