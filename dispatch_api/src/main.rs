mod config;
mod error;
mod health;
mod optimize;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{Router, http::Method, routing::get, serve};
use dispatch_optimizer::solver::solver::Solver;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::{
    config::ServerConfig, health::health_handler, optimize::routes::optimize_routes,
    state::AppState,
};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::load_dotenv();
    tracing_subscriber::fmt()
        .with_max_level(config::log_level())
        .init();

    let config = ServerConfig::from_env()?;

    let state = Arc::new(AppState::new(
        Solver::new(config.solver_params.clone()),
        config.solve_timeout,
    ));

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("could not bind {}:{}", config.host, config.port))?;

    info!(
        host = %config.host,
        port = config.port,
        capacity_kg = config.solver_params.truck_capacity_kg,
        "dispatch optimizer listening"
    );

    serve(listener, app(state)).await?;

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .merge(optimize_routes())
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
