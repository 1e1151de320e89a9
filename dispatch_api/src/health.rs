use axum::Json;
use serde::Serialize;

pub const SERVICE_NAME: &str = "Tactical Logistics Optimizer";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: SERVICE_NAME,
    })
}
