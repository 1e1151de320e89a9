use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dispatch_optimizer::error::SolveError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServerError(String),
    GatewayTimeout(String),
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl From<SolveError> for ApiError {
    fn from(error: SolveError) -> Self {
        if error.is_client_error() {
            ApiError::BadRequest(error.to_string())
        } else {
            ApiError::InternalServerError(format!("Optimization failed: {error}"))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::InternalServerError(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail),
            ApiError::GatewayTimeout(detail) => (StatusCode::GATEWAY_TIMEOUT, detail),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
