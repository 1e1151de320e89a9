use thiserror::Error;

/// Rejections raised before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("num_trucks must be at least 1, got {0}")]
    InvalidTruckCount(i64),

    #[error("truck_capacity_kg must be a positive number, got {0}")]
    InvalidCapacity(f64),

    #[error("average speed must be a positive number of km/h, got {0}")]
    InvalidSpeed(f64),

    #[error("service duration cannot be negative")]
    InvalidServiceDuration,

    #[error("depot coordinate ({lat}, {lng}) is out of range")]
    InvalidDepot { lat: f64, lng: f64 },

    #[error("order id cannot be empty")]
    EmptyOrderId,

    #[error("order {id} has an invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate { id: String, lat: f64, lng: f64 },

    #[error("order {id} has an invalid weight {weight_kg}")]
    InvalidWeight { id: String, weight_kg: f64 },

    #[error("order id {id} appears more than once")]
    DuplicateOrderId { id: String },
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The solver produced something that breaks its own invariants.
    #[error("internal solver error: {0}")]
    Internal(String),
}

impl SolveError {
    pub fn internal(message: impl Into<String>) -> Self {
        SolveError::Internal(message.into())
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, SolveError::InvalidInput(_))
    }
}
