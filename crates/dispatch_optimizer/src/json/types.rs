use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, problem::order::Order};

pub const DEFAULT_NUM_TRUCKS: i64 = 5;

fn default_num_trucks() -> i64 {
    DEFAULT_NUM_TRUCKS
}

/// Body of an optimization request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename = "OptimizeRequest")]
pub struct JsonOptimizeRequest {
    pub orders: Vec<Order>,

    // Signed so that 0 and negative counts surface as validation errors, not parse errors.
    #[serde(default = "default_num_trucks")]
    pub num_trucks: i64,
}

impl JsonOptimizeRequest {
    pub fn truck_count(&self) -> Result<usize, ValidationError> {
        usize::try_from(self.num_trucks)
            .ok()
            .filter(|&count| count > 0)
            .ok_or(ValidationError::InvalidTruckCount(self.num_trucks))
    }
}
