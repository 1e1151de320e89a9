use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{define_index_newtype, error::ValidationError, problem::location::Location};

define_index_newtype!(OrderIdx, Order);

/// A single delivery stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Order {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub weight_kg: f64,
}

impl Order {
    pub fn new(id: impl Into<String>, lat: f64, lng: f64, weight_kg: f64) -> Self {
        Order {
            id: id.into(),
            lat,
            lng,
            weight_kg,
        }
    }

    pub fn location(&self) -> Location {
        Location::from_lat_lng(self.lat, self.lng)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyOrderId);
        }

        if !self.location().is_valid() {
            return Err(ValidationError::InvalidCoordinate {
                id: self.id.clone(),
                lat: self.lat,
                lng: self.lng,
            });
        }

        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(ValidationError::InvalidWeight {
                id: self.id.clone(),
                weight_kg: self.weight_kg,
            });
        }

        Ok(())
    }
}
