use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Kmh(f64);

impl Kmh {
    pub fn new(value: f64) -> Self {
        Kmh(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Time needed to drive `kilometers` at this speed.
    pub fn drive_time(&self, kilometers: f64) -> SignedDuration {
        SignedDuration::from_secs_f64(kilometers * 3600.0 / self.0)
    }
}
