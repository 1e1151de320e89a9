use crate::error::ValidationError;

/// Homogeneous fleet: every truck has the same capacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fleet {
    num_trucks: usize,
    truck_capacity_kg: f64,
}

impl Fleet {
    pub fn new(num_trucks: usize, truck_capacity_kg: f64) -> Result<Self, ValidationError> {
        if num_trucks == 0 {
            return Err(ValidationError::InvalidTruckCount(0));
        }

        if !truck_capacity_kg.is_finite() || truck_capacity_kg <= 0.0 {
            return Err(ValidationError::InvalidCapacity(truck_capacity_kg));
        }

        Ok(Fleet {
            num_trucks,
            truck_capacity_kg,
        })
    }

    #[inline]
    pub fn num_trucks(&self) -> usize {
        self.num_trucks
    }

    #[inline]
    pub fn truck_capacity_kg(&self) -> f64 {
        self.truck_capacity_kg
    }

    pub fn can_carry(&self, weight_kg: f64) -> bool {
        weight_kg <= self.truck_capacity_kg
    }
}
