use jiff::SignedDuration;

use crate::{
    error::ValidationError,
    problem::{kmh::Kmh, location::Location},
};

pub const DEFAULT_DEPOT_LAT: f64 = 36.1627;
pub const DEFAULT_DEPOT_LNG: f64 = -86.7816;
pub const DEFAULT_TRUCK_CAPACITY_KG: f64 = 1000.0;
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;
pub const DEFAULT_SERVICE_MINUTES: i64 = 5;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub depot: Location,
    pub truck_capacity_kg: f64,

    pub average_speed: Kmh,
    pub service_duration: SignedDuration,

    /// 2-opt stops after `two_opt_moves_per_stop * stops` improving moves on one route.
    pub two_opt_moves_per_stop: usize,
    /// Maximum number of orders moved between trucks by the repair pass.
    pub repair_iterations: usize,

    pub sequencing_threads: Threads,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => *num,
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            depot: Location::from_lat_lng(DEFAULT_DEPOT_LAT, DEFAULT_DEPOT_LNG),
            truck_capacity_kg: DEFAULT_TRUCK_CAPACITY_KG,
            average_speed: Kmh::new(DEFAULT_AVERAGE_SPEED_KMH),
            service_duration: SignedDuration::from_mins(DEFAULT_SERVICE_MINUTES),
            two_opt_moves_per_stop: 8,
            repair_iterations: 32,
            sequencing_threads: Threads::Auto,
        }
    }
}

impl SolverParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.depot.is_valid() {
            return Err(ValidationError::InvalidDepot {
                lat: self.depot.lat(),
                lng: self.depot.lng(),
            });
        }

        if !self.truck_capacity_kg.is_finite() || self.truck_capacity_kg <= 0.0 {
            return Err(ValidationError::InvalidCapacity(self.truck_capacity_kg));
        }

        if !self.average_speed.is_valid() {
            return Err(ValidationError::InvalidSpeed(self.average_speed.value()));
        }

        if self.service_duration.is_negative() {
            return Err(ValidationError::InvalidServiceDuration);
        }

        Ok(())
    }

    /// Number of improving 2-opt moves allowed on a route with `stops` stops.
    pub fn two_opt_budget(&self, stops: usize) -> usize {
        self.two_opt_moves_per_stop.saturating_mul(stops)
    }
}
