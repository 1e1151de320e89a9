use jiff::SignedDuration;

use crate::{
    error::SolveError,
    problem::{
        kmh::Kmh,
        location::{Location, LocationIdx},
    },
};

pub type Distance = f64;

/// Great-circle travel estimates between the depot and every stop.
///
/// Distances are stored as a flat row-major vector, `index = from * num_locations + to`,
/// with index 0 reserved for the depot. Times are derived from distances with a constant
/// average speed, an approximation standing in for road-network routing: no external
/// routing service is ever called.
#[derive(Debug, Clone)]
pub struct TravelMatrix {
    distances: Vec<Distance>,
    num_locations: usize,
    average_speed: Kmh,
    service_duration: SignedDuration,
}

impl TravelMatrix {
    /// `locations[0]` must be the depot.
    pub fn from_haversine(
        locations: &[Location],
        average_speed: Kmh,
        service_duration: SignedDuration,
    ) -> Self {
        let num_locations = locations.len();
        let mut distances: Vec<Distance> = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate().skip(i + 1) {
                let distance = from.haversine_km(to);
                distances[i * num_locations + j] = distance;
                distances[j * num_locations + i] = distance;
            }
        }

        TravelMatrix {
            distances,
            num_locations,
            average_speed,
            service_duration,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<Vec<Distance>>, average_speed: Kmh) -> Self {
        let num_locations = rows.len();
        TravelMatrix {
            distances: rows.into_iter().flatten().collect(),
            num_locations,
            average_speed,
            service_duration: SignedDuration::ZERO,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_service_duration(mut self, service_duration: SignedDuration) -> Self {
        self.service_duration = service_duration;
        self
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    /// Kilometers between two locations.
    #[inline(always)]
    pub fn distance(&self, from: LocationIdx, to: LocationIdx) -> Distance {
        if from == to {
            return 0.0;
        }

        self.distances[self.index(from, to)]
    }

    /// Driving time only, no service time.
    pub fn drive_time(&self, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        self.average_speed.drive_time(self.distance(from, to))
    }

    /// Driving time plus the fixed service time spent at the destination stop.
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        self.drive_time(from, to) + self.service_duration
    }

    /// `minutes = (distance_km / average_speed_kmh) * 60 + service_minutes`
    pub fn estimate_travel_minutes(&self, distance_km: Distance) -> f64 {
        distance_km / self.average_speed.value() * 60.0 + self.service_minutes()
    }

    pub fn service_minutes(&self) -> f64 {
        self.service_duration.as_secs_f64() / 60.0
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    /// Length of the closed tour depot -> stops -> depot.
    pub fn closed_tour_distance(&self, stops: &[LocationIdx]) -> Distance {
        let Some((first, last)) = stops.first().zip(stops.last()) else {
            return 0.0;
        };

        let inner: Distance = stops
            .windows(2)
            .map(|pair| self.distance(pair[0], pair[1]))
            .sum();

        self.distance(LocationIdx::DEPOT, *first) + inner + self.distance(*last, LocationIdx::DEPOT)
    }

    /// Checks the matrix is square, finite, non-negative and symmetric.
    pub fn verify(&self) -> Result<(), SolveError> {
        if self.distances.len() != self.num_locations * self.num_locations {
            return Err(SolveError::internal(format!(
                "distance matrix has {} entries, expected {}",
                self.distances.len(),
                self.num_locations * self.num_locations
            )));
        }

        for i in 0..self.num_locations {
            for j in i..self.num_locations {
                let forward = self.distances[i * self.num_locations + j];
                let backward = self.distances[j * self.num_locations + i];

                if !forward.is_finite() || forward < 0.0 {
                    return Err(SolveError::internal(format!(
                        "distance matrix entry ({i}, {j}) is {forward}"
                    )));
                }

                if forward != backward {
                    return Err(SolveError::internal(format!(
                        "distance matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }

        Ok(())
    }
}
