use jiff::SignedDuration;

use crate::problem::{
    location::LocationIdx,
    travel_matrix::{Distance, TravelMatrix},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopTiming {
    pub location_id: LocationIdx,
    /// Elapsed time since leaving the depot, service at this stop included.
    pub eta: SignedDuration,
    /// Distance driven from the depot along the route up to this stop.
    pub distance_from_depot: Distance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteTiming {
    pub stops: Vec<StopTiming>,
    pub delivery_distance: Distance,
    pub return_distance: Distance,
    pub total_duration: SignedDuration,
}

impl RouteTiming {
    pub fn total_distance(&self) -> Distance {
        self.delivery_distance + self.return_distance
    }
}

/// Walks the sequence from the depot: each leg into a stop costs its driving time plus the
/// stop's service time, the final leg back to the depot costs driving time only.
pub fn project(matrix: &TravelMatrix, stops: &[LocationIdx]) -> RouteTiming {
    let mut elapsed = SignedDuration::ZERO;
    let mut driven: Distance = 0.0;
    let mut previous = LocationIdx::DEPOT;
    let mut timings = Vec::with_capacity(stops.len());

    for &location_id in stops {
        elapsed += matrix.travel_time(previous, location_id);
        driven += matrix.distance(previous, location_id);

        timings.push(StopTiming {
            location_id,
            eta: elapsed,
            distance_from_depot: driven,
        });
        previous = location_id;
    }

    let return_distance = matrix.distance(previous, LocationIdx::DEPOT);
    let total_duration = elapsed + matrix.drive_time(previous, LocationIdx::DEPOT);

    RouteTiming {
        stops: timings,
        delivery_distance: driven,
        return_distance,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use crate::problem::{kmh::Kmh, location::LocationIdx, travel_matrix::TravelMatrix};

    use super::project;

    #[test]
    fn test_project_accumulates_travel_and_service() {
        let matrix = TravelMatrix::from_rows(
            vec![
                vec![0.0, 20.0, 30.0],
                vec![20.0, 0.0, 10.0],
                vec![30.0, 10.0, 0.0],
            ],
            Kmh::new(40.0),
        )
        .with_service_duration(SignedDuration::from_mins(5));

        let timing = project(&matrix, &[LocationIdx::new(1), LocationIdx::new(2)]);

        // 20 km at 40 km/h = 30 min + 5 min service
        assert_eq!(timing.stops[0].eta, SignedDuration::from_mins(35));
        assert_eq!(timing.stops[0].distance_from_depot, 20.0);
        // + 10 km = 15 min + 5 min service
        assert_eq!(timing.stops[1].eta, SignedDuration::from_mins(55));
        assert_eq!(timing.stops[1].distance_from_depot, 30.0);
        // + 30 km return = 45 min, no service at the depot
        assert_eq!(timing.total_duration, SignedDuration::from_mins(100));
        assert_eq!(timing.delivery_distance, 30.0);
        assert_eq!(timing.return_distance, 30.0);
        assert_eq!(timing.total_distance(), 60.0);
    }

    #[test]
    fn test_project_empty_route() {
        let matrix = TravelMatrix::from_rows(vec![vec![0.0]], Kmh::new(40.0));
        let timing = project(&matrix, &[]);

        assert!(timing.stops.is_empty());
        assert_eq!(timing.total_duration, SignedDuration::ZERO);
        assert_eq!(timing.total_distance(), 0.0);
    }
}
