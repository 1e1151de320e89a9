use crate::problem::{location::LocationIdx, travel_matrix::TravelMatrix};

/// Starting at the depot, repeatedly visits the closest unvisited stop.
///
/// Ties keep the stop that comes first in `stops`.
pub fn construct(matrix: &TravelMatrix, stops: &[LocationIdx]) -> Vec<LocationIdx> {
    let mut remaining = stops.to_vec();
    let mut tour = Vec::with_capacity(stops.len());
    let mut current = LocationIdx::DEPOT;

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut nearest_distance = matrix.distance(current, remaining[0]);

        for (position, &candidate) in remaining.iter().enumerate().skip(1) {
            let distance = matrix.distance(current, candidate);
            if distance < nearest_distance {
                nearest = position;
                nearest_distance = distance;
            }
        }

        current = remaining.remove(nearest);
        tour.push(current);
    }

    tour
}

#[cfg(test)]
mod tests {
    use crate::problem::{kmh::Kmh, location::LocationIdx, travel_matrix::TravelMatrix};

    use super::construct;

    fn idx(values: &[usize]) -> Vec<LocationIdx> {
        values.iter().map(|&v| LocationIdx::new(v)).collect()
    }

    #[test]
    fn test_construct_on_a_line() {
        // depot at 0, stops at positions 3, 1, 2 on a line
        let positions = [0.0, 3.0, 1.0, 2.0_f64];
        let rows = positions
            .iter()
            .map(|a| positions.iter().map(|b| (a - b).abs()).collect())
            .collect();
        let matrix = TravelMatrix::from_rows(rows, Kmh::new(40.0));

        assert_eq!(construct(&matrix, &idx(&[1, 2, 3])), idx(&[2, 3, 1]));
    }

    #[test]
    fn test_construct_tie_keeps_first() {
        let matrix = TravelMatrix::from_rows(
            vec![
                vec![0.0, 1.0, 1.0],
                vec![1.0, 0.0, 2.0],
                vec![1.0, 2.0, 0.0],
            ],
            Kmh::new(40.0),
        );

        assert_eq!(construct(&matrix, &idx(&[2, 1])), idx(&[2, 1]));
        assert_eq!(construct(&matrix, &idx(&[1, 2])), idx(&[1, 2]));
        assert!(construct(&matrix, &[]).is_empty());
    }
}
