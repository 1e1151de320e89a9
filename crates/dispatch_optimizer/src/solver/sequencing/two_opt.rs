use crate::problem::{location::LocationIdx, travel_matrix::TravelMatrix};

const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// **Intra-Route 2-Opt**
///
/// Reverses the stops between `from` and `to` (inclusive) of a closed depot tour.
/// This eliminates crossing edges within a single route.
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///          ^             ^               ^            ^
///          A             B               C            D
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///          ^             ^               ^            ^
///          A             C               B            D
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
///
/// Positions are 1-based over `depot, stops.., depot`, so `prev` and `next` may be the depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    pub from: usize,
    pub to: usize,
}

impl TwoOptMove {
    pub fn new(from: usize, to: usize) -> Self {
        if from == 0 || from >= to {
            panic!("TwoOpt: cannot have from >= to or move the depot")
        }

        TwoOptMove { from, to }
    }

    /// Change in tour length if the move were applied. Requires a symmetric matrix.
    pub fn delta(&self, matrix: &TravelMatrix, tour: &[LocationIdx]) -> f64 {
        let prev = node(tour, self.from - 1);
        let from = node(tour, self.from);
        let to = node(tour, self.to);
        let next = node(tour, self.to + 1);

        let current_cost = matrix.distance(prev, from) + matrix.distance(to, next);
        let new_cost = matrix.distance(prev, to) + matrix.distance(from, next);

        new_cost - current_cost
    }

    pub fn apply(&self, tour: &mut [LocationIdx]) {
        tour[self.from - 1..self.to].reverse();
    }
}

// Position 0 and position `len + 1` are the depot.
#[inline]
fn node(tour: &[LocationIdx], position: usize) -> LocationIdx {
    if position == 0 || position > tour.len() {
        LocationIdx::DEPOT
    } else {
        tour[position - 1]
    }
}

/// First-improvement 2-opt: applies the lexicographically smallest `(from, to)` reversal
/// that strictly shortens the tour, then rescans, until no reversal improves or
/// `max_moves` moves were applied. Returns the number of applied moves.
///
/// The tour length never increases.
pub fn improve(matrix: &TravelMatrix, tour: &mut [LocationIdx], max_moves: usize) -> usize {
    let len = tour.len();

    // Reversing one or two stops of a symmetric tour never changes its length.
    if len < 3 {
        return 0;
    }

    let mut moves = 0;
    'search: while moves < max_moves {
        for from in 1..len {
            for to in (from + 1)..=len {
                let two_opt = TwoOptMove::new(from, to);

                if two_opt.delta(matrix, tour) < -IMPROVEMENT_EPSILON {
                    two_opt.apply(tour);
                    moves += 1;
                    continue 'search;
                }
            }
        }

        break;
    }

    moves
}

#[cfg(test)]
mod tests {
    use crate::problem::{kmh::Kmh, location::LocationIdx, travel_matrix::TravelMatrix};

    use super::{TwoOptMove, improve};

    fn idx(values: &[usize]) -> Vec<LocationIdx> {
        values.iter().map(|&v| LocationIdx::new(v)).collect()
    }

    /// Euclidean matrix over points, point 0 being the depot.
    fn create_matrix(points: &[(f64, f64)]) -> TravelMatrix {
        let rows = points
            .iter()
            .map(|a| {
                points
                    .iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                    .collect()
            })
            .collect();

        TravelMatrix::from_rows(rows, Kmh::new(40.0))
    }

    fn square() -> TravelMatrix {
        // depot (0,0), then the other corners of a unit square
        create_matrix(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_two_opt_delta_matches_applied_change() {
        let matrix = square();
        // depot -> (1,0) -> (0,1) -> (1,1) -> depot crosses itself
        let mut tour = idx(&[1, 3, 2]);
        let before = matrix.closed_tour_distance(&tour);

        let two_opt = TwoOptMove::new(2, 3);
        let delta = two_opt.delta(&matrix, &tour);
        two_opt.apply(&mut tour);

        assert_eq!(tour, idx(&[1, 2, 3]));
        assert!((matrix.closed_tour_distance(&tour) - (before + delta)).abs() < 1e-12);
        assert!(delta < 0.0);
    }

    #[test]
    fn test_improve_uncrosses_tour() {
        let matrix = square();
        let mut tour = idx(&[1, 3, 2]);

        let moves = improve(&matrix, &mut tour, 10);

        assert_eq!(moves, 1);
        assert_eq!(tour, idx(&[1, 2, 3]));
        assert!((matrix.closed_tour_distance(&tour) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_improve_respects_budget() {
        let matrix = square();
        let mut tour = idx(&[1, 3, 2]);

        assert_eq!(improve(&matrix, &mut tour, 0), 0);
        assert_eq!(tour, idx(&[1, 3, 2]));
    }

    #[test]
    fn test_improve_never_lengthens() {
        let points: Vec<(f64, f64)> = (0..12)
            .map(|i| {
                let angle = i as f64 * 2.399_963;
                let radius = 1.0 + (i % 5) as f64;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        let matrix = create_matrix(&points);
        let mut tour: Vec<LocationIdx> = (1..points.len()).rev().map(LocationIdx::new).collect();

        let before = matrix.closed_tour_distance(&tour);
        improve(&matrix, &mut tour, 1000);
        let after = matrix.closed_tour_distance(&tour);

        assert!(after <= before);

        let mut sorted = tour.clone();
        sorted.sort();
        assert_eq!(sorted, (1..points.len()).map(LocationIdx::new).collect::<Vec<_>>());
    }

    #[test]
    fn test_short_tours_are_untouched() {
        let matrix = square();
        let mut tour = idx(&[2, 1]);

        assert_eq!(improve(&matrix, &mut tour, 10), 0);
        assert_eq!(tour, idx(&[2, 1]));
    }

    #[test]
    fn test_improve_ties_take_earliest_reversal() {
        // 0-2 and 1-3 are short, every other pair is 5 apart
        let rows = vec![
            vec![0.0, 5.0, 2.0, 5.0],
            vec![5.0, 0.0, 5.0, 2.0],
            vec![2.0, 5.0, 0.0, 5.0],
            vec![5.0, 2.0, 5.0, 0.0],
        ];
        let matrix = TravelMatrix::from_rows(rows, Kmh::new(40.0));
        let mut tour = idx(&[1, 2, 3]);

        let first = TwoOptMove::new(1, 2).delta(&matrix, &tour);
        let second = TwoOptMove::new(2, 3).delta(&matrix, &tour);
        assert_eq!(first, -6.0);
        assert_eq!(first, second);

        let moves = improve(&matrix, &mut tour, 1);

        assert_eq!(moves, 1);
        assert_eq!(tour, idx(&[2, 1, 3]));
    }

    #[test]
    #[should_panic]
    fn test_two_opt_rejects_depot_move() {
        TwoOptMove::new(0, 2);
    }
}
