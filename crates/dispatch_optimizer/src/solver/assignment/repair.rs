use tracing::{debug, instrument};

use crate::{
    problem::{
        delivery_problem::DeliveryProblem,
        location::LocationIdx,
        order::OrderIdx,
        travel_matrix::{Distance, TravelMatrix},
    },
    solver::{assignment::Assignment, sequencing::nearest_neighbor},
};

const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Nearest-neighbor tour of one truck's group, the shape moves are scored against.
fn estimated_tour(problem: &DeliveryProblem, orders: &[OrderIdx]) -> Vec<LocationIdx> {
    let stops: Vec<LocationIdx> = orders
        .iter()
        .map(|&order_id| problem.location_id(order_id))
        .collect();

    nearest_neighbor::construct(problem.matrix(), &stops)
}

#[derive(Debug)]
struct RelocateMove {
    from_truck: usize,
    position: usize,
    to_truck: usize,
    delta: f64,
}

/// Distance saved by taking the stop at `position` out of `tour` and joining its neighbors.
fn removal_saving(matrix: &TravelMatrix, tour: &[LocationIdx], position: usize) -> Distance {
    let stop = tour[position];
    let prev = if position == 0 {
        LocationIdx::DEPOT
    } else {
        tour[position - 1]
    };
    let next = tour.get(position + 1).copied().unwrap_or(LocationIdx::DEPOT);

    matrix.distance(prev, stop) + matrix.distance(stop, next) - matrix.distance(prev, next)
}

/// Cheapest detour for visiting `stop` somewhere along `tour`, depot legs included.
fn insertion_cost(matrix: &TravelMatrix, tour: &[LocationIdx], stop: LocationIdx) -> Distance {
    (0..=tour.len())
        .map(|gap| {
            let prev = if gap == 0 {
                LocationIdx::DEPOT
            } else {
                tour[gap - 1]
            };
            let next = tour.get(gap).copied().unwrap_or(LocationIdx::DEPOT);

            matrix.distance(prev, stop) + matrix.distance(stop, next) - matrix.distance(prev, next)
        })
        .fold(f64::INFINITY, f64::min)
}

/// Moves single orders between trucks while that shortens the trucks' estimated tours,
/// applying the best move each round. Unassigned orders are left alone.
///
/// A move is scored as the cheapest insertion into the target tour minus the saving of
/// removing the order from its own tour, so one round costs a scan over every stop of
/// every other truck. The two touched tours are rebuilt after each move.
///
/// Returns the number of moves applied, never more than `max_iterations`.
#[instrument(skip_all, level = "debug")]
pub fn repair(problem: &DeliveryProblem, assignment: &mut Assignment, max_iterations: usize) -> usize {
    if assignment.trucks.len() < 2 || max_iterations == 0 {
        return 0;
    }

    let mut tours: Vec<Vec<LocationIdx>> = assignment
        .trucks
        .iter()
        .map(|truck| estimated_tour(problem, truck.orders()))
        .collect();

    let mut tour_positions = vec![0; problem.matrix().num_locations()];
    for tour in &tours {
        index_tour(&mut tour_positions, tour);
    }

    let mut applied = 0;
    while applied < max_iterations {
        let Some(best) = find_best_move(problem, assignment, &tours, &tour_positions) else {
            break;
        };

        let order_id = assignment.trucks[best.from_truck].remove(problem, best.position);
        assignment.trucks[best.to_truck].push(problem, order_id);

        for truck in [best.from_truck, best.to_truck] {
            tours[truck] = estimated_tour(problem, assignment.trucks[truck].orders());
            index_tour(&mut tour_positions, &tours[truck]);
        }
        applied += 1;

        debug!(
            order = %problem.order(order_id).id,
            from = best.from_truck + 1,
            to = best.to_truck + 1,
            delta_km = best.delta,
            "repair moved order"
        );
    }

    applied
}

fn index_tour(tour_positions: &mut [usize], tour: &[LocationIdx]) {
    for (position, stop) in tour.iter().enumerate() {
        tour_positions[stop.get()] = position;
    }
}

// Scans (from truck, position, to truck) in index order and keeps the first strictly best
// move, so equal deltas resolve to the earliest candidate.
fn find_best_move(
    problem: &DeliveryProblem,
    assignment: &Assignment,
    tours: &[Vec<LocationIdx>],
    tour_positions: &[usize],
) -> Option<RelocateMove> {
    let matrix = problem.matrix();
    let capacity = problem.fleet().truck_capacity_kg();
    let mut best: Option<RelocateMove> = None;

    for (from_truck, truck) in assignment.trucks.iter().enumerate() {
        for (position, &order_id) in truck.orders().iter().enumerate() {
            let weight = problem.order(order_id).weight_kg;
            let stop = problem.location_id(order_id);
            let saving = removal_saving(matrix, &tours[from_truck], tour_positions[stop.get()]);

            for (to_truck, target) in assignment.trucks.iter().enumerate() {
                if to_truck == from_truck || target.load_kg() + weight > capacity {
                    continue;
                }

                let delta = insertion_cost(matrix, &tours[to_truck], stop) - saving;
                if delta < -IMPROVEMENT_EPSILON
                    && best.as_ref().is_none_or(|current| delta < current.delta)
                {
                    best = Some(RelocateMove {
                        from_truck,
                        position,
                        to_truck,
                        delta,
                    });
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::{delivery_problem::DeliveryProblem, location::LocationIdx},
        solver::assignment::{Assignment, sweep::sweep_assign},
        test_utils::{self, order_offset},
    };

    use super::{estimated_tour, find_best_move, index_tour, repair};

    fn ids(problem: &DeliveryProblem, assignment: &Assignment, truck: usize) -> Vec<String> {
        let mut ids: Vec<String> = assignment.trucks[truck]
            .orders()
            .iter()
            .map(|&order_id| problem.order(order_id).id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn total_cost(problem: &DeliveryProblem, assignment: &Assignment) -> f64 {
        assignment
            .trucks
            .iter()
            .map(|truck| {
                problem
                    .matrix()
                    .closed_tour_distance(&estimated_tour(problem, truck.orders()))
            })
            .sum()
    }

    fn create_problem() -> DeliveryProblem {
        // A is just north of the depot, B and C are close to each other far to the south.
        test_utils::create_test_problem_with_capacity(
            vec![
                order_offset("A", 0.01, 0.0, 60.0),
                order_offset("B", -0.09, 0.015, 30.0),
                order_offset("C", -0.09, -0.015, 50.0),
            ],
            2,
            100.0,
        )
    }

    #[test]
    fn test_repair_moves_order_to_its_neighbour() {
        let problem = create_problem();
        let mut assignment = sweep_assign(&problem);

        assert_eq!(ids(&problem, &assignment, 0), vec!["A", "B"]);
        assert_eq!(ids(&problem, &assignment, 1), vec!["C"]);

        let before = total_cost(&problem, &assignment);
        let applied = repair(&problem, &mut assignment, 10);

        assert_eq!(applied, 1);
        assert_eq!(ids(&problem, &assignment, 0), vec!["A"]);
        assert_eq!(ids(&problem, &assignment, 1), vec!["B", "C"]);
        assert_eq!(assignment.trucks[0].load_kg(), 60.0);
        assert_eq!(assignment.trucks[1].load_kg(), 80.0);
        assert!(total_cost(&problem, &assignment) < before);
    }

    #[test]
    fn test_move_delta_is_insertion_minus_removal() {
        let problem = create_problem();
        let assignment = sweep_assign(&problem);
        let matrix = problem.matrix();

        let tours: Vec<Vec<LocationIdx>> = assignment
            .trucks
            .iter()
            .map(|truck| estimated_tour(&problem, truck.orders()))
            .collect();
        let mut tour_positions = vec![0; matrix.num_locations()];
        for tour in &tours {
            index_tour(&mut tour_positions, tour);
        }

        let best = find_best_move(&problem, &assignment, &tours, &tour_positions).unwrap();

        // Location ids follow input order after the depot: A = 1, B = 2, C = 3.
        let (depot, a, b, c) = (
            LocationIdx::DEPOT,
            LocationIdx::new(1),
            LocationIdx::new(2),
            LocationIdx::new(3),
        );
        let saving = matrix.distance(a, b) + matrix.distance(b, depot) - matrix.distance(a, depot);
        let insertion = matrix.distance(depot, b) + matrix.distance(b, c) - matrix.distance(depot, c);

        assert_eq!((best.from_truck, best.position, best.to_truck), (0, 1, 1));
        assert!((best.delta - (insertion - saving)).abs() < 1e-9);
    }

    #[test]
    fn test_repair_respects_iteration_cap() {
        let problem = create_problem();
        let mut assignment = sweep_assign(&problem);

        assert_eq!(repair(&problem, &mut assignment, 0), 0);
        assert_eq!(ids(&problem, &assignment, 0), vec!["A", "B"]);
    }

    #[test]
    fn test_repair_respects_capacity() {
        // Same geometry, but C is too heavy to share a truck with B.
        let problem = test_utils::create_test_problem_with_capacity(
            vec![
                order_offset("A", 0.01, 0.0, 60.0),
                order_offset("B", -0.09, 0.015, 30.0),
                order_offset("C", -0.09, -0.015, 80.0),
            ],
            2,
            100.0,
        );
        let mut assignment = sweep_assign(&problem);

        repair(&problem, &mut assignment, 10);

        for truck in &assignment.trucks {
            assert!(truck.load_kg() <= 100.0);
        }
        assert_eq!(ids(&problem, &assignment, 1), vec!["C"]);
    }

    #[test]
    fn test_repair_on_large_routes() {
        let orders = (0..800)
            .map(|i| {
                let angle = i as f64 * 2.399_963;
                let radius = 0.01 + (i % 17) as f64 * 0.01;
                order_offset(
                    &format!("ORD-{i:04}"),
                    radius * angle.sin(),
                    radius * angle.cos(),
                    1.0,
                )
            })
            .collect();
        let problem = test_utils::create_test_problem_with_capacity(orders, 2, 500.0);
        let mut assignment = sweep_assign(&problem);

        let applied = repair(&problem, &mut assignment, 32);

        assert!(applied <= 32);
        assert_eq!(assignment.assigned_count(), 800);
        for truck in &assignment.trucks {
            assert!(truck.load_kg() <= 500.0);
        }
    }
}
