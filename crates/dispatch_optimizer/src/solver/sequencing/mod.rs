pub mod nearest_neighbor;
pub mod two_opt;

use tracing::{instrument, trace};

use crate::{
    problem::{
        delivery_problem::DeliveryProblem,
        location::LocationIdx,
        order::OrderIdx,
        travel_matrix::Distance,
    },
    solver::solver_params::SolverParams,
};

/// Visiting order of one truck. `stops` excludes the depot at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencedRoute {
    stops: Vec<LocationIdx>,
    construction_distance: Distance,
    distance: Distance,
    two_opt_moves: usize,
}

impl SequencedRoute {
    pub fn stops(&self) -> &[LocationIdx] {
        &self.stops
    }

    pub fn order_ids<'a>(
        &'a self,
        problem: &'a DeliveryProblem,
    ) -> impl Iterator<Item = OrderIdx> + 'a {
        self.stops
            .iter()
            .filter_map(|&location_id| problem.order_id(location_id))
    }

    /// Closed tour length after nearest-neighbor construction, before 2-opt.
    pub fn construction_distance(&self) -> Distance {
        self.construction_distance
    }

    /// Closed tour length of the final sequence.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn two_opt_moves(&self) -> usize {
        self.two_opt_moves
    }

    /// Depot followed by every stop in visiting order.
    pub fn delivery_polyline(&self, problem: &DeliveryProblem) -> Vec<[f64; 2]> {
        std::iter::once(problem.depot().to_lat_lng())
            .chain(
                self.stops
                    .iter()
                    .map(|&location_id| problem.location(location_id).to_lat_lng()),
            )
            .collect()
    }

    /// Straight segment from the last stop back to the depot.
    pub fn return_polyline(&self, problem: &DeliveryProblem) -> Vec<[f64; 2]> {
        match self.stops.last() {
            Some(&last) => vec![
                problem.location(last).to_lat_lng(),
                problem.depot().to_lat_lng(),
            ],
            None => vec![problem.depot().to_lat_lng()],
        }
    }

    /// Closed path depot -> stops -> depot.
    pub fn polyline(&self, problem: &DeliveryProblem) -> Vec<[f64; 2]> {
        let mut polyline = self.delivery_polyline(problem);
        polyline.push(problem.depot().to_lat_lng());
        polyline
    }
}

/// Nearest-neighbor construction followed by budgeted 2-opt.
#[instrument(skip_all, level = "debug", fields(stops = orders.len()))]
pub fn sequence_route(
    problem: &DeliveryProblem,
    orders: &[OrderIdx],
    params: &SolverParams,
) -> SequencedRoute {
    let matrix = problem.matrix();
    let stops: Vec<LocationIdx> = orders
        .iter()
        .map(|&order_id| problem.location_id(order_id))
        .collect();

    let mut tour = nearest_neighbor::construct(matrix, &stops);
    let construction_distance = matrix.closed_tour_distance(&tour);

    let budget = params.two_opt_budget(tour.len());
    let two_opt_moves = two_opt::improve(matrix, &mut tour, budget);
    let distance = matrix.closed_tour_distance(&tour);

    trace!(construction_distance, distance, two_opt_moves, "sequenced route");

    SequencedRoute {
        stops: tour,
        construction_distance,
        distance,
        two_opt_moves,
    }
}
