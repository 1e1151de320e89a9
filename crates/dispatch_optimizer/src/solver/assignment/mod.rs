pub mod repair;
pub mod sweep;

use tracing::instrument;

use crate::{
    problem::{delivery_problem::DeliveryProblem, order::OrderIdx},
    solver::solver_params::SolverParams,
};

/// Orders carried by one truck. Slot `i` becomes `route_id = i + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TruckLoad {
    orders: Vec<OrderIdx>,
    load_kg: f64,
}

impl TruckLoad {
    pub fn orders(&self) -> &[OrderIdx] {
        &self.orders
    }

    pub fn load_kg(&self) -> f64 {
        self.load_kg
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub(crate) fn push(&mut self, problem: &DeliveryProblem, order_id: OrderIdx) {
        self.orders.push(order_id);
        self.load_kg += problem.order(order_id).weight_kg;
    }

    pub(crate) fn remove(&mut self, problem: &DeliveryProblem, position: usize) -> OrderIdx {
        let order_id = self.orders.remove(position);
        self.recompute_load(problem);
        order_id
    }

    // Summed from scratch so repeated moves never accumulate float drift.
    fn recompute_load(&mut self, problem: &DeliveryProblem) {
        self.load_kg = self
            .orders
            .iter()
            .map(|&order_id| problem.order(order_id).weight_kg)
            .sum();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignedReason {
    /// Heavier than a single truck can carry.
    Overweight,
    /// Every truck was already full when the sweep reached the order.
    FleetFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnassignedOrder {
    pub order_id: OrderIdx,
    pub reason: UnassignedReason,
}

/// Partition of the orders over the fleet. `trucks` has one slot per truck that could be loaded,
/// `min(num_trucks, orders)`.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub trucks: Vec<TruckLoad>,
    pub unassigned: Vec<UnassignedOrder>,
}

impl Assignment {
    pub fn assigned_count(&self) -> usize {
        self.trucks.iter().map(TruckLoad::len).sum()
    }

    pub fn unassigned_count(&self, reason: UnassignedReason) -> usize {
        self.unassigned
            .iter()
            .filter(|unassigned| unassigned.reason == reason)
            .count()
    }
}

/// Sweep-and-fill followed by the bounded repair pass.
#[instrument(skip_all, level = "debug")]
pub fn assign_orders(problem: &DeliveryProblem, params: &SolverParams) -> Assignment {
    let mut assignment = sweep::sweep_assign(problem);
    repair::repair(problem, &mut assignment, params.repair_iterations);
    assignment
}
