use tracing::{debug, warn};

use crate::{
    problem::{delivery_problem::DeliveryProblem, order::OrderIdx},
    solver::assignment::{Assignment, TruckLoad, UnassignedOrder, UnassignedReason},
    utils::enumerate_idx::EnumerateIdx,
};

/// Orders sorted by compass bearing from the depot, then by distance from the depot,
/// then by id. The key is total, so the sweep is reproducible for any input order.
pub fn sweep_order(problem: &DeliveryProblem) -> Vec<OrderIdx> {
    let mut keyed: Vec<(f64, f64, OrderIdx)> = problem
        .orders()
        .iter()
        .enumerate_idx()
        .map(|(order_id, _)| {
            (
                problem.bearing_from_depot(order_id),
                problem.distance_from_depot(order_id),
                order_id,
            )
        })
        .collect();

    keyed.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.total_cmp(&b.1))
            .then_with(|| problem.order(a.2).id.cmp(&problem.order(b.2).id))
    });

    keyed.into_iter().map(|(_, _, order_id)| order_id).collect()
}

/// Single pass over the sweep order, filling truck after truck.
///
/// An order heavier than a truck goes straight to the unassigned list. Once every truck
/// has been closed, whatever is left in sweep order is unassigned: orders early in the
/// sweep are always served before later ones.
///
/// At most one truck per order can be loaded, so only `min(num_trucks, orders)` slots
/// are opened.
pub fn sweep_assign(problem: &DeliveryProblem) -> Assignment {
    let fleet = problem.fleet();
    let num_trucks = fleet.num_trucks().min(problem.orders().len());

    let mut assignment = Assignment {
        trucks: vec![TruckLoad::default(); num_trucks],
        unassigned: Vec::new(),
    };
    let mut current = 0;

    for order_id in sweep_order(problem) {
        let order = problem.order(order_id);

        if !fleet.can_carry(order.weight_kg) {
            warn!(
                order = %order.id,
                weight_kg = order.weight_kg,
                capacity_kg = fleet.truck_capacity_kg(),
                "order exceeds truck capacity, leaving it unassigned"
            );
            assignment.unassigned.push(UnassignedOrder {
                order_id,
                reason: UnassignedReason::Overweight,
            });
            continue;
        }

        if current < num_trucks
            && assignment.trucks[current].load_kg() + order.weight_kg > fleet.truck_capacity_kg()
        {
            debug!(
                truck = current + 1,
                load_kg = assignment.trucks[current].load_kg(),
                "truck full, moving to the next one"
            );
            current += 1;
        }

        if current >= num_trucks {
            warn!(order = %order.id, "fleet is full, leaving order unassigned");
            assignment.unassigned.push(UnassignedOrder {
                order_id,
                reason: UnassignedReason::FleetFull,
            });
            continue;
        }

        assignment.trucks[current].push(problem, order_id);
    }

    assignment
}
