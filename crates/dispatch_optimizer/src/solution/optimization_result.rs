use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{problem::order::Order, solution::route::Route};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OptimizationResult {
    pub routes: Vec<Route>,
    pub unassigned_orders: Vec<Order>,
    pub total_distance_km: f64,
    pub truck_capacity_kg: f64,
    pub num_trucks: usize,
    pub num_orders: usize,
}

impl OptimizationResult {
    /// Result for a request without orders: nothing to route, nothing left over.
    pub fn empty(num_trucks: usize, truck_capacity_kg: f64) -> Self {
        OptimizationResult {
            routes: Vec::new(),
            unassigned_orders: Vec::new(),
            total_distance_km: 0.0,
            truck_capacity_kg,
            num_trucks,
            num_orders: 0,
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.routes.iter().map(|route| route.stop_sequence.len()).sum()
    }
}
