use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StopEta {
    pub order_id: String,
    pub eta_minutes: f64,
    pub distance_from_depot_km: f64,
}

/// One truck's delivery run, as rendered by the dashboard.
///
/// Coordinates are `[lat, lng]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Route {
    pub route_id: usize,
    pub stop_sequence: Vec<String>,
    pub truck_load: f64,
    #[serde(rename = "total_distance")]
    pub total_distance_km: f64,
    #[serde(rename = "total_duration")]
    pub total_duration_min: f64,
    pub stop_etas: Vec<StopEta>,
    pub delivery_polyline: Vec<[f64; 2]>,
    pub return_polyline: Vec<[f64; 2]>,
    pub polyline: Vec<[f64; 2]>,
}
