use std::path::Path;

use comfy_table::{Table, presets::UTF8_FULL};
use dispatch_optimizer::solution::optimization_result::OptimizationResult;
use jiff::SignedDuration;

pub fn routes_table(result: &OptimizationResult) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Route",
        "Stops",
        "Load (kg)",
        "Distance (km)",
        "Duration (min)",
        "Sequence",
    ]);

    for route in &result.routes {
        table.add_row(vec![
            route.route_id.to_string(),
            route.stop_sequence.len().to_string(),
            format!("{:.1}", route.truck_load),
            format!("{:.3}", route.total_distance_km),
            format!("{:.1}", route.total_duration_min),
            route.stop_sequence.join(" > "),
        ]);
    }

    if !result.unassigned_orders.is_empty() {
        let ids: Vec<&str> = result
            .unassigned_orders
            .iter()
            .map(|order| order.id.as_str())
            .collect();

        table.add_row(vec![
            "unassigned".to_string(),
            ids.len().to_string(),
            format!(
                "{:.1}",
                result
                    .unassigned_orders
                    .iter()
                    .map(|order| order.weight_kg)
                    .sum::<f64>()
            ),
            String::new(),
            String::new(),
            ids.join(", "),
        ]);
    }

    table
}

pub fn summary_line(path: &Path, result: &OptimizationResult, elapsed: SignedDuration) -> String {
    format!(
        "{}: orders = {}, routes = {}, unassigned = {}, distance = {:.3} km, took {:?}",
        path.display(),
        result.num_orders,
        result.routes.len(),
        result.unassigned_orders.len(),
        result.total_distance_km,
        elapsed,
    )
}
