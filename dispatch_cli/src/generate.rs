use std::path::PathBuf;

use clap::Subcommand;
use dispatch_optimizer::{
    json::types::JsonOptimizeRequest,
    problem::order::Order,
    solver::solver_params::{DEFAULT_DEPOT_LAT, DEFAULT_DEPOT_LNG},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::info;

use crate::file_utils::write_json;

const LAT_SPREAD: f64 = 0.08;
const LNG_SPREAD: f64 = 0.10;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// Random orders scattered around the depot
    Sample {
        #[arg(short = 'n', long, default_value_t = 50)]
        orders: usize,

        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[arg(long, default_value_t = 5)]
        trucks: i64,

        #[arg(long, short = 'o')]
        out: PathBuf,
    },
    JsonSchema {
        /// Output file for the request schema
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::Sample {
            orders,
            seed,
            trucks,
            out,
        } => {
            let request = JsonOptimizeRequest {
                orders: sample_orders(orders, seed),
                num_trucks: trucks,
            };

            write_json(&out, &request)?;
            info!("Wrote {} orders to {:?}", orders, out);
        }
        GenerateSubcommands::JsonSchema { out } => {
            let schema = dispatch_optimizer::json::schema::generate_json_schema()?;

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
    }

    Ok(())
}

pub fn sample_orders(count: usize, seed: u64) -> Vec<Order> {
    let mut rng = SmallRng::seed_from_u64(seed);

    (1..=count)
        .map(|i| {
            Order::new(
                format!("ORD-{i:03}"),
                DEFAULT_DEPOT_LAT + rng.random_range(-LAT_SPREAD..=LAT_SPREAD),
                DEFAULT_DEPOT_LNG + rng.random_range(-LNG_SPREAD..=LNG_SPREAD),
                rng.random_range(20_u32..=300) as f64,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sample_orders;

    #[test]
    fn test_sample_orders() {
        let orders = sample_orders(50, 42);

        assert_eq!(orders.len(), 50);
        assert_eq!(orders[0].id, "ORD-001");
        assert!(orders.iter().all(|order| order.validate().is_ok()));
        assert!(
            orders
                .iter()
                .all(|order| (20.0..=300.0).contains(&order.weight_kg)
                    && order.weight_kg.fract() == 0.0)
        );

        assert_eq!(orders, sample_orders(50, 42));
        assert_ne!(orders, sample_orders(50, 7));
    }
}
