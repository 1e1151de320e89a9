use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Args;
use dispatch_optimizer::{
    json::types::JsonOptimizeRequest,
    problem::kmh::Kmh,
    solver::{solver::Solver, solver_params::SolverParams},
};
use jiff::SignedDuration;
use tracing::info;

use crate::{file_utils::write_json, summary};

#[derive(Args)]
pub struct OptimizeArgs {
    /// The request file to optimize
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Write the JSON result to this file
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Truck capacity in kg
    #[arg(long)]
    capacity: Option<f64>,

    /// Average speed in km/h
    #[arg(long)]
    speed: Option<f64>,

    #[arg(long)]
    service_minutes: Option<i64>,
}

impl OptimizeArgs {
    fn solver_params(&self) -> SolverParams {
        let defaults = SolverParams::default();

        SolverParams {
            truck_capacity_kg: self.capacity.unwrap_or(defaults.truck_capacity_kg),
            average_speed: self.speed.map(Kmh::new).unwrap_or(defaults.average_speed),
            service_duration: self
                .service_minutes
                .map(SignedDuration::from_mins)
                .unwrap_or(defaults.service_duration),
            ..defaults
        }
    }
}

pub fn read_request(path: &Path) -> anyhow::Result<JsonOptimizeRequest> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let request = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a valid request", path.display()))?;

    Ok(request)
}

pub fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let request = read_request(&args.input)?;
    let solver = Solver::new(args.solver_params());

    info!(
        "Optimizing {} orders with {} trucks",
        request.orders.len(),
        request.num_trucks
    );

    let result = solver.solve_request(request)?;

    println!("{}", summary::routes_table(&result));
    info!(
        "Finished: routes = {}, distance = {} km, unassigned = {}",
        result.routes.len(),
        result.total_distance_km,
        result.unassigned_orders.len(),
    );

    if let Some(out) = args.out {
        write_json(&out, &result)?;
        info!("Result written to {:?}", out);
    }

    Ok(())
}
