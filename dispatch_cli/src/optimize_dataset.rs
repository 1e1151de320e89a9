use std::path::PathBuf;

use clap::Args;
use dispatch_optimizer::solver::solver::Solver;
use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    file_utils::{read_folder, write_json},
    optimize::read_request,
    summary,
};

#[derive(Args)]
pub struct OptimizeDatasetArgs {
    /// A request file, or a folder searched recursively for them
    #[arg(short, long)]
    dataset: PathBuf,

    /// Output folder for the .result.json files
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: OptimizeDatasetArgs) -> Result<(), anyhow::Error> {
    info!("Optimizing dataset {:?}", args.dataset);
    let paths = if args.dataset.is_file() {
        vec![args.dataset]
    } else {
        read_folder(&args.dataset)?
    };

    let solver = Solver::default();

    for path in paths
        .iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
    {
        let request = match read_request(path) {
            Ok(request) => request,
            Err(error) => {
                warn!("Skipping {:?}: {:#}", path, error);
                continue;
            }
        };

        let started = Timestamp::now();
        let result = match solver.solve_request(request) {
            Ok(result) => result,
            Err(error) => {
                warn!("Failed to solve {:?}: {}", path, error);
                continue;
            }
        };
        let elapsed = Timestamp::now().duration_since(started);

        println!("{}", summary::summary_line(path, &result, elapsed));

        if let Some(output) = &args.output
            && let Some(stem) = path.file_stem()
        {
            let out = output.join(format!("{}.result.json", stem.to_string_lossy()));
            write_json(&out, &result)?;
        }
    }

    Ok(())
}
