use std::{str::FromStr, time::Duration};

use anyhow::{Context, Result};
use dispatch_optimizer::{
    problem::{kmh::Kmh, location::Location},
    solver::solver_params::SolverParams,
};
use jiff::SignedDuration;
use tracing::{Level, warn};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SOLVE_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub solver_params: SolverParams,
    pub solve_timeout: Duration,
}

/// `.env.local` wins over `.env`; both are optional.
pub fn load_dotenv() {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
}

pub fn log_level() -> Level {
    std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::INFO)
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = SolverParams::default();

        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            None => DEFAULT_PORT,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(port = %raw, "invalid PORT, falling back to {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
        };

        let depot = Location::from_lat_lng(
            parse_var(&lookup, "DEPOT_LAT", defaults.depot.lat())?,
            parse_var(&lookup, "DEPOT_LNG", defaults.depot.lng())?,
        );

        let service_minutes: i64 = parse_var(
            &lookup,
            "SERVICE_MINUTES",
            defaults.service_duration.as_mins(),
        )?;

        let solver_params = SolverParams {
            depot,
            truck_capacity_kg: parse_var(
                &lookup,
                "TRUCK_CAPACITY_KG",
                defaults.truck_capacity_kg,
            )?,
            average_speed: Kmh::new(parse_var(
                &lookup,
                "AVERAGE_SPEED_KMH",
                defaults.average_speed.value(),
            )?),
            service_duration: SignedDuration::from_mins(service_minutes),
            ..defaults
        };
        solver_params
            .validate()
            .context("invalid solver configuration")?;

        let solve_timeout = Duration::from_secs(parse_var(
            &lookup,
            "SOLVE_TIMEOUT_SECS",
            DEFAULT_SOLVE_TIMEOUT_SECS,
        )?);

        Ok(ServerConfig {
            host,
            port,
            solver_params,
            solve_timeout,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
    }
}
