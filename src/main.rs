mod cli;

use clap::{Parser, crate_version};
use plant_planner::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

fn main() -> Result {
    let _ = dotenvy::dotenv();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .compact()
        .init();
    info!(version = crate_version!(), "starting…");

    Args::parse().command.run()?;

    info!("done!");
    Ok(())
}
