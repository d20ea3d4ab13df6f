//! Dashboard Summary
//!
//! Runs the same load → aggregate pipeline as the dashboard and prints the
//! five tables as JSON instead of serving them. Handy for checking a new
//! export before putting it on screen.
//!
//! Usage:
//!   cargo run --bin dashboard_summary
//!   cargo run --bin dashboard_summary -- --config other.toml

use anyhow::Context;
use covid_dashboard::config::{load_config, load_config_from};
use covid_dashboard::pipeline;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    // logs on stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = args.iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1));

    let config = match config_path {
        Some(path) => load_config_from(path).with_context(|| format!("loading {}", path))?,
        None => load_config().context("loading dashboard.toml")?,
    };

    let output = pipeline::run(&config).context("building dashboard data")?;
    let json = serde_json::to_string_pretty(&output.data)?;
    println!("{}", json);

    Ok(())
}
