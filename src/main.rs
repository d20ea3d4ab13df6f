//! COVID-19 Mortality Dashboard
//!
//! Reads the mortality export once, builds the five aggregate views and
//! serves them as a single page:
//! 1. Deaths by department (map, 2021)
//! 2. Top 5 cities by deaths (bar, 2021)
//! 3. Case status distribution (pie, 2021)
//! 4. Monthly deaths, 2020 vs 2021 (line)
//! 5. Deaths by age group (histogram, 2020)
//!
//! Usage:
//!   cargo run --release
//!
//! Configuration:
//!   dashboard.toml - input paths, delimiter, bind address and port (optional)
//!   RUST_LOG       - log filter, may be set in .env

use anyhow::Context;
use covid_dashboard::config::load_config;
use covid_dashboard::endpoint::{render_page, DashboardServer};
use covid_dashboard::{pipeline, render};
use tracing_subscriber::EnvFilter;

const PAGE_HEADING: &str = "COVID-19 Dashboard - Mapa de Muertes por COVID-19 en 2021";

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("🦠 COVID-19 Mortality Dashboard");
    println!("================================\n");

    let config = load_config().context("loading dashboard.toml")?;

    println!("📊 Loading {} ...", config.source_path);
    let output = pipeline::run(&config).context("building dashboard data")?;
    println!("✓ {} rows read, {} departments with confirmed deaths\n",
        output.row_count, output.data.region_deaths.len());

    let charts = render::build_charts(&output.data, &output.boundaries)
        .context("rendering charts")?;
    let page = render_page(PAGE_HEADING, &charts);

    let server = DashboardServer::bind(&config.listen_addr())
        .context("starting HTTP server")?;
    println!("🚀 Dashboard running on http://{}:{}/", config.bind_address,
        server.port().unwrap_or(config.port));
    println!("   Press Ctrl+C to stop\n");

    server.serve(&page)?;
    Ok(())
}
