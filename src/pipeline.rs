/// One full run: load both inputs, then aggregate.
///
/// Both files are read before any aggregation starts, so a missing boundary
/// file fails the run without doing the aggregation work first.

use tracing::{debug, info};

use crate::analysis::filters::parse_dates;
use crate::analysis::summary::build_dashboard_data;
use crate::config::DashboardConfig;
use crate::error::PipelineError;
use crate::ingest::boundaries::{load_boundaries, Boundaries};
use crate::ingest::records::load_records;
use crate::model::DashboardData;

/// Tables plus the boundary resource the map needs.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub data: DashboardData,
    pub boundaries: Boundaries,
    /// Rows read from the source table.
    pub row_count: usize,
}

pub fn run(config: &DashboardConfig) -> Result<PipelineOutput, PipelineError> {
    let delimiter = config.delimiter_byte()?;

    let rows = load_records(&config.source_path, delimiter)?;
    let boundaries = load_boundaries(&config.boundaries_path, &config.feature_id_key)?;
    info!(
        source = %config.source_path,
        rows = rows.len(),
        boundary_regions = boundaries.region_names().len(),
        "inputs loaded"
    );

    let dataset = parse_dates(rows);
    let data = build_dashboard_data(&dataset);

    let unmatched = boundaries.unmatched_regions(&data.region_deaths);
    if !unmatched.is_empty() {
        debug!(?unmatched, "departments without a boundary feature will not be drawn");
    }

    Ok(PipelineOutput {
        data,
        boundaries,
        row_count: dataset.len(),
    })
}
