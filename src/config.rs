/// Dashboard configuration loader - parses dashboard.toml
///
/// File locations and the listening port live in dashboard.toml so the
/// dashboard can be pointed at a new export without recompiling. The analysis
/// years, the top-N size and the age buckets are fixed constants; they
/// describe what the dashboard shows, not where it runs.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Fixed analysis constants
// ---------------------------------------------------------------------------

/// Year shown by the map, the top-cities bar chart and the status pie.
pub const MAP_YEAR: i32 = 2021;

/// Year shown by the age histogram.
pub const HISTOGRAM_YEAR: i32 = 2020;

/// Years compared on the monthly trend line, in series order.
pub const COMPARISON_YEARS: [i32; 2] = [2020, 2021];

/// Number of cities on the top-cities bar chart.
pub const TOP_CITY_COUNT: usize = 5;

pub const DEFAULT_CONFIG_PATH: &str = "dashboard.toml";
pub const DEFAULT_PORT: u16 = 8050;

// ---------------------------------------------------------------------------
// File configuration
// ---------------------------------------------------------------------------

/// Settings loaded from dashboard.toml. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Delimited-text export of the mortality spreadsheet.
    pub source_path: String,
    /// GeoJSON with one feature per department.
    pub boundaries_path: String,
    /// Field separator of the source export.
    pub delimiter: char,
    /// Dotted path from a feature to its department name.
    pub feature_id_key: String,
    pub bind_address: String,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_path: "archivo.csv".to_string(),
            boundaries_path: "colombia_departments.geojson".to_string(),
            delimiter: ',',
            feature_id_key: "properties.NOMBRE_DPT".to_string(),
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    /// Delimiter as the single byte the csv reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, PipelineError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(|b| b.is_ascii())
            .ok_or_else(|| {
                PipelineError::Config(format!(
                    "delimiter must be a single ASCII character, got {:?}",
                    self.delimiter
                ))
            })
    }

    /// `host:port` for the HTTP listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// Loads dashboard.toml from the current working directory.
///
/// A missing file yields the defaults; a file that exists but does not parse
/// is an error.
pub fn load_config() -> Result<DashboardConfig, PipelineError> {
    load_config_from(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<DashboardConfig, PipelineError> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DashboardConfig::default()),
        Err(e) => return Err(PipelineError::io(path, e)),
    };

    parse_config(&contents)
        .map_err(|e| PipelineError::Config(format!("{}: {}", path.display(), e)))
}

fn parse_config(contents: &str) -> Result<DashboardConfig, toml::de::Error> {
    toml::from_str(contents)
}
