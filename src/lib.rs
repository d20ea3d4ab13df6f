/// covid_dashboard: COVID-19 mortality dashboard for Colombian departments.
///
/// # Module structure
///
/// ```text
/// covid_dashboard
/// ├── model       — shared data types (RawRecord, Record, Dataset, AGE_GROUPS, …)
/// ├── config      — dashboard.toml loader and the fixed analysis years
/// ├── error       — PipelineError, the fatal error type
/// ├── ingest
/// │   ├── records    — source table reader with header validation
/// │   ├── dates      — permissive death-date parser
/// │   ├── boundaries — department GeoJSON loader
/// │   └── fixtures (test only) — small representative inputs
/// ├── analysis
/// │   ├── filters    — date normalization and year slicing
/// │   ├── groupings  — count_by, top_n, case-status and monthly counts
/// │   ├── age_groups — age extraction and five-year buckets
/// │   └── summary    — builds the five dashboard tables
/// ├── pipeline    — load both inputs, then aggregate
/// ├── render      — aggregate tables → Plotly figures
/// └── endpoint    — single-page HTTP host
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod render;
