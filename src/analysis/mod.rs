/// Aggregation pipeline for the mortality dashboard.
///
/// Submodules:
/// - `filters`    — date normalization and calendar-year slicing.
/// - `groupings`  — count-by-column, top-N ranking, monthly counts.
/// - `age_groups` — age extraction and five-year histogram buckets.
/// - `summary`    — runs the above with the fixed years to build all five tables.

pub mod age_groups;
pub mod filters;
pub mod groupings;
pub mod summary;
