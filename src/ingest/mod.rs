/// Input loading: the mortality table and the department boundary file.
///
/// - `records` - delimited-text reader with header validation
/// - `dates` - permissive death-date parser
/// - `boundaries` - GeoJSON boundary loader for the choropleth map
/// - `fixtures` (test only) - small representative inputs

pub mod boundaries;
pub mod dates;
pub mod records;

#[cfg(test)]
pub(crate) mod fixtures;
