/// Department boundary loader.
///
/// The boundary file is only consumed by the choropleth map. The pipeline
/// keeps the parsed GeoJSON as-is for the renderer and records which
/// department names it can join on, so departments that will not be drawn
/// can be reported in the log.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;
use crate::model::GroupCount;

/// Parsed boundary resource plus the join key used to match departments.
#[derive(Debug, Clone)]
pub struct Boundaries {
    pub geojson: Value,
    /// Dotted path from a feature to its department name,
    /// e.g. `properties.NOMBRE_DPT`.
    pub feature_id_key: String,
    region_names: BTreeSet<String>,
}

impl Boundaries {
    pub fn region_names(&self) -> &BTreeSet<String> {
        &self.region_names
    }

    pub fn contains_region(&self, name: &str) -> bool {
        self.region_names.contains(name)
    }

    /// Regions present in `counts` that have no boundary feature. These are
    /// not an error; the map simply leaves them out.
    pub fn unmatched_regions<'a>(&self, counts: &'a [GroupCount]) -> Vec<&'a str> {
        counts
            .iter()
            .map(|c| c.key.as_str())
            .filter(|key| !self.contains_region(key))
            .collect()
    }
}

/// Reads and validates a GeoJSON boundary file.
pub fn load_boundaries<P: AsRef<Path>>(
    path: P,
    feature_id_key: &str,
) -> Result<Boundaries, PipelineError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;

    let geojson: Value = serde_json::from_str(&contents).map_err(|e| PipelineError::BoundaryParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let boundaries = parse_boundaries(geojson, feature_id_key)?;
    debug!(
        path = %path.display(),
        regions = boundaries.region_names.len(),
        "loaded boundary file"
    );
    Ok(boundaries)
}

/// Validates an already-parsed GeoJSON value.
///
/// The value must be a `FeatureCollection` with a `features` array of
/// objects. Features without a string at `feature_id_key` are kept for
/// drawing but cannot be joined.
pub fn parse_boundaries(geojson: Value, feature_id_key: &str) -> Result<Boundaries, PipelineError> {
    if feature_id_key.split('.').any(str::is_empty) {
        return Err(PipelineError::InvalidBoundaries(format!(
            "feature id key '{}' is not a dotted field path",
            feature_id_key
        )));
    }

    match geojson.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => {}
        Some(other) => {
            return Err(PipelineError::InvalidBoundaries(format!(
                "expected a FeatureCollection, found '{}'",
                other
            )));
        }
        None => {
            return Err(PipelineError::InvalidBoundaries(
                "missing GeoJSON 'type' member".to_string(),
            ));
        }
    }

    let features = geojson
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| PipelineError::InvalidBoundaries("missing 'features' array".to_string()))?;

    let mut region_names = BTreeSet::new();
    for (idx, feature) in features.iter().enumerate() {
        if !feature.is_object() {
            return Err(PipelineError::InvalidBoundaries(format!(
                "feature {} is not an object",
                idx
            )));
        }
        if let Some(name) = lookup_path(feature, feature_id_key).and_then(Value::as_str) {
            region_names.insert(name.to_string());
        }
    }

    Ok(Boundaries {
        geojson,
        feature_id_key: feature_id_key.to_string(),
        region_names,
    })
}

fn lookup_path<'a>(value: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted.split('.').try_fold(value, |node, field| node.get(field))
}
