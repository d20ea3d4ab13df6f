/// Fatal error type for the load → aggregate → render → serve run.
///
/// Only structural problems end up here: a missing or unreadable input file,
/// a header row without a required column, a boundary file that is not a
/// GeoJSON feature collection. Bad individual cells never produce an error;
/// the row is just left out of the aggregate that needed the cell.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source table: {0}")]
    Csv(#[from] csv::Error),

    #[error("source table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("failed to parse boundary file {path}: {source}")]
    BoundaryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid boundary data: {0}")]
    InvalidBoundaries(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot render chart '{title}': {reason}")]
    Render { title: String, reason: String },

    #[error("dashboard server error: {0}")]
    Server(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io { path: path.into(), source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_lists_every_column() {
        let err = PipelineError::MissingColumns(vec![
            "MUNICIPIO".to_string(),
            "EDAD FALLECIDO".to_string(),
        ]);
        let message = err.to_string();
        assert!(message.contains("MUNICIPIO"));
        assert!(message.contains("EDAD FALLECIDO"));
    }

    #[test]
    fn test_io_error_names_the_path() {
        let err = PipelineError::io(
            "archivo.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("archivo.csv"));
    }
}
