use std::path::PathBuf;

use thiserror::Error;

/// A column an operation depends on is not part of the dataset.
///
/// Raised once per call, before any row is examined.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column '{column}' not found in dataset")]
pub struct MissingColumnError {
    pub column: String,
}

impl MissingColumnError {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

/// Failures while turning a tabular source into a [`Dataset`](crate::data::model::Dataset).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no data source found; checked: {}", display_paths(.checked))]
    NoSource { checked: Vec<PathBuf> },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("reading {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing CSV")]
    Csv(#[from] csv::Error),

    #[error("parsing JSON")]
    Json(#[from] serde_json::Error),

    #[error("reading parquet")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("reading arrow batch")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("reading workbook")]
    Workbook(#[from] calamine::Error),

    #[error("malformed table: {0}")]
    Malformed(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
