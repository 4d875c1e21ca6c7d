//! Error types for the rankscope library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for rankscope operations.
#[derive(Debug, Error)]
pub enum RankscopeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The zip archive is missing, unreadable or corrupt.
    #[error("Archive error for '{path}': {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A named dataset was not present after extraction.
    #[error("Dataset '{name}' not found in '{dir}'")]
    MissingDataset { name: String, dir: PathBuf },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// A referenced column is absent from the table.
    #[error("Column '{column}' not found")]
    ColumnNotFound { column: String },

    /// A referenced column has the wrong inferred type.
    #[error("Column '{column}' is not {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
    },

    /// Chart rendering failed.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RankscopeError {
    pub(crate) fn column_not_found(column: impl Into<String>) -> Self {
        RankscopeError::ColumnNotFound {
            column: column.into(),
        }
    }
}

/// Result type alias for rankscope operations.
pub type Result<T> = std::result::Result<T, RankscopeError>;
