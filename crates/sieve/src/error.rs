//! Error types for the sieve library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sieve operations.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The input file does not exist.
    #[error("File not found: '{}'", path.display())]
    FileNotFound { path: PathBuf },

    /// Error reading or writing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid delimited tabular data.
    #[error("Parse error in '{source_name}': {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A numeric strategy was requested for a column holding text.
    #[error("Cannot apply {strategy} imputation to column '{column}': found non-numeric value '{value}'")]
    TypeConflict {
        column: String,
        strategy: String,
        value: String,
    },

    /// Unrecognised imputation strategy tag.
    #[error("Unknown filling strategy: '{0}' (expected mean, median or mode)")]
    InvalidStrategy(String),

    /// Absent values survived imputation.
    #[error("Data still contains {count} missing value(s) after filling, in column(s): {}", columns.join(", "))]
    ResidualMissingValue { columns: Vec<String>, count: usize },

    /// A named column is not in the dataset header.
    #[error("Column '{column}' not found in header")]
    MissingColumn { column: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;
