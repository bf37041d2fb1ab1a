/// Error types for stand and price ingestion
use thiserror::Error;

/// Errors raised while reading stand datasets or price configuration.
///
/// Bad numbers are not errors; they become `NaN` on the record.
#[derive(Error, Debug)]
pub enum BestandError {
    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse JSON data
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The CSV header lacks a column the loader cannot do without
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Type alias for Results using BestandError
pub type Result<T> = std::result::Result<T, BestandError>;
