//! Error types for the dataset crate.

use thiserror::Error;

/// Errors that can occur while loading and validating the MovieLens data
#[derive(Error, Debug)]
pub enum DataError {
    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV reader could not open or decode a file
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Row in a data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataError>;
