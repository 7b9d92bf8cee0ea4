//! Error types for the data-loader crate.
//!
//! Every variant here is fatal at startup: if the catalog or the similarity
//! matrix can't be loaded, the engine never becomes ready.

use thiserror::Error;

use crate::types::MovieId;

/// Errors that can occur while loading and validating the similarity artifacts
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// Artifact file does not exist
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The similarity matrix is not valid JSON of the expected shape
    #[error("Malformed similarity matrix: {0}")]
    Json(#[from] serde_json::Error),

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Catalog size and matrix size disagree
    #[error("Catalog has {catalog} movies but similarity matrix has {rows} rows")]
    DimensionMismatch { catalog: usize, rows: usize },

    /// A matrix row does not have exactly N columns
    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two catalog entries share the same id
    #[error("Duplicate movie id {id} at catalog positions {first} and {second}")]
    DuplicateId {
        id: MovieId,
        first: usize,
        second: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
