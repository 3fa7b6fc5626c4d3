//! Error types for the clood library.

use std::path::PathBuf;
use thiserror::Error;

use crate::input::IngestError;
use crate::parameters::EditorError;
use crate::query::QueryError;
use crate::schema::SchemaError;

/// Main error type for clood operations.
#[derive(Debug, Error)]
pub enum CloodError {
    /// Error reading or writing a local file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The attribute schema rejected an edit.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A similarity parameter form failed validation.
    #[error(transparent)]
    Editor(#[from] EditorError),

    /// A case file could not be ingested.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A query or retained case could not be assembled.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The remote API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(String),

    /// An operation needs a project that has not been selected or saved.
    #[error("No project: {0}")]
    NoProject(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<reqwest::Error> for CloodError {
    fn from(err: reqwest::Error) -> Self {
        CloodError::Http(err.to_string())
    }
}

/// Result type alias for clood operations.
pub type Result<T> = std::result::Result<T, CloodError>;
