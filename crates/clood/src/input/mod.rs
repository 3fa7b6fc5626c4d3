//! Case ingestion: delimited text files to case batches.

mod coerce;
mod ingest;
mod source;
mod splitter;

pub use coerce::coerce_value;
pub use ingest::{Case, CaseBatch, CaseIngestor, IngestConfig};
pub use source::SourceMetadata;
pub use splitter::split_fields;

use std::path::PathBuf;

use thiserror::Error;

use crate::schema::AttributeType;

/// Why a file was rejected. Ingestion stops at the first problem, and the
/// `Display` text is the warning shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IngestError {
    #[error("Could not read {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("File is empty")]
    Empty,

    #[error("Column count mismatch: file has {found} columns, project has {expected} attributes")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("Columns not in project: {}", .0.join(", "))]
    UnknownColumns(Vec<String>),

    #[error("Project attributes missing from file: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Line {line}: expected {expected} separators, found {found}")]
    SeparatorCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Line {line}, column '{column}': invalid value {text}")]
    InvalidLiteral {
        line: usize,
        column: String,
        text: String,
    },

    #[error("Line {line}, column '{column}': {text} is not a valid {expected}")]
    TypeMismatch {
        line: usize,
        column: String,
        expected: AttributeType,
        text: String,
    },
}
