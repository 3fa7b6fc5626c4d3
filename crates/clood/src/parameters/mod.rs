//! Staged editing of an attribute's similarity parameters.
//!
//! [`ParameterEditor::open`] takes a scratch copy of an attribute and exposes a
//! form for its similarity family. Nothing touches the original attribute:
//! [`ParameterEditor::save`] validates the form and returns the edited copy,
//! [`ParameterEditor::cancel`] throws it away.

mod editor;
mod table;
mod validate;
mod values;

pub use editor::{ParameterEditor, ParameterForm};
pub use table::TableEditor;
pub use values::EnumEditor;

use thiserror::Error;

/// Rejected parameter values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("Minimum ({min}) must be less than maximum ({max})")]
    InvalidBounds { min: f64, max: f64 },

    #[error("Jump must be in (0, 1], got {0}")]
    InvalidJump(f64),

    #[error("Decay must be in (0, 1], got {0}")]
    InvalidDecay(f64),

    #[error("Invalid scale '{0}'")]
    InvalidScale(String),

    #[error("Vector dimension must be positive")]
    InvalidDimension,

    #[error("Similarity for ({query}, {case}) is not a number: {value}")]
    NonNumericCell {
        query: String,
        case: String,
        value: String,
    },

    #[error("Similarity for ({query}, {case}) is not set")]
    MissingCell { query: String, case: String },

    #[error("Symmetric table differs between ({a}, {b}) and ({b}, {a})")]
    AsymmetricGrid { a: String, b: String },

    #[error("Symmetric table must score ({0}, {0}) as 1")]
    DiagonalNotOne(String),

    #[error("Cell ({query}, {case}) is not editable")]
    CellLocked { query: String, case: String },

    #[error("Value '{0}' is already listed")]
    DuplicateValue(String),

    #[error("Value '{0}' is not listed")]
    UnknownValue(String),

    #[error("Values must not be empty")]
    EmptyValue,

    #[error("Ontology name must not be empty")]
    EmptyOntologyName,

    #[error("Ontology needs at least one source")]
    MissingSources,
}
