//! Attribute schema model: projects, attributes and similarity parameters.

mod attribute;
mod editor;
mod options;
mod project;
mod types;

pub use attribute::Attribute;
pub use editor::{SchemaEditor, SchemaError};
pub use options::{
    BoundsOptions, DateDecayOptions, EnumOptions, LocationDecayOptions, NumberDecayOptions,
    OntologyOptions, OntologySource, SimilarityOptions, TableOptions, VectorOptions,
};
pub use project::Project;
pub use types::{AttributeType, Similarity, SimilarityFamily};
