//! Clood: case-base configuration, case ingestion and query assembly for a
//! remote case-based-reasoning API.
//!
//! A *project* is a case-base schema: an ordered list of typed attributes,
//! each with a similarity function and its parameters. This crate edits that
//! schema, loads cases from delimited files, and shapes the requests of the
//! retrieve / reuse / revise / retain cycle. Similarity computation and
//! ranking happen on the server.
//!
//! # Example
//!
//! ```no_run
//! use clood::{Attribute, AttributeType, CaseIngestor, Project, SchemaEditor, Similarity};
//!
//! let mut editor = SchemaEditor::new(Project::new("Cars"));
//! editor
//!     .add_attribute(&Attribute::new("price", AttributeType::Float, Similarity::Interval))
//!     .unwrap();
//! let project = editor.into_project();
//!
//! let batch = CaseIngestor::new(&project.attributes)
//!     .ingest_file("cars.csv")
//!     .unwrap();
//! println!("{} cases", batch.len());
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod input;
pub mod parameters;
pub mod query;
pub mod schema;
pub mod session;

pub use api::{ClientConfig, CloodClient, Token, TokenLifetime};
pub use catalog::{AttributeOption, Catalog};
pub use error::{CloodError, Result};
pub use input::{Case, CaseBatch, CaseIngestor, IngestConfig, IngestError, SourceMetadata};
pub use parameters::{EditorError, ParameterEditor, ParameterForm, TableEditor};
pub use query::{QueryError, QueryFeature, RetainRequest, RetrieveRequest, RetrieveResponse};
pub use schema::{
    Attribute, AttributeType, Project, SchemaEditor, SchemaError, Similarity, SimilarityFamily,
    SimilarityOptions,
};
pub use session::{Level, LogNotifier, Notifier, Session};
