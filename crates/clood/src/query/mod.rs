//! Query assembly for the retrieve/reuse/revise/retain cycle.

mod assembly;
mod cycle;
mod export;
mod request;

pub use assembly::{
    assemble_features, features_from_values, prepare_retained_case, split_array_value,
    QueryFeature,
};
pub use cycle::{explanation_series, reuse_case, Revision};
pub use export::export_best_k;
pub use request::{MatchExplanation, RetainRequest, RetrieveRequest, RetrieveResponse, ScoredCase};

use thiserror::Error;

use crate::schema::AttributeType;

/// Values that cannot be shaped into a request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Attribute '{attribute}': '{element}' is not a valid {expected}")]
    InvalidArrayElement {
        attribute: String,
        element: String,
        expected: AttributeType,
    },

    #[error("Unknown attribute '{0}'")]
    UnknownAttribute(String),
}
