//! Similarity-option catalog: which similarities and reuse strategies each
//! attribute type allows.
//!
//! The server owns the catalog (`GET /config`); clients fetch it once and treat
//! it as read-only. [`Catalog::builtin`] mirrors the server's defaults for use
//! when no server is reachable.

mod builtin;

use serde::{Deserialize, Serialize};

use crate::schema::{Attribute, AttributeType, SchemaError, Similarity};

/// Catalog entry for one attribute type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeOption {
    /// Type name as sent by the server.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(rename = "similarityTypes", default)]
    pub similarity_types: Vec<String>,
    #[serde(rename = "reuseStrategy", default)]
    pub reuse_strategy: Vec<String>,
}

/// Registry of allowed similarities and reuse strategies per type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "attributeOptions", default)]
    pub attribute_options: Vec<AttributeOption>,
}

impl Catalog {
    /// The server's default catalog.
    pub fn builtin() -> Self {
        builtin::BUILTIN_CATALOG.clone()
    }

    /// Find the entry for a type name.
    pub fn entry(&self, type_name: &str) -> Option<&AttributeOption> {
        self.attribute_options
            .iter()
            .find(|entry| entry.type_name == type_name)
    }

    /// Similarities allowed for a type; `None` if the type is not listed.
    pub fn similarity_types_for(&self, attr_type: AttributeType) -> Option<&[String]> {
        self.entry(attr_type.as_str())
            .map(|entry| entry.similarity_types.as_slice())
    }

    /// Reuse strategies allowed for a type; `None` if the type is not listed.
    pub fn reuse_strategies_for(&self, attr_type: AttributeType) -> Option<&[String]> {
        self.entry(attr_type.as_str())
            .map(|entry| entry.reuse_strategy.as_slice())
    }

    /// Allowed similarities this client knows how to configure.
    pub fn allowed_similarities(&self, attr_type: AttributeType) -> Vec<Similarity> {
        self.similarity_types_for(attr_type)
            .unwrap_or_default()
            .iter()
            .filter_map(|name| name.parse().ok())
            .collect()
    }

    /// Reject an attribute whose similarity is not allowed for its type.
    ///
    /// Types missing from the catalog are not checked.
    pub fn check_attribute(&self, attribute: &Attribute) -> Result<(), SchemaError> {
        match self.similarity_types_for(attribute.attr_type) {
            Some(allowed) if !allowed.iter().any(|s| s == attribute.similarity.as_str()) => {
                Err(SchemaError::SimilarityNotAllowed {
                    attr_type: attribute.attr_type,
                    similarity: attribute.similarity,
                })
            }
            _ => Ok(()),
        }
    }
}
