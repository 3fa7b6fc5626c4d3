//! Attribute data types and similarity selections.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared data type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Categorical,
    Date,
    Location,
    #[serde(rename = "Ontology Concept")]
    OntologyConcept,
}

impl AttributeType {
    /// All types, in catalog order.
    pub const ALL: [AttributeType; 9] = [
        AttributeType::String,
        AttributeType::Integer,
        AttributeType::Float,
        AttributeType::Categorical,
        AttributeType::Boolean,
        AttributeType::Date,
        AttributeType::Location,
        AttributeType::OntologyConcept,
        AttributeType::Object,
    ];

    /// Wire name as used by the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "String",
            AttributeType::Integer => "Integer",
            AttributeType::Float => "Float",
            AttributeType::Boolean => "Boolean",
            AttributeType::Object => "Object",
            AttributeType::Categorical => "Categorical",
            AttributeType::Date => "Date",
            AttributeType::Location => "Location",
            AttributeType::OntologyConcept => "Ontology Concept",
        }
    }

    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, AttributeType::Integer | AttributeType::Float)
    }
}

impl Default for AttributeType {
    fn default() -> Self {
        AttributeType::String
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttributeType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown attribute type: {}", s))
    }
}

/// Similarity function selected for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Similarity {
    Equal,
    EqualIgnoreCase,
    #[serde(rename = "BM25")]
    Bm25,
    #[serde(rename = "TFIDF")]
    Tfidf,
    #[serde(rename = "Semantic USE")]
    SemanticUse,
    #[serde(rename = "Semantic SBERT")]
    SemanticSbert,
    Array,
    #[serde(rename = "Array SBERT")]
    ArraySbert,
    #[serde(rename = "Nearest Number")]
    NearestNumber,
    #[serde(rename = "McSherry More")]
    McSherryMore,
    #[serde(rename = "McSherry Less")]
    McSherryLess,
    #[serde(rename = "INRECA More")]
    InrecaMore,
    #[serde(rename = "INRECA Less")]
    InrecaLess,
    Interval,
    Table,
    EnumDistance,
    #[serde(rename = "Query Intersection")]
    QueryIntersection,
    #[serde(rename = "Nearest Date")]
    NearestDate,
    #[serde(rename = "Nearest Location")]
    NearestLocation,
    #[serde(rename = "Path-based")]
    PathBased,
    #[serde(rename = "Feature-based")]
    FeatureBased,
    Cosine,
    Jaccard,
    None,
}

/// Parameter family a similarity belongs to.
///
/// Each family has its own option shape; see [`SimilarityOptions`](super::SimilarityOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimilarityFamily {
    /// Interval, McSherry and INRECA: numeric bounds.
    Bounds,
    /// Nearest Number: numeric scale and decay.
    NumberDecay,
    /// Nearest Date: duration scale and decay.
    DateDecay,
    /// Nearest Location: distance scale and decay.
    LocationDecay,
    /// Lookup grid between declared values.
    Table,
    /// Ordered values, distance from position.
    Enum,
    /// Ontology sources.
    Ontology,
    /// Fixed-dimension vectors.
    Vector,
    /// No parameters.
    Unset,
}

impl Similarity {
    const ALL: [Similarity; 24] = [
        Similarity::Equal,
        Similarity::EqualIgnoreCase,
        Similarity::Bm25,
        Similarity::Tfidf,
        Similarity::SemanticUse,
        Similarity::SemanticSbert,
        Similarity::Array,
        Similarity::ArraySbert,
        Similarity::NearestNumber,
        Similarity::McSherryMore,
        Similarity::McSherryLess,
        Similarity::InrecaMore,
        Similarity::InrecaLess,
        Similarity::Interval,
        Similarity::Table,
        Similarity::EnumDistance,
        Similarity::QueryIntersection,
        Similarity::NearestDate,
        Similarity::NearestLocation,
        Similarity::PathBased,
        Similarity::FeatureBased,
        Similarity::Cosine,
        Similarity::Jaccard,
        Similarity::None,
    ];

    /// Wire name as used by the server.
    pub fn as_str(&self) -> &'static str {
        match self {
            Similarity::Equal => "Equal",
            Similarity::EqualIgnoreCase => "EqualIgnoreCase",
            Similarity::Bm25 => "BM25",
            Similarity::Tfidf => "TFIDF",
            Similarity::SemanticUse => "Semantic USE",
            Similarity::SemanticSbert => "Semantic SBERT",
            Similarity::Array => "Array",
            Similarity::ArraySbert => "Array SBERT",
            Similarity::NearestNumber => "Nearest Number",
            Similarity::McSherryMore => "McSherry More",
            Similarity::McSherryLess => "McSherry Less",
            Similarity::InrecaMore => "INRECA More",
            Similarity::InrecaLess => "INRECA Less",
            Similarity::Interval => "Interval",
            Similarity::Table => "Table",
            Similarity::EnumDistance => "EnumDistance",
            Similarity::QueryIntersection => "Query Intersection",
            Similarity::NearestDate => "Nearest Date",
            Similarity::NearestLocation => "Nearest Location",
            Similarity::PathBased => "Path-based",
            Similarity::FeatureBased => "Feature-based",
            Similarity::Cosine => "Cosine",
            Similarity::Jaccard => "Jaccard",
            Similarity::None => "None",
        }
    }

    /// The parameter family of this similarity.
    pub fn family(&self) -> SimilarityFamily {
        match self {
            Similarity::Interval
            | Similarity::McSherryMore
            | Similarity::McSherryLess
            | Similarity::InrecaMore
            | Similarity::InrecaLess => SimilarityFamily::Bounds,
            Similarity::NearestNumber => SimilarityFamily::NumberDecay,
            Similarity::NearestDate => SimilarityFamily::DateDecay,
            Similarity::NearestLocation => SimilarityFamily::LocationDecay,
            Similarity::Table => SimilarityFamily::Table,
            Similarity::EnumDistance => SimilarityFamily::Enum,
            Similarity::PathBased | Similarity::FeatureBased => SimilarityFamily::Ontology,
            Similarity::Cosine => SimilarityFamily::Vector,
            _ => SimilarityFamily::Unset,
        }
    }

    /// Whether values of this similarity are arrays entered as comma-joined text.
    pub fn is_array_valued(&self) -> bool {
        matches!(self, Similarity::Array | Similarity::ArraySbert)
    }
}

impl Default for Similarity {
    fn default() -> Self {
        Similarity::Equal
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Similarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Similarity::ALL
            .iter()
            .find(|sim| sim.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("Unknown similarity: {}", s))
    }
}
