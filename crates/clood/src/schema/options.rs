//! Similarity parameter shapes, one per similarity family.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::types::{Similarity, SimilarityFamily};

/// Numeric bounds for Interval, McSherry and INRECA similarities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundsOptions {
    pub min: f64,
    pub max: f64,
    /// Similarity at the boundary (INRECA only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jump: Option<f64>,
}

impl Default for BoundsOptions {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            jump: None,
        }
    }
}

/// Scale and decay for Nearest Number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberDecayOptions {
    #[serde(rename = "nscale")]
    pub scale: f64,
    #[serde(rename = "ndecay")]
    pub decay: f64,
}

impl Default for NumberDecayOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            decay: 0.999,
        }
    }
}

/// Duration scale (e.g. "365d") and decay for Nearest Date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateDecayOptions {
    #[serde(rename = "dscale")]
    pub scale: String,
    #[serde(rename = "ddecay")]
    pub decay: f64,
}

impl Default for DateDecayOptions {
    fn default() -> Self {
        Self {
            scale: "365d".to_string(),
            decay: 0.999,
        }
    }
}

/// Distance scale (e.g. "10km") and decay for Nearest Location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationDecayOptions {
    #[serde(rename = "lscale")]
    pub scale: String,
    #[serde(rename = "ldecay")]
    pub decay: f64,
}

impl Default for LocationDecayOptions {
    fn default() -> Self {
        Self {
            scale: "10km".to_string(),
            decay: 0.999,
        }
    }
}

/// Similarity lookup table: `sim_grid[query][case]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub values: Vec<String>,
    pub is_symmetric: bool,
    pub sim_grid: IndexMap<String, IndexMap<String, f64>>,
}

impl TableOptions {
    /// Look up a grid cell.
    pub fn score(&self, query: &str, case: &str) -> Option<f64> {
        self.sim_grid.get(query).and_then(|row| row.get(case)).copied()
    }
}

/// Ordered values for EnumDistance; distance derives from position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumOptions {
    pub values: Vec<String>,
}

/// One ontology source entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologySource {
    pub source: String,
    /// Any further keys the server understands (format, namespace, ...).
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl OntologySource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            extra: IndexMap::new(),
        }
    }
}

/// Ontology name and sources for Path-based and Feature-based similarities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OntologyOptions {
    pub name: String,
    pub sources: Vec<OntologySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relation_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl OntologyOptions {
    /// Append a source unless one with the same location is already listed.
    pub fn add_source(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.iter().any(|s| s.source == source) {
            return false;
        }
        self.sources.push(OntologySource::new(source));
        true
    }

    pub fn remove_source(&mut self, index: usize) -> Option<OntologySource> {
        (index < self.sources.len()).then(|| self.sources.remove(index))
    }
}

/// Vector dimension for Cosine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorOptions {
    pub dimension: usize,
}

impl Default for VectorOptions {
    fn default() -> Self {
        Self { dimension: 512 }
    }
}

/// Parameters of an attribute's similarity function.
///
/// On the wire this is an untagged object; which variant applies is decided by
/// the attribute's `similarity` field, see [`SimilarityOptions::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimilarityOptions {
    Bounds(BoundsOptions),
    NumberDecay(NumberDecayOptions),
    DateDecay(DateDecayOptions),
    LocationDecay(LocationDecayOptions),
    Table(TableOptions),
    Enum(EnumOptions),
    Ontology(OntologyOptions),
    Vector(VectorOptions),
}

impl SimilarityOptions {
    /// Default parameters for a similarity, or `None` when it takes none.
    ///
    /// `attribute_name` seeds the ontology name.
    pub fn default_for(similarity: Similarity, attribute_name: &str) -> Option<Self> {
        let options = match similarity.family() {
            SimilarityFamily::Bounds => {
                let jump = matches!(
                    similarity,
                    Similarity::InrecaMore | Similarity::InrecaLess
                )
                .then_some(1.0);
                SimilarityOptions::Bounds(BoundsOptions {
                    jump,
                    ..BoundsOptions::default()
                })
            }
            SimilarityFamily::NumberDecay => {
                SimilarityOptions::NumberDecay(NumberDecayOptions::default())
            }
            SimilarityFamily::DateDecay => SimilarityOptions::DateDecay(DateDecayOptions::default()),
            SimilarityFamily::LocationDecay => {
                SimilarityOptions::LocationDecay(LocationDecayOptions::default())
            }
            SimilarityFamily::Table => SimilarityOptions::Table(TableOptions::default()),
            SimilarityFamily::Enum => SimilarityOptions::Enum(EnumOptions::default()),
            SimilarityFamily::Ontology => SimilarityOptions::Ontology(OntologyOptions {
                name: attribute_name.to_string(),
                ..OntologyOptions::default()
            }),
            SimilarityFamily::Vector => SimilarityOptions::Vector(VectorOptions::default()),
            SimilarityFamily::Unset => return None,
        };
        Some(options)
    }

    /// Decode the untagged wire object for the given similarity.
    ///
    /// Families without parameters ignore whatever object was stored.
    pub fn from_value(similarity: Similarity, value: Value) -> serde_json::Result<Option<Self>> {
        let options = match similarity.family() {
            SimilarityFamily::Bounds => SimilarityOptions::Bounds(serde_json::from_value(value)?),
            SimilarityFamily::NumberDecay => {
                SimilarityOptions::NumberDecay(serde_json::from_value(value)?)
            }
            SimilarityFamily::DateDecay => {
                SimilarityOptions::DateDecay(serde_json::from_value(value)?)
            }
            SimilarityFamily::LocationDecay => {
                SimilarityOptions::LocationDecay(serde_json::from_value(value)?)
            }
            SimilarityFamily::Table => SimilarityOptions::Table(serde_json::from_value(value)?),
            SimilarityFamily::Enum => SimilarityOptions::Enum(serde_json::from_value(value)?),
            SimilarityFamily::Ontology => {
                SimilarityOptions::Ontology(serde_json::from_value(value)?)
            }
            SimilarityFamily::Vector => SimilarityOptions::Vector(serde_json::from_value(value)?),
            SimilarityFamily::Unset => return Ok(None),
        };
        Ok(Some(options))
    }

    /// The family these parameters belong to.
    pub fn family(&self) -> SimilarityFamily {
        match self {
            SimilarityOptions::Bounds(_) => SimilarityFamily::Bounds,
            SimilarityOptions::NumberDecay(_) => SimilarityFamily::NumberDecay,
            SimilarityOptions::DateDecay(_) => SimilarityFamily::DateDecay,
            SimilarityOptions::LocationDecay(_) => SimilarityFamily::LocationDecay,
            SimilarityOptions::Table(_) => SimilarityFamily::Table,
            SimilarityOptions::Enum(_) => SimilarityFamily::Enum,
            SimilarityOptions::Ontology(_) => SimilarityFamily::Ontology,
            SimilarityOptions::Vector(_) => SimilarityFamily::Vector,
        }
    }

    /// Whether these parameters fit the given similarity.
    pub fn fits(&self, similarity: Similarity) -> bool {
        self.family() == similarity.family()
    }
}
