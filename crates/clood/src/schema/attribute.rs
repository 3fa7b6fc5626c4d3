//! Attribute definition.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::options::SimilarityOptions;
use super::types::{AttributeType, Similarity, SimilarityFamily};

/// One typed, similarity-annotated field of a case.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "AttributeRecord")]
pub struct Attribute {
    /// Unique (case-sensitive) within a project.
    pub name: String,
    pub attr_type: AttributeType,
    pub similarity: Similarity,
    /// Parameters for the similarity; `None` until first configured.
    pub options: Option<SimilarityOptions>,
    /// Fields this client does not interpret (weights, UI hints, ...).
    pub extra: IndexMap<String, Value>,
}

impl Attribute {
    /// Create an attribute without options.
    pub fn new(name: impl Into<String>, attr_type: AttributeType, similarity: Similarity) -> Self {
        Self {
            name: name.into(),
            attr_type,
            similarity,
            options: None,
            extra: IndexMap::new(),
        }
    }

    /// Set explicit options.
    pub fn with_options(mut self, options: SimilarityOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// The parameter family of the selected similarity.
    pub fn family(&self) -> SimilarityFamily {
        self.similarity.family()
    }

    /// Install family defaults when options are missing or belong to another family.
    ///
    /// Returns true if the options changed.
    pub fn ensure_options(&mut self) -> bool {
        let fits = match &self.options {
            Some(options) => options.fits(self.similarity),
            None => self.family() == SimilarityFamily::Unset,
        };
        if fits {
            return false;
        }
        self.options = SimilarityOptions::default_for(self.similarity, &self.name);
        true
    }
}

/// Wire form of an attribute; `options` is decoded by `similarity`.
#[derive(Deserialize)]
struct AttributeRecord {
    name: String,
    #[serde(rename = "type")]
    attr_type: AttributeType,
    similarity: Similarity,
    #[serde(default)]
    options: Option<Value>,
    #[serde(flatten)]
    extra: IndexMap<String, Value>,
}

/// Borrowed wire form used for serialization.
#[derive(Serialize)]
struct AttributeRecordRef<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    attr_type: AttributeType,
    similarity: Similarity,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a SimilarityOptions>,
    #[serde(flatten)]
    extra: &'a IndexMap<String, Value>,
}

impl TryFrom<AttributeRecord> for Attribute {
    type Error = serde_json::Error;

    fn try_from(record: AttributeRecord) -> Result<Self, Self::Error> {
        let options = match record.options {
            Some(value) => SimilarityOptions::from_value(record.similarity, value)?,
            None => None,
        };
        Ok(Self {
            name: record.name,
            attr_type: record.attr_type,
            similarity: record.similarity,
            options,
            extra: record.extra,
        })
    }
}

impl Serialize for Attribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        AttributeRecordRef {
            name: &self.name,
            attr_type: self.attr_type,
            similarity: self.similarity,
            options: self.options.as_ref(),
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::BoundsOptions;
    use serde_json::json;

    #[test]
    fn test_deserialize_with_options() {
        let attr: Attribute = serde_json::from_value(json!({
            "name": "price",
            "type": "Float",
            "similarity": "Interval",
            "options": {"min": 5, "max": 50},
            "weight": 2
        }))
        .unwrap();

        assert_eq!(attr.attr_type, AttributeType::Float);
        assert_eq!(
            attr.options,
            Some(SimilarityOptions::Bounds(BoundsOptions {
                min: 5.0,
                max: 50.0,
                jump: None
            }))
        );
        assert_eq!(attr.extra.get("weight"), Some(&json!(2)));
    }

    #[test]
    fn test_serialize_round_trip_keeps_unknown_fields() {
        let input = json!({
            "name": "colour",
            "type": "Categorical",
            "similarity": "EnumDistance",
            "options": {"values": ["red", "amber", "green"]},
            "weight": 1
        });
        let attr: Attribute = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(serde_json::to_value(&attr).unwrap(), input);
    }

    #[test]
    fn test_serialize_writes_options_and_extra() {
        let mut attr = Attribute::new("price", AttributeType::Float, Similarity::InrecaMore)
            .with_options(SimilarityOptions::Bounds(BoundsOptions {
                min: 1.0,
                max: 9.0,
                jump: Some(0.5),
            }));
        attr.extra.insert("weight".to_string(), json!(3));

        let text = serde_json::to_string(&attr).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "price",
                "type": "Float",
                "similarity": "INRECA More",
                "options": {"min": 1.0, "max": 9.0, "jump": 0.5},
                "weight": 3
            })
        );
        let back: Attribute = serde_json::from_str(&text).unwrap();
        assert_eq!(back, attr);
    }

    #[test]
    fn test_null_options() {
        let attr: Attribute = serde_json::from_value(json!({
            "name": "title", "type": "String", "similarity": "BM25", "options": null
        }))
        .unwrap();
        assert!(attr.options.is_none());
        assert!(serde_json::to_value(&attr).unwrap().get("options").is_none());
    }

    #[test]
    fn test_ensure_options_replaces_mismatched_family() {
        let mut attr = Attribute::new("age", AttributeType::Integer, Similarity::Interval);
        assert!(attr.ensure_options());
        assert!(!attr.ensure_options());

        attr.similarity = Similarity::NearestNumber;
        assert!(attr.ensure_options());
        assert_eq!(
            attr.options.as_ref().map(|o| o.family()),
            Some(SimilarityFamily::NumberDecay)
        );

        attr.similarity = Similarity::Equal;
        assert!(attr.ensure_options());
        assert!(attr.options.is_none());
    }
}
