//! Shaping of query and retained-case values before they are sent.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::input::Case;
use crate::schema::{Attribute, AttributeType, Similarity};

use super::QueryError;

/// One retrieval criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFeature {
    pub name: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Treat the value as unknown and fill it by `strategy`.
    #[serde(default)]
    pub unknown: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<Similarity>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub attr_type: Option<AttributeType>,
}

fn default_weight() -> f64 {
    1.0
}

impl QueryFeature {
    /// A criterion for `attribute` carrying its similarity and type.
    pub fn for_attribute(attribute: &Attribute, value: Value) -> Self {
        Self {
            name: attribute.name.clone(),
            value,
            weight: default_weight(),
            unknown: false,
            strategy: None,
            similarity: Some(attribute.similarity),
            attr_type: Some(attribute.attr_type),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Mark the value unknown, to be filled by a reuse strategy.
    pub fn unknown(mut self, strategy: impl Into<String>) -> Self {
        self.unknown = true;
        self.strategy = Some(strategy.into());
        self
    }
}

/// Split comma-joined text for array similarities.
///
/// Non-empty strings become arrays of trimmed elements, parsed as integers or
/// floats when `attr_type` is numeric. Anything else is returned unchanged.
pub fn split_array_value(
    name: &str,
    value: &Value,
    similarity: Similarity,
    attr_type: AttributeType,
) -> Result<Value, QueryError> {
    let text = match value {
        Value::String(text) if similarity.is_array_valued() && !text.is_empty() => text,
        _ => return Ok(value.clone()),
    };

    let elements = text
        .split(',')
        .map(|element| {
            let element = element.trim();
            let parsed = match attr_type {
                AttributeType::Integer => element.parse::<i64>().ok().map(Value::from),
                AttributeType::Float => element
                    .parse::<f64>()
                    .ok()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number),
                _ => Some(Value::String(element.to_string())),
            };
            parsed.ok_or_else(|| QueryError::InvalidArrayElement {
                attribute: name.to_string(),
                element: element.to_string(),
                expected: attr_type,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::Array(elements))
}

/// Build criteria from `(attribute name, value)` pairs.
pub fn features_from_values<I>(attributes: &[Attribute], values: I) -> Result<Vec<QueryFeature>, QueryError>
where
    I: IntoIterator<Item = (String, Value)>,
{
    values
        .into_iter()
        .map(|(name, value)| {
            attributes
                .iter()
                .find(|a| a.name == name)
                .map(|attribute| QueryFeature::for_attribute(attribute, value))
                .ok_or(QueryError::UnknownAttribute(name))
        })
        .collect()
}

/// Prepare criteria for submission.
///
/// Features without a similarity or type are left as they are.
pub fn assemble_features(features: &mut [QueryFeature]) -> Result<(), QueryError> {
    for feature in features.iter_mut() {
        if let (Some(similarity), Some(attr_type)) = (feature.similarity, feature.attr_type) {
            feature.value = split_array_value(&feature.name, &feature.value, similarity, attr_type)?;
        }
    }
    Ok(())
}

/// Prepare a case for retention, with the same rule as [`assemble_features`].
pub fn prepare_retained_case(case: &mut Case, attributes: &[Attribute]) -> Result<(), QueryError> {
    for attribute in attributes {
        if let Some(value) = case.get_mut(&attribute.name) {
            *value = split_array_value(
                &attribute.name,
                value,
                attribute.similarity,
                attribute.attr_type,
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tags(attr_type: AttributeType) -> Attribute {
        Attribute::new("tags", attr_type, Similarity::Array)
    }

    #[test]
    fn test_integer_array() {
        let mut features = vec![QueryFeature::for_attribute(
            &tags(AttributeType::Integer),
            json!("1,2,3"),
        )];
        assemble_features(&mut features).unwrap();
        assert_eq!(features[0].value, json!([1, 2, 3]));
    }

    #[test]
    fn test_float_and_string_arrays() {
        let float = split_array_value("f", &json!("1.5, 2"), Similarity::ArraySbert, AttributeType::Float)
            .unwrap();
        assert_eq!(float, json!([1.5, 2.0]));

        let text = split_array_value("s", &json!("red, blue"), Similarity::Array, AttributeType::String)
            .unwrap();
        assert_eq!(text, json!(["red", "blue"]));
    }

    #[test]
    fn test_untouched_values() {
        for value in [json!(""), Value::Null, json!([1, 2]), json!(5)] {
            let out = split_array_value("x", &value, Similarity::Array, AttributeType::Integer).unwrap();
            assert_eq!(out, value);
        }
        let plain = split_array_value("x", &json!("1,2"), Similarity::Equal, AttributeType::Integer)
            .unwrap();
        assert_eq!(plain, json!("1,2"));
    }

    #[test]
    fn test_bad_element() {
        let err = split_array_value("x", &json!("1,two"), Similarity::Array, AttributeType::Integer)
            .unwrap_err();
        assert_eq!(
            err,
            QueryError::InvalidArrayElement {
                attribute: "x".to_string(),
                element: "two".to_string(),
                expected: AttributeType::Integer
            }
        );
    }

    #[test]
    fn test_retain_matches_query_rule() {
        let attributes = vec![tags(AttributeType::Float)];
        let mut case = Case::new();
        case.insert("tags".to_string(), json!("0.5,1.25"));
        prepare_retained_case(&mut case, &attributes).unwrap();

        let mut features = vec![QueryFeature::for_attribute(&attributes[0], json!("0.5,1.25"))];
        assemble_features(&mut features).unwrap();
        assert_eq!(case["tags"], features[0].value);
    }

    #[test]
    fn test_features_from_values() {
        let attributes = vec![tags(AttributeType::String)];
        let features =
            features_from_values(&attributes, vec![("tags".to_string(), json!("a,b"))]).unwrap();
        assert_eq!(features[0].similarity, Some(Similarity::Array));

        let err = features_from_values(&attributes, vec![("nope".to_string(), json!(1))]);
        assert_eq!(err, Err(QueryError::UnknownAttribute("nope".to_string())));
    }

    #[test]
    fn test_feature_wire_shape() {
        let feature = QueryFeature::for_attribute(
            &Attribute::new("price", AttributeType::Float, Similarity::Interval),
            json!(10),
        )
        .unknown("Mean");
        assert_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "name": "price", "value": 10, "weight": 1.0, "unknown": true,
                "strategy": "Mean", "similarity": "Interval", "type": "Float"
            })
        );
    }
}
