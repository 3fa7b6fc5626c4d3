//! Coercion of parsed field values to an attribute's declared type.

use serde_json::{Number, Value};

use crate::schema::AttributeType;

/// Convert `value` to `attr_type`, or `None` if it cannot represent one.
///
/// `null` is accepted for every type. Arrays are coerced element-wise.
pub fn coerce_value(value: Value, attr_type: AttributeType) -> Option<Value> {
    match value {
        Value::Null => Some(Value::Null),
        Value::Array(items) => items
            .into_iter()
            .map(|item| coerce_value(item, attr_type))
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),
        scalar => coerce_scalar(scalar, attr_type),
    }
}

fn coerce_scalar(value: Value, attr_type: AttributeType) -> Option<Value> {
    match attr_type {
        AttributeType::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::Number(n)),
            Value::Number(n) => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| Value::from(f as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        AttributeType::Float => match value {
            Value::Number(n) => Some(Value::Number(n)),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        AttributeType::Boolean => match value {
            Value::Bool(b) => Some(Value::Bool(b)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        AttributeType::String => match value {
            Value::String(s) => Some(Value::String(s)),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer() {
        assert_eq!(coerce_value(json!(3), AttributeType::Integer), Some(json!(3)));
        assert_eq!(coerce_value(json!(3.0), AttributeType::Integer), Some(json!(3)));
        assert_eq!(coerce_value(json!("42"), AttributeType::Integer), Some(json!(42)));
        assert_eq!(coerce_value(json!(3.5), AttributeType::Integer), None);
        assert_eq!(coerce_value(json!("x"), AttributeType::Integer), None);
    }

    #[test]
    fn test_integer_out_of_range_rejected() {
        assert_eq!(coerce_value(json!(1e20), AttributeType::Integer), None);
        assert_eq!(coerce_value(json!(-1e20), AttributeType::Integer), None);
        assert_eq!(coerce_value(json!(9.223372036854775807e18), AttributeType::Integer), None);
        assert_eq!(
            coerce_value(json!(1e15), AttributeType::Integer),
            Some(json!(1_000_000_000_000_000i64))
        );
    }

    #[test]
    fn test_float() {
        assert_eq!(coerce_value(json!(2), AttributeType::Float), Some(json!(2)));
        assert_eq!(coerce_value(json!("2.5"), AttributeType::Float), Some(json!(2.5)));
        assert_eq!(coerce_value(json!("NaN"), AttributeType::Float), None);
        assert_eq!(coerce_value(json!(true), AttributeType::Float), None);
    }

    #[test]
    fn test_boolean_and_string() {
        assert_eq!(coerce_value(json!("TRUE"), AttributeType::Boolean), Some(json!(true)));
        assert_eq!(coerce_value(json!(1), AttributeType::Boolean), None);
        assert_eq!(coerce_value(json!(12), AttributeType::String), Some(json!("12")));
        assert_eq!(coerce_value(json!({"a": 1}), AttributeType::String), None);
    }

    #[test]
    fn test_arrays_and_null() {
        assert_eq!(
            coerce_value(json!(["1", 2, null]), AttributeType::Integer),
            Some(json!([1, 2, null]))
        );
        assert_eq!(coerce_value(json!([1, "a"]), AttributeType::Integer), None);
        assert_eq!(coerce_value(Value::Null, AttributeType::Boolean), Some(Value::Null));
    }

    #[test]
    fn test_pass_through_types() {
        let obj = json!({"lat": 57.1, "lon": -2.1});
        assert_eq!(coerce_value(obj.clone(), AttributeType::Location), Some(obj));
        assert_eq!(coerce_value(json!(5), AttributeType::Categorical), Some(json!(5)));
    }
}
