use serde_json::Value;

use super::{Definition, ScalarType, Schema};
use crate::response::ResponseValue;

/// Serializes a leaf value to its output representation.
pub(crate) fn coerce_leaf(schema: &Schema, definition: Definition, value: Value) -> Result<ResponseValue, String> {
    match definition {
        Definition::Scalar(scalar) => coerce_scalar(schema, scalar, value),
        Definition::Enum(id) => {
            let definition = &schema[id];
            match value {
                Value::String(value) if definition.values.contains(&value) => Ok(ResponseValue::String { value }),
                value => Err(format!("Enum \"{}\" cannot represent value: {value}", definition.name)),
            }
        }
        Definition::Object(_) | Definition::Interface(_) | Definition::Union(_) => {
            Err(format!("{} is not a leaf type", schema.definition_name(definition)))
        }
    }
}

fn coerce_scalar(schema: &Schema, scalar: ScalarType, value: Value) -> Result<ResponseValue, String> {
    match scalar {
        ScalarType::Int => {
            let int = match &value {
                Value::Number(number) => number
                    .as_i64()
                    .or_else(|| number.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                    .and_then(|n| i32::try_from(n).ok()),
                Value::Bool(b) => Some(i32::from(*b)),
                _ => None,
            };
            int.map(|value| ResponseValue::Int { value })
                .ok_or_else(|| format!("Int cannot represent value: {value}"))
        }
        ScalarType::Float => match &value {
            Value::Number(number) => number
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|value| ResponseValue::Float { value })
                .ok_or_else(|| format!("Float cannot represent value: {value}")),
            Value::Bool(b) => Ok(ResponseValue::Float {
                value: if *b { 1.0 } else { 0.0 },
            }),
            _ => Err(format!("Float cannot represent value: {value}")),
        },
        ScalarType::String => match value {
            Value::String(value) => Ok(ResponseValue::String { value }),
            Value::Bool(b) => Ok(ResponseValue::String { value: b.to_string() }),
            Value::Number(number) => Ok(ResponseValue::String {
                value: number.to_string(),
            }),
            value => Err(format!("String cannot represent value: {value}")),
        },
        ScalarType::Boolean => match value {
            Value::Bool(value) => Ok(ResponseValue::Boolean { value }),
            value => Err(format!("Boolean cannot represent a non boolean value: {value}")),
        },
        ScalarType::Id => match value {
            Value::String(value) => Ok(ResponseValue::String { value }),
            Value::Number(number) if number.is_i64() || number.is_u64() => Ok(ResponseValue::String {
                value: number.to_string(),
            }),
            value => Err(format!("ID cannot represent value: {value}")),
        },
        ScalarType::Custom(id) => {
            let definition = &schema[id];
            match (definition.serialize)(value) {
                Ok(Value::Null) => Err(format!("{} serializer returned null", definition.name)),
                Ok(value) => Ok(ResponseValue::Json { value: Box::new(value) }),
                Err(message) => Err(format!("{} cannot represent value: {message}", definition.name)),
            }
        }
    }
}
