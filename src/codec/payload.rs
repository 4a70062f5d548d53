//! JSON payload for container values

use crate::error::{StoreError, StoreResult};
use crate::store::{DType, Value};
use serde_json::{Map, Number, Value as Json};

/// Encode a list, map or tuple as a compact JSON document
pub(crate) fn encode_payload(value: &Value) -> StoreResult<String> {
    let json = to_json(value)?;
    Ok(serde_json::to_string(&json)?)
}

/// Decode a JSON payload into the container flavor named by the tag
pub(crate) fn decode_payload(dtype: DType, text: &str) -> StoreResult<Value> {
    let json: Json = serde_json::from_str(text)?;

    match (dtype, json) {
        (DType::Dict, json @ Json::Object(_)) => Ok(from_json(json)),
        (DType::List, json @ Json::Array(_)) => Ok(from_json(json)),
        (DType::Tuple, Json::Array(items)) => {
            Ok(Value::Tuple(items.into_iter().map(from_json).collect()))
        }
        (dtype, other) => Err(StoreError::corrupt(format!(
            "payload tagged '{}' does not hold a matching container: {}",
            dtype, other
        ))),
    }
}

fn to_json(value: &Value) -> StoreResult<Json> {
    let json = match value {
        Value::Str(s) => Json::String(s.clone()),
        Value::Integer(i) => Json::Number((*i).into()),
        Value::Float(f) => {
            let number = Number::from_f64(*f).ok_or_else(|| {
                StoreError::InvalidArgument(format!("float {} has no JSON representation", f))
            })?;
            Json::Number(number)
        }
        Value::Bool(b) => Json::Bool(*b),
        Value::Null => Json::Null,
        Value::List(items) | Value::Tuple(items) => {
            Json::Array(items.iter().map(to_json).collect::<StoreResult<_>>()?)
        }
        Value::Map(map) => {
            let mut object = Map::new();
            for (k, v) in map {
                object.insert(k.clone(), to_json(v)?);
            }
            Json::Object(object)
        }
    };
    Ok(json)
}

fn from_json(json: Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Json::String(s) => Value::Str(s),
        Json::Array(items) => Value::List(items.into_iter().map(from_json).collect()),
        Json::Object(object) => {
            Value::Map(object.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}
