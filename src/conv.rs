//! Conversions from driver value representations into [`Value`].

use std::collections::BTreeMap;

use crate::value::{Scalar, Value};

/// Convert a value read from a SQLite row.
///
/// Text that is not valid UTF-8 is converted lossily.
#[cfg(feature = "sqlite")]
pub(crate) fn sqlite_value_to_value(value: rusqlite::types::ValueRef<'_>) -> Value {
    use rusqlite::types::ValueRef;

    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(val) => Value::Scalar(Scalar::I64(val)),
        ValueRef::Real(val) => Value::Scalar(Scalar::F64(val)),
        ValueRef::Text(val) => {
            Value::Scalar(Scalar::Text(String::from_utf8_lossy(val).into_owned()))
        }
        ValueRef::Blob(val) => Value::Bytes(val.to_vec()),
    }
}

/// Convert a value decoded from a JSON response, as sent by drivers that talk to a remote server.
///
/// Binary data arrives as an object such as `{"base64": "AQI"}`, which becomes a [`Value::Map`].
/// Arrays have no rendering and become [`Value::Unsupported`].
pub fn json_value_to_value(value: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match value {
        Json::Null => Value::Null,
        Json::Bool(val) => Value::Scalar(Scalar::Bool(val)),
        Json::Number(val) => {
            if let Some(val) = val.as_i64() {
                Value::Scalar(Scalar::I64(val))
            } else if let Some(val) = val.as_u64() {
                Value::Scalar(Scalar::U64(val))
            } else if let Some(val) = val.as_f64() {
                Value::Scalar(Scalar::F64(val))
            } else {
                Value::Unsupported("number".to_owned())
            }
        }
        Json::String(val) => Value::Scalar(Scalar::Text(val)),
        Json::Array(_) => Value::Unsupported("array".to_owned()),
        Json::Object(map) => Value::Map(
            map.into_iter()
                .map(|(key, val)| (key, json_value_to_value(val)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}
