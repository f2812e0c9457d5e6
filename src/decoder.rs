use indexmap::IndexMap;

use crate::error::QueryError;
use crate::value::Value;

/// Raw-bytes-to-tree decoding contract.
///
/// Sessions decode every source (string, file, reader) through this trait,
/// so callers can swap the default JSON decoding for their own format via
/// [`Options::decoder`](crate::Options).
pub trait Decoder: Send + Sync {
    fn decode(&self, raw: &[u8]) -> Result<Value, QueryError>;
}

/// Standard JSON text decoding, with numbers normalized to double precision
/// and object key order preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultDecoder;

impl Decoder for DefaultDecoder {
    fn decode(&self, raw: &[u8]) -> Result<Value, QueryError> {
        let parsed: serde_json::Value =
            serde_json::from_slice(raw).map_err(|e| QueryError::Decode(e.to_string()))?;
        Ok(json_to_tree(parsed))
    }
}

/// Convert serde_json::Value to a query engine Value
pub fn json_to_tree(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or_default()),
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(json_to_tree).collect())
        }
        serde_json::Value::Object(obj) => {
            let mut map = IndexMap::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(k, json_to_tree(v));
            }
            Value::Object(map)
        }
    }
}

/// Convert a query engine Value to serde_json::Value
pub fn tree_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(b),
        // whole numbers round-trip as integers so typed targets with
        // integer fields can decode them
        Value::Number(n) => {
            if n.fract() == 0.0 && (i64::MIN as f64..=i64::MAX as f64).contains(&n) {
                serde_json::Value::Number(serde_json::Number::from(n as i64))
            } else {
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(tree_to_json).collect())
        }
        Value::Object(obj) => {
            let mut map = serde_json::Map::with_capacity(obj.len());
            for (k, v) in obj {
                map.insert(k, tree_to_json(v));
            }
            serde_json::Value::Object(map)
        }
    }
}
