//! Deserialization helpers for the loosely typed parts of exported variant JSON.
//!
//! Exports from the variant store are not consistent about scalar vs. list
//! values in `info` maps (`"DP": "39"` and `"DP": ["39"]` both occur) or about
//! quoting of coordinates (`"start": "102265642"`). These helpers normalize both.

use std::collections::HashMap;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Free-form `key -> [values]` annotations.
pub type InfoMap = HashMap<String, Vec<String>>;

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

///
/// Normalize a JSON value into the list form used by [InfoMap].
///
/// Arrays keep their order, scalars become single-element lists and `null`
/// becomes an empty list.
///
pub fn info_values(value: &Value) -> Vec<String> {
    match value {
        Value::Array(values) => values.iter().filter_map(value_to_string).collect(),
        scalar => value_to_string(scalar).into_iter().collect(),
    }
}

pub(crate) fn deserialize_info<'de, D>(deserializer: D) -> Result<InfoMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<HashMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(|(key, value)| (key.clone(), info_values(value)))
        .collect())
}

pub(crate) fn deserialize_position<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| de::Error::custom(format!("invalid position: {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("invalid position: {}", s))),
        Value::Null => Ok(0),
        other => Err(de::Error::custom(format!("invalid position: {}", other))),
    }
}

pub(crate) fn deserialize_quality<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) => Ok(s.trim().parse::<f64>().ok()),
        _ => Ok(None),
    }
}
