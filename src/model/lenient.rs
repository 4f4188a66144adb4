//! Field coercion for loosely typed project dictionaries.
//!
//! Every helper accepts any JSON value (including `null`) and never fails, so a
//! single odd field cannot make a whole project unreadable.

use super::project::{HistoryEntry, ServerNames};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_strings(value))
}

/// Like [`string_list`] but drops repeated names, keeping the first occurrence.
pub fn server_names<'de, D>(deserializer: D) -> Result<ServerNames, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce_strings(value).into_iter().collect())
}

pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

/// Non-negative counter; negative numbers clamp to zero, fractions truncate.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                v
            } else if let Some(v) = n.as_f64() {
                if v.is_finite() && v > 0.0 {
                    v.trunc() as u64
                } else {
                    0
                }
            } else {
                0
            }
        }
        _ => 0,
    })
}

pub fn object<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    })
}

pub fn history<'de, D>(deserializer: D) -> Result<Vec<HistoryEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let items = match value {
        Some(Value::Array(items)) => items,
        _ => return Ok(Vec::new()),
    };
    let total = items.len();
    let entries: Vec<HistoryEntry> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(HistoryEntry::from(fields)),
            _ => None,
        })
        .collect();
    if entries.len() != total {
        tracing::debug!(
            dropped = total - entries.len(),
            "Dropped non-object history entries"
        );
    }
    Ok(entries)
}

fn coerce_strings(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(scalar_to_string).collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
