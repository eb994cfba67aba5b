//! Row Module
//!
//! The field-mapping representation of a record's data.
//!
//! ## Shapes
//! ```text
//! Table: id  → Row
//! Row:   field → Value
//! ```
//!
//! Both are `BTreeMap`s: iteration order is ascending key order, which is
//! also the order the YAML backend writes them in.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Mapping;

pub use serde_yaml::Value;

use crate::error::{RepoError, Result};

/// One record's fields
pub type Row = BTreeMap<String, Value>;

/// The full id → row mapping held by a storage
pub type Table = BTreeMap<String, Row>;

/// Export any serializable struct as a row
///
/// The value must serialize to a mapping; nested values are kept as-is.
pub fn to_row<T: Serialize>(value: &T) -> Result<Row> {
    match serde_yaml::to_value(value)? {
        Value::Mapping(mapping) => mapping_to_row(mapping),
        Value::Null => Ok(Row::new()),
        other => Err(RepoError::Serialization(format!(
            "expected a mapping, got {}",
            kind_of(&other)
        ))),
    }
}

/// Import any deserializable struct from a row
pub fn from_row<T: DeserializeOwned>(row: Row) -> Result<T> {
    let mapping: Mapping = row
        .into_iter()
        .map(|(field, value)| (Value::String(field), value))
        .collect();
    Ok(serde_yaml::from_value(Value::Mapping(mapping))?)
}

/// Convert a loaded YAML key to the row field-key convention
///
/// Strings are kept, minus a leading `:` left by symbol-style keys.
/// Numbers and booleans are stringified. Anything else has no field name.
pub fn normalize_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.strip_prefix(':').unwrap_or(s).to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Convert a loaded YAML key to a table id
///
/// Unlike field names, string ids are kept verbatim.
pub fn id_key(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        other => normalize_key(other),
    }
}

/// Convert a YAML mapping into a row, normalizing every key
///
/// Two keys that normalize to the same field name are a `Serialization` error.
pub(crate) fn mapping_to_row(mapping: Mapping) -> Result<Row> {
    let mut row = Row::new();
    for (key, value) in mapping {
        let field = normalize_key(&key).ok_or_else(|| {
            RepoError::Serialization(format!("unsupported field key: {}", kind_of(&key)))
        })?;
        if row.contains_key(&field) {
            return Err(RepoError::Serialization(format!("duplicate field: {}", field)));
        }
        row.insert(field, value);
    }
    Ok(row)
}

/// Short name of a value's YAML node kind, for error messages
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
