//! The four resources managed by the console, each implementing the
//! [`StoreEntity`](crate::framework::StoreEntity) family of traits.

pub mod category;
pub mod customer;
pub mod order;
pub mod product;

pub use category::*;
pub use customer::*;
pub use order::*;
pub use product::*;

use crate::framework::{ConsoleError, Fields};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

/// A stored value that should be a `T` but may hold whatever a form once wrote.
///
/// Text inputs in older admin screens stored strings such as `"2"` or `"first"`. Numeric
/// strings decode to [`Lenient::Value`]; anything else is kept verbatim as [`Lenient::Raw`]
/// so the document still shows up and can be edited or deleted.
#[derive(Debug, Clone, PartialEq)]
pub enum Lenient<T> {
    Value(T),
    Raw(String),
}

impl<T> Lenient<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Lenient::Value(v) => Some(v),
            Lenient::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            Lenient::Value(_) => None,
            Lenient::Raw(s) => Some(s),
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Lenient::Value(value)
    }
}

impl<T: Display> Display for Lenient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lenient::Value(v) => Display::fmt(v, f),
            Lenient::Raw(s) => f.write_str(s),
        }
    }
}

impl<T: Serialize> Serialize for Lenient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Lenient::Value(v) => v.serialize(serializer),
            Lenient::Raw(s) => serializer.serialize_str(s),
        }
    }
}

/// Decodes a [`Lenient`] attribute. Never fails.
///
/// `null`, a missing attribute and `""` are `None`; `"12.5"` parses; numbers pass through;
/// anything that does not fit `T` is kept as its raw text.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<Lenient<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
{
    let value = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(value) => value,
    };
    let decoded = match value {
        Value::String(s) => match s.trim().parse() {
            Ok(v) => Lenient::Value(v),
            Err(_) => Lenient::Raw(s),
        },
        other => match T::deserialize(&other) {
            Ok(v) => Lenient::Value(v),
            Err(_) => Lenient::Raw(other.to_string()),
        },
    };
    Ok(Some(decoded))
}

/// Decodes a text attribute, accepting any scalar. `null` is empty; arrays and maps fail.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(if other.is_array() { "array" } else { "map" }),
            &"text",
        )),
    }
}

/// Rejects a blank form field.
pub(crate) fn require(field: &str, value: String) -> Result<String, ConsoleError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConsoleError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Rejects a missing form value.
pub(crate) fn require_some<T>(field: &str, value: Option<T>) -> Result<T, ConsoleError> {
    value.ok_or_else(|| ConsoleError::validation(format!("{} is required", field)))
}

/// Serializes a form struct into store attributes, dropping absent optionals.
pub(crate) fn to_fields<S: Serialize>(value: &S) -> Result<Fields, ConsoleError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut map)) => {
            map.retain(|_, v| !v.is_null());
            Ok(map)
        }
        Ok(other) => Err(ConsoleError::validation(format!(
            "expected an attribute map, got {}",
            other
        ))),
        Err(e) => Err(ConsoleError::validation(e.to_string())),
    }
}
