//! # Documents & Keys
//!
//! A stored document is an internal identifier plus a flat attribute map. Records on screen
//! carry a [`RecordKey`], which keeps the store's [`DocumentId`] and the application-level
//! [`AppId`] side by side so call sites never have to guess which one they hold.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Attribute name holding the application-level id inside a stored document.
pub const ID_FIELD: &str = "id";

/// Attribute map of a stored document.
pub type Fields = Map<String, Value>;

/// Identifier assigned by the document store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub String);

impl DocumentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for DocumentId {
    fn from(n: u64) -> Self {
        Self(format!("doc_{:06}", n))
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Business-meaningful identifier (a category slug, an order number, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AppId(pub String);

impl AppId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value used when querying the store for this id.
    pub fn to_value(&self) -> Value {
        Value::String(self.0.clone())
    }
}

impl From<&str> for AppId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AppId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Display for AppId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Both identities of one record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub internal: DocumentId,
    pub app: AppId,
}

impl RecordKey {
    pub fn new(internal: DocumentId, app: AppId) -> Self {
        Self { internal, app }
    }
}

/// A raw document as returned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// The stored application id attribute, when it is a string.
    pub fn stored_app_id(&self) -> Option<AppId> {
        self.fields
            .get(ID_FIELD)
            .and_then(Value::as_str)
            .map(AppId::from)
    }
}

/// A decoded entity together with its key, in store enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<T> {
    pub key: RecordKey,
    pub entity: T,
    /// Why the document could not be decoded. The entity is then `T::default()`, but the key
    /// is real, so the row can still be deleted or fixed by an update.
    pub problem: Option<String>,
}

impl<T> Record<T> {
    pub fn new(key: RecordKey, entity: T) -> Self {
        Self {
            key,
            entity,
            problem: None,
        }
    }

    pub fn app_id(&self) -> &AppId {
        &self.key.app
    }

    pub fn is_malformed(&self) -> bool {
        self.problem.is_some()
    }
}

impl<T: Default> Record<T> {
    pub fn malformed(key: RecordKey, problem: impl Into<String>) -> Self {
        Self {
            key,
            entity: T::default(),
            problem: Some(problem.into()),
        }
    }
}
