//! # Entity Traits
//!
//! The contract each resource (Category, Product, Customer, Order) implements so the generic
//! [`EntityAdapter`](crate::framework::EntityAdapter) and [`Screen`](crate::screen::Screen)
//! can be written once.
//!
//! Capabilities are split into separate traits. A resource only gets the operations its
//! lifecycle allows: Orders are never [`Removable`], Customers are never [`Creatable`]. The
//! compiler rejects `screen.delete(..)` on an order screen.
//!
//! # Provided Methods (Hooks)
//! - [`StoreEntity::key_of`]: how the application id is read from a document.
//! - [`StoreEntity::from_document`]: serde decoding of the attribute map.
//! - [`Creatable::on_create`]: async check run against the store before the insert.

use crate::framework::document::{AppId, Document, Fields, RecordKey};
use crate::framework::error::ConsoleError;
use crate::framework::store::DocumentStore;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

/// How an application id is turned back into an internal document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Query the collection for `id == value`.
    Query,
    /// Match against the records the screen already loaded. Only as fresh as the last load.
    Snapshot,
}

/// Trait that every resource managed by the console implements.
pub trait StoreEntity: Clone + Debug + Default + Send + Sync + DeserializeOwned + 'static {
    /// Collection name in the document store.
    const COLLECTION: &'static str;

    /// Human label used in notices ("Category added successfully.").
    const LABEL: &'static str;

    /// Plural label used in load notices ("Error fetching categories.").
    const PLURAL: &'static str;

    const RESOLUTION: Resolution = Resolution::Query;

    /// Builds the record key. The stored `id` attribute is the application id; a document
    /// without one falls back to its internal identifier.
    fn key_of(doc: &Document) -> RecordKey {
        let app = doc
            .stored_app_id()
            .unwrap_or_else(|| AppId::from(doc.id.as_str()));
        RecordKey::new(doc.id.clone(), app)
    }

    /// Decodes the attribute map.
    fn from_document(doc: &Document) -> Result<Self, ConsoleError> {
        serde_json::from_value(Value::Object(doc.fields.clone())).map_err(|e| {
            ConsoleError::Decode {
                label: Self::LABEL,
                id: doc.id.clone(),
                reason: e.to_string(),
            }
        })
    }
}

/// Resources that can be created from the console.
#[async_trait]
pub trait Creatable: StoreEntity {
    /// Form payload for a new record.
    type Create: Send + Sync + Debug;

    /// Validates the payload and produces the attributes to write.
    /// Must fail with [`ConsoleError::Validation`] before anything reaches the store.
    fn into_fields(params: Self::Create) -> Result<Fields, ConsoleError>;

    /// Called after validation, immediately before the insert.
    async fn on_create(_fields: &Fields, _store: &dyn DocumentStore) -> Result<(), ConsoleError> {
        Ok(())
    }
}

/// Resources whose fields can be patched.
pub trait Patchable: StoreEntity {
    /// Partial field set.
    type Update: Send + Sync + Debug;

    /// Validates the update and produces the attributes to merge.
    fn patch_fields(update: Self::Update) -> Result<Fields, ConsoleError>;
}

/// Resources that can be deleted from the console.
pub trait Removable: StoreEntity {}
