//! # DocumentStore Trait
//!
//! The boundary between the console and whatever document database backs it. The in-process
//! [`StoreClient`](crate::framework::StoreClient) implements it; a hosted backend would too.
//!
//! Update and delete take internal identifiers only. Finding the internal identifier for an
//! application id is the caller's job (see [`EntityAdapter::resolve`](crate::framework::EntityAdapter::resolve)).

use crate::framework::document::{Document, DocumentId, Fields};
use crate::framework::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every document of a collection, in enumeration order. Unknown collections are empty.
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Writes a new document and returns its store-assigned identifier.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError>;

    /// Merges `fields` into an existing document. Fails if the document is gone.
    async fn patch(&self, collection: &str, id: &DocumentId, fields: Fields)
        -> Result<(), StoreError>;

    /// Removes a document. Fails if the document is gone.
    async fn remove(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError>;

    /// Documents whose `field` attribute equals `value`.
    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, StoreError>;
}

/// Shared handle to a store, as held by adapters and screens.
pub type SharedStore = Arc<dyn DocumentStore>;
