//! # Store Client
//!
//! The sending half of the in-process document store.

use crate::framework::document::{Document, DocumentId, Fields};
use crate::framework::error::StoreError;
use crate::framework::message::StoreRequest;
use crate::framework::store::DocumentStore;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// Forwards each [`DocumentStore`] call to a [`StoreActor`](crate::framework::StoreActor) over a
/// Tokio mpsc channel and waits for the reply on a oneshot channel.
///
/// * **Cloneable**: holds only a sender, so cloning is inexpensive.
/// * **Shutdown**: when every clone is dropped the actor's loop ends.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Closed)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }
}

#[async_trait]
impl DocumentStore for StoreClient {
    async fn list_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collection = collection.to_string();
        self.request(|respond_to| StoreRequest::ListAll {
            collection,
            respond_to,
        })
        .await
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<DocumentId, StoreError> {
        let collection = collection.to_string();
        self.request(|respond_to| StoreRequest::Insert {
            collection,
            fields,
            respond_to,
        })
        .await
    }

    async fn patch(
        &self,
        collection: &str,
        id: &DocumentId,
        fields: Fields,
    ) -> Result<(), StoreError> {
        let collection = collection.to_string();
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Patch {
            collection,
            id,
            fields,
            respond_to,
        })
        .await
    }

    async fn remove(&self, collection: &str, id: &DocumentId) -> Result<(), StoreError> {
        let collection = collection.to_string();
        let id = id.clone();
        self.request(|respond_to| StoreRequest::Remove {
            collection,
            id,
            respond_to,
        })
        .await
    }

    async fn find_where(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collection = collection.to_string();
        let field = field.to_string();
        self.request(|respond_to| StoreRequest::FindWhere {
            collection,
            field,
            value,
            respond_to,
        })
        .await
    }
}
