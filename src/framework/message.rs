//! # Store Messages
//!
//! The requests a [`StoreClient`](crate::framework::StoreClient) sends to the
//! [`StoreActor`](crate::framework::StoreActor). One variant per operation of the document
//! store boundary; each carries a oneshot sender for the reply.

use crate::framework::document::{Document, DocumentId, Fields};
use crate::framework::error::StoreError;
use serde_json::Value;
use tokio::sync::oneshot;

/// One-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    ListAll {
        collection: String,
        respond_to: Response<Vec<Document>>,
    },
    Insert {
        collection: String,
        fields: Fields,
        respond_to: Response<DocumentId>,
    },
    Patch {
        collection: String,
        id: DocumentId,
        fields: Fields,
        respond_to: Response<()>,
    },
    Remove {
        collection: String,
        id: DocumentId,
        respond_to: Response<()>,
    },
    FindWhere {
        collection: String,
        field: String,
        value: Value,
        respond_to: Response<Vec<Document>>,
    },
}

impl StoreRequest {
    pub fn collection(&self) -> &str {
        match self {
            StoreRequest::ListAll { collection, .. }
            | StoreRequest::Insert { collection, .. }
            | StoreRequest::Patch { collection, .. }
            | StoreRequest::Remove { collection, .. }
            | StoreRequest::FindWhere { collection, .. } => collection,
        }
    }
}
