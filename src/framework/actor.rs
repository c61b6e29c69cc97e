//! # Store Actor
//!
//! An in-process document store. It owns every collection and processes
//! [`StoreRequest`]s one at a time, so the collections need no locking.

use crate::framework::client::StoreClient;
use crate::framework::document::{Document, DocumentId, Fields};
use crate::framework::error::StoreError;
use crate::framework::message::StoreRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of the in-process document store.
///
/// **Concurrency Model**:
/// Requests are handled sequentially inside one Tokio task. Two clients racing a
/// lookup-then-write still see two separate round trips; the actor only guarantees that each
/// single request is applied atomically.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StoreActor::new()` returns the actor and a [`StoreClient`].
/// 2.  **Run**: spawn `actor.run()` in a background task.
/// 3.  **Shutdown**: drop every client; the loop ends and the task completes.
///
/// ```rust
/// use shop_admin::framework::{DocumentStore, StoreActor};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(10);
///     tokio::spawn(actor.run());
///
///     let fields = json!({ "name": "Alice" }).as_object().cloned().unwrap();
///     let id = client.insert("Customer", fields).await.unwrap();
///     let docs = client.list_all("Customer").await.unwrap();
///     assert_eq!(docs[0].id, id);
/// }
/// ```
///
/// # Semantics
///
/// * **ListAll**: documents in insertion order; an unknown collection is empty.
/// * **Insert**: assigns the next `doc_NNNNNN` identifier and appends.
/// * **Patch**: merges attributes; a missing document is a [`StoreError::MissingDocument`].
/// * **Remove**: deletes; a missing document is a [`StoreError::MissingDocument`].
/// * **FindWhere**: documents whose attribute equals the given JSON value.
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    collections: HashMap<String, Vec<Document>>,
    next_id: u64,
}

impl StoreActor {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the channel capacity; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            collections: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the request loop until every client is dropped.
    pub async fn run(mut self) {
        info!("Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::ListAll {
                    collection,
                    respond_to,
                } => {
                    let docs = self
                        .collections
                        .get(&collection)
                        .cloned()
                        .unwrap_or_default();
                    debug!(%collection, size = docs.len(), "ListAll");
                    let _ = respond_to.send(Ok(docs));
                }
                StoreRequest::Insert {
                    collection,
                    fields,
                    respond_to,
                } => {
                    debug!(%collection, ?fields, "Insert");
                    let id = DocumentId::from(self.next_id);
                    self.next_id += 1;
                    let docs = self.collections.entry(collection.clone()).or_default();
                    docs.push(Document::new(id.clone(), fields));
                    info!(%collection, %id, size = docs.len(), "Inserted");
                    let _ = respond_to.send(Ok(id));
                }
                StoreRequest::Patch {
                    collection,
                    id,
                    fields,
                    respond_to,
                } => {
                    debug!(%collection, %id, ?fields, "Patch");
                    let result = match self.find_mut(&collection, &id) {
                        Some(doc) => {
                            doc.fields.extend(fields);
                            info!(%collection, %id, "Patched");
                            Ok(())
                        }
                        None => {
                            warn!(%collection, %id, "Patch target missing");
                            Err(missing(&collection, id))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Remove {
                    collection,
                    id,
                    respond_to,
                } => {
                    debug!(%collection, %id, "Remove");
                    let docs = self.collections.entry(collection.clone()).or_default();
                    let result = match docs.iter().position(|doc| doc.id == id) {
                        Some(index) => {
                            docs.remove(index);
                            info!(%collection, %id, size = docs.len(), "Removed");
                            Ok(())
                        }
                        None => {
                            warn!(%collection, %id, "Remove target missing");
                            Err(missing(&collection, id))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::FindWhere {
                    collection,
                    field,
                    value,
                    respond_to,
                } => {
                    let matches: Vec<Document> = self
                        .collections
                        .get(&collection)
                        .map(|docs| {
                            docs.iter()
                                .filter(|doc| doc.fields.get(&field) == Some(&value))
                                .cloned()
                                .collect()
                        })
                        .unwrap_or_default();
                    debug!(%collection, %field, %value, found = matches.len(), "FindWhere");
                    let _ = respond_to.send(Ok(matches));
                }
            }
        }

        let size: usize = self.collections.values().map(Vec::len).sum();
        info!(collections = self.collections.len(), size, "Shutdown");
    }

    fn find_mut(&mut self, collection: &str, id: &DocumentId) -> Option<&mut Document> {
        self.collections
            .get_mut(collection)?
            .iter_mut()
            .find(|doc| &doc.id == id)
    }
}

fn missing(collection: &str, id: DocumentId) -> StoreError {
    StoreError::MissingDocument {
        collection: collection.to_string(),
        id,
    }
}
