//! # Mock Store
//!
//! Utilities for testing adapters and screens without a running [`StoreActor`](crate::framework::StoreActor).
//!
//! Two styles are offered:
//! - [`MockStore`]: a scripted store. Queue expectations, hand out [`MockStore::store`], and
//!   call [`MockStore::verify`] at the end.
//! - [`create_mock_store`] plus helpers like [`expect_patch`]: the test receives each raw
//!   [`StoreRequest`] and decides when (and whether) to answer it. Useful for interleavings.

use crate::framework::client::StoreClient;
use crate::framework::document::{Document, DocumentId, Fields};
use crate::framework::error::StoreError;
use crate::framework::message::{Response, StoreRequest};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Reply {
    ListAll(Result<Vec<Document>, StoreError>),
    Insert(Result<DocumentId, StoreError>),
    Patch(Result<(), StoreError>),
    Remove(Result<(), StoreError>),
    FindWhere(Result<Vec<Document>, StoreError>),
}

/// One expected request. `id` is checked for patch and remove, `value` for find_where.
struct Expectation {
    collection: String,
    id: Option<DocumentId>,
    value: Option<Value>,
    reply: Reply,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A scripted document store.
///
/// Requests are answered strictly in the order the expectations were queued. Any mismatch
/// (operation, collection, target id, query value) panics the mock task, which the caller
/// then sees as [`StoreError::Dropped`].
///
/// # Example
/// ```ignore
/// let mut mock = MockStore::new();
/// mock.expect_find_where("Category", json!("shoes")).return_ok(vec![doc]);
/// mock.expect_remove("Category", doc_id).return_ok(());
///
/// let adapter = EntityAdapter::<Category>::new(Arc::new(mock.store()));
/// // ...
/// mock.verify();
/// ```
pub struct MockStore {
    store: StoreClient,
    expectations: Queue,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockStore {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest>(100);
        let expectations: Queue = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().expect("mock queue poisoned").pop_front();
                let Some(exp) = next else {
                    panic!("Unexpected request on {}: no expectation left", request.collection());
                };
                assert_eq!(request.collection(), exp.collection, "collection mismatch");

                match (request, exp.reply) {
                    (StoreRequest::ListAll { respond_to, .. }, Reply::ListAll(r)) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Insert { respond_to, .. }, Reply::Insert(r)) => {
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Patch { id, respond_to, .. }, Reply::Patch(r)) => {
                        check_id(exp.id.as_ref(), &id);
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::Remove { id, respond_to, .. }, Reply::Remove(r)) => {
                        check_id(exp.id.as_ref(), &id);
                        let _ = respond_to.send(r);
                    }
                    (StoreRequest::FindWhere { value, respond_to, .. }, Reply::FindWhere(r)) => {
                        if let Some(expected) = exp.value {
                            assert_eq!(value, expected, "find_where value mismatch");
                        }
                        let _ = respond_to.send(r);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", request);
                    }
                }
            }
        });

        Self {
            store: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// The client to hand to the code under test.
    pub fn store(&self) -> StoreClient {
        self.store.clone()
    }

    pub fn expect_list_all(&mut self, collection: &str) -> ExpectationBuilder<Vec<Document>> {
        self.builder(collection, None, None, Reply::ListAll)
    }

    pub fn expect_insert(&mut self, collection: &str) -> ExpectationBuilder<DocumentId> {
        self.builder(collection, None, None, Reply::Insert)
    }

    pub fn expect_patch(&mut self, collection: &str, id: DocumentId) -> ExpectationBuilder<()> {
        self.builder(collection, Some(id), None, Reply::Patch)
    }

    pub fn expect_remove(&mut self, collection: &str, id: DocumentId) -> ExpectationBuilder<()> {
        self.builder(collection, Some(id), None, Reply::Remove)
    }

    pub fn expect_find_where(
        &mut self,
        collection: &str,
        value: Value,
    ) -> ExpectationBuilder<Vec<Document>> {
        self.builder(collection, None, Some(value), Reply::FindWhere)
    }

    fn builder<R>(
        &self,
        collection: &str,
        id: Option<DocumentId>,
        value: Option<Value>,
        wrap: fn(Result<R, StoreError>) -> Reply,
    ) -> ExpectationBuilder<R> {
        ExpectationBuilder {
            collection: collection.to_string(),
            id,
            value,
            wrap,
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().expect("mock queue poisoned");
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

fn check_id(expected: Option<&DocumentId>, actual: &DocumentId) {
    if let Some(expected) = expected {
        assert_eq!(actual, expected, "target document mismatch");
    }
}

/// Builder returned by the `expect_*` methods of [`MockStore`].
pub struct ExpectationBuilder<R> {
    collection: String,
    id: Option<DocumentId>,
    value: Option<Value>,
    wrap: fn(Result<R, StoreError>) -> Reply,
    expectations: Queue,
}

impl<R> ExpectationBuilder<R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let mut exps = self.expectations.lock().expect("mock queue poisoned");
        exps.push_back(Expectation {
            collection: self.collection,
            id: self.id,
            value: self.value,
            reply: (self.wrap)(response),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a store client and the receiver its requests arrive on.
///
/// Nothing answers unless the test does, so a test can hold a reply back while other
/// operations run, then release it.
pub fn create_mock_store(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Next message must be a ListAll request.
pub async fn expect_list_all(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Response<Vec<Document>>)> {
    match receiver.recv().await {
        Some(StoreRequest::ListAll {
            collection,
            respond_to,
        }) => Some((collection, respond_to)),
        _ => None,
    }
}

/// Next message must be an Insert request.
pub async fn expect_insert(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Fields, Response<DocumentId>)> {
    match receiver.recv().await {
        Some(StoreRequest::Insert {
            collection,
            fields,
            respond_to,
        }) => Some((collection, fields, respond_to)),
        _ => None,
    }
}

/// Next message must be a Patch request.
pub async fn expect_patch(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(DocumentId, Fields, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Patch {
            id,
            fields,
            respond_to,
            ..
        }) => Some((id, fields, respond_to)),
        _ => None,
    }
}

/// Next message must be a Remove request.
pub async fn expect_remove(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(DocumentId, Response<()>)> {
    match receiver.recv().await {
        Some(StoreRequest::Remove { id, respond_to, .. }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be a FindWhere request.
pub async fn expect_find_where(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(String, Value, Response<Vec<Document>>)> {
    match receiver.recv().await {
        Some(StoreRequest::FindWhere {
            field,
            value,
            respond_to,
            ..
        }) => Some((field, value, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::store::DocumentStore;
    use serde_json::json;

    fn doc(id: &str, value: Value) -> Document {
        Document::new(DocumentId::from(id), value.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn test_raw_find_where() {
        let (client, mut receiver) = create_mock_store(10);

        let task =
            tokio::spawn(async move { client.find_where("Order", "id", json!("A-1")).await });

        let (field, value, responder) = expect_find_where(&mut receiver)
            .await
            .expect("Expected FindWhere request");
        assert_eq!(field, "id");
        assert_eq!(value, json!("A-1"));
        responder
            .send(Ok(vec![doc("doc_000001", json!({ "id": "A-1" }))]))
            .unwrap();

        let found = task.await.unwrap().unwrap();
        assert_eq!(found[0].id, DocumentId::from("doc_000001"));
    }

    #[tokio::test]
    async fn test_mock_store_with_expectations() {
        let mut mock = MockStore::new();
        mock.expect_insert("Customer")
            .return_ok(DocumentId::from("doc_000007"));
        mock.expect_remove("Customer", DocumentId::from("doc_000007"))
            .return_err(StoreError::Backend("offline".into()));

        let store = mock.store();
        let id = store
            .insert("Customer", json!({ "name": "Ann" }).as_object().cloned().unwrap())
            .await
            .unwrap();
        assert_eq!(id.as_str(), "doc_000007");

        let removed = store.remove("Customer", &id).await;
        assert_eq!(removed, Err(StoreError::Backend("offline".into())));

        mock.verify();
    }
}
