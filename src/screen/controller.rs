//! # Screen Controller
//!
//! One generic controller drives the fetch/render/mutate loop of every screen.
//!
//! # Lifecycle
//!
//! 1. **Load**: `Idle -> Loading -> Loaded | LoadFailed`. A failed load keeps the previous rows.
//! 2. **Mutate**: `Loaded -> Mutating`, then on success a full reload; on failure
//!    `MutationFailed` with the rows untouched.
//! 3. **Deactivate**: the shell bumps the generation when the screen is left. Any operation
//!    still in flight finishes against the store but its result is discarded
//!    ([`ConsoleError::Stale`]).
//!
//! Every fetch also takes a load sequence number. A fetch that completes after a newer one
//! has already been applied is discarded the same way, so a slow mount-time load cannot
//! replace the rows of a reload that followed a write.
//!
//! The state lives behind a `std::sync::Mutex` that is never held across an `.await`.

use crate::framework::{
    AppId, ConsoleError, Creatable, EntityAdapter, Patchable, Record, RecordKey, Removable,
    Resolution, SharedStore, StoreEntity,
};
use crate::screen::state::{Notice, Phase, ScreenState};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Controller for one entity screen. Clones share the same state.
pub struct Screen<T> {
    adapter: EntityAdapter<T>,
    state: Arc<Mutex<ScreenState<T>>>,
}

impl<T> Clone for Screen<T> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter.clone(),
            state: self.state.clone(),
        }
    }
}

impl<T: StoreEntity> Screen<T> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            adapter: EntityAdapter::new(store),
            state: Arc::new(Mutex::new(ScreenState::default())),
        }
    }

    pub fn adapter(&self) -> &EntityAdapter<T> {
        &self.adapter
    }

    fn lock(&self) -> MutexGuard<'_, ScreenState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.lock().phase.clone()
    }

    pub fn records(&self) -> Vec<Record<T>> {
        self.lock().records.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone()
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Copy of the whole state, for rendering.
    pub fn state(&self) -> ScreenState<T> {
        self.lock().clone()
    }

    /// The loaded record with this application id.
    pub fn find(&self, app_id: &AppId) -> Option<Record<T>> {
        self.lock()
            .records
            .iter()
            .find(|record| record.app_id() == app_id)
            .cloned()
    }

    // ---------------------------------------------------------------------
    // Generation guard
    // ---------------------------------------------------------------------

    /// Enters `phase` and returns the ticket for the operation.
    pub(crate) fn begin(&self, phase: Phase) -> u64 {
        let mut state = self.lock();
        state.phase = phase;
        state.generation
    }

    /// Hands out the sequence number for the next fetch.
    pub(crate) fn issue_load(&self) -> u64 {
        let mut state = self.lock();
        state.load_seq += 1;
        state.load_seq
    }

    /// Whether a fetch result for `(ticket, seq)` may still be applied.
    pub(crate) fn accepts(&self, ticket: u64, seq: u64) -> bool {
        let state = self.lock();
        state.generation == ticket && seq > state.applied_seq
    }

    /// Leaves the screen: later results of in-flight operations are discarded.
    pub fn deactivate(&self) {
        let mut state = self.lock();
        state.generation += 1;
        state.phase = Phase::Idle;
        state.records.clear();
        state.notice = None;
        debug!(screen = T::COLLECTION, generation = state.generation, "Deactivated");
    }

    // ---------------------------------------------------------------------
    // Load
    // ---------------------------------------------------------------------

    /// Fetches every record. Returns the number of rows now on screen.
    pub async fn load(&self) -> Result<usize, ConsoleError> {
        let ticket = self.begin(Phase::Loading);
        self.load_with(ticket).await
    }

    pub(crate) async fn load_with(&self, ticket: u64) -> Result<usize, ConsoleError> {
        let seq = self.issue_load();
        let result = self.adapter.list().await;
        self.finish_load(ticket, seq, result)
    }

    pub(crate) fn finish_load(
        &self,
        ticket: u64,
        seq: u64,
        result: Result<Vec<Record<T>>, ConsoleError>,
    ) -> Result<usize, ConsoleError> {
        let mut state = self.lock();
        if state.generation != ticket || seq <= state.applied_seq {
            warn!(screen = T::COLLECTION, ticket, seq, "Discarding stale load");
            return Err(ConsoleError::Stale);
        }
        state.applied_seq = seq;
        match result {
            Ok(records) => {
                let size = records.len();
                state.records = records;
                state.phase = Phase::Loaded;
                info!(screen = T::COLLECTION, size, "Loaded");
                Ok(size)
            }
            Err(e) => {
                warn!(screen = T::COLLECTION, error = %e, "Load failed");
                state.phase = Phase::LoadFailed(e.to_string());
                state.notice = Some(Notice::error(format!("Error fetching {}.", T::PLURAL)));
                Err(e)
            }
        }
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Enters `Mutating` and captures what the resolution strategy needs.
    fn begin_mutation(&self) -> (u64, Vec<Record<T>>) {
        let mut state = self.lock();
        state.phase = Phase::Mutating;
        let snapshot = match T::RESOLUTION {
            Resolution::Snapshot => state.records.clone(),
            Resolution::Query => Vec::new(),
        };
        (state.generation, snapshot)
    }

    /// Awaits the write, records the outcome, and reloads on success.
    async fn settle<F>(
        &self,
        ticket: u64,
        past: &str,
        write: F,
    ) -> Result<RecordKey, ConsoleError>
    where
        F: Future<Output = Result<RecordKey, ConsoleError>>,
    {
        let result = write.await;
        {
            let mut state = self.lock();
            if state.generation != ticket {
                warn!(screen = T::COLLECTION, ticket, "Discarding stale mutation result");
                return Err(ConsoleError::Stale);
            }
            match &result {
                Ok(_) => {
                    state.notice = Some(Notice::success(format!(
                        "{} {} successfully.",
                        T::LABEL,
                        past
                    )));
                }
                Err(e) => {
                    state.phase = Phase::MutationFailed(e.to_string());
                    state.notice = Some(Notice::from_error(e));
                }
            }
        }
        let key = result?;
        if let Err(e) = self.load_with(ticket).await {
            warn!(screen = T::COLLECTION, error = %e, "Reload after write failed");
        }
        Ok(key)
    }
}

impl<T: Creatable> Screen<T> {
    pub async fn create(&self, params: T::Create) -> Result<RecordKey, ConsoleError> {
        let (ticket, _) = self.begin_mutation();
        self.settle(ticket, "added", self.adapter.create(params)).await
    }
}

impl<T: Patchable> Screen<T> {
    pub async fn update(
        &self,
        app_id: &AppId,
        update: T::Update,
    ) -> Result<RecordKey, ConsoleError> {
        let (ticket, snapshot) = self.begin_mutation();
        self.settle(ticket, "updated", self.adapter.update(app_id, update, &snapshot)).await
    }
}

impl<T: Removable> Screen<T> {
    pub async fn delete(&self, app_id: &AppId) -> Result<RecordKey, ConsoleError> {
        let (ticket, snapshot) = self.begin_mutation();
        self.settle(ticket, "deleted", self.adapter.delete(app_id, &snapshot)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockStore;
    use crate::framework::{Document, DocumentId, StoreError};
    use crate::model::{Category, CategoryCreate};
    use crate::screen::NoticeKind;
    use serde_json::json;

    fn category_doc(internal: &str, id: &str) -> Document {
        Document::new(
            DocumentId::from(internal),
            json!({ "id": id, "title": id, "description": "d", "position": 1 })
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_load_failure_keeps_rows() {
        let mut mock = MockStore::new();
        mock.expect_list_all("Category")
            .return_ok(vec![category_doc("doc_000001", "shoes")]);
        mock.expect_list_all("Category")
            .return_err(StoreError::Backend("timeout".into()));

        let screen = Screen::<Category>::new(Arc::new(mock.store()));
        assert_eq!(screen.phase(), Phase::Idle);
        assert_eq!(screen.load().await.unwrap(), 1);
        assert_eq!(screen.phase(), Phase::Loaded);

        assert!(screen.load().await.is_err());
        assert!(matches!(screen.phase(), Phase::LoadFailed(_)));
        assert_eq!(screen.records().len(), 1);
        assert_eq!(
            screen.notice().unwrap().message,
            "Error fetching categories."
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_create_reloads() {
        let mut mock = MockStore::new();
        mock.expect_find_where("Category", json!("home-decor"))
            .return_ok(vec![]);
        mock.expect_insert("Category")
            .return_ok(DocumentId::from("doc_000009"));
        mock.expect_list_all("Category")
            .return_ok(vec![category_doc("doc_000009", "home-decor")]);

        let screen = Screen::<Category>::new(Arc::new(mock.store()));
        let key = screen
            .create(CategoryCreate {
                title: "Home  Decor".into(),
                description: "Lamps".into(),
                position: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(key.app.as_str(), "home-decor");
        assert_eq!(screen.phase(), Phase::Loaded);
        assert!(screen.find(&AppId::from("home-decor")).is_some());
        let notice = screen.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Category added successfully.");
        mock.verify();
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let mut mock = MockStore::new();
        mock.expect_find_where("Category", json!("ghost"))
            .return_ok(vec![]);

        let screen = Screen::<Category>::new(Arc::new(mock.store()));
        let err = screen.delete(&AppId::from("ghost")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(screen.phase(), Phase::MutationFailed(_)));
        assert_eq!(screen.notice().unwrap().kind, NoticeKind::Error);
        mock.verify();
    }

    #[tokio::test]
    async fn test_deactivate_discards_late_load() {
        let (store, mut receiver) = crate::framework::mock::create_mock_store(4);
        let screen = Screen::<Category>::new(Arc::new(store));

        let loading = screen.clone();
        let task = tokio::spawn(async move { loading.load().await });

        let (_, responder) = crate::framework::mock::expect_list_all(&mut receiver)
            .await
            .unwrap();
        screen.deactivate();
        responder
            .send(Ok(vec![category_doc("doc_000001", "shoes")]))
            .unwrap();

        assert_eq!(task.await.unwrap(), Err(ConsoleError::Stale));
        assert_eq!(screen.phase(), Phase::Idle);
        assert!(screen.records().is_empty());
        assert_eq!(screen.generation(), 1);
    }
}
