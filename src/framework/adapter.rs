//! # Entity Adapter
//!
//! The generic CRUD-and-reconciliation component: list, create, update and delete for any
//! [`StoreEntity`], translating application ids to internal document identifiers on the way.

use crate::framework::document::{AppId, Document, Record, RecordKey, ID_FIELD};
use crate::framework::entity::{Creatable, Patchable, Removable, Resolution, StoreEntity};
use crate::framework::error::{ConsoleError, StoreError};
use crate::framework::store::SharedStore;
use std::marker::PhantomData;
use tracing::{debug, info, instrument, warn};

/// Typed view of one collection of the document store.
///
/// # Resolution
/// Update and delete take an application id. [`EntityAdapter::resolve`] maps it to a
/// [`RecordKey`] using the entity's [`Resolution`] strategy:
/// - `Query`: `find_where(collection, "id", app_id)`; the first match wins.
/// - `Snapshot`: lookup in the records the caller already holds.
///
/// No match is [`ConsoleError::NotFound`] and nothing is written. A write that loses a race
/// against a concurrent delete comes back from the store as a missing document and is also
/// reported as `NotFound`; the store never recreates the document.
pub struct EntityAdapter<T> {
    store: SharedStore,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityAdapter<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: StoreEntity> EntityAdapter<T> {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Fetches every document and decodes it.
    ///
    /// One record per stored document. A document that does not decode is still listed under
    /// its key, with [`Record::problem`] set, so it stays visible and removable.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn list(&self) -> Result<Vec<Record<T>>, ConsoleError> {
        let docs = self.store.list_all(T::COLLECTION).await?;
        let mut malformed = 0;
        let records: Vec<_> = docs
            .iter()
            .map(|doc| match T::from_document(doc) {
                Ok(entity) => Record::new(T::key_of(doc), entity),
                Err(e) => {
                    warn!(id = %doc.id, error = %e, "Undecodable document");
                    malformed += 1;
                    Record::malformed(T::key_of(doc), e.to_string())
                }
            })
            .collect();
        debug!(total = records.len(), malformed, "Listed");
        Ok(records)
    }

    /// Maps an application id to its record key.
    #[instrument(skip(self, snapshot), fields(collection = T::COLLECTION))]
    pub async fn resolve(
        &self,
        app_id: &AppId,
        snapshot: &[Record<T>],
    ) -> Result<RecordKey, ConsoleError> {
        let key = match T::RESOLUTION {
            Resolution::Query => {
                let matches = self
                    .store
                    .find_where(T::COLLECTION, ID_FIELD, app_id.to_value())
                    .await?;
                if matches.len() > 1 {
                    warn!(%app_id, matches = matches.len(), "Ambiguous id, using first match");
                }
                matches
                    .into_iter()
                    .next()
                    .map(|doc| RecordKey::new(doc.id, app_id.clone()))
            }
            Resolution::Snapshot => snapshot
                .iter()
                .find(|record| record.key.app == *app_id)
                .map(|record| record.key.clone()),
        };
        match key {
            Some(key) => {
                debug!(%app_id, internal = %key.internal, "Resolved");
                Ok(key)
            }
            None => {
                warn!(%app_id, "Not found");
                Err(self.not_found(app_id))
            }
        }
    }

    fn not_found(&self, app_id: &AppId) -> ConsoleError {
        ConsoleError::NotFound {
            label: T::LABEL,
            id: app_id.to_string(),
        }
    }

    /// Write failed because the resolved document vanished in between.
    fn lost_race(&self, app_id: &AppId, e: StoreError) -> ConsoleError {
        match e {
            StoreError::MissingDocument { .. } => {
                warn!(%app_id, "Document removed concurrently");
                self.not_found(app_id)
            }
            other => ConsoleError::Store(other),
        }
    }
}

impl<T: Creatable> EntityAdapter<T> {
    /// Validates, runs the create hook, and writes a new document.
    #[instrument(skip(self), fields(collection = T::COLLECTION))]
    pub async fn create(&self, params: T::Create) -> Result<RecordKey, ConsoleError> {
        let fields = T::into_fields(params)?;
        T::on_create(&fields, self.store.as_ref()).await?;
        let internal = self.store.insert(T::COLLECTION, fields.clone()).await?;
        let key = T::key_of(&Document::new(internal, fields));
        info!(app_id = %key.app, internal = %key.internal, "Created");
        Ok(key)
    }
}

impl<T: Patchable> EntityAdapter<T> {
    /// Validates the patch, resolves the id, and merges the fields.
    #[instrument(skip(self, snapshot), fields(collection = T::COLLECTION))]
    pub async fn update(
        &self,
        app_id: &AppId,
        update: T::Update,
        snapshot: &[Record<T>],
    ) -> Result<RecordKey, ConsoleError> {
        let fields = T::patch_fields(update)?;
        if fields.is_empty() {
            return Err(ConsoleError::validation("nothing to update"));
        }
        let key = self.resolve(app_id, snapshot).await?;
        self.store
            .patch(T::COLLECTION, &key.internal, fields)
            .await
            .map_err(|e| self.lost_race(app_id, e))?;
        info!(%app_id, internal = %key.internal, "Updated");
        Ok(key)
    }
}

impl<T: Removable> EntityAdapter<T> {
    /// Resolves the id and removes the document.
    #[instrument(skip(self, snapshot), fields(collection = T::COLLECTION))]
    pub async fn delete(
        &self,
        app_id: &AppId,
        snapshot: &[Record<T>],
    ) -> Result<RecordKey, ConsoleError> {
        let key = self.resolve(app_id, snapshot).await?;
        self.store
            .remove(T::COLLECTION, &key.internal)
            .await
            .map_err(|e| self.lost_race(app_id, e))?;
        info!(%app_id, internal = %key.internal, "Deleted");
        Ok(key)
    }
}
