//! Generic document-store framework for the admin console.
//!
//! This module provides the building blocks every screen is written against: the store
//! boundary, an in-process actor implementing it, and a typed adapter that handles the
//! application-id to internal-id reconciliation once for all entities.
//!
//! # Main Components
//!
//! - [`DocumentStore`] - The asynchronous store boundary
//! - [`StoreActor`] / [`StoreClient`] - In-process store (actor plus cloneable handle)
//! - [`StoreEntity`], [`Creatable`], [`Patchable`], [`Removable`] - Per-resource contract
//! - [`EntityAdapter`] - Generic list / create / update / delete with id resolution
//! - [`ConsoleError`] / [`StoreError`] - Error taxonomy
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test adapters and screens without spawning the actor.

pub mod actor;
pub mod adapter;
pub mod client;
pub mod document;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

pub use actor::StoreActor;
pub use adapter::EntityAdapter;
pub use client::StoreClient;
pub use document::{AppId, Document, DocumentId, Fields, Record, RecordKey, ID_FIELD};
pub use entity::{Creatable, Patchable, Removable, Resolution, StoreEntity};
pub use error::{ConsoleError, StoreError};
pub use message::StoreRequest;
pub use store::{DocumentStore, SharedStore};
