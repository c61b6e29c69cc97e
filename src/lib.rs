//! # Shop Admin
//!
//! > **The core of an e-commerce admin console.**
//!
//! Four screens (Categories, Products, Customers, Orders) over a document store, with a
//! navigation shell choosing which one is active. Every screen is the same loop: fetch the
//! collection, show it, mutate one record, fetch again.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Two identities per record
//! A stored document has an internal identifier assigned by the store. Most records also
//! carry an application-level `id` attribute (a category slug, an order number). Every record
//! on screen keeps both in a [`RecordKey`](framework::RecordKey), and update/delete go through
//! one resolution function that turns the application id back into the internal one, or
//! reports [`NotFound`](framework::ConsoleError::NotFound) without writing anything.
//!
//! ### Written once, used four times
//! [`EntityAdapter<T>`](framework::EntityAdapter) and [`Screen<T>`](screen::Screen) are generic
//! over [`StoreEntity`](framework::StoreEntity). Each resource only states its collection,
//! its validation rules and which operations it supports.
//!
//! ## 🚀 Core Concepts
//!
//! ### Capabilities as traits
//! Categories and Products are [`Creatable`](framework::Creatable), [`Patchable`](framework::Patchable)
//! and [`Removable`](framework::Removable). Customers are only removable. Orders only take a
//! status patch. Calling an operation a resource does not support does not compile.
//!
//! ### Generation guard
//! Leaving a screen bumps its generation. Anything still in flight for it completes against
//! the store, but its result is dropped instead of overwriting a screen that is no longer shown.
//!
//! ### Mocking
//! [`framework::mock`] provides a scripted [`MockStore`](framework::mock::MockStore) and raw
//! channel helpers for driving interleavings by hand.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The store boundary ([`DocumentStore`](framework::DocumentStore)), the in-process
//! [`StoreActor`](framework::StoreActor), the entity traits and the generic adapter.
//!
//! ### 2. The Resources ([`model`])
//! [`Category`](model::Category), [`Product`](model::Product), [`Customer`](model::Customer)
//! and [`Order`](model::Order), with their forms and validation.
//!
//! ### 3. The Screens ([`screen`], [`shell`])
//! Per-screen state machines and the shell that switches between them.
//!
//! ### 4. The Orchestrator ([`lifecycle`], [`config`])
//! [`AdminConsole`](lifecycle::AdminConsole) starts the store and the shell and shuts them
//! down; [`Config`](config::Config) comes from YAML and `SHOP_ADMIN_*` variables.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Walk every screen against a seeded in-process store
//! RUST_LOG=info cargo run
//!
//! cargo test
//! ```

pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod screen;
pub mod shell;
