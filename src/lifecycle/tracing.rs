//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter for the whole console.
//! Module paths are hidden (`with_target(false)`); every event carries the structured fields
//! that matter instead (`collection`, `screen`, `app_id`, `internal`, `size`).
//!
//! ## Filters
//!
//! `RUST_LOG` wins when set. Otherwise the filter passed in (normally
//! [`Config::log_filter`](crate::config::Config::log_filter)) is used.
//!
//! ```bash
//! RUST_LOG=debug cargo run
//! SHOP_ADMIN_LOG=warn cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **Store**: startup, each request at `debug`, each completed write at `info`, shutdown
//! - **Adapter**: one span per list/resolve/create/update/delete, tagged with the collection
//! - **Screens**: loads, stale results being discarded, failed reloads
//!
//! With `RUST_LOG=info` a category create reads as below. The store runs in its own task, so
//! its `Inserted` event carries none of the caller's spans.
//!
//! ```text
//! INFO Inserted collection=Category id=doc_000001 size=1
//! INFO create{collection="Category"}: Created app_id=home-decor internal=doc_000001
//! INFO Loaded screen="Category" size=1
//! ```
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
