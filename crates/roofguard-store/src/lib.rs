//! Durable key-value storage for the listing strategy cache and the
//! integration endpoint URLs.
//!
//! Values are plain strings behind a [`KeyValueStore`] port. Readers that
//! expect structured values recover from corrupt data by falling back to
//! in-code defaults instead of failing. Writes are last-write-wins with no
//! locking.

pub mod endpoints;
pub mod error;
pub mod kv;
pub mod strategy;

pub use endpoints::IntegrationEndpoints;
pub use error::StoreError;
pub use kv::{JsonFileStore, KeyValueStore, MemoryStore};
pub use strategy::{load_strategy, save_strategy};

/// Cached listing strategy, stored as JSON.
pub const STRATEGY_KEY: &str = "gta_roof_guard_strategy";
/// Spreadsheet link partner data is exported to.
pub const SHEET_KEY: &str = "gta_roof_guard_sheet";
/// Webhook triggered when a partner enrolls.
pub const WEBHOOK_KEY: &str = "gta_roof_guard_webhook";
