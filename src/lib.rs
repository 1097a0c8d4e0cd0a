//! Njuskalo rental ad watcher
//!
//! Periodically fetches a Njuskalo listing page, extracts the ads into a
//! canonical record shape, diffs them against the previously persisted
//! snapshot and emails a notification when new ads appear. Cycles run on a
//! timer and on demand through a small HTTP trigger endpoint.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod server;

// Re-exports for the binary and integration tests
pub use application::watcher::{AdWatcher, CycleError, CycleReport};
pub use domain::ad::{AdRecord, AdSet};
