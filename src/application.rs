//! Application layer
//!
//! The cycle orchestrator that wires fetcher, parser, storage and notifier
//! together.

pub mod watcher;

pub use watcher::{AdWatcher, CycleError, CycleReport};
