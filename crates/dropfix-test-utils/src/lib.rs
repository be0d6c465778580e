//! Shared test utilities for the dropfix workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fakes`]: in-memory sync client, recording mover and progress observer
//! - [`tree`]: [`SyncedTree`] fixture with a synced root and a scratch path

pub mod fakes;
pub mod tree;

pub use fakes::{ClientCall, Event, FakeSyncClient, RecordingMover, RecordingProgress};
pub use tree::SyncedTree;
