//! Core of dropfix
//!
//! Walks a synced tree, classifies each level's children against the
//! configured name sets, and excludes matches from the sync client while
//! keeping their contents on disk.
//!
//! # Modules
//!
//! - [`classifier`]: per-level name classification
//! - [`sync_client`]: the sync client capability and its Dropbox CLI adapter
//! - [`engine`]: the exclude-without-losing-contents sequence
//! - [`walker`]: the top-level tree walk

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod mover;
pub mod progress;
pub mod sync_client;
pub mod walker;

pub use classifier::{Classification, NameRules, classify};
pub use config::{FixerConfig, SyncWait};
pub use engine::{ExclusionEngine, Outcome};
pub use error::{Error, Result};
pub use mover::{FsMover, Mover};
pub use progress::{NoProgress, Progress, Stage};
pub use sync_client::{DropboxCli, SyncClient, SyncStatus};
pub use walker::{RunSummary, TreeWalker, WalkCursor};
