//! Sync client capability
//!
//! The engine only talks to the sync client through [`SyncClient`], which
//! returns structured results. Text parsing stays inside the adapters.

mod dropbox;

pub use dropbox::{DropboxCli, parse_exclude_add, parse_exclude_list, parse_status};

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::Result;

/// The sync client's reported state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No pending synchronization work
    UpToDate,
    /// Still working; carries the client's own description
    Busy(String),
    /// The client daemon is not running
    NotRunning,
}

impl SyncStatus {
    pub fn is_quiescent(&self) -> bool {
        matches!(self, Self::UpToDate)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "Up to date"),
            Self::Busy(state) => write!(f, "{}", state),
            Self::NotRunning => write!(f, "Not running"),
        }
    }
}

/// Blocking operations against a cloud-sync client.
pub trait SyncClient {
    /// Absolute paths the client currently excludes
    fn list_excluded(&self) -> Result<BTreeSet<PathBuf>>;

    /// Current sync state
    fn status(&self) -> Result<SyncStatus>;

    /// Stop tracking `path`. Returns only once the client confirmed it.
    fn exclude(&self, path: &Path) -> Result<()>;
}

impl<T: SyncClient + ?Sized> SyncClient for &T {
    fn list_excluded(&self) -> Result<BTreeSet<PathBuf>> {
        (**self).list_excluded()
    }

    fn status(&self) -> Result<SyncStatus> {
        (**self).status()
    }

    fn exclude(&self, path: &Path) -> Result<()> {
        (**self).exclude(path)
    }
}
