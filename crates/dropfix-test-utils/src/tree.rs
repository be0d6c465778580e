//! Temporary synced-tree fixture.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dropfix_core::{FixerConfig, SyncWait};
use tempfile::TempDir;
use walkdir::WalkDir;

/// A temp directory holding `Dropbox/` (the synced root) and a sibling
/// `scratch/` path that does not exist until a run prepares it.
///
/// Paths are canonical so they compare equal to what the walker produces.
pub struct SyncedTree {
    _temp: TempDir,
    base: PathBuf,
    root: PathBuf,
    scratch: PathBuf,
}

impl SyncedTree {
    /// # Panics
    /// Panics if the temp directory cannot be created.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("SyncedTree: failed to create temp dir");
        let base = dunce::canonicalize(temp.path()).expect("SyncedTree: canonicalize failed");
        let root = base.join("Dropbox");
        fs::create_dir(&root).expect("SyncedTree: failed to create root");
        let scratch = base.join("scratch");
        Self {
            _temp: temp,
            base,
            root,
            scratch,
        }
    }

    /// The temp directory containing both root and scratch.
    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    /// Absolute path of `rel` under the root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Write a file under the root, creating parents.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("SyncedTree::file: mkdir {}: {e}", parent.display()));
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("SyncedTree::file: write {}: {e}", path.display()));
        self
    }

    /// Create a directory under the root, creating parents.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn dir(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        fs::create_dir_all(&path)
            .unwrap_or_else(|e| panic!("SyncedTree::dir: mkdir {}: {e}", path.display()));
        self
    }

    /// Config pointing at this tree, with the default name sets and a
    /// zero poll interval.
    pub fn config(&self) -> FixerConfig {
        FixerConfig {
            root: self.root.clone(),
            scratch: self.scratch.clone(),
            sync_wait: SyncWait {
                poll_interval_secs: 0,
                max_polls: None,
            },
            ..FixerConfig::default()
        }
    }

    /// Every file and directory under the root, keyed by relative path.
    /// Files map to their content, directories to `"<dir>"`.
    ///
    /// # Panics
    /// Panics if the tree cannot be read.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        snapshot(&self.root)
    }
}

impl Default for SyncedTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative path to content map of everything under `dir`.
///
/// # Panics
/// Panics if the tree cannot be read.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(dir)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap_or_else(|e| panic!("snapshot: {e}"));
            let rel = entry
                .path()
                .strip_prefix(dir)
                .expect("snapshot: entry outside dir")
                .to_path_buf();
            let content = if entry.file_type().is_dir() {
                "<dir>".to_string()
            } else {
                fs::read_to_string(entry.path()).unwrap_or_else(|_| "<unreadable>".to_string())
            };
            (rel, content)
        })
        .collect()
}
