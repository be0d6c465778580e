//! Top-level tree walk
//!
//! Pre-order over the synced root. Each level is listed without following
//! symlinks, classified, and pruned: avoided and excluded directories are
//! never descended into. The first listing error ends the run.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use dropfix_fs::ScratchArea;

use crate::classifier::{NameRules, classify};
use crate::engine::{ExclusionEngine, Outcome};
use crate::progress::Progress;
use crate::sync_client::SyncClient;
use crate::{Error, FixerConfig, Mover, Result};

/// One listed directory level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkCursor {
    /// The directory being visited
    pub dir: PathBuf,
    /// Child directory names, including symlinks to directories
    pub dirs: Vec<OsString>,
    /// Every other child name
    pub files: Vec<OsString>,
    linked_dirs: Vec<OsString>,
}

impl WalkCursor {
    /// List the immediate children of `dir`, sorted by name.
    pub fn read(dir: &Path) -> Result<Self> {
        let mut cursor = Self {
            dir: dir.to_path_buf(),
            dirs: Vec::new(),
            files: Vec::new(),
            linked_dirs: Vec::new(),
        };

        let listing = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in listing {
            let entry = entry.map_err(|source| Error::Walk {
                path: source.path().unwrap_or(dir).to_path_buf(),
                source,
            })?;
            let name = entry.file_name().to_os_string();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                cursor.dirs.push(name);
            } else if file_type.is_symlink() && entry.path().is_dir() {
                cursor.linked_dirs.push(name.clone());
                cursor.dirs.push(name);
            } else {
                cursor.files.push(name);
            }
        }

        Ok(cursor)
    }

    /// Whether a child directory is reached through a symlink.
    pub fn is_linked_dir(&self, name: &OsStr) -> bool {
        self.linked_dirs.iter().any(|linked| linked == name)
    }
}

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: usize,
    pub avoided: usize,
    pub excluded: usize,
    pub already_excluded: usize,
    pub would_exclude: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Excluded => self.excluded += 1,
            Outcome::AlreadyExcluded => self.already_excluded += 1,
            Outcome::WouldExclude => self.would_exclude += 1,
        }
    }
}

/// Drives a single batch pass over the synced tree.
pub struct TreeWalker<C: SyncClient, M: Mover> {
    config: FixerConfig,
    client: C,
    mover: M,
}

impl<C: SyncClient, M: Mover> TreeWalker<C, M> {
    pub fn new(config: FixerConfig, client: C, mover: M) -> Self {
        Self {
            config,
            client,
            mover,
        }
    }

    /// Check preconditions, then walk and exclude.
    ///
    /// The scratch area is validated before anything in the tree is read or
    /// moved.
    pub fn run(&self, progress: &mut dyn Progress) -> Result<RunSummary> {
        let root = dunce::canonicalize(&self.config.root)
            .map_err(|e| dropfix_fs::Error::io(&self.config.root, e))?;
        if !root.is_dir() {
            return Err(Error::RootNotDirectory { path: root });
        }

        let scratch = ScratchArea::prepare(&self.config.scratch, &root)?;
        let rules = NameRules::from_config(&self.config);
        let engine = ExclusionEngine::new(&self.client, &self.mover, &scratch, self.config.sync_wait);

        tracing::info!(
            root = %root.display(),
            scratch = %scratch.path().display(),
            dry_run = self.config.dry_run,
            "starting walk"
        );

        let mut summary = RunSummary::default();
        let mut pending = vec![root];

        while let Some(dir) = pending.pop() {
            let cursor = WalkCursor::read(&dir)?;
            summary.directories += 1;
            progress.on_directory(&cursor);

            let classification = classify(&cursor.dirs, &cursor.files, &rules);
            for name in &classification.avoided {
                tracing::trace!(dir = %dir.display(), name = ?name, "avoided");
            }
            summary.avoided += classification.avoided.len();

            let targets = classification
                .excluded_dirs
                .iter()
                .chain(&classification.excluded_files);
            for name in targets {
                let target = dir.join(name);
                let outcome = if self.config.dry_run {
                    engine.plan(&target, progress)?
                } else {
                    engine.exclude_preserving_contents(&target, progress)?
                };
                summary.record(outcome);
            }

            // Reversed so the stack pops children in name order
            for name in classification.descend.iter().rev() {
                if !cursor.is_linked_dir(name) {
                    pending.push(dir.join(name));
                }
            }
        }

        tracing::info!(?summary, "walk complete");
        Ok(summary)
    }
}
