//! Exclude a path from the sync client without losing its contents
//!
//! The sequence for one target is:
//!
//! 1. check the client's exclusion list and stop if the target is already
//!    there (this makes re-runs safe)
//! 2. move the target into the scratch area, never replacing anything there
//! 3. wait for the client to report it is up to date
//! 4. exclude the original path
//! 5. move the target back, never replacing anything at the original path
//!
//! Nothing is rolled back. A failure after step 2 returns
//! [`Error::Stranded`] naming the staged location so the content can be
//! recovered by hand.

use std::fmt;
use std::path::Path;

use dropfix_fs::ScratchArea;

use crate::progress::{Progress, Stage};
use crate::sync_client::{SyncClient, SyncStatus};
use crate::{Error, Mover, Result, SyncWait};

/// How a target ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The client already excluded it; nothing was touched
    AlreadyExcluded,
    /// It went through the full sequence
    Excluded,
    /// Dry run: it would have gone through the full sequence
    WouldExclude,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyExcluded => write!(f, "Already excluded"),
            Self::Excluded => write!(f, "Excluded"),
            Self::WouldExclude => write!(f, "Would exclude"),
        }
    }
}

/// Runs the exclusion sequence for one target at a time.
///
/// Holds no state between targets.
pub struct ExclusionEngine<'a, C: SyncClient, M: Mover> {
    client: C,
    mover: M,
    scratch: &'a ScratchArea,
    wait: SyncWait,
}

impl<'a, C: SyncClient, M: Mover> ExclusionEngine<'a, C, M> {
    pub fn new(client: C, mover: M, scratch: &'a ScratchArea, wait: SyncWait) -> Self {
        Self {
            client,
            mover,
            scratch,
            wait,
        }
    }

    /// Run the full sequence for `target`, which must be absolute.
    pub fn exclude_preserving_contents(
        &self,
        target: &Path,
        progress: &mut dyn Progress,
    ) -> Result<Outcome> {
        progress.on_target(target);

        if self.is_excluded(target)? {
            return Ok(self.finish(target, Outcome::AlreadyExcluded, progress));
        }

        let name = target.file_name().ok_or_else(|| Error::InvalidTarget {
            path: target.to_path_buf(),
        })?;
        let staged = self.scratch.staging_path(name);

        progress.on_stage(Stage::MovingOut);
        tracing::info!(path = %target.display(), staged = %staged.display(), "moving out");
        self.mover.move_no_clobber(target, &staged)?;

        let stranded = |stage: Stage, source: Error| Error::Stranded {
            target: target.to_path_buf(),
            staged: staged.clone(),
            stage,
            source: Box::new(source),
        };

        progress.on_stage(Stage::AwaitingSync);
        self.await_sync(target)
            .map_err(|e| stranded(Stage::AwaitingSync, e))?;

        progress.on_stage(Stage::Excluding);
        tracing::info!(path = %target.display(), "excluding");
        self.client
            .exclude(target)
            .map_err(|e| stranded(Stage::Excluding, e))?;

        progress.on_stage(Stage::MovingBack);
        tracing::info!(path = %target.display(), "restoring");
        self.mover
            .move_no_clobber(&staged, target)
            .map_err(|e| stranded(Stage::MovingBack, e))?;

        Ok(self.finish(target, Outcome::Excluded, progress))
    }

    /// Only the exclusion-list check. Nothing is moved.
    pub fn plan(&self, target: &Path, progress: &mut dyn Progress) -> Result<Outcome> {
        progress.on_target(target);
        let outcome = if self.is_excluded(target)? {
            Outcome::AlreadyExcluded
        } else {
            Outcome::WouldExclude
        };
        Ok(self.finish(target, outcome, progress))
    }

    fn finish(&self, target: &Path, outcome: Outcome, progress: &mut dyn Progress) -> Outcome {
        tracing::debug!(path = %target.display(), %outcome, "target done");
        progress.on_target_done(target, outcome);
        outcome
    }

    fn is_excluded(&self, target: &Path) -> Result<bool> {
        let excluded = self.client.list_excluded()?;
        Ok(excluded.contains(target))
    }

    /// Sleep, then poll, until the client reports it is up to date.
    fn await_sync(&self, target: &Path) -> Result<()> {
        let interval = self.wait.interval();
        let mut polls: u32 = 0;
        loop {
            if let Some(max) = self.wait.max_polls
                && polls >= max
            {
                return Err(Error::SyncTimeout {
                    path: target.to_path_buf(),
                    polls,
                });
            }

            std::thread::sleep(interval);
            polls += 1;

            match self.client.status()? {
                SyncStatus::UpToDate => {
                    tracing::debug!(polls, "sync client is up to date");
                    return Ok(());
                }
                SyncStatus::NotRunning => return Err(Error::NotRunning),
                SyncStatus::Busy(state) => {
                    tracing::debug!(polls, %state, "sync client busy");
                }
            }
        }
    }
}
