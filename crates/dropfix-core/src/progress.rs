//! Progress reporting for the walk and the exclusion engine

use std::fmt;
use std::path::Path;

use crate::engine::Outcome;
use crate::walker::WalkCursor;

/// A mutating step of the exclusion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Moving the target into the scratch area
    MovingOut,
    /// Polling the sync client until it is up to date
    AwaitingSync,
    /// Registering the original path as excluded
    Excluding,
    /// Moving the target back from scratch
    MovingBack,
}

impl Stage {
    /// Operator-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MovingOut => "Moving file",
            Self::AwaitingSync => "Waiting for sync",
            Self::Excluding => "Excluding from dropbox",
            Self::MovingBack => "Restoring file",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Observer of walk and engine progress.
///
/// All methods default to doing nothing.
pub trait Progress {
    /// A directory level was listed and is about to be classified
    fn on_directory(&mut self, _cursor: &WalkCursor) {}

    /// The engine picked up a target
    fn on_target(&mut self, _target: &Path) {}

    /// The engine entered a stage for the current target
    fn on_stage(&mut self, _stage: Stage) {}

    /// The engine finished with a target
    fn on_target_done(&mut self, _target: &Path, _outcome: Outcome) {}
}

/// Discards all progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {}
