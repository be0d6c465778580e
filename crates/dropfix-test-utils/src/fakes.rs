//! In-memory stand-ins for the engine's collaborators.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use dropfix_core::walker::WalkCursor;
use dropfix_core::{Error, FsMover, Mover, Outcome, Progress, Result, Stage, SyncClient, SyncStatus};

/// A call made against [`FakeSyncClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    ListExcluded,
    Status,
    Exclude(PathBuf),
}

/// Sync client that keeps its exclusion list in memory.
///
/// Status answers are scripted; once the script runs out every status call
/// reports up to date.
#[derive(Debug, Default)]
pub struct FakeSyncClient {
    excluded: RefCell<BTreeSet<PathBuf>>,
    statuses: RefCell<VecDeque<SyncStatus>>,
    reject_excludes: Cell<bool>,
    calls: RefCell<Vec<ClientCall>>,
}

impl FakeSyncClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `paths` already excluded.
    pub fn with_excluded<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let client = Self::new();
        client
            .excluded
            .borrow_mut()
            .extend(paths.into_iter().map(Into::into));
        client
    }

    /// Queue status answers returned before the default `UpToDate`.
    pub fn script_statuses(&self, statuses: impl IntoIterator<Item = SyncStatus>) {
        self.statuses.borrow_mut().extend(statuses);
    }

    /// Make every `exclude` call fail as the real client would on an
    /// unexpected answer.
    pub fn reject_excludes(&self) {
        self.reject_excludes.set(true);
    }

    pub fn excluded(&self) -> BTreeSet<PathBuf> {
        self.excluded.borrow().clone()
    }

    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.borrow().clone()
    }

    /// Paths passed to `exclude`, in call order.
    pub fn exclude_calls(&self) -> Vec<PathBuf> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ClientCall::Exclude(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn status_calls(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| **call == ClientCall::Status)
            .count()
    }
}

impl SyncClient for FakeSyncClient {
    fn list_excluded(&self) -> Result<BTreeSet<PathBuf>> {
        self.calls.borrow_mut().push(ClientCall::ListExcluded);
        Ok(self.excluded.borrow().clone())
    }

    fn status(&self) -> Result<SyncStatus> {
        self.calls.borrow_mut().push(ClientCall::Status);
        Ok(self
            .statuses
            .borrow_mut()
            .pop_front()
            .unwrap_or(SyncStatus::UpToDate))
    }

    fn exclude(&self, path: &Path) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(ClientCall::Exclude(path.to_path_buf()));
        if self.reject_excludes.get() {
            return Err(Error::ExcludeRejected {
                path: path.to_path_buf(),
                output: "Directory doesn't exist".to_string(),
            });
        }
        self.excluded.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }
}

/// Real filesystem mover that records every move and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingMover {
    moves: RefCell<Vec<(PathBuf, PathBuf)>>,
    fail_on: Cell<Option<usize>>,
}

impl RecordingMover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` move (zero-based) without touching the filesystem.
    pub fn fail_on(&self, nth: usize) {
        self.fail_on.set(Some(nth));
    }

    pub fn moves(&self) -> Vec<(PathBuf, PathBuf)> {
        self.moves.borrow().clone()
    }
}

impl Mover for RecordingMover {
    fn move_no_clobber(&self, from: &Path, to: &Path) -> Result<()> {
        let index = self.moves.borrow().len();
        self.moves
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
        if self.fail_on.get() == Some(index) {
            let injected = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "injected failure");
            return Err(dropfix_fs::Error::io(to, injected).into());
        }
        FsMover.move_no_clobber(from, to)
    }
}

/// Something reported to [`RecordingProgress`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Directory(PathBuf),
    Target(PathBuf),
    Stage(Stage),
    Done(PathBuf, Outcome),
}

/// Progress observer that keeps every event.
#[derive(Debug, Default)]
pub struct RecordingProgress {
    pub events: Vec<Event>,
    /// Every child name seen in any listed directory, as `dir/name`
    pub listed: Vec<PathBuf>,
}

impl RecordingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directories the walker listed, in visit order.
    pub fn directories(&self) -> Vec<PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Directory(dir) => Some(dir.clone()),
                _ => None,
            })
            .collect()
    }

    /// Stages reported, in order, across all targets.
    pub fn stages(&self) -> Vec<Stage> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Stage(stage) => Some(*stage),
                _ => None,
            })
            .collect()
    }

    /// Targets finished with their outcome, in order.
    pub fn outcomes(&self) -> Vec<(PathBuf, Outcome)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Done(path, outcome) => Some((path.clone(), *outcome)),
                _ => None,
            })
            .collect()
    }
}

impl Progress for RecordingProgress {
    fn on_directory(&mut self, cursor: &WalkCursor) {
        self.events.push(Event::Directory(cursor.dir.clone()));
        for name in cursor.dirs.iter().chain(&cursor.files) {
            self.listed.push(cursor.dir.join(name));
        }
    }

    fn on_target(&mut self, target: &Path) {
        self.events.push(Event::Target(target.to_path_buf()));
    }

    fn on_stage(&mut self, stage: Stage) {
        self.events.push(Event::Stage(stage));
    }

    fn on_target_done(&mut self, target: &Path, outcome: Outcome) {
        self.events.push(Event::Done(target.to_path_buf(), outcome));
    }
}
