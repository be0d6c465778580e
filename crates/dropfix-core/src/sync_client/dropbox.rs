//! Adapter for the `dropbox` command-line tool
//!
//! Relevant output of the tool:
//!
//! - `dropbox exclude list` prints `Excluded:` followed by one path per line,
//!   relative to the working directory, or `No directories are being
//!   ignored.` when nothing is excluded.
//! - `dropbox status` prints `Up to date` once quiescent and
//!   `Dropbox isn't running!` when the daemon is down.
//! - `dropbox exclude add <path>` starts its output with `Excluded:` on
//!   success.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use super::{SyncClient, SyncStatus};
use crate::{Error, Result};

const EXCLUDED_MARKER: &str = "Excluded:";
const EMPTY_LIST_MARKER: &str = "No directories are being ignored";
const UP_TO_DATE: &str = "Up to date";
const NOT_RUNNING: &str = "isn't running";

/// Talks to Dropbox through its CLI, run from inside the synced root.
#[derive(Debug, Clone)]
pub struct DropboxCli {
    command: String,
    root: PathBuf,
}

impl DropboxCli {
    /// `root` is the working directory for every invocation; relative paths
    /// in the exclusion list are resolved against it.
    pub fn new(command: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            root: root.into(),
        }
    }

    fn describe(&self, args: &[&OsStr]) -> String {
        let mut line = self.command.clone();
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    fn invoke(&self, args: &[&OsStr]) -> Result<Output> {
        tracing::trace!(command = %self.describe(args), "invoking sync client");
        Command::new(&self.command)
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::ClientNotFound {
                        command: self.command.clone(),
                    }
                } else {
                    Error::ClientIo {
                        command: self.describe(args),
                        source: e,
                    }
                }
            })
    }

    /// Run and return stdout, failing on a non-zero exit.
    fn run(&self, args: &[&OsStr]) -> Result<String> {
        let output = self.invoke(args)?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                command: self.describe(args),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SyncClient for DropboxCli {
    fn list_excluded(&self) -> Result<BTreeSet<PathBuf>> {
        let output = self.run(&[OsStr::new("exclude"), OsStr::new("list")])?;
        parse_exclude_list(&output, &self.root)
    }

    fn status(&self) -> Result<SyncStatus> {
        let args = [OsStr::new("status")];
        let output = self.invoke(&args)?;
        let stdout = String::from_utf8_lossy(&output.stdout);

        // The daemon-down message may come with a failing exit status
        let status = parse_status(&stdout);
        if status == SyncStatus::NotRunning || output.status.success() {
            return Ok(status);
        }
        Err(Error::CommandFailed {
            command: self.describe(&args),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn exclude(&self, path: &Path) -> Result<()> {
        let output = self.run(&[OsStr::new("exclude"), OsStr::new("add"), path.as_os_str()])?;
        if parse_exclude_add(&output) {
            tracing::debug!(path = %path.display(), "exclusion confirmed");
            Ok(())
        } else {
            Err(Error::ExcludeRejected {
                path: path.to_path_buf(),
                output: output.trim().to_string(),
            })
        }
    }
}

/// Parse `exclude list` output into absolute paths under `root`.
pub fn parse_exclude_list(output: &str, root: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());

    match lines.next() {
        None => Ok(BTreeSet::new()),
        Some(first) if first.starts_with(EMPTY_LIST_MARKER) => Ok(BTreeSet::new()),
        Some(first) if first.starts_with(EXCLUDED_MARKER) => {
            let inline = first[EXCLUDED_MARKER.len()..].trim();
            Ok(std::iter::once(inline)
                .filter(|l| !l.is_empty())
                .chain(lines)
                .map(|line| root.join(line))
                .collect())
        }
        Some(_) => Err(Error::UnexpectedOutput {
            operation: "exclude list".into(),
            output: output.trim().to_string(),
        }),
    }
}

/// Parse `status` output.
pub fn parse_status(output: &str) -> SyncStatus {
    let trimmed = output.trim();
    if trimmed == UP_TO_DATE {
        SyncStatus::UpToDate
    } else if trimmed.contains(NOT_RUNNING) {
        SyncStatus::NotRunning
    } else {
        SyncStatus::Busy(trimmed.to_string())
    }
}

/// Whether `exclude add` output confirms the exclusion.
pub fn parse_exclude_add(output: &str) -> bool {
    output.split_whitespace().next() == Some(EXCLUDED_MARKER)
}
