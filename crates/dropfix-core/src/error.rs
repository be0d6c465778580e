//! Error types for dropfix-core

use std::path::PathBuf;

use crate::progress::Stage;

/// Result type for dropfix-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while walking and excluding.
///
/// Every variant is fatal to the run. Nothing is rolled back: a failure
/// after a target has been moved into scratch surfaces as [`Error::Stranded`]
/// so the operator knows where its content is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem error from dropfix-fs
    #[error(transparent)]
    Fs(#[from] dropfix_fs::Error),

    /// A directory could not be enumerated
    #[error("Error walking directories at {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A configured value is out of range
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The synced root is not a directory
    #[error("Synced root {path} is not a directory")]
    RootNotDirectory { path: PathBuf },

    /// A target path has no final component to stage under
    #[error("Cannot exclude {path}: path has no file name")]
    InvalidTarget { path: PathBuf },

    /// The sync client executable is missing
    #[error("Cannot find sync client executable `{command}`")]
    ClientNotFound { command: String },

    /// The sync client could not be spawned
    #[error("Failed to run `{command}`: {source}")]
    ClientIo {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The sync client exited unsuccessfully
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// The sync client answered in a format we do not understand
    #[error("Unexpected output from `{operation}`: {output:?}")]
    UnexpectedOutput { operation: String, output: String },

    /// The sync client did not confirm an exclusion
    #[error("Error attempting to exclude {path}: {output:?}")]
    ExcludeRejected { path: PathBuf, output: String },

    /// The sync daemon is not running and will never become quiescent
    #[error("Sync client is not running")]
    NotRunning,

    /// The sync client stayed busy past the configured poll bound
    #[error("Sync client still busy after {polls} status checks while staging {path}")]
    SyncTimeout { path: PathBuf, polls: u32 },

    /// A step failed after the target was moved into scratch
    #[error("{target} is stranded at {staged} (failed while: {stage}): {source}")]
    Stranded {
        target: PathBuf,
        staged: PathBuf,
        stage: Stage,
        #[source]
        source: Box<Error>,
    },
}
