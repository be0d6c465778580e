//! Error types for dropfix-fs

use std::path::PathBuf;

/// Result type for dropfix-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in dropfix-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Invalid entry name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Scratch area {scratch} is inside the synced root {root}")]
    ScratchInsideRoot { scratch: PathBuf, root: PathBuf },

    #[error("Scratch area {path} is not empty; a previous run may have been interrupted, recover its contents manually")]
    ScratchNotEmpty { path: PathBuf },

    #[error("Refusing to overwrite existing {path}")]
    DestinationExists { path: PathBuf },

    #[error("Nothing to move at {path}")]
    SourceMissing { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
