//! Error types for dropfix-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from dropfix-core
    #[error(transparent)]
    Core(#[from] dropfix_core::Error),

    /// Error from dropfix-fs
    #[error(transparent)]
    Fs(#[from] dropfix_fs::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Extra guidance printed after the error itself.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(dropfix_core::Error::Stranded { .. }) => Some(
                "Move the staged content back by hand and empty the scratch area before running again.",
            ),
            Self::Core(dropfix_core::Error::Fs(dropfix_fs::Error::ScratchNotEmpty { .. }))
            | Self::Fs(dropfix_fs::Error::ScratchNotEmpty { .. }) => Some(
                "Its contents were staged by an earlier run; restore them to the synced tree before retrying.",
            ),
            _ => None,
        }
    }
}
