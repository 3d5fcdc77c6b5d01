//! Error types for overmodel-cli

use overmodel_core::Error as CoreError;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Process exit code when no `--model-dir` was given
pub const EXIT_NO_MODEL_DIRECTORIES: i32 = -1;
/// Process exit code when scheduled target files are missing
pub const EXIT_TARGET_FILES_MISSING: i32 = -2;
/// Process exit code when one or more targets could not be applied
pub const EXIT_APPLY_FAILED: i32 = -3;
/// Process exit code for every other fatal error
pub const EXIT_FATAL: i32 = -4;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from overmodel-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Error from overmodel-fs
    #[error(transparent)]
    Fs(#[from] overmodel_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// The apply pass finished but some targets were left untouched
    #[error("{failed} target file(s) could not be applied")]
    ApplyFailed { failed: usize },

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

    /// The process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Core(CoreError::NoModelDirectories) => EXIT_NO_MODEL_DIRECTORIES,
            Self::Core(CoreError::TargetFilePrecondition { .. }) => EXIT_TARGET_FILES_MISSING,
            Self::ApplyFailed { .. } => EXIT_APPLY_FAILED,
            _ => EXIT_FATAL,
        }
    }
}
