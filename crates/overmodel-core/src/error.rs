//! Error types for overmodel-core
//!
//! These are the fatal errors: each one aborts the compile or the apply
//! pass before any file is written. Per-file problems found while applying
//! (unresolved variables, drift) are reported through
//! [`FileFailure`](crate::apply::FileFailure) instead.

use std::path::PathBuf;

/// Result type for overmodel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in overmodel-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No model root was supplied
    #[error("No model directories given")]
    NoModelDirectories,

    /// A model root does not exist or is not a directory
    #[error("Model directory not found: {path}")]
    ModelDirectoryNotFound { path: PathBuf },

    /// A model file could not be decoded
    #[error("Failed to parse model file {file}: {cause}")]
    ModelParse { file: PathBuf, cause: String },

    /// A model key expands to a zero-length path segment
    #[error("Invalid key {key:?}: keys must not contain empty segments")]
    InvalidKey { key: String },

    /// A rule argument is not of the form `<segment>=<value>`
    #[error("Invalid rule {rule:?}: expected <segment>=<value>")]
    InvalidRule { rule: String },

    /// No model file survived the rule filter
    #[error("No model files match the given rules")]
    EmptyConfiguration,

    /// `<config-dir>/files` is missing
    #[error("Template directory not found: {path}")]
    TemplateDirectoryNotFound { path: PathBuf },

    /// One or more scheduled target files are absent from disk
    #[error("Target files missing: {}", .missing.join(", "))]
    TargetFilePrecondition { missing: Vec<String> },

    /// Filesystem error from overmodel-fs
    #[error(transparent)]
    Fs(#[from] overmodel_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
