//! Report types for an apply pass

use serde::Serialize;

use super::CharDiff;

/// State of a target file before it was rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    /// No snapshot from a previous apply exists
    NoPriorSnapshot,
    /// The target is byte-equal to its snapshot
    SnapshotMatchesTarget,
    /// The target was edited since the last apply
    SnapshotDiffersFromTarget,
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::NoPriorSnapshot => "no prior snapshot",
            Self::SnapshotMatchesTarget => "unchanged",
            Self::SnapshotDiffersFromTarget => "drifted",
        };
        write!(f, "{s}")
    }
}

/// A target that was rendered successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFile {
    /// Path relative to the target root
    pub file: String,
    pub state: GuardState,
    /// Whether the file was in the accept set
    pub accepted: bool,
    /// Checksum of the rendered content
    pub checksum: String,
    /// False on a dry run
    pub written: bool,
}

/// A per-file failure. The file is left untouched; other files are still
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileFailure {
    #[error("{file}: unresolved variables: {}", .variables.join(", "))]
    UnresolvedVariable { file: String, variables: Vec<String> },

    #[error("{file}: target was modified since the last apply: {diff}")]
    DriftConflict { file: String, diff: CharDiff },

    /// Reading the template, target or snapshot failed, or writing did.
    /// A non-UTF-8 template lands here.
    #[error("{file}: {message}")]
    Io { file: String, message: String },
}

impl FileFailure {
    pub fn file(&self) -> &str {
        match self {
            Self::UnresolvedVariable { file, .. }
            | Self::DriftConflict { file, .. }
            | Self::Io { file, .. } => file,
        }
    }
}

/// Outcome of one apply pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    pub applied: Vec<AppliedFile>,
    pub failures: Vec<FileFailure>,
    pub dry_run: bool,
}

impl ApplyReport {
    /// Every scheduled target reached a success state.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
