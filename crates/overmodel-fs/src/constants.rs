//! Well-known directory names of a config directory.

use std::path::Path;

/// Standard overmodel filesystem names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvermodelPath {
    /// The config directory used when none is given (`_overmodel`)
    DefaultConfigDir,
    /// Template sources, relative paths mirror the target files (`files`)
    Templates,
    /// Snapshots of the last applied content (`.files`)
    Snapshots,
}

impl OvermodelPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DefaultConfigDir => "_overmodel",
            Self::Templates => "files",
            Self::Snapshots => ".files",
        }
    }
}

impl AsRef<Path> for OvermodelPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for OvermodelPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for OvermodelPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
