//! Recursive discovery of regular files under a root directory

use walkdir::WalkDir;

use crate::{Error, NormalizedPath, Result};

/// List every regular file below `root`, following symbolic links.
///
/// Returned paths are relative to `root` and use forward slashes. The
/// order is whatever the directory walk produced; callers that need a
/// deterministic order sort the result themselves.
pub fn list_files(root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let native_root = root.to_native();
    if !native_root.is_dir() {
        return Err(Error::NotADirectory { path: native_root });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&native_root).follow_links(true) {
        let entry = entry.map_err(|e| Error::Walk {
            path: e
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| native_root.clone()),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(&native_root)
            .map_err(|e| Error::Walk {
                path: entry.path().to_path_buf(),
                message: e.to_string(),
            })?;
        files.push(NormalizedPath::new(relative));
    }

    tracing::debug!(root = %root, count = files.len(), "listed files");
    Ok(files)
}
