//! Reading and replacing target and snapshot files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::{Builder, NamedTempFile};

use crate::{Error, NormalizedPath, Result};

/// Replace `path` with `content` so readers see either the old file or the
/// new one, never a partial write.
///
/// The content is staged in a locked temporary file next to `path` and
/// renamed over it. Missing parent directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let destination = path.to_native();
    let staged = stage(&destination, content)?;

    staged
        .persist(&destination)
        .map_err(|e| Error::io(&destination, e.error))?;

    tracing::trace!(path = %path, bytes = content.len(), "Replaced file");
    Ok(())
}

/// Write `content` to a synced temporary file in the destination's
/// directory under an exclusive lock.
fn stage(destination: &Path, content: &[u8]) -> Result<NamedTempFile> {
    let dir = staging_dir(destination);
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let mut staged = Builder::new()
        .prefix(".overmodel-")
        .suffix(".tmp")
        .tempfile_in(&dir)
        .map_err(|e| Error::io(&dir, e))?;
    let lock_failed = || Error::LockFailed {
        path: destination.to_path_buf(),
    };

    staged.as_file().lock_exclusive().map_err(|_| lock_failed())?;
    staged
        .write_all(content)
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| Error::io(staged.path(), e))?;
    FileExt::unlock(staged.as_file()).map_err(|_| lock_failed())?;

    // Staged files are created owner-only; a replaced file keeps its mode
    if let Ok(existing) = fs::metadata(destination) {
        fs::set_permissions(staged.path(), existing.permissions())
            .map_err(|e| Error::io(staged.path(), e))?;
    }

    Ok(staged)
}

/// Same directory as the destination so the final rename never crosses
/// filesystems.
fn staging_dir(destination: &Path) -> PathBuf {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Read a file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::io(native, e))
}

/// Read a file byte for byte; targets and snapshots are compared this way.
pub fn read_bytes(path: &NormalizedPath) -> Result<Vec<u8>> {
    let native = path.to_native();
    fs::read(&native).map_err(|e| Error::io(native, e))
}

/// [`write_atomic`] for rendered text.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
