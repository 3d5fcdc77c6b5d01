//! Model file discovery and ordering

use std::thread;

use overmodel_fs::{NormalizedPath, io, list_files};

use super::ModelFormat;
use crate::tree::ConfigTree;
use crate::{Error, Result};

/// A file found under one of the model roots.
///
/// Identity is the pair (root, relative path); the same relative path may
/// appear under several roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelFile {
    pub root: NormalizedPath,
    pub relative_path: NormalizedPath,
}

impl ModelFile {
    pub fn new(root: NormalizedPath, relative_path: NormalizedPath) -> Self {
        Self {
            root,
            relative_path,
        }
    }

    /// Depth of the relative path; top-level files are at depth 0.
    pub fn depth(&self) -> usize {
        self.relative_path.depth()
    }

    pub fn full_path(&self) -> NormalizedPath {
        self.root.join(self.relative_path.as_str())
    }

    pub fn format(&self) -> Option<ModelFormat> {
        ModelFormat::detect(&self.relative_path)
    }

    /// Read and parse the file into a tree.
    ///
    /// Files with an unrecognized extension contribute an empty tree.
    pub fn load(&self) -> Result<ConfigTree> {
        let Some(format) = self.format() else {
            tracing::warn!(
                file = %self.full_path(),
                "Skipping model file with unrecognized extension"
            );
            return Ok(ConfigTree::new());
        };

        let path = self.full_path();
        let content = io::read_text(&path)?;
        tracing::debug!(file = %path, %format, "Parsing model file");
        format.parse(&path.to_native(), &content)
    }
}

/// List the model files of every root and sort them for merging.
///
/// Each root is walked on its own thread. The combined list is sorted by
/// [`sort_model_files`]; files sharing a relative path keep the order of
/// their roots, so a later root overrides an earlier one.
///
/// # Errors
///
/// - [`Error::NoModelDirectories`] if `roots` is empty
/// - [`Error::ModelDirectoryNotFound`] if a root is not a directory
pub fn discover_model_files(roots: &[NormalizedPath]) -> Result<Vec<ModelFile>> {
    if roots.is_empty() {
        return Err(Error::NoModelDirectories);
    }

    if let Some(missing) = roots.iter().find(|root| !root.is_dir()) {
        return Err(Error::ModelDirectoryNotFound {
            path: missing.to_native(),
        });
    }

    let listings: Vec<Result<Vec<ModelFile>>> = thread::scope(|scope| {
        let handles: Vec<_> = roots
            .iter()
            .map(|root| scope.spawn(move || list_root(root)))
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
            .collect()
    });

    let mut files = Vec::new();
    for listing in listings {
        files.extend(listing?);
    }

    sort_model_files(&mut files);
    tracing::debug!(count = files.len(), "Discovered model files");
    Ok(files)
}

/// Order files by ascending depth, then by relative path.
///
/// The sort is stable. Merge precedence follows this order: shallower
/// files first, so deeper and lexicographically later files win.
pub fn sort_model_files(files: &mut [ModelFile]) {
    files.sort_by(|a, b| {
        a.depth()
            .cmp(&b.depth())
            .then_with(|| a.relative_path.cmp(&b.relative_path))
    });
}

fn list_root(root: &NormalizedPath) -> Result<Vec<ModelFile>> {
    let files = list_files(root)?
        .into_iter()
        .map(|relative| ModelFile::new(root.clone(), relative))
        .collect();
    Ok(files)
}
