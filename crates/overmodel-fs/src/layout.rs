//! Config directory layout
//!
//! A config directory holds template sources under `files/` and the
//! snapshots of previously applied targets under `.files/`. Both trees use
//! the target's relative path, which is also where the live file sits
//! below the target root.
//!
//! ```text
//! <config-dir>/files/etc/app.conf    template
//! <config-dir>/.files/etc/app.conf   snapshot
//! <target-root>/etc/app.conf         live target
//! ```

use crate::{NormalizedPath, OvermodelPath, Result, walk};

/// Resolves template, snapshot and target paths for one config directory.
#[derive(Debug, Clone)]
pub struct ConfigLayout {
    config_dir: NormalizedPath,
    target_root: NormalizedPath,
}

impl ConfigLayout {
    pub fn new(config_dir: NormalizedPath, target_root: NormalizedPath) -> Self {
        Self {
            config_dir,
            target_root,
        }
    }

    pub fn config_dir(&self) -> &NormalizedPath {
        &self.config_dir
    }

    pub fn target_root(&self) -> &NormalizedPath {
        &self.target_root
    }

    /// `<config-dir>/files`
    pub fn templates_dir(&self) -> NormalizedPath {
        self.config_dir.join(OvermodelPath::Templates.as_str())
    }

    /// `<config-dir>/.files`
    pub fn snapshots_dir(&self) -> NormalizedPath {
        self.config_dir.join(OvermodelPath::Snapshots.as_str())
    }

    pub fn template_path(&self, relative: &NormalizedPath) -> NormalizedPath {
        self.templates_dir().join(relative.as_str())
    }

    pub fn snapshot_path(&self, relative: &NormalizedPath) -> NormalizedPath {
        self.snapshots_dir().join(relative.as_str())
    }

    pub fn target_path(&self, relative: &NormalizedPath) -> NormalizedPath {
        self.target_root.join(relative.as_str())
    }

    /// List template paths relative to `<config-dir>/files`, sorted.
    pub fn list_templates(&self) -> Result<Vec<NormalizedPath>> {
        let mut templates = walk::list_files(&self.templates_dir())?;
        templates.sort();
        Ok(templates)
    }
}
