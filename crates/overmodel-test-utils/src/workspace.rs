//! [`TestWorkspace`] builder for overmodel test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Default config directory name inside a workspace.
pub const CONFIG_DIR: &str = "_overmodel";

/// A temporary directory laid out as an overmodel project.
///
/// ```text
/// <root>/models/<name>/...          model roots
/// <root>/_overmodel/files/...       templates
/// <root>/_overmodel/.files/...      snapshots
/// <root>/...                        live targets (target root = <root>)
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use overmodel_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_model("base", ".host.properties", "host.name=bob\n");
/// ws.write_template("etc/app.conf", "name={{host.name}}\n");
/// ws.write_target("etc/app.conf", "");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Root of the workspace; also the target root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root().join(CONFIG_DIR)
    }

    /// Path of the model root `name`; not created until a file is written.
    pub fn model_dir(&self, name: &str) -> PathBuf {
        self.root().join("models").join(name)
    }

    /// Write a model file at `relative` below the model root `name`.
    pub fn write_model(&self, name: &str, relative: &str, content: &str) -> PathBuf {
        write_file(&self.model_dir(name).join(relative), content)
    }

    /// Write the template for target `relative`.
    pub fn write_template(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.config_dir().join("files").join(relative), content)
    }

    /// Write the live target `relative`.
    pub fn write_target(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.root().join(relative), content)
    }

    /// Write the snapshot of target `relative`.
    pub fn write_snapshot(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.config_dir().join(".files").join(relative), content)
    }

    /// Read the live target `relative`.
    ///
    /// # Panics
    /// Panics if the target cannot be read.
    pub fn read_target(&self, relative: &str) -> String {
        let path = self.root().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read target: {}", path.display()))
    }

    /// Read the snapshot of target `relative`, if one exists.
    pub fn read_snapshot(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.config_dir().join(".files").join(relative)).ok()
    }
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}
