//! Compiles model roots into one configuration tree

use overmodel_fs::NormalizedPath;

use crate::model::{ModelFile, Rule, RuleFilter, discover_model_files};
use crate::tree::{ConfigTree, deep_merge};
use crate::{Error, Result};

/// Builds the configuration tree for a set of model roots and rules.
#[derive(Debug, Clone)]
pub struct ConfigCompiler {
    /// Model roots in the order given by the caller
    model_dirs: Vec<NormalizedPath>,

    filter: RuleFilter,
}

impl ConfigCompiler {
    pub fn new(model_dirs: Vec<NormalizedPath>, rules: Vec<Rule>) -> Self {
        Self {
            model_dirs,
            filter: RuleFilter::new(rules),
        }
    }

    pub fn model_dirs(&self) -> &[NormalizedPath] {
        &self.model_dirs
    }

    pub fn rules(&self) -> &[Rule] {
        self.filter.rules()
    }

    /// The model files that contribute, in merge order.
    ///
    /// # Errors
    ///
    /// - [`Error::NoModelDirectories`] if no roots were given
    /// - [`Error::ModelDirectoryNotFound`] if a root is missing
    /// - [`Error::EmptyConfiguration`] if no file survives the rules
    pub fn selected_files(&self) -> Result<Vec<ModelFile>> {
        let files = discover_model_files(&self.model_dirs)?;
        let selected = self.filter.apply(files);
        if selected.is_empty() {
            return Err(Error::EmptyConfiguration);
        }
        Ok(selected)
    }

    /// Compile the configuration tree.
    ///
    /// Parsing stops at the first model file that fails; nothing is
    /// skipped silently.
    pub fn compile(&self) -> Result<ConfigTree> {
        let selected = self.selected_files()?;

        let trees = selected
            .iter()
            .map(|file| {
                tracing::debug!(
                    root = %file.root,
                    file = %file.relative_path,
                    depth = file.depth(),
                    "Merging model file"
                );
                file.load()
            })
            .collect::<Result<Vec<_>>>()?;

        let config = deep_merge(&trees);
        tracing::debug!(
            files = selected.len(),
            top_level_keys = config.len(),
            "Compiled configuration"
        );
        Ok(config)
    }
}
