//! Rules select which variant directories of a model contribute

use std::str::FromStr;

use overmodel_fs::NormalizedPath;

use super::{ModelFile, ModelFormat};
use crate::{Error, Result};

/// An operator-supplied `<segment>=<value>` selection.
///
/// The rule `env=prod` names the directory path `env/prod`; model files
/// below it are selected when the rule is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    segment: String,
    value: String,
}

impl Rule {
    pub fn new(segment: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            value: value.into(),
        }
    }

    /// Parse `<segment>=<value>`, splitting on the first `=`.
    ///
    /// The value may be empty (`tier=` selects a single `tier/` level).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRule`] when there is no `=` or the segment
    /// is empty.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once('=') {
            Some((segment, value)) if !segment.is_empty() => Ok(Self::new(segment, value)),
            _ => Err(Error::InvalidRule {
                rule: raw.to_string(),
            }),
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The rule with every `=` turned into `/`: `env=prod` is `env/prod`.
    pub fn segment_path(&self) -> String {
        format!("{}/{}", self.segment, self.value).replace('=', "/")
    }

    /// The text removed from candidate paths.
    ///
    /// An empty value leaves a trailing `/` on the segment path; it is
    /// dropped so `tier=` consumes `tier` the same way `env=prod`
    /// consumes `env/prod`.
    fn removal_pattern(&self) -> String {
        self.segment_path().trim_end_matches('/').to_string()
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.segment, self.value)
    }
}

/// Decides which model files contribute to a compile pass.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    rules: Vec<Rule>,
}

impl RuleFilter {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether a model file at `relative_path` is selected.
    ///
    /// Top-level files are always selected. For nested files every rule's
    /// segment path is removed wherever it occurs, in the order the rules
    /// were given. What is left selects the file when it is either
    ///
    /// - exactly `.<ext>`, so `env/prod.yaml` is the `env=prod` variant, or
    /// - one or more `/` followed by a dotfile with a recognized extension,
    ///   so `env/prod/.app.yaml` is the `env=prod` variant of `app`.
    pub fn accepts(&self, relative_path: &NormalizedPath) -> bool {
        let path = relative_path.as_str();
        if !path.contains('/') {
            return true;
        }

        let remaining = self
            .rules
            .iter()
            .fold(path.to_string(), |remaining, rule| {
                remaining.replace(&rule.removal_pattern(), "")
            });

        if let Some(extension) = remaining.strip_prefix('.') {
            return ModelFormat::from_extension(extension).is_some();
        }

        let dotfile = remaining.trim_start_matches('/');
        dotfile.len() < remaining.len()
            && dotfile.starts_with('.')
            && !dotfile.contains('/')
            && ModelFormat::from_file_name(dotfile).is_some()
    }

    /// Keep the selected files, preserving their order.
    pub fn apply(&self, files: Vec<ModelFile>) -> Vec<ModelFile> {
        files
            .into_iter()
            .filter(|file| {
                let selected = self.accepts(&file.relative_path);
                tracing::debug!(
                    file = %file.relative_path,
                    root = %file.root,
                    selected,
                    "Rule filter"
                );
                selected
            })
            .collect()
    }
}
