//! The apply guard
//!
//! Renders every template onto its live target while refusing to overwrite
//! targets that were edited by hand since the last apply.

use std::collections::BTreeSet;

use overmodel_fs::checksum::compute_checksum;
use overmodel_fs::{ConfigLayout, NormalizedPath, io};

use super::{AppliedFile, ApplyReport, CharDiff, FileFailure, GuardState};
use crate::render::TemplateResolver;
use crate::tree::ConfigTree;
use crate::{Error, Result};

/// Target paths the operator allows to be overwritten despite drift.
///
/// Lives for a single apply call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptSet {
    paths: BTreeSet<String>,
}

impl AcceptSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: &str) {
        self.paths.insert(normalize_relative(path));
    }

    pub fn contains(&self, relative: &NormalizedPath) -> bool {
        self.paths.contains(relative.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for AcceptSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path.as_ref());
        }
        set
    }
}

/// `./etc\app.conf` and `etc/app.conf` name the same target.
fn normalize_relative(path: &str) -> String {
    let normalized = NormalizedPath::new(path);
    let mut rest = normalized.as_str();
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest.trim_start_matches('/').to_string()
}

/// Options for one apply pass.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub accept: AcceptSet,
    /// Check and render, but write nothing
    pub dry_run: bool,
}

/// Result of guarding a single file.
type FileOutcome = std::result::Result<AppliedFile, FileFailure>;

/// Applies rendered templates from one config directory.
#[derive(Debug, Clone)]
pub struct ApplyGuard {
    layout: ConfigLayout,
}

impl ApplyGuard {
    pub fn new(layout: ConfigLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    /// Target paths scheduled for rendering: every template under
    /// `<config-dir>/files`, relative to that directory.
    pub fn scheduled_targets(&self) -> Result<Vec<NormalizedPath>> {
        let templates_dir = self.layout.templates_dir();
        if !templates_dir.is_dir() {
            return Err(Error::TemplateDirectoryNotFound {
                path: templates_dir.to_native(),
            });
        }
        Ok(self.layout.list_templates()?)
    }

    /// Every scheduled target must already exist as a live file.
    ///
    /// # Errors
    ///
    /// [`Error::TargetFilePrecondition`] listing all absent targets at once.
    pub fn check_preconditions(&self, targets: &[NormalizedPath]) -> Result<()> {
        let missing: Vec<String> = targets
            .iter()
            .filter(|relative| !self.layout.target_path(relative).is_file())
            .map(|relative| relative.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::TargetFilePrecondition { missing })
        }
    }

    /// Run one apply pass.
    ///
    /// Fatal errors (missing template directory, missing targets) are
    /// returned before anything is written. Drift, unresolved variables and
    /// I/O errors on a single target are recorded per file in the report
    /// and do not stop the pass.
    pub fn apply(&self, config: &ConfigTree, options: &ApplyOptions) -> Result<ApplyReport> {
        let targets = self.scheduled_targets()?;
        self.check_preconditions(&targets)?;

        let resolver = TemplateResolver::new(config);
        let mut report = ApplyReport {
            dry_run: options.dry_run,
            ..ApplyReport::default()
        };

        for relative in &targets {
            let outcome = self
                .apply_file(relative, &resolver, options)
                .unwrap_or_else(|error| {
                    Err(FileFailure::Io {
                        file: relative.to_string(),
                        message: error.to_string(),
                    })
                });
            match outcome {
                Ok(applied) => report.applied.push(applied),
                Err(failure) => {
                    tracing::debug!(file = %relative, %failure, "Target not applied");
                    report.failures.push(failure);
                }
            }
        }

        tracing::debug!(
            applied = report.applied.len(),
            failed = report.failures.len(),
            dry_run = options.dry_run,
            "Apply finished"
        );
        Ok(report)
    }

    /// Compare, render and write a single target.
    ///
    /// Target and snapshot are only written after a complete render, target
    /// first. A failed render therefore leaves both untouched, even when the
    /// target was accepted.
    fn apply_file(
        &self,
        relative: &NormalizedPath,
        resolver: &TemplateResolver<'_>,
        options: &ApplyOptions,
    ) -> Result<FileOutcome> {
        let file = relative.to_string();
        let target_path = self.layout.target_path(relative);
        let snapshot_path = self.layout.snapshot_path(relative);
        let accepted = options.accept.contains(relative);

        let state = if !snapshot_path.is_file() {
            tracing::warn!(file = %file, "No prior snapshot; target will be overwritten");
            GuardState::NoPriorSnapshot
        } else {
            let target = io::read_bytes(&target_path)?;
            let snapshot = io::read_bytes(&snapshot_path)?;
            if target == snapshot {
                GuardState::SnapshotMatchesTarget
            } else if accepted {
                tracing::debug!(file = %file, "Drifted target accepted");
                GuardState::SnapshotDiffersFromTarget
            } else {
                let diff = CharDiff::compute(
                    &String::from_utf8_lossy(&snapshot),
                    &String::from_utf8_lossy(&target),
                );
                return Ok(Err(FileFailure::DriftConflict { file, diff }));
            }
        };
        tracing::debug!(file = %file, %state, accepted, "Guard state");

        let template = io::read_text(&self.layout.template_path(relative))?;
        let rendered = resolver.render(&template);
        if !rendered.is_complete() {
            return Ok(Err(FileFailure::UnresolvedVariable {
                file,
                variables: rendered.missing_variables,
            }));
        }

        let checksum = compute_checksum(rendered.rendered_text.as_bytes());
        let written = !options.dry_run;
        if written {
            io::write_text(&target_path, &rendered.rendered_text)?;
            io::write_text(&snapshot_path, &rendered.rendered_text)?;
            tracing::info!(file = %file, %checksum, "Applied target");
        }

        Ok(Ok(AppliedFile {
            file,
            state,
            accepted,
            checksum,
            written,
        }))
    }
}
