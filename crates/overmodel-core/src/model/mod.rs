//! Model files and their selection
//!
//! A model root is a directory tree of JSON, YAML and `.properties` files.
//! Files from every root are listed, ordered by depth then by relative
//! path, and passed through the [`RuleFilter`] before they contribute to
//! the configuration.
//!
//! Top-level files always contribute. A nested file contributes only when
//! the rules consume every directory above it: with `--rule env=prod`, both
//! `env/prod.yaml` and `env/prod/.app.yaml` are selected, while
//! `env/dev.yaml` and `env/dev/.app.yaml` are left untouched and skipped.

mod file;
mod format;
mod rule;

pub use file::{ModelFile, discover_model_files, sort_model_files};
pub use format::ModelFormat;
pub use rule::{Rule, RuleFilter};
