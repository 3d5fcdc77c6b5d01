//! Core orchestration for overmodel
//!
//! This crate turns layered model directories into a configuration tree,
//! renders templates against it and applies the results to live files
//! without clobbering local edits.
//!
//! # Modules
//!
//! - [`tree`]: the configuration tree, key expansion and deep merge
//! - [`model`]: model file discovery, formats and rule filtering
//! - [`config`]: the compile pipeline
//! - [`render`]: `{{variable}}` template resolution
//! - [`apply`]: drift detection and writing of targets and snapshots

pub mod apply;
pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod tree;

pub use apply::{AcceptSet, ApplyGuard, ApplyOptions, ApplyReport, FileFailure};
pub use config::ConfigCompiler;
pub use error::{Error, Result};
pub use model::{ModelFile, Rule, RuleFilter};
pub use render::{RenderResult, TemplateResolver};
pub use tree::{ConfigNode, ConfigTree, Leaf};
