//! Shared test utilities for the overmodel workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`] builder for model roots, templates,
//!   live targets and snapshots

pub mod workspace;

pub use workspace::TestWorkspace;
