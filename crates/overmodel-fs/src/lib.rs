//! Filesystem layer for overmodel
//!
//! Provides forward-slash normalized paths, atomic I/O, recursive file
//! discovery and the on-disk layout of a config directory (templates under
//! `files/`, snapshots under `.files/`).

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;
pub mod walk;

pub use constants::OvermodelPath;
pub use error::{Error, Result};
pub use layout::ConfigLayout;
pub use path::NormalizedPath;
pub use walk::list_files;
