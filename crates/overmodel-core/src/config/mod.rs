//! Configuration compilation
//!
//! Compiling runs the whole model pipeline for one invocation:
//!
//! 1. **Discover** every file under the model roots (one thread per root)
//! 2. **Order** them by depth, then relative path
//! 3. **Filter** them through the rules
//! 4. **Parse** each surviving file into a tree
//! 5. **Merge** the trees in order, later files winning
//!
//! # Example
//!
//! ```ignore
//! use overmodel_core::config::ConfigCompiler;
//! use overmodel_core::model::Rule;
//! use overmodel_fs::NormalizedPath;
//!
//! let compiler = ConfigCompiler::new(
//!     vec![NormalizedPath::new("models/base"), NormalizedPath::new("models/site")],
//!     vec![Rule::parse("env=prod")?],
//! );
//! let config = compiler.compile()?;
//! println!("{:?}", config.value_at("host.name"));
//! ```

mod compiler;

pub use compiler::ConfigCompiler;
