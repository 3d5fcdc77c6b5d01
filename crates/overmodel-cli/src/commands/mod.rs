//! Command implementations for overmodel-cli

pub mod apply;
pub mod compile;

pub use apply::run_apply;
pub use compile::run_compile;
