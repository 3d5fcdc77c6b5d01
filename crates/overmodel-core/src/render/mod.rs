//! Template rendering
//!
//! Templates are plain text with `{{dotted.path}}` tokens. A token resolves
//! to the value stored at `<dotted.path>.value` in the configuration tree;
//! values may contain tokens themselves and are expanded recursively up to
//! [`MAX_RECURSION_DEPTH`] levels, which also stops reference cycles.
//!
//! There are no loops, conditionals or filters. Anything that does not
//! resolve is left in place and reported in
//! [`RenderResult::missing_variables`].

mod resolver;

pub use resolver::{MAX_RECURSION_DEPTH, RenderResult, TemplateResolver, find_variables};
