//! Recursive `{{token}}` resolution against a configuration tree

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::tree::ConfigTree;

/// Number of nested expansions allowed below the template itself.
pub const MAX_RECURSION_DEPTH: usize = 10;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("token pattern is valid"));

/// Outcome of rendering one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    pub rendered_text: String,

    /// Unresolved variables in order of first occurrence, without duplicates
    pub missing_variables: Vec<String>,
}

impl RenderResult {
    /// A render only counts when every variable resolved.
    pub fn is_complete(&self) -> bool {
        self.missing_variables.is_empty()
    }
}

/// The distinct variable names referenced by `text`, in order of appearance.
pub fn find_variables(text: &str) -> Vec<String> {
    let mut variables = Vec::new();
    for caps in TOKEN_PATTERN.captures_iter(text) {
        push_unique(&mut variables, &caps[1]);
    }
    variables
}

fn push_unique(list: &mut Vec<String>, item: &str) {
    if !list.iter().any(|existing| existing == item) {
        list.push(item.to_string());
    }
}

/// Resolves template tokens against a compiled configuration.
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'a> {
    config: &'a ConfigTree,
    max_depth: usize,
}

impl<'a> TemplateResolver<'a> {
    pub fn new(config: &'a ConfigTree) -> Self {
        Self {
            config,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    pub fn with_max_depth(config: &'a ConfigTree, max_depth: usize) -> Self {
        Self { config, max_depth }
    }

    /// Render `text`, replacing every resolvable token everywhere it occurs.
    pub fn render(&self, text: &str) -> RenderResult {
        self.render_at(text, 0)
    }

    fn render_at(&self, text: &str, depth: usize) -> RenderResult {
        let mut resolved: HashMap<&str, String> = HashMap::new();
        let mut unresolved: Vec<&str> = Vec::new();
        let mut missing_variables = Vec::new();

        for caps in TOKEN_PATTERN.captures_iter(text) {
            let (Some(token), Some(variable)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let token = token.as_str();
            if resolved.contains_key(token) || unresolved.contains(&token) {
                continue;
            }

            match self.resolve_variable(variable.as_str(), depth) {
                Ok(value) => {
                    resolved.insert(token, value);
                }
                Err(missing) => {
                    unresolved.push(token);
                    for variable in &missing {
                        push_unique(&mut missing_variables, variable);
                    }
                }
            }
        }

        let rendered_text = TOKEN_PATTERN
            .replace_all(text, |caps: &Captures| {
                resolved
                    .get(&caps[0])
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();

        RenderResult {
            rendered_text,
            missing_variables,
        }
    }

    /// Resolve one variable, expanding tokens inside its value.
    ///
    /// On failure returns the missing variables: those of the value that
    /// could not be expanded, followed by `variable` itself.
    fn resolve_variable(&self, variable: &str, depth: usize) -> Result<String, Vec<String>> {
        let Some(value) = self.config.value_at(variable.trim()) else {
            tracing::debug!(variable, depth, "Variable not found");
            return Err(vec![variable.to_string()]);
        };

        if !TOKEN_PATTERN.is_match(value) {
            return Ok(value.to_string());
        }

        let mut missing = if depth >= self.max_depth {
            tracing::debug!(variable, depth, "Recursion bound reached");
            find_variables(value)
        } else {
            let nested = self.render_at(value, depth + 1);
            if nested.is_complete() {
                return Ok(nested.rendered_text);
            }
            nested.missing_variables
        };

        push_unique(&mut missing, variable);
        Err(missing)
    }
}
