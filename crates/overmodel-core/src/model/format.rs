//! Model file formats and their conversion into configuration trees

use std::path::Path;

use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::tree::{ConfigNode, ConfigTree, deep_merge, expand_key};
use crate::{Error, Result};
use overmodel_fs::NormalizedPath;

/// Conversion result carrying a human-readable cause on failure.
type Conversion<T> = std::result::Result<T, String>;

/// The recognized model file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Json,
    Yaml,
    Properties,
}

impl ModelFormat {
    pub const ALL: [ModelFormat; 3] = [Self::Json, Self::Yaml, Self::Properties];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Properties => "properties",
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// Detect the format from a file name's last extension.
    ///
    /// Dotfiles count: `.yaml` and `.app.yaml` are both YAML.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, extension) = name.rsplit_once('.')?;
        Self::from_extension(extension)
    }

    pub fn detect(path: &NormalizedPath) -> Option<Self> {
        path.file_name().and_then(Self::from_file_name)
    }

    /// Parse file content into a configuration tree.
    ///
    /// `file` is only used for error context.
    pub fn parse(self, file: &Path, content: &str) -> Result<ConfigTree> {
        let parse_error = |cause: String| Error::ModelParse {
            file: file.to_path_buf(),
            cause,
        };

        match self {
            Self::Json => {
                let value: JsonValue =
                    serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                match value {
                    JsonValue::Object(map) => json_mapping(map).map_err(parse_error),
                    _ => Err(parse_error("top-level value must be a mapping".into())),
                }
            }
            Self::Yaml => {
                let value: YamlValue =
                    serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
                match value {
                    YamlValue::Null => Ok(ConfigTree::new()),
                    YamlValue::Mapping(mapping) => yaml_mapping(mapping).map_err(parse_error),
                    _ => Err(parse_error("top-level value must be a mapping".into())),
                }
            }
            Self::Properties => parse_properties(content).map_err(|e| match e {
                PropertiesFailure::Syntax(cause) => parse_error(cause),
                PropertiesFailure::Key(error) => error,
            }),
        }
    }
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

enum PropertiesFailure {
    Syntax(String),
    Key(Error),
}

/// Each property key is expanded on its own and the results merged.
///
/// Keys are processed in sorted order so that overlapping keys such as
/// `host` and `host.value.x` merge the same way on every run.
fn parse_properties(content: &str) -> std::result::Result<ConfigTree, PropertiesFailure> {
    let entries = java_properties::read(content.as_bytes())
        .map_err(|e| PropertiesFailure::Syntax(e.to_string()))?;

    let mut entries: Vec<(String, String)> = entries.into_iter().collect();
    entries.sort();

    let trees = entries
        .iter()
        .map(|(key, value)| expand_key(key, value))
        .collect::<Result<Vec<_>>>()
        .map_err(PropertiesFailure::Key)?;

    Ok(deep_merge(&trees))
}

fn json_mapping(map: serde_json::Map<String, JsonValue>) -> Conversion<ConfigTree> {
    let mut tree = ConfigTree::new();
    for (key, value) in map {
        if let Some(node) = json_node(value)? {
            tree.insert(key, node);
        }
    }
    Ok(tree)
}

fn json_node(value: JsonValue) -> Conversion<Option<ConfigNode>> {
    let node = match value {
        JsonValue::Null => return Ok(None),
        JsonValue::Bool(b) => ConfigNode::Scalar(b.to_string()),
        JsonValue::Number(n) => ConfigNode::Scalar(n.to_string()),
        JsonValue::String(s) => ConfigNode::Scalar(s),
        JsonValue::Array(items) => ConfigNode::Scalar(
            items
                .into_iter()
                .map(json_scalar)
                .collect::<Conversion<Vec<_>>>()?
                .join(","),
        ),
        JsonValue::Object(map) => ConfigNode::Tree(json_mapping(map)?),
    };
    Ok(Some(node))
}

fn json_scalar(value: JsonValue) -> Conversion<String> {
    match value {
        JsonValue::Null => Ok(String::new()),
        JsonValue::Bool(b) => Ok(b.to_string()),
        JsonValue::Number(n) => Ok(n.to_string()),
        JsonValue::String(s) => Ok(s),
        JsonValue::Array(_) | JsonValue::Object(_) => {
            Err("sequences may only contain scalar values".into())
        }
    }
}

fn yaml_mapping(mapping: serde_yaml::Mapping) -> Conversion<ConfigTree> {
    let mut tree = ConfigTree::new();
    for (key, value) in mapping {
        let key = yaml_key(key)?;
        if let Some(node) = yaml_node(value)? {
            tree.insert(key, node);
        }
    }
    Ok(tree)
}

fn yaml_key(key: YamlValue) -> Conversion<String> {
    match key {
        YamlValue::String(s) => Ok(s),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        other => Err(format!("unsupported mapping key {other:?}")),
    }
}

fn yaml_node(value: YamlValue) -> Conversion<Option<ConfigNode>> {
    let node = match value {
        YamlValue::Null => return Ok(None),
        YamlValue::Bool(b) => ConfigNode::Scalar(b.to_string()),
        YamlValue::Number(n) => ConfigNode::Scalar(n.to_string()),
        YamlValue::String(s) => ConfigNode::Scalar(s),
        YamlValue::Sequence(items) => ConfigNode::Scalar(
            items
                .into_iter()
                .map(yaml_scalar)
                .collect::<Conversion<Vec<_>>>()?
                .join(","),
        ),
        YamlValue::Mapping(mapping) => ConfigNode::Tree(yaml_mapping(mapping)?),
        YamlValue::Tagged(tagged) => return yaml_node(tagged.value),
    };
    Ok(Some(node))
}

fn yaml_scalar(value: YamlValue) -> Conversion<String> {
    match value {
        YamlValue::Null => Ok(String::new()),
        YamlValue::Bool(b) => Ok(b.to_string()),
        YamlValue::Number(n) => Ok(n.to_string()),
        YamlValue::String(s) => Ok(s),
        YamlValue::Tagged(tagged) => yaml_scalar(tagged.value),
        YamlValue::Sequence(_) | YamlValue::Mapping(_) => {
            Err("sequences may only contain scalar values".into())
        }
    }
}
