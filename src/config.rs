//! Generator configuration.
//!
//! Every field has a default matching the upstream Babel type tables, so a
//! config file is only needed to deviate from them.
use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenError, Result};

/// Node kind → field → verbatim type expression.
pub type OverrideTable = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Fields whose validator is too permissive or too narrow to render
    /// usefully get a fixed type instead.
    pub overrides: OverrideTable,

    /// Alias every node kind joins implicitly.
    pub universal_alias: String,

    /// Appended to kind and alias names to form the declared type name.
    pub node_suffix: String,

    /// Field left out of node declarations entirely.
    pub reserved_field: String,

    /// Builder parameter names that must be prefixed with `_`.
    pub keywords: Vec<String>,

    /// Name of the stub class and the runtime wrapper class.
    pub engine_class: String,

    /// Extra declarations appended verbatim to the node catalogue.
    pub catalogue_trailer: Vec<String>,

    pub outputs: OutputPaths,
}

/// Artifact locations, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputPaths {
    pub catalogue: String,
    pub stub: String,
    pub wrapper: String,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            catalogue: "babel-nodes.js".to_string(),
            stub: "lib/index.js.flow".to_string(),
            wrapper: "src/index.js".to_string(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            overrides: default_overrides(),
            universal_alias: "Babel".to_string(),
            node_suffix: "Node".to_string(),
            reserved_field: "static".to_string(),
            keywords: ["extends", "arguments", "static"].map(String::from).to_vec(),
            engine_class: "BabelTypes".to_string(),
            catalogue_trailer: Vec::new(),
            outputs: OutputPaths::default(),
        }
    }
}

fn default_overrides() -> OverrideTable {
    let mut table = OverrideTable::new();
    for (kind, field, ty) in [
        ("ClassMethod", "key", "Expression"),
        ("Identifier", "name", "string"),
        ("MemberExpression", "property", "Expression"),
        ("ObjectMethod", "key", "Expression"),
        ("ObjectProperty", "key", "Expression"),
    ] {
        table
            .entry(kind.to_string())
            .or_default()
            .insert(field.to_string(), ty.to_string());
    }
    table
}

impl GeneratorConfig {
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(source, |message| GenError::Config {
            path: origin.to_string(),
            message,
        })
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let source = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
                Self::from_json_str(&source, &path.to_string_lossy())
            }
        }
    }

    pub fn is_keyword(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| k == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn override_of<'a>(config: &'a GeneratorConfig, kind: &str, field: &str) -> Option<&'a str> {
        config.overrides.get(kind)?.get(field).map(String::as_str)
    }

    #[test]
    fn defaults_carry_babel_overrides() {
        let config = GeneratorConfig::default();
        assert_eq!(override_of(&config, "Identifier", "name"), Some("string"));
        assert_eq!(override_of(&config, "MemberExpression", "property"), Some("Expression"));
        assert_eq!(override_of(&config, "Identifier", "typeAnnotation"), None);
        assert!(config.is_keyword("extends"));
        assert!(!config.is_keyword("body"));
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let json = r#"{
            "universalAlias": "Node",
            "overrides": {"Literal": {"value": "string | number"}},
            "outputs": {"stub": "types/index.js.flow"}
        }"#;
        let config = GeneratorConfig::from_json_str(json, "nodegen.json").unwrap();
        assert_eq!(config.universal_alias, "Node");
        assert_eq!(override_of(&config, "Literal", "value"), Some("string | number"));
        assert_eq!(override_of(&config, "Identifier", "name"), None);
        assert_eq!(config.outputs.stub, "types/index.js.flow");
        assert_eq!(config.outputs.catalogue, "babel-nodes.js");
        assert_eq!(config.engine_class, "BabelTypes");
    }

    #[test]
    fn missing_config_file_is_io_error() {
        let err = GeneratorConfig::load(Some(Path::new("/nonexistent/nodegen.json"))).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
    }
}
