//! Schema registry: node kinds, their fields, and field validators.
//!
//! The registry is an external collaborator; we only read it. The JSON layout
//! mirrors the definition tables of the upstream AST library:
//!
//! ```json
//! {"nodes": {"Identifier": {
//!     "builder": ["name"],
//!     "fields": {"name": {"validate": {"type": "string"}}},
//!     "aliases": ["Expression", "LVal"]
//! }}}
//! ```
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{GenError, Result};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SchemaRegistry {
    /// Node kind identifier → definition, in file order. A kind listed
    /// twice in one document is rejected.
    #[serde(default, deserialize_with = "unique_nodes")]
    pub nodes: IndexMap<String, NodeKindSchema>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NodeKindSchema {
    /// Fields passed positionally to the builder, in call order.
    #[serde(default)]
    pub builder: Vec<String>,
    #[serde(default)]
    pub fields: IndexMap<String, FieldSpec>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FieldSpec {
    #[serde(default, rename = "validate", skip_serializing_if = "Option::is_none")]
    pub validator: Option<Validator>,
    #[serde(default)]
    pub optional: bool,
    /// `null` and absent both mean "no default".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// The closed validator grammar. Anything outside it lands in
/// `Unrecognized` with the raw payload kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    ExactType(String),
    OneOfNodeTypes(Vec<String>),
    OneOfNodeOrValueTypes(Vec<String>),
    OneOfLiterals(Vec<Value>),
    ChainOf(Vec<Validator>),
    Each(Box<Validator>),
    Unrecognized(Value),
}

// ————————————————————————————————————————————————————————————————————————————
// VALIDATOR WIRE FORMAT
// ————————————————————————————————————————————————————————————————————————————

impl Validator {
    /// Classify a raw validator object. Keys are tried in resolver precedence
    /// order; a known key holding the wrong JSON type is unrecognized.
    pub fn from_json(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Validator::Unrecognized(value.clone());
        };
        let unrecognized = || Validator::Unrecognized(value.clone());

        if let Some(ty) = obj.get("type") {
            return match ty.as_str() {
                Some(name) => Validator::ExactType(name.to_string()),
                None => unrecognized(),
            };
        }
        if let Some(names) = obj.get("oneOfNodeTypes") {
            return string_list(names).map(Validator::OneOfNodeTypes).unwrap_or_else(unrecognized);
        }
        if let Some(names) = obj.get("oneOfNodeOrValueTypes") {
            return string_list(names)
                .map(Validator::OneOfNodeOrValueTypes)
                .unwrap_or_else(unrecognized);
        }
        if let Some(lits) = obj.get("oneOf") {
            return match lits.as_array() {
                Some(xs) if xs.iter().all(is_literal) => Validator::OneOfLiterals(xs.clone()),
                _ => unrecognized(),
            };
        }
        if let Some(steps) = obj.get("chainOf") {
            return match steps.as_array() {
                Some(xs) => Validator::ChainOf(xs.iter().map(Validator::from_json).collect()),
                None => unrecognized(),
            };
        }
        if let Some(inner) = obj.get("each") {
            return Validator::Each(Box::new(Validator::from_json(inner)));
        }
        unrecognized()
    }

    pub fn to_json(&self) -> Value {
        use serde_json::json;
        match self {
            Validator::ExactType(name) => json!({ "type": name }),
            Validator::OneOfNodeTypes(names) => json!({ "oneOfNodeTypes": names }),
            Validator::OneOfNodeOrValueTypes(names) => json!({ "oneOfNodeOrValueTypes": names }),
            Validator::OneOfLiterals(lits) => json!({ "oneOf": lits }),
            Validator::ChainOf(steps) => {
                json!({ "chainOf": steps.iter().map(Validator::to_json).collect::<Vec<_>>() })
            }
            Validator::Each(inner) => json!({ "each": inner.to_json() }),
            Validator::Unrecognized(raw) => raw.clone(),
        }
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|x| x.as_str().map(str::to_string))
        .collect()
}

fn is_literal(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn unique_nodes<'de, D>(deserializer: D) -> std::result::Result<IndexMap<String, NodeKindSchema>, D::Error>
where
    D: Deserializer<'de>,
{
    struct NodesVisitor;

    impl<'de> Visitor<'de> for NodesVisitor {
        type Value = IndexMap<String, NodeKindSchema>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of node kind definitions")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
            let mut nodes = IndexMap::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((kind, def)) = access.next_entry::<String, NodeKindSchema>()? {
                if nodes.contains_key(&kind) {
                    return Err(de::Error::custom(format!("node kind `{kind}` is defined more than once")));
                }
                nodes.insert(kind, def);
            }
            Ok(nodes)
        }
    }

    deserializer.deserialize_map(NodesVisitor)
}

impl<'de> Deserialize<'de> for Validator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Validator::from_json(&raw))
    }
}

impl Serialize for Validator {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

// ————————————————————————————————————————————————————————————————————————————
// LOADING
// ————————————————————————————————————————————————————————————————————————————

impl FieldSpec {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

impl SchemaRegistry {
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(source, |message| GenError::Schema {
            path: origin.to_string(),
            message,
        })
    }

    /// Read and merge every schema file. A node kind may only be defined once
    /// across all inputs.
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut merged = SchemaRegistry::default();
        let mut origins = BTreeMap::<String, PathBuf>::new();
        for path in paths {
            let path = path.as_ref();
            let source = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;
            let part = Self::from_json_str(&source, &path.to_string_lossy())?;
            for (kind, def) in part.nodes {
                if let Some(first) = origins.get(&kind) {
                    return Err(GenError::DuplicateNodeKind {
                        kind,
                        first: first.display().to_string(),
                        second: path.display().to_string(),
                    });
                }
                origins.insert(kind.clone(), path.to_path_buf());
                merged.nodes.insert(kind, def);
            }
            tracing::debug!("loaded schema {}", path.display());
        }
        Ok(merged)
    }

    /// Node kind identifiers in lexicographic order.
    pub fn sorted_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

// ------------------------------- Tests ------------------------------------ //
