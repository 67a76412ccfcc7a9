//! Alias indexing pass: one walk over the registry producing the resolved
//! model every emitter consumes.
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::ir::TypeExpr;
use crate::resolve::{self, ResolveError};
use crate::schema::{FieldSpec, NodeKindSchema, SchemaRegistry};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Alias name → sorted, deduplicated member kinds.
pub type AliasIndex = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedModel {
    /// Sorted by kind name.
    pub kinds: Vec<ResolvedKind>,
    pub aliases: AliasIndex,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedKind {
    pub name: String,
    /// Builder fields first, then the rest lexicographically. The reserved
    /// field is never listed.
    pub fields: Vec<ResolvedField>,
    pub builder: Vec<BuilderParam>,
    /// Declared aliases followed by the universal alias.
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedField {
    pub name: String,
    #[serde(skip)]
    pub ty: TypeExpr,
    /// `ty` rendered with the configured node suffix.
    #[serde(rename = "ty")]
    pub rendered: String,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderParam {
    pub field: String,
    /// `field`, prefixed with `_` when it collides with a keyword.
    pub param: String,
    #[serde(skip)]
    pub ty: TypeExpr,
    #[serde(rename = "ty")]
    pub rendered: String,
    /// Optional, or has a default.
    pub optional: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

pub fn build_model(schema: &SchemaRegistry, config: &GeneratorConfig) -> Result<ResolvedModel> {
    let mut kinds = Vec::with_capacity(schema.nodes.len());
    let mut aliases = AliasIndex::new();

    for name in schema.sorted_kinds() {
        let def = &schema.nodes[name];
        let kind = resolve_kind(name, def, config)?;
        for alias in &kind.aliases {
            check_identifier(alias)?;
            aliases.entry(alias.clone()).or_default().insert(name.to_string());
        }
        kinds.push(kind);
    }

    tracing::debug!("indexed {} node kinds into {} alias groups", kinds.len(), aliases.len());
    Ok(ResolvedModel { kinds, aliases })
}

fn resolve_kind(name: &str, def: &NodeKindSchema, config: &GeneratorConfig) -> Result<ResolvedKind> {
    check_identifier(name)?;

    for field in &def.builder {
        if !def.fields.contains_key(field) {
            return Err(GenError::MissingField { kind: name.to_string(), field: field.clone() });
        }
    }

    // Each field is resolved exactly once so a bad validator warns once.
    let types: BTreeMap<&str, TypeExpr> = def
        .fields
        .iter()
        .map(|(field, spec)| (field.as_str(), resolve_field(name, field, spec, config)))
        .collect();

    let fields = field_order(def)
        .into_iter()
        .filter(|field| *field != config.reserved_field)
        .map(|field| ResolvedField {
            name: field.to_string(),
            ty: types[field].clone(),
            rendered: types[field].render(&config.node_suffix),
            optional: def.fields[field].optional,
        })
        .collect();

    let builder = def
        .builder
        .iter()
        .map(|field| {
            let spec = &def.fields[field];
            BuilderParam {
                field: field.clone(),
                param: if config.is_keyword(field) { format!("_{field}") } else { field.clone() },
                ty: types[field.as_str()].clone(),
                rendered: types[field.as_str()].render(&config.node_suffix),
                optional: spec.optional || spec.has_default(),
            }
        })
        .collect();

    let mut aliases: Vec<String> = Vec::with_capacity(def.aliases.len() + 1);
    for alias in def.aliases.iter().chain(std::iter::once(&config.universal_alias)) {
        if !aliases.contains(alias) {
            aliases.push(alias.clone());
        }
    }

    Ok(ResolvedKind { name: name.to_string(), fields, builder, aliases })
}

/// Resolve a field, downgrading an unrecognized validator to `mixed` with a
/// warning so the run can finish.
pub fn resolve_field(kind: &str, field: &str, spec: &FieldSpec, config: &GeneratorConfig) -> TypeExpr {
    match resolve::resolve(kind, field, spec, &config.overrides) {
        Ok(ty) => ty,
        Err(ResolveError::UnrecognizedValidatorShape { validator }) => {
            tracing::warn!(
                field = %format!("{kind}.{field}"),
                validator = %validator,
                "unrecognised validator type"
            );
            TypeExpr::Mixed
        }
    }
}

/// Builder fields keep builder order; everything else follows, sorted.
pub fn field_order(def: &NodeKindSchema) -> Vec<&str> {
    let position = |field: &str| def.builder.iter().position(|b| b == field);
    let mut fields: Vec<&str> = def.fields.keys().map(String::as_str).collect();
    fields.sort_by(|a, b| match (position(a), position(b)) {
        (Some(ia), Some(ib)) => ia.cmp(&ib),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    });
    fields
}

fn check_identifier(name: &str) -> Result<()> {
    if IDENTIFIER.is_match(name) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier(name.to_string()))
    }
}

impl ResolvedModel {
    /// Every kind and alias name, sorted and deduplicated.
    pub fn all_type_names(&self) -> BTreeSet<&str> {
        self.kinds
            .iter()
            .map(|k| k.name.as_str())
            .chain(self.aliases.keys().map(String::as_str))
            .collect()
    }
}

// ------------------------------- Tests ------------------------------------ //
