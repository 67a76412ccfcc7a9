//! Validator → type resolution.
//!
//! Pure functions over `(kind, field, validator, override table)`. The only
//! failure is a validator shape outside the recognized grammar; the caller
//! decides what to do with it (see `index::resolve_field`).
use serde_json::Value;

use crate::config::OverrideTable;
use crate::ir::TypeExpr;
use crate::schema::{FieldSpec, Validator};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResolveError {
    #[error("unrecognised validator shape: {validator}")]
    UnrecognizedValidatorShape { validator: Value },
}

impl ResolveError {
    fn unrecognized(validator: &Validator) -> Self {
        ResolveError::UnrecognizedValidatorShape { validator: validator.to_json() }
    }
}

/// Resolve one field. Override table first, then `mixed` for fields without
/// a validator, then the validator itself.
pub fn resolve(
    kind: &str,
    field: &str,
    spec: &FieldSpec,
    overrides: &OverrideTable,
) -> Result<TypeExpr, ResolveError> {
    if let Some(ty) = overrides.get(kind).and_then(|fields| fields.get(field)) {
        return Ok(TypeExpr::Verbatim(ty.clone()));
    }
    match &spec.validator {
        None => Ok(TypeExpr::Mixed),
        Some(validator) => resolve_validator(validator),
    }
}

pub fn resolve_validator(validator: &Validator) -> Result<TypeExpr, ResolveError> {
    match validator {
        Validator::ExactType(name) => Ok(TypeExpr::named(name)),
        Validator::OneOfNodeTypes(names) | Validator::OneOfNodeOrValueTypes(names) => {
            if names.is_empty() {
                return Err(ResolveError::unrecognized(validator));
            }
            Ok(TypeExpr::union(names.iter().map(|n| TypeExpr::named(n)).collect()))
        }
        Validator::OneOfLiterals(lits) => {
            if lits.is_empty() {
                return Err(ResolveError::unrecognized(validator));
            }
            Ok(TypeExpr::union(lits.iter().map(|v| TypeExpr::Literal(inspect_literal(v))).collect()))
        }
        Validator::ChainOf(steps) => resolve_chain(validator, steps),
        Validator::Each(_) | Validator::Unrecognized(_) => Err(ResolveError::unrecognized(validator)),
    }
}

/// Only two chains mean anything for typing:
/// - `[array, each(X)]` → `$ReadOnlyArray<X>`
/// - `[string, oneOf(literals)]` → union of string literal types
fn resolve_chain(whole: &Validator, steps: &[Validator]) -> Result<TypeExpr, ResolveError> {
    match steps {
        [Validator::ExactType(first), Validator::Each(item)] if first == "array" => {
            let item = resolve_validator(item)?;
            Ok(TypeExpr::ReadOnlyArray(Box::new(item)))
        }
        [Validator::ExactType(first), Validator::OneOfLiterals(lits)] if first == "string" && !lits.is_empty() => {
            Ok(TypeExpr::union(lits.iter().map(|v| TypeExpr::Literal(v.to_string())).collect()))
        }
        _ => Err(ResolveError::unrecognized(whole)),
    }
}

/// Debug-inspect style literal. Quote preference is `'`, then `"`, then
/// backtick, picking the first that does not occur in the string; control
/// characters are always escaped so the literal stays on one line.
fn inspect_literal(value: &Value) -> String {
    let Value::String(s) = value else {
        return value.to_string();
    };
    let quote = ['\'', '"', '`']
        .into_iter()
        .find(|q| !s.contains(*q))
        .unwrap_or('\'');

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\u{b}' => out.push_str("\\v"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// ------------------------------- Tests ------------------------------------ //
