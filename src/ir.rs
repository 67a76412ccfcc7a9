// Semantic type expressions produced by the resolver. Rendering is fixed
// here so every emitter prints a type the same way.
use std::fmt;

/// Value type names that render as themselves instead of as node references.
pub const VALUE_TYPES: [&str; 4] = ["null", "string", "number", "boolean"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Mixed,                         // no validator, or resolution gave up
    Verbatim(String),              // override table entry
    NodeRef(String),               // `Identifier` → `IdentifierNode`
    Value(String),                 // one of VALUE_TYPES
    Literal(String),               // already rendered: `'var'`, `"in"`, `3`
    Union(Vec<TypeExpr>),
    ReadOnlyArray(Box<TypeExpr>),
}

impl TypeExpr {
    /// Reference to a named type, passing value type names through.
    pub fn named(name: &str) -> Self {
        if VALUE_TYPES.contains(&name) {
            TypeExpr::Value(name.to_string())
        } else {
            TypeExpr::NodeRef(name.to_string())
        }
    }

    /// Collapse single-arm unions so `A` never renders as a one-element union.
    pub fn union(mut arms: Vec<TypeExpr>) -> Self {
        if arms.len() == 1 { arms.remove(0) } else { TypeExpr::Union(arms) }
    }

    pub fn render(&self, node_suffix: &str) -> String {
        match self {
            TypeExpr::Mixed => "mixed".to_string(),
            TypeExpr::Verbatim(s) | TypeExpr::Value(s) | TypeExpr::Literal(s) => s.clone(),
            TypeExpr::NodeRef(name) => format!("{name}{node_suffix}"),
            TypeExpr::Union(arms) => arms
                .iter()
                .map(|arm| arm.render(node_suffix))
                .collect::<Vec<_>>()
                .join(" | "),
            TypeExpr::ReadOnlyArray(item) => format!("$ReadOnlyArray<{}>", item.render(node_suffix)),
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render("Node"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_shape() {
        assert_eq!(TypeExpr::Mixed.to_string(), "mixed");
        assert_eq!(TypeExpr::named("Statement").to_string(), "StatementNode");
        assert_eq!(TypeExpr::named("null").to_string(), "null");
        let arr = TypeExpr::ReadOnlyArray(Box::new(TypeExpr::union(vec![
            TypeExpr::named("Expression"),
            TypeExpr::named("SpreadElement"),
        ])));
        assert_eq!(arr.to_string(), "$ReadOnlyArray<ExpressionNode | SpreadElementNode>");
        assert_eq!(arr.render("T"), "$ReadOnlyArray<ExpressionT | SpreadElementT>");
    }

    #[test]
    fn single_arm_union_collapses() {
        assert_eq!(TypeExpr::union(vec![TypeExpr::named("Identifier")]), TypeExpr::named("Identifier"));
    }
}
