//! Node catalogue: one `declare class` per node kind, one union type per
//! alias group.
use super::{Codegen, GENERATED_BY};
use crate::config::GeneratorConfig;
use crate::index::{ResolvedKind, ResolvedModel};

const LOCATION: &str =
    "type Location = {start: {line: number, column: number}, end: {line: number, column: number}};";

pub fn render(model: &ResolvedModel, config: &GeneratorConfig) -> String {
    let suffix = &config.node_suffix;
    let mut cg = Codegen::new();
    cg.line("// @flow");
    cg.line(GENERATED_BY);
    cg.blank();
    cg.line(LOCATION);
    cg.blank();

    for kind in &model.kinds {
        declare_kind(&mut cg, kind, suffix);
        cg.blank();
    }

    for (alias, members) in &model.aliases {
        cg.block(format!("type {alias}{suffix} = ("), ");", |cg| {
            for member in members {
                cg.line(format!("| {member}{suffix}"));
            }
        });
        cg.blank();
    }

    for decl in &config.catalogue_trailer {
        cg.line(decl);
    }
    cg.into_string()
}

fn declare_kind(cg: &mut Codegen, kind: &ResolvedKind, suffix: &str) {
    cg.block(format!("declare class {}{suffix} {{", kind.name), "}", |cg| {
        cg.line(format!("type: '{}';", kind.name));
        cg.line("loc: ?Location;");
        for field in &kind.fields {
            let optional = if field.optional { "?" } else { "" };
            cg.line(format!("{}: {optional}{};", field.name, field.rendered));
        }
        cg.line("");
        for alias in &kind.aliases {
            cg.line(format!("// alias: {alias}"));
        }
    });
}
