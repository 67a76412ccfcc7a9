//! Interface stub: switcher interfaces plus the typed surface of the engine
//! class (builders, `isX`, `assertX`, `asX`, `switchX`).
use super::{lower_first, Codegen, GENERATED_BY};
use crate::config::GeneratorConfig;
use crate::index::{ResolvedKind, ResolvedModel};

pub fn render(model: &ResolvedModel, config: &GeneratorConfig) -> String {
    let suffix = &config.node_suffix;
    let engine = &config.engine_class;
    let universal = format!("{}{suffix}", config.universal_alias);
    let all_types = model.all_type_names();

    let mut cg = Codegen::new();
    cg.line("// @flow");
    cg.line(GENERATED_BY);
    cg.blank();

    for (alias, members) in &model.aliases {
        cg.block(format!("declare interface {alias}Switcher<T> {{"), "}", |cg| {
            for member in members {
                cg.line(format!("{}(node: {member}{suffix}): T;", lower_first(member)));
            }
        });
        cg.blank();
    }

    cg.block(format!("declare class {engine} {{"), "}", |cg| {
        cg.line(format!("constructor(t: Object): {engine};"));
        for kind in &model.kinds {
            cg.line(builder_signature(kind, suffix));
        }
        for name in &all_types {
            cg.line(format!("is{name}(value: {universal}, opts?: Object): boolean;"));
        }
        for name in &all_types {
            cg.line(format!("assert{name}(value: {name}{suffix}, opts?: Object): mixed;"));
        }
        for name in &all_types {
            cg.line(format!("as{name}(value: {universal}, opts?: Object): {name}{suffix} | void;"));
        }
        for alias in model.aliases.keys() {
            cg.line(format!(
                "switch{alias}<T>(node: {alias}{suffix}, switcher: {alias}Switcher<T>): T;"
            ));
        }
    });
    cg.blank();
    cg.line(format!("export default {engine};"));
    cg.into_string()
}

fn builder_signature(kind: &ResolvedKind, suffix: &str) -> String {
    let params = kind
        .builder
        .iter()
        .map(|p| {
            let optional = if p.optional { "?" } else { "" };
            format!("{}: {optional}{}", p.param, p.rendered)
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{}({params}): {}{suffix};", lower_first(&kind.name), kind.name)
}
