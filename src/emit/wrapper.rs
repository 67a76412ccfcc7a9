//! Runtime wrapper: a class over an injected engine. Every method forwards to
//! the engine except `asX`, built on `isX`, and `switchX`, which dispatches on
//! the node's `type`.
use super::{lower_first, Codegen, GENERATED_BY};
use crate::config::GeneratorConfig;
use crate::index::ResolvedModel;

pub fn render(model: &ResolvedModel, config: &GeneratorConfig) -> String {
    let engine = &config.engine_class;
    let all_types = model.all_type_names();

    let mut cg = Codegen::new();
    cg.line(GENERATED_BY);
    cg.blank();

    cg.block(format!("class {engine} {{"), "}", |cg| {
        cg.block("constructor(t) {", "}", |cg| cg.line("this._t = t;"));
        for kind in &model.kinds {
            let name = lower_first(&kind.name);
            cg.line(format!("{name}(...args) {{ return this._t.{name}(...args); }}"));
        }
        for name in &all_types {
            cg.line(format!("is{name}(...args) {{ return this._t.is{name}(...args); }}"));
        }
        for name in &all_types {
            cg.line(format!("assert{name}(...args) {{ return this._t.assert{name}(...args); }}"));
        }
        for name in &all_types {
            cg.block(format!("as{name}(value, ...args) {{"), "}", |cg| {
                cg.line(format!("if (this.is{name}(value, ...args)) return value;"));
                cg.line("else return undefined;");
            });
        }
        cg.block("_switch(node, switcher) {", "}", |cg| {
            cg.line("const type = node.type[0].toLowerCase() + node.type.substr(1);");
            cg.line("return switcher[type](node);");
        });
        for alias in model.aliases.keys() {
            cg.block(format!("switch{alias}(node, switcher) {{"), "}", |cg| {
                cg.line("return this._switch(node, switcher);");
            });
        }
    });
    cg.blank();
    cg.line(format!("export default {engine};"));
    cg.into_string()
}
