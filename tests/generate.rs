use nodegen::emit::{self, lower_first};
use nodegen::index::field_order;
use nodegen::ir::TypeExpr;
use nodegen::{build_model, GeneratorConfig, ResolvedModel, SchemaRegistry};
use pretty_assertions::assert_eq;

const FIXTURE: &str = include_str!("fixtures/core.json");

fn fixture() -> SchemaRegistry {
    SchemaRegistry::from_json_str(FIXTURE, "fixtures/core.json").unwrap()
}

fn model() -> ResolvedModel {
    build_model(&fixture(), &GeneratorConfig::default()).unwrap()
}

fn field_type(model: &ResolvedModel, kind: &str, field: &str) -> String {
    let kind = model.kinds.iter().find(|k| k.name == kind).unwrap();
    let field = kind.fields.iter().find(|f| f.name == field).unwrap();
    field.ty.to_string()
}

#[test]
fn two_runs_are_byte_identical() {
    let config = GeneratorConfig::default();
    let first = emit::render_all(&build_model(&fixture(), &config).unwrap(), &config);
    let second = emit::render_all(&build_model(&fixture(), &config).unwrap(), &config);
    assert_eq!(first, second);

    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    first.write(dir_a.path(), &config).unwrap();
    second.write(dir_b.path(), &config).unwrap();
    for rel in ["babel-nodes.js", "lib/index.js.flow", "src/index.js"] {
        let a = std::fs::read(dir_a.path().join(rel)).unwrap();
        let b = std::fs::read(dir_b.path().join(rel)).unwrap();
        assert_eq!(a, b, "{rel}");
    }
    first.check(dir_b.path(), &config).unwrap();
}

#[test]
fn every_kind_declared_exactly_once() {
    let model = model();
    let config = GeneratorConfig::default();
    let catalogue = emit::catalogue::render(&model, &config);
    let schema = fixture();
    assert_eq!(model.kinds.len(), schema.nodes.len());
    for kind in schema.nodes.keys() {
        let decl = format!("declare class {kind}Node {{");
        assert_eq!(catalogue.matches(&decl).count(), 1, "{kind}");
    }
}

#[test]
fn declared_aliases_list_each_kind_once() {
    let model = model();
    let schema = fixture();
    for (kind, def) in &schema.nodes {
        for alias in &def.aliases {
            let members = &model.aliases[alias];
            assert_eq!(members.iter().filter(|m| *m == kind).count(), 1, "{alias} ∋ {kind}");
        }
        assert!(model.aliases["Babel"].contains(kind));
    }
    // no declared alias → universal group only
    let noop_groups = model.aliases.values().filter(|members| members.contains("Noop")).count();
    assert_eq!(noop_groups, 1);
}

#[test]
fn fields_follow_builder_order() {
    let schema = fixture();
    assert_eq!(
        field_order(&schema.nodes["ClassMethod"]),
        vec!["kind", "key", "params", "body", "computed", "static", "async", "generator"]
    );
    let model = model();
    let class_method = model.kinds.iter().find(|k| k.name == "ClassMethod").unwrap();
    let names: Vec<_> = class_method.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["kind", "key", "params", "body", "computed", "async", "generator"]);
}

#[test]
fn resolves_fixture_field_types() {
    let model = model();
    assert_eq!(field_type(&model, "Identifier", "name"), "string");
    assert_eq!(field_type(&model, "Identifier", "typeAnnotation"), "TypeAnnotationNode | NoopNode");
    assert_eq!(field_type(&model, "BlockStatement", "body"), "$ReadOnlyArray<StatementNode>");
    assert_eq!(field_type(&model, "VariableDeclaration", "kind"), "\"var\" | \"let\" | \"const\"");
    assert_eq!(field_type(&model, "BinaryExpression", "operator"), "'+' | '-' | 'instanceof' | 'in'");
    assert_eq!(field_type(&model, "ClassMethod", "key"), "Expression");
    assert_eq!(field_type(&model, "VariableDeclaration", "declare"), "boolean");
}

#[test]
fn unknown_validator_shape_becomes_mixed() {
    let model = model();
    let numeric = model.kinds.iter().find(|k| k.name == "NumericLiteral").unwrap();
    assert_eq!(numeric.fields[0].ty, TypeExpr::Mixed);

    let config = GeneratorConfig::default();
    let stub = emit::stub::render(&model, &config);
    assert!(stub.contains("numericLiteral(value: mixed): NumericLiteralNode;"));
}

#[test]
fn builder_signatures_mark_optional_and_defaulted_params() {
    let config = GeneratorConfig::default();
    let stub = emit::stub::render(&model(), &config);
    assert!(stub.contains(
        "blockStatement(body: $ReadOnlyArray<StatementNode>, directives: ?$ReadOnlyArray<DirectiveNode>): BlockStatementNode;"
    ));
    assert!(stub.contains(
        "classMethod(kind: ?\"get\" | \"set\" | \"method\" | \"constructor\", key: Expression, \
         params: $ReadOnlyArray<LValNode>, body: BlockStatementNode, computed: ?boolean, _static: ?boolean): ClassMethodNode;"
    ));
    assert!(stub.contains("noop(): NoopNode;"));
}

#[test]
fn dispatch_targets_lower_cased_switcher_member() {
    let model = model();
    let config = GeneratorConfig::default();
    let stub = emit::stub::render(&model, &config);
    let wrapper = emit::wrapper::render(&model, &config);

    // A node whose `type` is `Identifier` is routed to `switcher.identifier`.
    assert_eq!(lower_first("Identifier"), "identifier");
    assert!(stub.contains("declare interface LValSwitcher<T> {\n  identifier(node: IdentifierNode): T;\n}"));
    assert!(wrapper.contains("const type = node.type[0].toLowerCase() + node.type.substr(1);"));
    assert!(wrapper.contains("return switcher[type](node);"));
    for alias in model.aliases.keys() {
        assert!(wrapper.contains(&format!("switch{alias}(node, switcher) {{")));
        assert!(stub.contains(&format!("switch{alias}<T>(node: {alias}Node, switcher: {alias}Switcher<T>): T;")));
    }
}

#[test]
fn resolved_model_serializes_with_rendered_types() {
    let json = serde_json::to_value(model()).unwrap();
    let ident = json["kinds"]
        .as_array()
        .unwrap()
        .iter()
        .find(|k| k["name"] == "Identifier")
        .unwrap();
    assert_eq!(ident["fields"][0]["ty"], "string");
    assert_eq!(json["aliases"]["LVal"], serde_json::json!(["Identifier"]));
}
