//! End-to-end rewrite tests: TypeScript in, TypeScript out

mod common;

use std::sync::Arc;

use autoflow_ir::{
    create_transformer, AutoflowTransformer, NamePolicy, TransformConfig, TransformOptions,
};
use common::{parse, print, process, process_with, rewrite};
use pretty_assertions::assert_eq;

const IMPORT: &str = "import * as mobx_keystone_1 from \"mobx-keystone\";\n";

#[test]
fn test_wrapped_arrow_flow_end_to_end() {
    let output = rewrite("class Test {\n  fn = autoFlow(async (input) => await callApi(input))\n}\n");
    assert_eq!(
        output,
        format!(
            "{IMPORT}class Test {{\n  @mobx_keystone_1.modelFlow\n  fn = mobx_keystone_1._async(function* (this: Test, input) {{\n    return yield* mobx_keystone_1._await(callApi(input));\n  }});\n}}\n"
        )
    );
}

#[test]
fn test_decorated_async_method_end_to_end() {
    let output = rewrite(
        "class Store {\n  @autoFlow\n  private async load(id: string): Promise<void> {\n    await fetch(id);\n  }\n}\n",
    );
    assert_eq!(
        output,
        format!(
            "{IMPORT}class Store {{\n  @mobx_keystone_1.modelFlow\n  private load = mobx_keystone_1._async(function* (this: Store, id: string) {{\n    yield* mobx_keystone_1._await(fetch(id));\n  }});\n}}\n"
        )
    );
}

#[test]
fn test_decorated_property_keeps_other_decorators_after_flow() {
    let output = rewrite("class T {\n  @other\n  @autoFlow\n  run = async () => {}\n}\n");
    assert_eq!(
        output,
        format!(
            "{IMPORT}class T {{\n  @mobx_keystone_1.modelFlow\n  @other\n  run = mobx_keystone_1._async(function* (this: T) {{}});\n}}\n"
        )
    );
}

#[test]
fn test_class_identity_from_file_path() {
    let result = process("@autoModel\nexport class Todo {}\n", "models/todo.ts");
    assert!(result.changed);
    assert_eq!(
        result.output,
        format!("{IMPORT}@mobx_keystone_1.model(\"models/todo.ts\")\nexport class Todo {{}}\n")
    );
}

#[test]
fn test_class_identity_uses_namer_over_policy() {
    let options = TransformOptions::new(
        TransformConfig::default().identity_name(NamePolicy::FileStem),
    )
    .identity_name_from_path(|path| path.to_uppercase());
    let result = process_with(options, "@autoModel\nclass A {}\n", "x.ts");
    assert!(result.output.contains("@mobx_keystone_1.model(\"X.TS\")\nclass A {}"));
}

#[test]
fn test_class_identity_name_policy() {
    let options = TransformOptions::new(
        TransformConfig::default().identity_name(NamePolicy::FileStem),
    );
    let result = process_with(options, "@autoModel\nclass A {}\n", "src/models/Todo.ts");
    assert!(result.output.contains("@mobx_keystone_1.model(\"Todo\")"));
}

#[test]
fn test_nested_async_function_keeps_its_awaits() {
    let output = rewrite(
        "class T {\n  fn = autoFlow(async () => {\n    const inner = async () => await a();\n    await b();\n  })\n}\n",
    );
    assert!(output.contains("const inner = async () => await a();"));
    assert!(output.contains("yield* mobx_keystone_1._await(b());"));
    assert!(!output.contains("_await(a())"));
}

#[test]
fn test_existing_this_parameter_is_not_duplicated() {
    let output = rewrite(
        "class Test {\n  fn = autoFlow(async function (this: Test, x) {\n    await x;\n  })\n}\n",
    );
    assert!(output.contains("function* (this: Test, x) {"));
    assert_eq!(output.matches("this:").count(), 1);
}

#[test]
fn test_generated_identifier_avoids_existing_names() {
    let output = rewrite(
        "const mobx_keystone_1 = 1;\n@autoModel\nclass A {}\n",
    );
    assert!(output.starts_with("import * as mobx_keystone_2 from \"mobx-keystone\";\n"));
    assert!(output.contains("@mobx_keystone_2.model(\"x.ts\")"));
}

#[test]
fn test_custom_target_package() {
    let options = TransformOptions::default().target_package_name("@acme/keystone");
    let result = process_with(options, "@autoModel\nclass A {}\n", "a.ts");
    assert!(result
        .output
        .starts_with("import * as acme_keystone_1 from \"@acme/keystone\";\n"));
}

#[test]
fn test_untouched_unit_is_same_allocation() {
    let unit = parse("class Plain {\n  async load() { await x; }\n}\n", "plain.ts");
    let transformer = AutoflowTransformer::new(TransformOptions::default()).unwrap();
    let outcome = transformer.transform(&unit).unwrap();
    assert!(!outcome.is_rewritten());
    assert!(Arc::ptr_eq(outcome.unit(), &unit));
}

#[test]
fn test_no_import_without_rewrite() {
    let source = "import { x } from \"mobx-keystone\";\nclass A {\n  run = autoFlow(handler)\n}\n";
    let result = process(source, "a.ts");
    assert!(!result.changed);
    assert_eq!(result.output, source);
}

#[test]
fn test_rewritten_output_is_stable() {
    let first = rewrite(
        "@autoModel\nclass Store {\n  @autoFlow\n  async load() {\n    await fetch();\n  }\n}\n",
    );
    let second = process(&first, "x.ts");
    assert!(!second.changed);
    assert_eq!(second.output, first);
}

#[test]
fn test_classes_nested_in_flows_are_rewritten() {
    let output = rewrite(
        "class Outer {\n  fn = autoFlow(async () => {\n    class Inner {\n      g = autoFlow(async () => await c())\n    }\n  })\n}\n",
    );
    assert!(output.contains("function* (this: Outer)"));
    assert!(output.contains("function* (this: Inner)"));
    assert!(output.contains("return yield* mobx_keystone_1._await(c());"));
}

#[test]
fn test_create_transformer_pipeline() {
    let transform = create_transformer(Some(TransformOptions::default())).unwrap();
    let unit = parse("@autoModel\nclass A {}\n", "a.ts");
    let output = transform(&unit).unwrap();
    assert_eq!(
        print(&output),
        format!("{IMPORT}@mobx_keystone_1.model(\"a.ts\")\nclass A {{}}\n")
    );
}

#[test]
fn test_export_default_anonymous_class_is_rewritten() {
    let output = rewrite("export default class {\n  fn = autoFlow(async () => await a())\n}\n");
    assert!(output.contains("export default class {"));
    assert!(output.contains("@mobx_keystone_1.modelFlow"));
    assert!(output.contains("fn = mobx_keystone_1._async(function* (this) {"));
    assert!(output.contains("return yield* mobx_keystone_1._await(a());"));
}

#[test]
fn test_class_expression_is_rewritten() {
    let output = rewrite("const B = class {\n  fn = autoFlow(async () => await a());\n};\n");
    assert!(output.starts_with(IMPORT));
    assert!(output.contains("const B = class {"));
    assert!(output.contains("function* (this) {"));
    assert!(!output.contains("autoFlow"));
}

#[test]
fn test_commented_flow_argument_is_rewritten() {
    let output = rewrite("class T {\n  fn = autoFlow(/* loads */ async () => await a());\n}\n");
    assert!(output.contains("fn = /* loads */ mobx_keystone_1._async(function* (this: T) {"));
}
