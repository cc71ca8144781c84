//! Property-based tests over generated class shapes
//!
//! - Units without triggers come back untouched
//! - Rewritten output never needs a second rewrite
//! - Every converted member carries exactly one flow annotation

mod common;

use common::process;
use proptest::prelude::*;

fn member_name() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,6}".prop_map(|s| format!("m_{s}"))
}

fn class_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z0-9]{0,6}"
}

/// One class member in one of the shapes the rewrite looks at
#[derive(Debug, Clone)]
enum MemberShape {
    Wrapped,
    DecoratedMethod,
    DecoratedProperty,
    PlainAsyncMethod,
    PlainProperty,
}

fn member_shape() -> impl Strategy<Value = MemberShape> {
    prop_oneof![
        Just(MemberShape::Wrapped),
        Just(MemberShape::DecoratedMethod),
        Just(MemberShape::DecoratedProperty),
        Just(MemberShape::PlainAsyncMethod),
        Just(MemberShape::PlainProperty),
    ]
}

fn render_member(shape: &MemberShape, name: &str) -> String {
    match shape {
        MemberShape::Wrapped => format!("  {name} = autoFlow(async (x) => await load(x));\n"),
        MemberShape::DecoratedMethod => {
            format!("  @autoFlow\n  async {name}(x) {{\n    await load(x);\n  }}\n")
        }
        MemberShape::DecoratedProperty => {
            format!("  @autoFlow\n  {name} = async () => {{\n    await load();\n  }};\n")
        }
        MemberShape::PlainAsyncMethod => {
            format!("  async {name}() {{\n    await load();\n  }}\n")
        }
        MemberShape::PlainProperty => format!("  {name} = 1;\n"),
    }
}

fn is_flow(shape: &MemberShape) -> bool {
    matches!(
        shape,
        MemberShape::Wrapped | MemberShape::DecoratedMethod | MemberShape::DecoratedProperty
    )
}

fn render_class(model: bool, name: &str, members: &[(MemberShape, String)]) -> String {
    let mut source = String::new();
    if model {
        source.push_str("@autoModel\n");
    }
    source.push_str(&format!("class {name} {{\n"));
    for (i, (shape, member)) in members.iter().enumerate() {
        source.push_str(&render_member(shape, &format!("{member}_{i}")));
    }
    source.push_str("}\n");
    source
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_untriggered_source_is_unchanged(
        name in class_name(),
        members in prop::collection::vec(member_name(), 0..5),
    ) {
        let members: Vec<_> = members
            .into_iter()
            .enumerate()
            .map(|(i, m)| {
                let shape = if i % 2 == 0 { MemberShape::PlainAsyncMethod } else { MemberShape::PlainProperty };
                (shape, m)
            })
            .collect();
        let source = render_class(false, &name, &members);

        let result = process(&source, "plain.ts");
        prop_assert!(!result.changed);
        prop_assert_eq!(result.output, source);
    }

    #[test]
    fn prop_rewrite_is_stable(
        model in any::<bool>(),
        name in class_name(),
        members in prop::collection::vec((member_shape(), member_name()), 0..5),
    ) {
        let source = render_class(model, &name, &members);
        let first = process(&source, "x.ts");

        let expect_change = model || members.iter().any(|(shape, _)| is_flow(shape));
        prop_assert_eq!(first.changed, expect_change);

        let second = process(&first.output, "x.ts");
        prop_assert!(!second.changed);
    }

    #[test]
    fn prop_each_flow_gets_one_annotation(
        name in class_name(),
        members in prop::collection::vec((member_shape(), member_name()), 1..6),
    ) {
        let source = render_class(false, &name, &members);
        let output = process(&source, "x.ts").output;

        let flows = members.iter().filter(|(shape, _)| is_flow(shape)).count();
        prop_assert_eq!(output.matches("@mobx_keystone_1.modelFlow").count(), flows);
        prop_assert!(!output.contains("autoFlow"));
        let this_param = format!("(this: {name}");
        prop_assert_eq!(output.matches(this_param.as_str()).count(), flows);
    }
}
