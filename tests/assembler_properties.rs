//! Assembler behavior over the documented input shapes
//!
//! Table tests pin the documented examples; property tests cover the rules
//! that must hold for any input: plain names join in order, falsy inputs add
//! nothing, and output never carries stray separators.

use proptest::prelude::*;
use rstest::rstest;
use tw_classnames::assembler::from_json;
use tw_classnames::{assemble, classnames, tokens, ClassInput, MapValue, ModifierMap};

#[rstest]
#[case(r#"["text-sm", "font-bold"]"#, "text-sm font-bold")]
#[case(r#"["a", false, null, "b"]"#, "a b")]
#[case(r#"[{"hover": "border-4"}]"#, "hover:border-4")]
#[case(
    r#"[{"xs:hover": ["bg-blue-50", "border-0", false]}]"#,
    "xs:hover:bg-blue-50 xs:hover:border-0"
)]
#[case(r#"[{"opacity-50": true, "hidden": false}]"#, "opacity-50")]
#[case(
    r#"["base", {"md": "p-4", "lg": ["p-8", "m-2"]}, "last"]"#,
    "base md:p-4 lg:p-8 lg:m-2 last"
)]
#[case(r#"[{"dark": null}]"#, "")]
#[case(r#"[]"#, "")]
fn test_json_examples(#[case] json: &str, #[case] expected: &str) {
    let items = from_json(json).unwrap();
    assert_eq!(assemble(&items), expected);
}

#[rstest]
#[case("[1]")]
#[case("[true]")]
#[case(r#"[{"md": [true]}]"#)]
#[case(r#"[{"md": {"hover": "a"}}]"#)]
#[case(r#"[{"md": [["a"]]}]"#)]
#[case(r#"{"md": "a"}"#)]
fn test_json_rejects_unsupported_shapes(#[case] json: &str) {
    assert!(from_json(json).is_err(), "{} should be rejected", json);
}

#[test]
fn test_macro_matches_function() {
    let active = true;
    let disabled = false;
    let map = ModifierMap::new()
        .entry("hover", "underline")
        .entry("md:dark", [Some("p-4"), None])
        .entry("opacity-50", disabled);

    let from_macro = classnames!(
        "text-sm",
        active.then_some("font-bold"),
        disabled.then_some("cursor-not-allowed"),
        map.clone(),
    );
    let items = vec![
        ClassInput::from("text-sm"),
        ClassInput::from("font-bold"),
        ClassInput::Falsy,
        ClassInput::from(map),
    ];

    assert_eq!(from_macro, "text-sm font-bold hover:underline md:dark:p-4");
    assert_eq!(from_macro, assemble(&items));
}

#[test]
fn test_repeated_tokens_are_kept() {
    let items = from_json(r#"["p-4", {"md": "p-4"}, "p-4", {"md": ["p-4", "p-4"]}]"#).unwrap();
    assert_eq!(
        tokens(&items),
        vec!["p-4", "md:p-4", "p-4", "md:p-4", "md:p-4"]
    );
}

fn class_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,10}"
}

fn modifier() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9]{1,5}", 1..4).prop_map(|segments| segments.join(":"))
}

fn class_input() -> impl Strategy<Value = ClassInput> {
    let entry = prop_oneof![
        (class_name(), any::<bool>()).prop_map(|(key, on)| (key, MapValue::Toggle(on))),
        (modifier(), class_name()).prop_map(|(key, class)| (key, MapValue::Class(class))),
        (
            modifier(),
            prop::collection::vec(prop::option::of(class_name()), 0..4)
        )
            .prop_map(|(key, classes)| (key, MapValue::from(classes))),
    ];

    prop_oneof![
        class_name().prop_map(ClassInput::Class),
        Just(ClassInput::Falsy),
        prop::collection::vec(entry, 0..4)
            .prop_map(|entries| ClassInput::Map(entries.into_iter().collect::<ModifierMap>())),
    ]
}

proptest! {
    #[test]
    fn plain_names_join_in_order(names in prop::collection::vec(class_name(), 0..8)) {
        let items: Vec<ClassInput> = names.iter().map(ClassInput::from).collect();
        prop_assert_eq!(assemble(&items), names.join(" "));
    }

    #[test]
    fn falsy_inputs_add_nothing(
        items in prop::collection::vec(class_input(), 0..6),
        at in any::<prop::sample::Index>(),
    ) {
        let before = assemble(&items);
        let mut with_falsy = items.clone();
        let idx = at.index(items.len() + 1);
        with_falsy.insert(idx, ClassInput::Falsy);
        prop_assert_eq!(assemble(&with_falsy), before);
    }

    #[test]
    fn output_has_no_stray_separators(items in prop::collection::vec(class_input(), 0..6)) {
        let out = assemble(&items);
        prop_assert!(!out.starts_with(' '));
        prop_assert!(!out.ends_with(' '));
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.split_whitespace().count(), tokens(&items).len());
    }

    #[test]
    fn concatenation_distributes(
        left in prop::collection::vec(class_input(), 0..4),
        right in prop::collection::vec(class_input(), 0..4),
    ) {
        let mut both = left.clone();
        both.extend(right.iter().cloned());

        let mut expected = tokens(&left);
        expected.extend(tokens(&right));
        prop_assert_eq!(tokens(&both), expected);
    }
}
