//! Unit tests for the extract pass.

use bridgen_core::types::{DeclBody, TypeNode};
use bridgen_core::{parse_module, Interner};

use super::extract_module;
use crate::Error;

fn extract(json: &str) -> crate::PassResult<bridgen_core::types::ModuleIr> {
    let raw = parse_module(json).expect("valid json");
    let mut interner = Interner::new();
    extract_module(&raw, &mut interner)
}

fn extract_with_interner(json: &str) -> (bridgen_core::types::ModuleIr, Interner) {
    let raw = parse_module(json).expect("valid json");
    let mut interner = Interner::new();
    let (module, diagnostics) = extract_module(&raw, &mut interner).expect("extraction succeeds");
    assert!(diagnostics.is_empty(), "unexpected diagnostics");
    (module, interner)
}

#[test]
fn variant_cases_keep_declaration_order() {
    let (module, interner) = extract_with_interner(
        r#"{
            "module": "Shape",
            "declarations": [
                {"kind": "type", "name": "t", "def": {"kind": "variant", "cases": [
                    {"name": "A"},
                    {"name": "B", "payload": [{"kind": "prim", "name": "int"}]},
                    {"name": "C", "payload": [{"kind": "prim", "name": "string"}]}
                ]}}
            ]
        }"#,
    );

    let decl = module.types.values().next().unwrap();
    let Some(TypeNode::Variant(v)) = decl.body.node() else {
        panic!("expected variant");
    };
    let names: Vec<_> = v
        .cases
        .iter()
        .map(|c| interner.resolve(c.name))
        .collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    // Runtime tag indices are positions, never name order
    assert_eq!(v.payload_cases().map(|(i, _)| i).collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn multi_payload_case_folds_to_tuple() {
    let (module, _) = extract_with_interner(
        r#"{
            "module": "Pair",
            "declarations": [
                {"kind": "type", "name": "t", "def": {"kind": "variant", "cases": [
                    {"name": "P", "payload": [
                        {"kind": "prim", "name": "int"},
                        {"kind": "prim", "name": "string"}
                    ]}
                ]}}
            ]
        }"#,
    );

    let decl = module.types.values().next().unwrap();
    let Some(TypeNode::Variant(v)) = decl.body.node() else {
        panic!("expected variant");
    };
    assert!(matches!(&v.cases[0].payload, Some(TypeNode::Tuple(items)) if items.len() == 2));
}

#[test]
fn gadt_is_skipped_with_diagnostic_but_keeps_slot() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "g", "def": {"kind": "gadt", "feature": "existential"}},
            {"kind": "type", "name": "t", "def": {"kind": "prim", "name": "int"}}
        ]
    }"#;
    let (module, diagnostics) = extract(json).unwrap();

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    let d = diagnostics.iter().next().unwrap();
    assert_eq!(d.location.to_string(), "M.g");
    assert!(d.message.contains("GADT constructor (existential)"));

    // The skipped declaration keeps its slot in the graph
    assert_eq!(module.types.len(), 2);
    let first = module.types.values().next().unwrap();
    assert!(matches!(first.body, DeclBody::Unsupported { .. }));
}

#[test]
fn unboxed_variant_is_unsupported() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "u", "def": {"kind": "variant", "unboxed": true, "cases": [
                {"name": "X", "payload": [{"kind": "prim", "name": "int"}]}
            ]}}
        ]
    }"#;
    let (_, diagnostics) = extract(json).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.iter().next().unwrap().message.contains("unboxed variant"));
}

#[test]
fn unknown_primitive_is_unsupported() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "value", "name": "x", "type": {"kind": "prim", "name": "bigarray"}}
        ]
    }"#;
    let (module, diagnostics) = extract(json).unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(module.values[0].body, DeclBody::Unsupported { .. }));
}

#[test]
fn duplicate_type_name_is_malformed() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "t", "def": {"kind": "prim", "name": "int"}},
            {"kind": "type", "name": "t", "def": {"kind": "prim", "name": "string"}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { module, reason }
        if module == "M" && reason.contains("duplicate type `t`")));
}

#[test]
fn unbound_type_param_is_malformed() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "t", "def": {"kind": "param", "name": "a"}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("unbound type parameter `a`")));
}

#[test]
fn ref_to_undeclared_type_is_malformed() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "value", "name": "f", "type": {"kind": "ref", "name": "missing"}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("undeclared type `missing`")));
}

#[test]
fn ref_type_argument_count_is_checked() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "pair", "params": ["a", "b"], "def": {"kind": "tuple", "items": [
                {"kind": "param", "name": "a"},
                {"kind": "param", "name": "b"}
            ]}},
            {"kind": "value", "name": "f", "type": {"kind": "ref", "name": "pair", "args": [
                {"kind": "prim", "name": "int"}
            ]}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("takes 2 type arguments, got 1")));
}

#[test]
fn self_external_is_malformed() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "value", "name": "f", "type": {"kind": "external", "module": "M", "name": "t"}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("references the module itself")));
}

#[test]
fn arity_must_match_function_type() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "value", "name": "f", "arity": 3, "type": {"kind": "fn", "params": [
                {"type": {"kind": "prim", "name": "int"}},
                {"type": {"kind": "prim", "name": "int"}}
            ], "ret": {"kind": "prim", "name": "int"}}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("declares arity 3") && reason.contains("2 parameters")));
}

#[test]
fn empty_variant_is_malformed() {
    let json = r#"{
        "module": "M",
        "declarations": [
            {"kind": "type", "name": "t", "def": {"kind": "variant", "cases": []}}
        ]
    }"#;
    let err = extract(json).unwrap_err();
    assert!(matches!(err, Error::MalformedInput { reason, .. }
        if reason.contains("variant with no cases")));
}

#[test]
fn value_shape_reports_curry_arity() {
    let (module, _) = extract_with_interner(
        r#"{
            "module": "Math",
            "declarations": [
                {"kind": "value", "name": "add", "arity": 2, "type": {"kind": "fn", "params": [
                    {"type": {"kind": "prim", "name": "int"}},
                    {"type": {"kind": "prim", "name": "int"}}
                ], "ret": {"kind": "prim", "name": "int"}}},
                {"kind": "value", "name": "zero", "type": {"kind": "prim", "name": "int"}}
            ]
        }"#,
    );

    assert_eq!(module.values[0].shape(), (true, 2));
    assert_eq!(module.values[1].shape(), (false, 0));
}
