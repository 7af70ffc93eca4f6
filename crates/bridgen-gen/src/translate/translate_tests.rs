//! Unit tests for naming and type rendering.

use bridgen_core::{parse_module, Interner};

use crate::diagnostics::Diagnostics;
use crate::extract::extract_module;
use crate::translate::{source_field_key, NameTable, Translator};

fn setup(json: &str) -> (bridgen_core::types::ModuleIr, Interner, NameTable) {
    let raw = parse_module(json).expect("valid json");
    let mut interner = Interner::new();
    let (module, _) = extract_module(&raw, &mut interner).expect("extraction succeeds");
    let mut diagnostics = Diagnostics::new();
    let names = NameTable::build(&module, &interner, &mut diagnostics);
    (module, interner, names)
}

fn render_first_type(json: &str) -> String {
    let (module, interner, names) = setup(json);
    let mut translator = Translator::new(&interner, &names);
    let decl = module.types.values().next().unwrap();
    translator.render_type_decl(decl, true).unwrap()
}

#[test]
fn nullary_variant_renders_string_literal_union() {
    let rendered = render_first_type(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "color", "def": {"kind": "variant", "cases": [
                    {"name": "Red"}, {"name": "Green"}, {"name": "Blue"}
                ]}}
            ]
        }"#,
    );
    insta::assert_snapshot!(rendered, @r#"
    export type color =
        "Red"
      | "Green"
      | "Blue";
    "#);
}

#[test]
fn mixed_variant_renders_tagged_objects() {
    let rendered = render_first_type(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "t", "def": {"kind": "variant", "cases": [
                    {"name": "A"},
                    {"name": "B", "payload": [{"kind": "prim", "name": "int"}]},
                    {"name": "C", "payload": [{"kind": "prim", "name": "string"}]}
                ]}}
            ]
        }"#,
    );
    insta::assert_snapshot!(rendered, @r#"
    export type t =
        "A"
      | { tag: "B"; value: number }
      | { tag: "C"; value: string };
    "#);
}

#[test]
fn record_renders_structural_object_type() {
    let rendered = render_first_type(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "person", "params": ["a"], "def": {"kind": "record", "fields": [
                    {"name": "name", "type": {"kind": "prim", "name": "string"}},
                    {"name": "surname", "type": {"kind": "prim", "name": "string"}},
                    {"name": "type", "type": {"kind": "prim", "name": "string"}},
                    {"name": "polymorphicPayload", "type": {"kind": "param", "name": "a"}}
                ]}}
            ]
        }"#,
    );
    insta::assert_snapshot!(rendered, @r#"
    export type person<a> = {
      readonly name: string;
      readonly surname: string;
      readonly type: string;
      readonly polymorphicPayload: a
    };
    "#);
}

#[test]
fn optional_fields_get_question_mark() {
    let rendered = render_first_type(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "props", "def": {"kind": "record", "fields": [
                    {"name": "message", "type": {"kind": "prim", "name": "string"}, "optional": true},
                    {"name": "count", "type": {"kind": "prim", "name": "int"}}
                ]}}
            ]
        }"#,
    );
    insta::assert_snapshot!(rendered, @r"
    export type props = {
      readonly message?: string;
      readonly count: number
    };
    ");
}

#[test]
fn option_list_array_tuple_rendering() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "value", "name": "x", "type": {"kind": "option", "inner": {"kind": "prim", "name": "int"}}},
                {"kind": "value", "name": "xs", "type": {"kind": "list", "inner": {"kind": "prim", "name": "int"}}},
                {"kind": "value", "name": "arr", "type": {"kind": "array", "inner": {"kind": "option", "inner": {"kind": "prim", "name": "string"}}}},
                {"kind": "value", "name": "pair", "type": {"kind": "tuple", "items": [
                    {"kind": "prim", "name": "int"}, {"kind": "prim", "name": "string"}
                ]}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let rendered: Vec<String> = module
        .values
        .iter()
        .map(|v| translator.ts_value_type(v.body.node().unwrap()))
        .collect();

    assert_eq!(rendered[0], "number | undefined");
    assert_eq!(rendered[1], "list<number>");
    assert_eq!(rendered[2], "(string | undefined)[]");
    assert_eq!(rendered[3], "[number, string]");
    assert!(translator.into_imports().uses_list);
}

#[test]
fn grouped_function_type_folds_labeled_params() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "value", "name": "minus", "arity": 2, "type": {"kind": "fn", "params": [
                    {"label": "first", "type": {"kind": "prim", "name": "int"}, "optional": true},
                    {"label": "second", "type": {"kind": "prim", "name": "int"}}
                ], "ret": {"kind": "prim", "name": "int"}}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let rendered = translator.ts_value_type(module.values[0].body.node().unwrap());
    assert_eq!(
        rendered,
        "(_1:{ readonly first?: number; readonly second: number }) => number"
    );
}

#[test]
fn positional_function_type_is_flat_at_top_level() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "value", "name": "add", "arity": 2, "type": {"kind": "fn", "params": [
                    {"type": {"kind": "prim", "name": "int"}},
                    {"type": {"kind": "prim", "name": "int"}}
                ], "ret": {"kind": "prim", "name": "int"}}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let rendered = translator.ts_value_type(module.values[0].body.node().unwrap());
    assert_eq!(rendered, "(_1:number, _2:number) => number");
}

#[test]
fn nested_curried_function_keeps_arrow_chain() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "value", "name": "apply", "arity": 1, "type": {"kind": "fn", "params": [
                    {"type": {"kind": "fn", "params": [
                        {"type": {"kind": "prim", "name": "int"}},
                        {"type": {"kind": "prim", "name": "int"}}
                    ], "ret": {"kind": "prim", "name": "int"}}}
                ], "ret": {"kind": "prim", "name": "int"}}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let rendered = translator.ts_value_type(module.values[0].body.node().unwrap());
    assert_eq!(rendered, "(_1:(_1:number) => (_2:number) => number) => number");
}

#[test]
fn external_ref_uses_import_alias() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "value", "name": "use", "arity": 1, "type": {"kind": "fn", "params": [
                    {"type": {"kind": "external", "module": "Types", "name": "t"}}
                ], "ret": {"kind": "external", "module": "Types", "name": "t"}}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let rendered = translator.ts_value_type(module.values[0].body.node().unwrap());
    assert_eq!(rendered, "(_1:Types_t) => Types_t");

    let imports = translator.into_imports();
    assert!(imports
        .externals
        .contains(&("Types".to_string(), "t".to_string())));
}

#[test]
fn reserved_declaration_name_is_disambiguated() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "function", "def": {"kind": "prim", "name": "int"}}
            ]
        }"#,
    );
    let mut translator = Translator::new(&interner, &names);
    let decl = module.types.values().next().unwrap();
    let rendered = translator.render_type_decl(decl, true).unwrap();
    assert_eq!(rendered, "export type function_ = number;");
}

#[test]
fn alias_collision_takes_numeric_suffix_and_warns() {
    let raw = parse_module(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "type", "def": {"kind": "prim", "name": "int"}},
                {"kind": "type", "name": "type_", "def": {"kind": "prim", "name": "string"}}
            ]
        }"#,
    )
    .unwrap();
    let mut interner = Interner::new();
    let (module, _) = extract_module(&raw, &mut interner).unwrap();
    let mut diagnostics = Diagnostics::new();
    let names = NameTable::build(&module, &interner, &mut diagnostics);

    // `type` wants `type_`, which the second declaration already owns
    // (declaration names are assigned in order, so `type` -> `type_`,
    // then `type_` itself collides and takes a suffix).
    assert_eq!(names.emitted_name("type"), "type_");
    assert_eq!(names.emitted_name("type_"), "type_2");
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn source_field_key_suffixes_reserved_words() {
    assert_eq!(source_field_key("type"), "type_");
    assert_eq!(source_field_key("default"), "default_");
    assert_eq!(source_field_key("name"), "name");
}

#[test]
fn local_list_declaration_displaces_pervasives_alias() {
    let (module, interner, names) = setup(
        r#"{
            "module": "M",
            "declarations": [
                {"kind": "type", "name": "list", "def": {"kind": "prim", "name": "int"}},
                {"kind": "value", "name": "xs", "type": {"kind": "list", "inner": {"kind": "prim", "name": "int"}}}
            ]
        }"#,
    );
    assert_eq!(names.emitted_name("list"), "list");
    assert_eq!(names.list_ident(), "list2");

    let mut translator = Translator::new(&interner, &names);
    let rendered = translator.ts_value_type(module.values[0].body.node().unwrap());
    assert_eq!(rendered, "list2<number>");
}
