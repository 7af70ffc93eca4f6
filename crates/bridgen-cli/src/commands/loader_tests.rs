use std::fs;

use bridgen_gen::Config;

use super::loader::load_project;

#[test]
fn loads_modules_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Types.decls.json");
    fs::write(
        &path,
        r#"{
            "module": "Types",
            "declarations": [
                {"kind": "type", "name": "t", "def": {"kind": "prim", "name": "int"}}
            ]
        }"#,
    )
    .unwrap();

    let (project, failures) = load_project(Config::default(), &[path]);
    assert!(failures.is_empty());

    let output = project.generate().unwrap();
    assert_eq!(output.modules.len(), 1);
    assert_eq!(output.modules[0].module, "Types");
}

#[test]
fn invalid_json_fails_only_that_module() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("Good.decls.json");
    let bad = dir.path().join("Bad.decls.json");
    fs::write(
        &good,
        r#"{"module": "Good", "declarations": [
            {"kind": "value", "name": "x", "type": {"kind": "prim", "name": "int"}}
        ]}"#,
    )
    .unwrap();
    fs::write(&bad, "not json").unwrap();

    let (project, failures) = load_project(Config::default(), &[good, bad]);
    assert_eq!(failures.len(), 1);
    assert!(failures[0].0.ends_with("Bad.decls.json"));

    let output = project.generate().unwrap();
    assert_eq!(output.modules.len(), 1);
    assert_eq!(output.modules[0].module, "Good");
}
