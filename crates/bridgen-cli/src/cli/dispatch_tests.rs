use std::path::PathBuf;

use super::commands::build_cli;
use super::dispatch::{CheckParams, GenParams};
use super::ColorChoice;

fn gen_matches(argv: &[&str]) -> GenParams {
    let matches = build_cli().try_get_matches_from(argv).expect("valid argv");
    let (_, m) = matches.subcommand().expect("subcommand");
    GenParams::from_matches(m)
}

fn check_matches(argv: &[&str]) -> CheckParams {
    let matches = build_cli().try_get_matches_from(argv).expect("valid argv");
    let (_, m) = matches.subcommand().expect("subcommand");
    CheckParams::from_matches(m)
}

#[test]
fn gen_parses_inputs_and_out_dir() {
    let params = gen_matches(&[
        "bridgen",
        "gen",
        "Shape.decls.json",
        "Types.decls.json",
        "-o",
        "out",
    ]);
    assert_eq!(
        params.inputs,
        vec![
            PathBuf::from("Shape.decls.json"),
            PathBuf::from("Types.decls.json")
        ]
    );
    assert_eq!(params.out_dir, Some(PathBuf::from("out")));
    assert!(!params.dry_run);
    assert!(params.runtime_path.is_none());
}

#[test]
fn gen_parses_dry_run_and_runtime_path() {
    let params = gen_matches(&[
        "bridgen",
        "gen",
        "a.json",
        "--dry-run",
        "--runtime-path",
        "melange.runtime",
    ]);
    assert!(params.dry_run);
    assert_eq!(params.runtime_path.as_deref(), Some("melange.runtime"));
}

#[test]
fn gen_requires_inputs() {
    assert!(build_cli()
        .try_get_matches_from(["bridgen", "gen"])
        .is_err());
}

#[test]
fn check_parses_strict_and_color() {
    let params = check_matches(&["bridgen", "check", "a.json", "--strict", "--color", "never"]);
    assert!(params.strict);
    assert!(matches!(params.color, ColorChoice::Never));
    assert!(!params.color.should_colorize());
}

#[test]
fn color_always_forces_colorization() {
    let params = check_matches(&["bridgen", "check", "a.json", "--color", "always"]);
    assert!(params.color.should_colorize());
}
