//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` composed into commands by
//! `commands.rs`, so both subcommands agree on names and help text.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction};

/// Module introspection files (positional, one per module).
pub fn inputs_arg() -> Arg {
    Arg::new("inputs")
        .value_name("MODULE_JSON")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("Module introspection files, one per source module")
}

/// Output directory (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .help("Directory for generated binding modules (default: current directory)")
}

/// Print generated modules instead of writing them (--dry-run).
pub fn dry_run_arg() -> Arg {
    Arg::new("dry_run")
        .long("dry-run")
        .action(ArgAction::SetTrue)
        .help("Print generated modules to stdout instead of writing files")
}

/// Runtime helper package path (--runtime-path).
pub fn runtime_path_arg() -> Arg {
    Arg::new("runtime_path")
        .long("runtime-path")
        .value_name("PATH")
        .help("Package path of the source runtime's interop helpers")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}
