//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bridgen")
        .about("Typed binding generator for block-encoded functional runtimes")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(gen_command())
        .subcommand(check_command())
}

/// Generate binding modules.
pub fn gen_command() -> Command {
    Command::new("gen")
        .about("Generate binding modules from module introspection files")
        .override_usage(
            "\
  bridgen gen <MODULE_JSON>... -o <DIR>
  bridgen gen <MODULE_JSON>... --dry-run",
        )
        .after_help(
            r#"EXAMPLES:
  bridgen gen src/*.decls.json -o src          # write Module.gen.ts files
  bridgen gen Shape.decls.json --dry-run       # print the binding instead
  bridgen gen app.decls.json --runtime-path melange.runtime -o out"#,
        )
        .arg(inputs_arg())
        .arg(out_dir_arg())
        .arg(dry_run_arg())
        .arg(runtime_path_arg())
        .arg(color_arg())
}

/// Validate without writing output.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Run generation without writing output, reporting diagnostics")
        .override_usage("  bridgen check <MODULE_JSON>...")
        .after_help(
            r#"EXAMPLES:
  bridgen check src/*.decls.json               # silent when clean
  bridgen check src/*.decls.json --strict      # warnings fail too"#,
        )
        .arg(inputs_arg())
        .arg(strict_arg())
        .arg(color_arg())
}
