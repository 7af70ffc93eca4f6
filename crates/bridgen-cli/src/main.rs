mod cli;
mod commands;

use cli::{build_cli, CheckParams, GenParams};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("gen", m)) => {
            let params = GenParams::from_matches(m);
            commands::r#gen::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
