use std::path::PathBuf;

use bridgen_core::Colors;
use bridgen_gen::Config;

use super::loader::load_project;

pub struct CheckArgs {
    pub inputs: Vec<PathBuf>,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let colors = Colors::new(args.color);

    let (project, load_failures) = load_project(Config::default(), &args.inputs);
    let output = match project.generate() {
        Ok(output) => output,
        Err(e) => {
            eprintln!("{}error{}: {e}", colors.red, colors.reset);
            std::process::exit(1);
        }
    };

    eprint!("{}", output.diagnostics.render(colors));
    for (origin, error) in load_failures.iter().chain(output.failures.iter()) {
        eprintln!(
            "{}error{}: {}{origin}{}: {error}",
            colors.red, colors.reset, colors.blue, colors.reset
        );
    }

    let clean = output.is_clean()
        && load_failures.is_empty()
        && (!args.strict || output.diagnostics.warning_count() == 0);
    if !clean {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
