use std::path::PathBuf;

use bridgen_core::Colors;
use bridgen_gen::Config;

use super::loader::load_project;

pub struct GenArgs {
    pub inputs: Vec<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub dry_run: bool,
    pub runtime_path: Option<String>,
    pub color: bool,
}

pub fn run(args: GenArgs) {
    let colors = Colors::new(args.color);

    let mut config = Config::default();
    if let Some(path) = args.runtime_path {
        config = config.runtime_path(path);
    }

    let (project, load_failures) = load_project(config, &args.inputs);
    let output = match project.generate() {
        Ok(output) => output,
        // Build-fatal: a reference cycle aborts before any output exists.
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

    if args.dry_run {
        for module in &output.modules {
            print!("{}", module.text);
        }
    } else {
        let out_dir = args.out_dir.unwrap_or_else(|| PathBuf::from("."));
        for module in &output.modules {
            let path = out_dir.join(&module.file_name);
            // The derived module name must not collide with a hand-authored
            // file; only overwrite what a previous run generated.
            if let Ok(existing) = std::fs::read_to_string(&path)
                && !existing.starts_with("/* TypeScript file generated")
            {
                eprintln!(
                    "error: {} exists and is not a generated file",
                    path.display()
                );
                std::process::exit(1);
            }
            if let Err(e) = std::fs::write(&path, &module.text) {
                eprintln!("error: cannot write {}: {}", path.display(), e);
                std::process::exit(1);
            }
            println!(
                "wrote {}{}{}",
                colors.green,
                path.display(),
                colors.reset
            );
        }
    }

    // Partial success is visible to the build driver: output was produced,
    // but some exports or modules were skipped.
    if output.is_partial() || !load_failures.is_empty() {
        std::process::exit(2);
    }
}
