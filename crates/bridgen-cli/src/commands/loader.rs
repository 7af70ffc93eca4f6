//! Input loading shared by the gen and check commands.

use std::path::PathBuf;

use bridgen_gen::{Config, Error, Project};

/// Read every input file into a project.
///
/// I/O errors are fatal (exit 1); a file that is not valid introspection
/// JSON fails only that module, matching the generator's own isolation
/// policy.
pub fn load_project(config: Config, inputs: &[PathBuf]) -> (Project, Vec<(String, Error)>) {
    let mut project = Project::new(config);
    let mut failures = Vec::new();

    for path in inputs {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("error: cannot read {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };
        if let Err(e) = project.add_module_json(&text) {
            failures.push((path.display().to_string(), e));
        }
    }

    (project, failures)
}
