//! Test utilities and snapshot macros.

use bridgen_core::Colors;

/// Generate a single module with the default config, appending rendered
/// diagnostics (if any) after a `---` separator.
pub fn generate_single(json: &str) -> String {
    generate_single_with(crate::Config::default(), json)
}

/// Generate a single module with a custom config.
pub fn generate_single_with(config: crate::Config, json: &str) -> String {
    let mut project = crate::Project::new(config);
    project.add_module_json(json).expect("valid module json");
    let output = project.generate().expect("generation succeeds");

    let mut text = String::new();
    for module in &output.modules {
        text.push_str(&module.text);
    }
    let diagnostics = output.diagnostics.render(Colors::OFF);
    if diagnostics.is_empty() {
        text
    } else {
        format!("{text}---\n{diagnostics}")
    }
}

/// Snapshot test for a generated binding module.
#[macro_export]
macro_rules! shot_binding {
    ($json:literal, @$snapshot:literal) => {{
        let output = $crate::test_utils::generate_single(indoc::indoc!($json));
        insta::with_settings!({ omit_expression => true }, {
            insta::assert_snapshot!(output, @$snapshot);
        });
    }};
}
