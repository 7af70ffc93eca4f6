//! Configuration for binding generation.

/// Configuration for one generation run. All knobs have defaults matching
/// the upstream toolchain's conventions.
#[derive(Clone, Debug)]
pub struct Config {
    /// Package path of the source runtime's interop helpers.
    pub(crate) runtime_path: String,
    /// Suffix of the compiled implementation module (`./Module.bs`).
    pub(crate) impl_suffix: String,
    /// Suffix of generated binding modules (`./Module.gen`).
    pub(crate) gen_suffix: String,
    /// Source file extension named in the header comment.
    pub(crate) source_ext: String,
    /// Module exporting the `list` alias for the source list type.
    pub(crate) pervasives_module: String,
    /// Emit lint-suppression pragma comments.
    pub(crate) lint_pragmas: bool,
    /// Prefix declarations with `export`.
    pub(crate) export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_path: "bs-platform/lib/es6".to_string(),
            impl_suffix: ".bs".to_string(),
            gen_suffix: ".gen".to_string(),
            source_ext: ".re".to_string(),
            pervasives_module: "ReasonPervasives".to_string(),
            lint_pragmas: true,
            export: true,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime helper package path.
    pub fn runtime_path(mut self, value: impl Into<String>) -> Self {
        self.runtime_path = value.into();
        self
    }

    /// Set the compiled implementation module suffix.
    pub fn impl_suffix(mut self, value: impl Into<String>) -> Self {
        self.impl_suffix = value.into();
        self
    }

    /// Set the generated module suffix.
    pub fn gen_suffix(mut self, value: impl Into<String>) -> Self {
        self.gen_suffix = value.into();
        self
    }

    /// Set the source extension used in the header comment.
    pub fn source_ext(mut self, value: impl Into<String>) -> Self {
        self.source_ext = value.into();
        self
    }

    /// Set the pervasives module name.
    pub fn pervasives_module(mut self, value: impl Into<String>) -> Self {
        self.pervasives_module = value.into();
        self
    }

    /// Set whether to emit lint-suppression pragmas.
    pub fn lint_pragmas(mut self, value: bool) -> Self {
        self.lint_pragmas = value;
        self
    }

    /// Set whether to prefix declarations with `export`.
    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    /// File name of the generated binding for `module`.
    pub fn gen_file_name(&self, module: &str) -> String {
        format!("{}{}.ts", module, self.gen_suffix)
    }

    /// Import specifier for a sibling module's generated binding.
    pub fn sibling_import(&self, module: &str) -> String {
        format!("./{}{}", module, self.gen_suffix)
    }
}
