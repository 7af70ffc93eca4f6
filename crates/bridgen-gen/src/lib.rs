#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! bridgen generator: typed bindings for a curried, block-encoded functional
//! runtime, emitted as host-language (TypeScript) modules.
//!
//! Pipeline per module:
//! - `extract` - introspection dump → interned type graph
//! - `translate` - type graph → host type declarations + rename map
//! - `convert` - conversion plans and encode/decode code generation
//! - `emit` - output module assembly
//! - `resolve` - cross-module dependency order and published type tables
//! - `diagnostics` - per-declaration error reporting
//!
//! The [`Project`] facade drives all passes in dependency order.

mod config;
pub mod convert;
pub mod diagnostics;
pub mod emit;
pub mod extract;
pub mod project;
pub mod resolve;
pub mod translate;

#[cfg(test)]
pub mod test_utils;

pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Location, Severity};
pub use project::{BuildOutput, GeneratedModule, Project};

/// Result type for generator passes that produce both output and diagnostics.
///
/// Each pass returns its typed output alongside any diagnostics it collected.
/// Fatal errors (malformed input, reference cycles) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

/// Fatal errors. Per-declaration failures are diagnostics, not errors; these
/// abort a module's emission (or, for cycles, the whole build).
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The upstream declaration list is internally inconsistent.
    #[error("malformed input for module `{module}`: {reason}")]
    MalformedInput { module: String, reason: String },

    /// Two or more modules reference each other's types. Detected before any
    /// output is produced; fatal for the whole build.
    #[error("cyclic external reference: {}", .0.join(" -> "))]
    CyclicExternalRef(Vec<String>),

    /// An ExternalRef names a module that was never added to the project
    /// (or one whose extraction failed). Fatal for the referring module only.
    #[error("module `{referrer}` references unknown module `{module}`")]
    UnknownExternalModule { referrer: String, module: String },
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, Error>;
