//! Per-declaration diagnostics for the generation pipeline.
//!
//! Recoverable conditions (a skipped export, a renamed identifier) flow
//! through a [`Diagnostics`] collection; fatal conditions use the crate's
//! `Error` type. A diagnostic points at a declaration within a module;
//! the input is an introspection dump, so there are no source spans.

use std::fmt;

use bridgen_core::Colors;

/// Where a diagnostic points: a declaration within a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub module: String,
    pub decl: String,
}

impl Location {
    pub fn new(module: impl Into<String>, decl: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            decl: decl.into(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.decl)
    }
}

/// Diagnostic kinds, ordered by severity of consequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// A type shape has no host translation; the export is skipped.
    UnsupportedTypeKind,
    /// An external reference names a type the sibling never published
    /// (or one the sibling itself skipped); the export is skipped.
    UnknownExternalType,
    /// A disambiguated alias collided and needed a numeric suffix.
    NameCollision,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::NameCollision => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Base message for this kind, used when no detail is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnsupportedTypeKind => "type shape has no host translation",
            Self::UnknownExternalType => "external type is not published by its module",
            Self::NameCollision => "alias collided with an existing name",
        }
    }

    /// Template for detailed messages. Contains `{}` for caller detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnsupportedTypeKind => "unsupported type shape: {}".to_string(),
            Self::UnknownExternalType => "`{}` is not published by its module".to_string(),
            Self::NameCollision => "alias `{}` collided, a numeric suffix was added".to_string(),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity(), self.location, self.message)
    }
}

/// Ordered collection of diagnostics for one generation pass.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<Diagnostic>,
}

#[must_use = "diagnostic not recorded, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: Diagnostic,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind and location.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to
    /// provide detail.
    pub fn report(&mut self, kind: DiagnosticKind, location: Location) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: Diagnostic {
                kind,
                location,
                message: kind.fallback_message().to_string(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|d| d.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.messages.iter().filter(|d| d.is_warning()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages.iter()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }

    /// Render all diagnostics, one per line.
    pub fn render(&self, colors: Colors) -> String {
        let mut out = String::new();
        for d in &self.messages {
            let c = match d.severity() {
                Severity::Error => colors.red,
                Severity::Warning => colors.yellow,
            };
            out.push_str(&format!(
                "{}{}{}: {}{}{}: {}\n",
                c,
                d.severity(),
                colors.reset,
                colors.blue,
                d.location,
                colors.reset,
                d.message
            ));
        }
        out
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide detail for this diagnostic, rendered with the kind's template.
    pub fn message(mut self, msg: impl Into<String>) -> Self {
        let detail = msg.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}
