//! ANSI color codes for diagnostic and report output.
//!
//! Semantic colors with an orthogonal dim modifier:
//! - Red: error headings
//! - Yellow: warning headings
//! - Blue: module and declaration names
//! - Green: written output paths
//! - Dim: structure, counts, metadata

/// ANSI color palette for CLI output.
///
/// Uses only standard 16-color ANSI codes (no RGB) so it reads well in both
/// light and dark themes.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub red: &'static str,
    pub yellow: &'static str,
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    /// Colors enabled (ANSI escape codes).
    pub const ON: Self = Self {
        red: "\x1b[31m",
        yellow: "\x1b[33m",
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Colors disabled (empty strings).
    pub const OFF: Self = Self {
        red: "",
        yellow: "",
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    /// Create colors based on enabled flag.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    /// Check if colors are enabled.
    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
