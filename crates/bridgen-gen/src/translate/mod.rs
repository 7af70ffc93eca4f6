//! Type translation: type graph → host type declarations.
//!
//! Split in two concerns, mirroring how the emitted names flow:
//! - `naming` - per-module name table: emitted declaration names, import
//!   aliases, reserved-word disambiguation, and the host↔source field
//!   rename rule shared with the converter generator
//! - `render` - deterministic structural rendering of type expressions and
//!   declarations

mod naming;
mod render;

#[cfg(test)]
mod translate_tests;

pub use naming::{source_field_key, NameTable};
pub use render::{ImportSet, Translator};
