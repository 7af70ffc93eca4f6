#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for bridgen module introspection.
//!
//! Two layers:
//! - **Deserialization layer**: 1:1 mapping to the upstream compiler's
//!   module introspection JSON (one document per source module)
//! - **Type-graph layer** (`types`): interned, order-preserving structures
//!   the generator pipeline works on
//!
//! The deserialization layer is an external contract: its shape follows what
//! the compiler dumps, not what the generator would prefer. Lowering into the
//! type graph (and all validation) happens in the generator's extract pass.

mod colors;
mod interner;
pub mod types;
pub mod utils;

#[cfg(test)]
mod interner_tests;

pub use colors::Colors;
pub use interner::{Interner, Symbol};

// ============================================================================
// Deserialization Layer
// ============================================================================

/// Raw module introspection dump for one source module.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawModule {
    #[serde(rename = "module")]
    pub name: String,
    pub declarations: Vec<RawDecl>,
}

/// One exported declaration, in declaration order.
///
/// Declaration order is semantically meaningful: the runtime tag index of a
/// variant case is its position in the case list.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawDecl {
    Type {
        name: String,
        #[serde(default)]
        params: Vec<String>,
        def: RawType,
    },
    Value {
        name: String,
        #[serde(rename = "type")]
        type_: RawType,
        /// Curried arity as reported by the compiler. `None` for constants.
        #[serde(default)]
        arity: Option<u32>,
    },
}

impl RawDecl {
    pub fn name(&self) -> &str {
        match self {
            RawDecl::Type { name, .. } | RawDecl::Value { name, .. } => name,
        }
    }
}

/// A type expression as the compiler dumps it.
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawType {
    Prim {
        name: String,
    },
    Variant {
        cases: Vec<RawCase>,
        #[serde(default)]
        unboxed: bool,
    },
    Record {
        fields: Vec<RawField>,
    },
    Fn {
        params: Vec<RawParam>,
        ret: Box<RawType>,
        #[serde(default = "default_true")]
        curried: bool,
    },
    Option {
        inner: Box<RawType>,
    },
    Nullable {
        inner: Box<RawType>,
    },
    List {
        inner: Box<RawType>,
    },
    Array {
        inner: Box<RawType>,
    },
    Tuple {
        items: Vec<RawType>,
    },
    Param {
        name: String,
    },
    /// Reference to a type declared in the same module.
    Ref {
        name: String,
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// Reference to a type declared in another module.
    External {
        module: String,
        name: String,
        #[serde(default)]
        args: Vec<RawType>,
    },
    /// GADT-like constructor. Representable in the dump, but the translator
    /// has no encoding for it; the extract pass skips the declaration.
    Gadt {
        #[serde(default)]
        feature: Option<String>,
    },
}

/// A variant case. Payload arity 0 is a nullary case; arity > 1 is folded
/// into a tuple payload by the extract pass.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawCase {
    pub name: String,
    #[serde(default)]
    pub payload: Vec<RawType>,
}

/// A record field.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: RawType,
    #[serde(default)]
    pub optional: bool,
}

/// A function parameter. Labeled parameters group at the call boundary.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawParam {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub type_: RawType,
    #[serde(default)]
    pub optional: bool,
}

fn default_true() -> bool {
    true
}

/// Parse one module introspection document.
pub fn parse_module(json: &str) -> Result<RawModule, serde_json::Error> {
    serde_json::from_str(json)
}
