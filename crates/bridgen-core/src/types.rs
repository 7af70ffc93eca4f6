//! Interned type graph produced by the extract pass.
//!
//! Invariant: the order of `VariantType::cases` is the declaration order from
//! the source module, and a case's position is its runtime tag index. Decode
//! correctness depends on it; nothing in this crate or its consumers may
//! reorder cases (by name or otherwise).

use indexmap::IndexMap;
use std::collections::HashMap;

use crate::{Interner, Symbol};

/// Primitive types with a direct, conversion-free host mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Number,
    String,
    Boolean,
    Unit,
    Unknown,
}

impl Primitive {
    /// Map the compiler's primitive name onto a host primitive.
    /// Returns `None` for names the translator has no encoding for.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" | "float" | "number" => Some(Self::Number),
            "string" | "char" => Some(Self::String),
            "bool" | "boolean" => Some(Self::Boolean),
            "unit" => Some(Self::Unit),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// The host-language spelling.
    pub fn ts_name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Unit => "void",
            Self::Unknown => "unknown",
        }
    }
}

/// A node in the type graph.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Primitive(Primitive),
    Variant(VariantType),
    Record(RecordType),
    Function(FunctionType),
    Option(Box<TypeNode>),
    /// Like Option, but the source runtime uses `null` for the empty case;
    /// crossing the boundary always normalizes against `undefined`.
    Nullable(Box<TypeNode>),
    List(Box<TypeNode>),
    Array(Box<TypeNode>),
    Tuple(Vec<TypeNode>),
    TypeParam(Symbol),
    /// Reference to a type declared in the same module.
    LocalRef { name: Symbol, args: Vec<TypeNode> },
    /// Reference to a type declared in another module, resolved against that
    /// module's published table.
    ExternalRef(ExternalRef),
}

#[derive(Clone, Debug, PartialEq)]
pub struct VariantType {
    pub cases: Vec<Case>,
}

/// A variant case. Position in the case list is the runtime tag index.
#[derive(Clone, Debug, PartialEq)]
pub struct Case {
    pub name: Symbol,
    /// `None` → nullary case, encoded as a plain discriminant at the
    /// boundary. Multi-payload cases are folded to a single Tuple payload.
    pub payload: Option<TypeNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordType {
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Symbol,
    pub ty: TypeNode,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionType {
    pub params: Vec<Param>,
    pub ret: Box<TypeNode>,
    pub curried: bool,
}

/// A function parameter; its position is the curried argument slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub label: Option<Symbol>,
    pub ty: TypeNode,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExternalRef {
    pub module: Symbol,
    pub name: Symbol,
    pub args: Vec<TypeNode>,
}

impl VariantType {
    /// True when every case is nullary (translates to a string-literal
    /// union, no tagged objects).
    pub fn is_nullary_only(&self) -> bool {
        self.cases.iter().all(|c| c.payload.is_none())
    }

    /// Cases carrying a payload, with their runtime tag indices.
    pub fn payload_cases(&self) -> impl Iterator<Item = (usize, &Case)> {
        self.cases
            .iter()
            .enumerate()
            .filter(|(_, c)| c.payload.is_some())
    }

    /// Nullary cases, with their runtime tag indices.
    pub fn nullary_cases(&self) -> impl Iterator<Item = (usize, &Case)> {
        self.cases
            .iter()
            .enumerate()
            .filter(|(_, c)| c.payload.is_none())
    }
}

impl FunctionType {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Whether the host call site groups arguments into one record
    /// (any parameter is labeled).
    pub fn is_grouped(&self) -> bool {
        self.params.iter().any(|p| p.label.is_some())
    }
}

impl TypeNode {
    /// Substitute type parameters. Used when instantiating a referenced
    /// declaration's body with concrete type arguments.
    pub fn substitute(&self, map: &HashMap<Symbol, TypeNode>) -> TypeNode {
        match self {
            TypeNode::Primitive(_) => self.clone(),
            TypeNode::TypeParam(name) => map.get(name).cloned().unwrap_or_else(|| self.clone()),
            TypeNode::Variant(v) => TypeNode::Variant(VariantType {
                cases: v
                    .cases
                    .iter()
                    .map(|c| Case {
                        name: c.name,
                        payload: c.payload.as_ref().map(|p| p.substitute(map)),
                    })
                    .collect(),
            }),
            TypeNode::Record(r) => TypeNode::Record(RecordType {
                fields: r
                    .fields
                    .iter()
                    .map(|f| Field {
                        name: f.name,
                        ty: f.ty.substitute(map),
                        optional: f.optional,
                    })
                    .collect(),
            }),
            TypeNode::Function(f) => TypeNode::Function(FunctionType {
                params: f
                    .params
                    .iter()
                    .map(|p| Param {
                        label: p.label,
                        ty: p.ty.substitute(map),
                        optional: p.optional,
                    })
                    .collect(),
                ret: Box::new(f.ret.substitute(map)),
                curried: f.curried,
            }),
            TypeNode::Option(inner) => TypeNode::Option(Box::new(inner.substitute(map))),
            TypeNode::Nullable(inner) => TypeNode::Nullable(Box::new(inner.substitute(map))),
            TypeNode::List(inner) => TypeNode::List(Box::new(inner.substitute(map))),
            TypeNode::Array(inner) => TypeNode::Array(Box::new(inner.substitute(map))),
            TypeNode::Tuple(items) => {
                TypeNode::Tuple(items.iter().map(|i| i.substitute(map)).collect())
            }
            TypeNode::LocalRef { name, args } => TypeNode::LocalRef {
                name: *name,
                args: args.iter().map(|a| a.substitute(map)).collect(),
            },
            TypeNode::ExternalRef(ext) => TypeNode::ExternalRef(ExternalRef {
                module: ext.module,
                name: ext.name,
                args: ext.args.iter().map(|a| a.substitute(map)).collect(),
            }),
        }
    }

    /// Visit every ExternalRef in the graph, depth-first.
    pub fn walk_external_refs<'a>(&'a self, f: &mut impl FnMut(&'a ExternalRef)) {
        match self {
            TypeNode::Primitive(_) | TypeNode::TypeParam(_) => {}
            TypeNode::Variant(v) => {
                for case in &v.cases {
                    if let Some(payload) = &case.payload {
                        payload.walk_external_refs(f);
                    }
                }
            }
            TypeNode::Record(r) => {
                for field in &r.fields {
                    field.ty.walk_external_refs(f);
                }
            }
            TypeNode::Function(func) => {
                for param in &func.params {
                    param.ty.walk_external_refs(f);
                }
                func.ret.walk_external_refs(f);
            }
            TypeNode::Option(inner)
            | TypeNode::Nullable(inner)
            | TypeNode::List(inner)
            | TypeNode::Array(inner) => inner.walk_external_refs(f),
            TypeNode::Tuple(items) => {
                for item in items {
                    item.walk_external_refs(f);
                }
            }
            TypeNode::LocalRef { args, .. } => {
                for arg in args {
                    arg.walk_external_refs(f);
                }
            }
            TypeNode::ExternalRef(ext) => {
                f(ext);
                for arg in &ext.args {
                    arg.walk_external_refs(f);
                }
            }
        }
    }
}

/// Body of an extracted declaration. Unsupported declarations keep their
/// slot in the module (sibling lookups and ordering stay stable) but are
/// omitted from emission.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclBody {
    Ok(TypeNode),
    Unsupported { shape: String },
}

impl DeclBody {
    pub fn node(&self) -> Option<&TypeNode> {
        match self {
            DeclBody::Ok(node) => Some(node),
            DeclBody::Unsupported { .. } => None,
        }
    }
}

/// An exported type declaration.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub name: Symbol,
    pub params: Vec<Symbol>,
    pub body: DeclBody,
}

/// An exported value declaration with its curried arity.
#[derive(Clone, Debug)]
pub struct ValueDecl {
    pub name: Symbol,
    pub body: DeclBody,
}

impl ValueDecl {
    /// (is-curried, arity) of the exported value; constants are (false, 0).
    pub fn shape(&self) -> (bool, usize) {
        match self.body.node() {
            Some(TypeNode::Function(f)) => (f.curried, f.arity()),
            _ => (false, 0),
        }
    }
}

/// One module's extracted type graph, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct ModuleIr {
    pub name: String,
    /// Keyed by type name; insertion order is declaration order.
    pub types: IndexMap<Symbol, TypeDecl>,
    pub values: Vec<ValueDecl>,
}

impl ModuleIr {
    /// Every ExternalRef in the module, in declaration order.
    pub fn external_refs(&self) -> Vec<&ExternalRef> {
        let mut refs = Vec::new();
        for decl in self.types.values() {
            if let Some(node) = decl.body.node() {
                node.walk_external_refs(&mut |ext| refs.push(ext));
            }
        }
        for value in &self.values {
            if let Some(node) = value.body.node() {
                node.walk_external_refs(&mut |ext| refs.push(ext));
            }
        }
        refs
    }

    /// Distinct sibling modules referenced, in first-use order.
    pub fn external_modules<'a>(&'a self, interner: &'a Interner) -> Vec<&'a str> {
        let mut seen = Vec::new();
        for ext in self.external_refs() {
            let module = interner.resolve(ext.module);
            if !seen.contains(&module) {
                seen.push(module);
            }
        }
        seen
    }
}
