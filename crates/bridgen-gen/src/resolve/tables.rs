//! Published per-module type tables and reference checking.

use indexmap::IndexMap;

use bridgen_core::types::{DeclBody, ModuleIr, TypeNode};
use bridgen_core::{Interner, Symbol};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};
use crate::translate::NameTable;

/// One published type: everything a dependent module needs to translate and
/// convert references to it.
#[derive(Debug, Clone)]
pub struct PublishedType {
    pub params: Vec<Symbol>,
    pub body: DeclBody,
    /// Host name the declaring module emitted (after disambiguation).
    pub emitted_name: String,
}

/// A completed module's published table.
#[derive(Debug, Clone, Default)]
pub struct ModuleTable {
    /// Keyed by source type name, in declaration order.
    pub types: IndexMap<String, PublishedType>,
}

/// Read-only lookup over every completed module's table. Populated strictly
/// in dependency order; never mutated after a module is published.
#[derive(Debug, Clone, Default)]
pub struct PublishedTables {
    modules: IndexMap<String, ModuleTable>,
}

impl PublishedTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&mut self, module: impl Into<String>, table: ModuleTable) {
        self.modules.insert(module.into(), table);
    }

    pub fn get(&self, module: &str) -> Option<&ModuleTable> {
        self.modules.get(module)
    }

    pub fn lookup(&self, module: &str, name: &str) -> Option<&PublishedType> {
        self.modules.get(module)?.types.get(name)
    }

    pub fn contains_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }
}

/// Build a module's published table from its extracted graph and assigned
/// names. Unsupported declarations are published with their marker so
/// dependents cascade instead of importing a type that was never emitted.
pub fn publish_module(module: &ModuleIr, interner: &Interner, names: &NameTable) -> ModuleTable {
    let mut table = ModuleTable::default();
    for decl in module.types.values() {
        let source_name = interner.resolve(decl.name).to_string();
        let emitted_name = names.emitted_name(&source_name).to_string();
        table.types.insert(
            source_name,
            PublishedType {
                params: decl.params.clone(),
                body: decl.body.clone(),
                emitted_name,
            },
        );
    }
    table
}

/// Re-check every declaration's references against the module itself and the
/// published tables, marking declarations whose references cannot be
/// satisfied. Runs to a fixpoint so skips cascade through local chains.
pub fn check_refs(
    module: &mut ModuleIr,
    interner: &Interner,
    siblings: &PublishedTables,
    diagnostics: &mut Diagnostics,
) {
    loop {
        let mut marks: Vec<(DeclKey, BadRef)> = Vec::new();

        for (i, decl) in module.types.values().enumerate() {
            if let Some(node) = decl.body.node()
                && let Some(bad) = find_bad_ref(node, module, interner, siblings)
            {
                marks.push((DeclKey::Type(i), bad));
            }
        }
        for (i, value) in module.values.iter().enumerate() {
            if let Some(node) = value.body.node()
                && let Some(bad) = find_bad_ref(node, module, interner, siblings)
            {
                marks.push((DeclKey::Value(i), bad));
            }
        }

        if marks.is_empty() {
            return;
        }

        for (key, bad) in marks {
            let (decl_name, body) = match key {
                DeclKey::Type(i) => {
                    let (_, decl) = module.types.get_index_mut(i).unwrap();
                    (interner.resolve(decl.name).to_string(), &mut decl.body)
                }
                DeclKey::Value(i) => {
                    let value = &mut module.values[i];
                    (interner.resolve(value.name).to_string(), &mut value.body)
                }
            };
            diagnostics
                .report(bad.kind, Location::new(&module.name, &decl_name))
                .message(&bad.detail)
                .emit();
            *body = DeclBody::Unsupported { shape: bad.shape };
        }
    }
}

enum DeclKey {
    Type(usize),
    Value(usize),
}

struct BadRef {
    kind: DiagnosticKind,
    detail: String,
    shape: String,
}

/// First unsatisfiable reference in a node, if any.
fn find_bad_ref(
    node: &TypeNode,
    module: &ModuleIr,
    interner: &Interner,
    siblings: &PublishedTables,
) -> Option<BadRef> {
    match node {
        TypeNode::Primitive(_) | TypeNode::TypeParam(_) => None,

        TypeNode::Variant(v) => v
            .cases
            .iter()
            .filter_map(|c| c.payload.as_ref())
            .find_map(|p| find_bad_ref(p, module, interner, siblings)),

        TypeNode::Record(r) => r
            .fields
            .iter()
            .find_map(|f| find_bad_ref(&f.ty, module, interner, siblings)),

        TypeNode::Function(f) => f
            .params
            .iter()
            .find_map(|p| find_bad_ref(&p.ty, module, interner, siblings))
            .or_else(|| find_bad_ref(&f.ret, module, interner, siblings)),

        TypeNode::Option(inner)
        | TypeNode::Nullable(inner)
        | TypeNode::List(inner)
        | TypeNode::Array(inner) => find_bad_ref(inner, module, interner, siblings),

        TypeNode::Tuple(items) => items
            .iter()
            .find_map(|i| find_bad_ref(i, module, interner, siblings)),

        TypeNode::LocalRef { name, args } => {
            let name_str = interner.resolve(*name);
            let referenced = module.types.get(name)?;
            if matches!(referenced.body, DeclBody::Unsupported { .. }) {
                return Some(BadRef {
                    kind: DiagnosticKind::UnsupportedTypeKind,
                    detail: format!("reference to skipped type `{name_str}`"),
                    shape: format!("reference to skipped type `{name_str}`"),
                });
            }
            args.iter()
                .find_map(|a| find_bad_ref(a, module, interner, siblings))
        }

        TypeNode::ExternalRef(ext) => {
            let sibling = interner.resolve(ext.module);
            let name = interner.resolve(ext.name);
            let qualified = format!("{sibling}.{name}");

            let Some(published) = siblings.lookup(sibling, name) else {
                return Some(BadRef {
                    kind: DiagnosticKind::UnknownExternalType,
                    detail: qualified.clone(),
                    shape: format!("unknown external type `{qualified}`"),
                });
            };
            if matches!(published.body, DeclBody::Unsupported { .. }) {
                return Some(BadRef {
                    kind: DiagnosticKind::UnknownExternalType,
                    detail: format!("{qualified} (skipped by its module)"),
                    shape: format!("reference to skipped type `{qualified}`"),
                });
            }
            if published.params.len() != ext.args.len() {
                return Some(BadRef {
                    kind: DiagnosticKind::UnknownExternalType,
                    detail: format!(
                        "{qualified} (takes {} type arguments, got {})",
                        published.params.len(),
                        ext.args.len()
                    ),
                    shape: format!("bad type arguments for `{qualified}`"),
                });
            }
            ext.args
                .iter()
                .find_map(|a| find_bad_ref(a, module, interner, siblings))
        }
    }
}
