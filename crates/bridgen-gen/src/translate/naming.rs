//! Name assignment for emitted declarations and imports.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use bridgen_core::types::{ModuleIr, TypeNode};
use bridgen_core::utils::is_reserved;
use bridgen_core::Interner;

use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};

/// Source-side runtime key for a record field.
///
/// The functional compiler cannot use host reserved words as field names and
/// suffixes them with `_`; the host type keeps the original spelling. This
/// rule is the single source of truth for both the translator and the
/// converter generator.
pub fn source_field_key(host_name: &str) -> String {
    if is_reserved(host_name) {
        format!("{host_name}_")
    } else {
        host_name.to_string()
    }
}

/// Per-module name assignments: emitted declaration names and import
/// aliases, with reserved-word disambiguation applied once so every
/// consumer agrees.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    /// Source declaration name → emitted host name.
    emitted: IndexMap<String, String>,
    /// (sibling module, source type name) → import alias.
    import_aliases: IndexMap<(String, String), String>,
    /// Identifier the pervasives `list` alias is imported under, when the
    /// module uses a List type. Usually `list`; disambiguated if a local
    /// declaration took that name.
    list_ident: Option<String>,
    /// Names already taken in the emitted module.
    used: BTreeSet<String>,
}

impl NameTable {
    /// Assign names for every declaration and external reference of a
    /// module. Declaration names are assigned first (in declaration order)
    /// so import aliases never steal a declared name.
    pub fn build(module: &ModuleIr, interner: &Interner, diagnostics: &mut Diagnostics) -> Self {
        let mut table = Self::default();

        let decl_names: Vec<&str> = module
            .types
            .values()
            .map(|d| interner.resolve(d.name))
            .chain(module.values.iter().map(|v| interner.resolve(v.name)))
            .collect();

        for name in decl_names {
            let emitted = if is_reserved(name) {
                table.disambiguate(&format!("{name}_"), &module.name, name, diagnostics)
            } else {
                table.disambiguate(name, &module.name, name, diagnostics)
            };
            table.emitted.insert(name.to_string(), emitted);
        }

        if module_uses_list(module) {
            let ident = table.disambiguate("list", &module.name, "list", diagnostics);
            table.list_ident = Some(ident);
        }

        for ext in module.external_refs() {
            let sibling = interner.resolve(ext.module).to_string();
            let name = interner.resolve(ext.name).to_string();
            let key = (sibling.clone(), name.clone());
            if table.import_aliases.contains_key(&key) {
                continue;
            }
            let alias = table.disambiguate(
                &format!("{sibling}_{name}"),
                &module.name,
                &name,
                diagnostics,
            );
            table.import_aliases.insert(key, alias);
        }

        table
    }

    /// Emitted host name for a declared source name.
    pub fn emitted_name<'a>(&'a self, source_name: &'a str) -> &'a str {
        self.emitted
            .get(source_name)
            .map(|s| s.as_str())
            .unwrap_or(source_name)
    }

    /// Identifier for the pervasives `list` alias (set only when the module
    /// uses a List type).
    pub fn list_ident(&self) -> &str {
        self.list_ident.as_deref().unwrap_or("list")
    }

    /// Import alias for an external type.
    pub fn import_alias(&self, module: &str, name: &str) -> Option<&str> {
        self.import_aliases
            .get(&(module.to_string(), name.to_string()))
            .map(|s| s.as_str())
    }

    /// All import aliases, in first-use order: ((module, name), alias).
    pub fn import_aliases(&self) -> impl Iterator<Item = (&(String, String), &String)> {
        self.import_aliases.iter()
    }

    /// Reserve `base`, appending a numeric suffix (and logging) on collision.
    fn disambiguate(
        &mut self,
        base: &str,
        module: &str,
        decl: &str,
        diagnostics: &mut Diagnostics,
    ) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut counter = 2;
        loop {
            let candidate = format!("{base}{counter}");
            if self.used.insert(candidate.clone()) {
                diagnostics
                    .report(DiagnosticKind::NameCollision, Location::new(module, decl))
                    .message(base)
                    .emit();
                return candidate;
            }
            counter += 1;
        }
    }
}

fn module_uses_list(module: &ModuleIr) -> bool {
    let type_bodies = module.types.values().filter_map(|d| d.body.node());
    let value_bodies = module.values.iter().filter_map(|v| v.body.node());
    type_bodies.chain(value_bodies).any(node_uses_list)
}

fn node_uses_list(node: &TypeNode) -> bool {
    match node {
        TypeNode::List(_) => true,
        TypeNode::Primitive(_) | TypeNode::TypeParam(_) => false,
        TypeNode::Variant(v) => v
            .cases
            .iter()
            .filter_map(|c| c.payload.as_ref())
            .any(node_uses_list),
        TypeNode::Record(r) => r.fields.iter().any(|f| node_uses_list(&f.ty)),
        TypeNode::Function(f) => {
            f.params.iter().any(|p| node_uses_list(&p.ty)) || node_uses_list(&f.ret)
        }
        TypeNode::Option(inner) | TypeNode::Nullable(inner) | TypeNode::Array(inner) => {
            node_uses_list(inner)
        }
        TypeNode::Tuple(items) => items.iter().any(node_uses_list),
        TypeNode::LocalRef { args, .. } => args.iter().any(node_uses_list),
        TypeNode::ExternalRef(ext) => ext.args.iter().any(node_uses_list),
    }
}
