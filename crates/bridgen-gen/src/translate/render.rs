//! Deterministic rendering of type expressions and declarations.

use std::collections::BTreeSet;

use bridgen_core::types::{DeclBody, FunctionType, RecordType, TypeDecl, TypeNode, VariantType};
use bridgen_core::Interner;

use super::NameTable;

/// Imports a module's rendered types turned out to need.
#[derive(Debug, Clone, Default)]
pub struct ImportSet {
    /// The pervasives `list` alias is referenced.
    pub uses_list: bool,
    /// Distinct (sibling module, source type name) pairs referenced.
    pub externals: BTreeSet<(String, String)>,
}

/// Renders host type text for type-graph nodes, accumulating the imports the
/// rendered text depends on.
pub struct Translator<'a> {
    interner: &'a Interner,
    names: &'a NameTable,
    imports: ImportSet,
}

impl<'a> Translator<'a> {
    pub fn new(interner: &'a Interner, names: &'a NameTable) -> Self {
        Self {
            interner,
            names,
            imports: ImportSet::default(),
        }
    }

    pub fn into_imports(self) -> ImportSet {
        self.imports
    }

    /// Render one exported type declaration, or `None` when the declaration
    /// was skipped.
    pub fn render_type_decl(&mut self, decl: &TypeDecl, export: bool) -> Option<String> {
        let DeclBody::Ok(node) = &decl.body else {
            return None;
        };

        let name = self
            .names
            .emitted_name(self.interner.resolve(decl.name))
            .to_string();
        let params = if decl.params.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = decl.params.iter().map(|p| self.interner.resolve(*p)).collect();
            format!("<{}>", names.join(","))
        };
        let prefix = if export { "export " } else { "" };

        let body = match node {
            TypeNode::Variant(v) => return Some(self.render_variant_decl(&name, &params, v, prefix)),
            TypeNode::Record(r) => self.render_record_multiline(r),
            _ => self.ts_type(node),
        };
        Some(format!("{prefix}type {name}{params} = {body};"))
    }

    /// Variant declarations list one case per line, string literals first
    /// kept in declaration order.
    fn render_variant_decl(
        &mut self,
        name: &str,
        params: &str,
        variant: &VariantType,
        prefix: &str,
    ) -> String {
        let mut out = format!("{prefix}type {name}{params} =\n");
        for (i, case) in variant.cases.iter().enumerate() {
            let rendered = self.render_case(case);
            if i == 0 {
                out.push_str(&format!("    {rendered}"));
            } else {
                out.push_str(&format!("\n  | {rendered}"));
            }
        }
        out.push(';');
        out
    }

    fn render_case(&mut self, case: &bridgen_core::types::Case) -> String {
        let name = self.interner.resolve(case.name);
        match &case.payload {
            None => format!("\"{name}\""),
            Some(payload) => {
                let value = self.ts_type(payload);
                format!("{{ tag: \"{name}\"; value: {value} }}")
            }
        }
    }

    fn render_record_multiline(&mut self, record: &RecordType) -> String {
        let mut out = String::from("{\n");
        let last = record.fields.len() - 1;
        for (i, field) in record.fields.iter().enumerate() {
            let name = self.interner.resolve(field.name);
            let opt = if field.optional { "?" } else { "" };
            let ty = self.ts_type(&field.ty);
            let sep = if i == last { "\n" } else { ";\n" };
            out.push_str(&format!("  readonly {name}{opt}: {ty}{sep}"));
        }
        out.push('}');
        out
    }

    /// Render a type expression in nested (inline) position.
    pub fn ts_type(&mut self, node: &TypeNode) -> String {
        match node {
            TypeNode::Primitive(p) => p.ts_name().to_string(),
            TypeNode::TypeParam(name) => self.interner.resolve(*name).to_string(),

            TypeNode::Option(inner) | TypeNode::Nullable(inner) => {
                format!("{} | undefined", self.maybe_paren(inner))
            }

            TypeNode::List(inner) => {
                self.imports.uses_list = true;
                format!("{}<{}>", self.names.list_ident(), self.ts_type(inner))
            }

            TypeNode::Array(inner) => format!("{}[]", self.maybe_paren(inner)),

            TypeNode::Tuple(items) => {
                let items: Vec<String> = items.iter().map(|i| self.ts_type(i)).collect();
                format!("[{}]", items.join(", "))
            }

            TypeNode::Variant(v) => {
                let cases: Vec<String> = v.cases.iter().map(|c| self.render_case(c)).collect();
                cases.join(" | ")
            }

            TypeNode::Record(r) => self.render_record_inline(r),

            TypeNode::Function(f) => self.render_fn_nested(f),

            TypeNode::LocalRef { name, args } => {
                let name = self
                    .names
                    .emitted_name(self.interner.resolve(*name))
                    .to_string();
                format!("{name}{}", self.render_type_args(args))
            }

            TypeNode::ExternalRef(ext) => {
                let module = self.interner.resolve(ext.module).to_string();
                let name = self.interner.resolve(ext.name).to_string();
                self.imports
                    .externals
                    .insert((module.clone(), name.clone()));
                let alias = self
                    .names
                    .import_alias(&module, &name)
                    .unwrap_or(&name)
                    .to_string();
                format!("{alias}{}", self.render_type_args(&ext.args))
            }
        }
    }

    /// Render the host type of an exported value. Top-level function types
    /// flatten: grouped parameters become one record argument, positional
    /// parameters become `(_1:T1, ..., _n:Tn)`.
    pub fn ts_value_type(&mut self, node: &TypeNode) -> String {
        let TypeNode::Function(f) = node else {
            return self.ts_type(node);
        };

        let ret = self.ts_type(&f.ret);
        if f.is_grouped() {
            let arg = self.render_grouped_param(f);
            format!("(_1:{arg}) => {ret}")
        } else {
            let params: Vec<String> = f
                .params
                .iter()
                .enumerate()
                .map(|(i, p)| format!("_{}:{}", i + 1, self.ts_type(&p.ty)))
                .collect();
            format!("({}) => {ret}", params.join(", "))
        }
    }

    /// Nested function types keep the literal curried arrow chain when
    /// positional; grouped parameters fold into one record argument.
    fn render_fn_nested(&mut self, f: &FunctionType) -> String {
        let ret = self.ts_type(&f.ret);
        if f.is_grouped() {
            let arg = self.render_grouped_param(f);
            return format!("(_1:{arg}) => {ret}");
        }
        if f.curried && f.arity() > 1 {
            let mut out = ret;
            for (i, p) in f.params.iter().enumerate().rev() {
                out = format!("(_{}:{}) => {}", i + 1, self.ts_type(&p.ty), out);
            }
            return out;
        }
        let params: Vec<String> = f
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| format!("_{}:{}", i + 1, self.ts_type(&p.ty)))
            .collect();
        format!("({}) => {ret}", params.join(", "))
    }

    fn render_grouped_param(&mut self, f: &FunctionType) -> String {
        let mut fields = Vec::with_capacity(f.params.len());
        for (i, p) in f.params.iter().enumerate() {
            let key = match p.label {
                Some(label) => self.interner.resolve(label).to_string(),
                None => format!("_{}", i + 1),
            };
            let opt = if p.optional { "?" } else { "" };
            fields.push(format!("readonly {key}{opt}: {}", self.ts_type(&p.ty)));
        }
        format!("{{ {} }}", fields.join("; "))
    }

    fn render_record_inline(&mut self, record: &RecordType) -> String {
        let fields: Vec<String> = record
            .fields
            .iter()
            .map(|f| {
                let name = self.interner.resolve(f.name);
                let opt = if f.optional { "?" } else { "" };
                format!("readonly {name}{opt}: {}", self.ts_type(&f.ty))
            })
            .collect();
        format!("{{ {} }}", fields.join("; "))
    }

    /// Parenthesize union and arrow types in positions where the suffix
    /// would bind wrong (`T[]`, `T | undefined`).
    fn maybe_paren(&mut self, node: &TypeNode) -> String {
        let rendered = self.ts_type(node);
        match node {
            TypeNode::Function(_)
            | TypeNode::Option(_)
            | TypeNode::Nullable(_)
            | TypeNode::Variant(_) => format!("({rendered})"),
            _ => rendered,
        }
    }

    fn render_type_args(&mut self, args: &[TypeNode]) -> String {
        if args.is_empty() {
            return String::new();
        }
        let args: Vec<String> = args.iter().map(|a| self.ts_type(a)).collect();
        format!("<{}>", args.join(","))
    }
}
