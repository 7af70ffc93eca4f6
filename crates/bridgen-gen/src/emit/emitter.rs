//! Output module assembly.

use bridgen_core::utils::to_pascal_case;

use crate::convert::Support;
use crate::resolve::PublishedTables;
use crate::translate::{ImportSet, NameTable};
use crate::Config;

/// Everything assembly needs; all pieces were produced by earlier passes.
pub struct EmitInput<'a> {
    pub config: &'a Config,
    pub module: &'a str,
    pub names: &'a NameTable,
    pub imports: &'a ImportSet,
    pub siblings: &'a PublishedTables,
    pub support: &'a Support,
    /// Rendered type declarations, extraction order.
    pub type_decls: &'a [String],
    /// Rendered value declarations, extraction order.
    pub value_decls: &'a [String],
}

/// Binding for the compiled implementation module (`./Module.bs`).
pub fn impl_binding(module: &str) -> String {
    format!("{}BS", to_pascal_case(module))
}

/// Assemble one output module. Section order: header, tag tables and
/// helpers, runtime requires, sibling imports, type declarations, value
/// declarations, with exactly one trailing newline.
pub fn emit_module(input: &EmitInput<'_>) -> String {
    let config = input.config;
    let mut out = String::new();

    out.push_str(&format!(
        "/* TypeScript file generated from {}{} by bridgen. */\n",
        input.module, config.source_ext
    ));
    if config.lint_pragmas {
        out.push_str("/* eslint-disable import/first */\n");
    }

    let mut paragraphs: Vec<String> = Vec::new();
    push_tables(input, &mut paragraphs);
    push_requires(input, &mut paragraphs);
    push_imports(input, &mut paragraphs);
    paragraphs.extend(input.type_decls.iter().cloned());
    paragraphs.extend(input.value_decls.iter().cloned());

    for paragraph in paragraphs {
        out.push('\n');
        out.push_str(&paragraph);
        out.push('\n');
    }

    // Exactly one trailing newline.
    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn push_tables(input: &EmitInput<'_>, paragraphs: &mut Vec<String>) {
    for (name, table) in &input.support.tables {
        if table.to_source {
            let entries: Vec<String> = table
                .nullary
                .iter()
                .map(|(index, case)| format!("\"{case}\": {index}"))
                .collect();
            paragraphs.push(format!(
                "const $$toSource_{name}: {{ [key: string]: any }} = {{{}}};",
                entries.join(", ")
            ));
        }
        if table.to_host {
            let entries: Vec<String> = table
                .nullary
                .iter()
                .map(|(index, case)| format!("\"{index}\": \"{case}\""))
                .collect();
            paragraphs.push(format!(
                "const $$toHost_{name}: {{ [key: string]: any }} = {{{}}};",
                entries.join(", ")
            ));
        }
    }

    if input.support.needs_map_list {
        paragraphs.push(
            "const $$mapList = (l: any, f: (_1:any) => any): any => l === 0 ? 0 : [f(l[0]), $$mapList(l[1], f)];"
                .to_string(),
        );
    }
}

fn push_requires(input: &EmitInput<'_>, paragraphs: &mut Vec<String>) {
    let config = input.config;
    let mut push = |binding: &str, specifier: String| {
        let require = format!("const {binding} = require('{specifier}');");
        if config.lint_pragmas {
            paragraphs.push(format!(
                "// tslint:disable-next-line:no-var-requires\n{require}"
            ));
        } else {
            paragraphs.push(require);
        }
    };

    if input.support.needs_block {
        push("Block", format!("{}/block.js", config.runtime_path));
    }
    if input.support.needs_curry {
        push("Curry", format!("{}/curry.js", config.runtime_path));
    }
    if !input.value_decls.is_empty() {
        push(
            &impl_binding(input.module),
            format!("./{}{}", input.module, config.impl_suffix),
        );
    }
}

fn push_imports(input: &EmitInput<'_>, paragraphs: &mut Vec<String>) {
    let config = input.config;
    let mut lines: Vec<(String, String, String)> = Vec::new();

    if input.imports.uses_list {
        let specifier = config.sibling_import(&config.pervasives_module);
        let ident = input.names.list_ident();
        let clause = if ident == "list" {
            "list".to_string()
        } else {
            format!("list as {ident}")
        };
        lines.push((
            specifier.clone(),
            "list".to_string(),
            format!("import {{{clause}}} from '{specifier}';"),
        ));
    }

    for (module, name) in &input.imports.externals {
        let specifier = config.sibling_import(module);
        let emitted = input
            .siblings
            .lookup(module, name)
            .map(|p| p.emitted_name.as_str())
            .unwrap_or(name);
        let alias = input
            .names
            .import_alias(module, name)
            .unwrap_or(name)
            .to_string();
        lines.push((
            specifier.clone(),
            emitted.to_string(),
            format!("import {{{emitted} as {alias}}} from '{specifier}';"),
        ));
    }

    lines.sort();
    paragraphs.extend(lines.into_iter().map(|(_, _, line)| line));
}
