//! Project facade: drives extraction, translation, conversion, and emission
//! for a set of modules in dependency order.

use bridgen_core::types::ModuleIr;
use bridgen_core::{parse_module, Interner, RawModule};

use crate::convert::{plan_value, CodeGen, PlanCtx};
use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};
use crate::emit::{emit_module, impl_binding, EmitInput};
use crate::extract::extract_module;
use crate::resolve::{check_refs, dependency_order, publish_module, ModuleTable, PublishedTables};
use crate::translate::{NameTable, Translator};
use crate::{Config, Error};

/// One generated binding module.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    pub module: String,
    pub file_name: String,
    pub text: String,
}

/// Result of a whole-project generation run.
///
/// Per-declaration skips are diagnostics; per-module structural failures are
/// in `failures`, and the modules that succeeded are still usable. A cycle
/// aborts the run before any output exists and never reaches this type.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    /// Successfully generated modules, in the order they were added.
    pub modules: Vec<GeneratedModule>,
    pub diagnostics: Diagnostics,
    /// Modules that produced no output, with the error that stopped them.
    pub failures: Vec<(String, Error)>,
}

impl BuildOutput {
    /// Everything generated, nothing skipped.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.diagnostics.has_errors()
    }

    /// Output exists but some exports or modules were skipped.
    pub fn is_partial(&self) -> bool {
        !self.is_clean()
    }
}

/// A generation run over a set of source modules. Owns the configuration,
/// the shared interner, and the published tables built up in dependency
/// order; discards all per-module state between module passes.
#[derive(Debug, Default)]
pub struct Project {
    config: Config,
    interner: Interner,
    raws: Vec<RawModule>,
}

impl Project {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interner: Interner::new(),
            raws: Vec::new(),
        }
    }

    pub fn add_module(&mut self, raw: RawModule) {
        self.raws.push(raw);
    }

    /// Add a module from its introspection JSON.
    pub fn add_module_json(&mut self, json: &str) -> crate::Result<()> {
        let raw = parse_module(json).map_err(|e| Error::MalformedInput {
            module: "<input>".to_string(),
            reason: e.to_string(),
        })?;
        self.raws.push(raw);
        Ok(())
    }

    /// Generate bindings for every added module.
    ///
    /// Returns `Err` only for build-fatal conditions (a reference cycle,
    /// detected before any output is produced). Per-module failures land in
    /// the output's `failures`; other modules are unaffected.
    pub fn generate(mut self) -> crate::Result<BuildOutput> {
        let mut diagnostics = Diagnostics::new();
        let mut failures: Vec<(String, Error)> = Vec::new();

        // Extract every module; a malformed dump fails only that module.
        let mut irs: Vec<ModuleIr> = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for raw in &self.raws {
            if !seen.insert(raw.name.clone()) {
                failures.push((
                    raw.name.clone(),
                    Error::MalformedInput {
                        module: raw.name.clone(),
                        reason: "duplicate module name".to_string(),
                    },
                ));
                continue;
            }
            match extract_module(raw, &mut self.interner) {
                Ok((ir, diag)) => {
                    diagnostics.extend(diag);
                    irs.push(ir);
                }
                Err(e) => failures.push((raw.name.clone(), e)),
            }
        }

        // Cycle detection happens before any output is written.
        let order = dependency_order(&irs, &self.interner)?;

        let mut tables = PublishedTables::new();
        let mut generated: Vec<(usize, GeneratedModule)> = Vec::new();

        for idx in order {
            let mut ir = irs[idx].clone();

            // Every referenced module must already be published: missing
            // modules and failed dependencies cascade here.
            let missing = ir
                .external_modules(&self.interner)
                .into_iter()
                .find(|m| !tables.contains_module(m))
                .map(|m| m.to_string());
            if let Some(module) = missing {
                failures.push((
                    ir.name.clone(),
                    Error::UnknownExternalModule {
                        referrer: ir.name.clone(),
                        module,
                    },
                ));
                continue;
            }

            let (output, table, diag) =
                generate_one(&mut ir, &self.interner, &self.config, &tables);
            diagnostics.extend(diag);
            tables.publish(ir.name.clone(), table);
            generated.push((idx, output));
        }

        generated.sort_by_key(|(idx, _)| *idx);
        Ok(BuildOutput {
            modules: generated.into_iter().map(|(_, m)| m).collect(),
            diagnostics,
            failures,
        })
    }
}

/// One module's pass: check references, assign names, render types, plan and
/// render values, assemble, and build the table to publish.
fn generate_one(
    ir: &mut ModuleIr,
    interner: &Interner,
    config: &Config,
    siblings: &PublishedTables,
) -> (GeneratedModule, ModuleTable, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    check_refs(ir, interner, siblings, &mut diagnostics);
    let ir = &*ir;

    let names = NameTable::build(ir, interner, &mut diagnostics);
    let mut translator = Translator::new(interner, &names);

    let type_decls: Vec<String> = ir
        .types
        .values()
        .filter_map(|decl| translator.render_type_decl(decl, config.export))
        .collect();

    let mut codegen = CodeGen::new();
    let mut value_decls = Vec::new();
    let binding = impl_binding(&ir.name);
    let ctx = PlanCtx {
        interner,
        names: &names,
        module: ir,
        siblings,
    };

    for value in &ir.values {
        let Some(node) = value.body.node() else {
            // Skipped at extraction or reference checking; already reported.
            continue;
        };
        let source_name = interner.resolve(value.name);

        match plan_value(value, &ctx) {
            Ok(plan) => {
                let ts_type = translator.ts_value_type(node);
                let emitted = names.emitted_name(source_name);
                value_decls.push(codegen.render_value(
                    emitted,
                    source_name,
                    &ts_type,
                    &binding,
                    &plan,
                    config.export,
                ));
            }
            Err(reason) => {
                diagnostics
                    .report(
                        DiagnosticKind::UnsupportedTypeKind,
                        Location::new(&ir.name, source_name),
                    )
                    .message(&reason)
                    .emit();
            }
        }
    }

    let imports = translator.into_imports();
    let text = emit_module(&EmitInput {
        config,
        module: &ir.name,
        names: &names,
        imports: &imports,
        siblings,
        support: &codegen.support,
        type_decls: &type_decls,
        value_decls: &value_decls,
    });

    let table = publish_module(ir, interner, &names);
    let output = GeneratedModule {
        module: ir.name.clone(),
        file_name: config.gen_file_name(&ir.name),
        text,
    };
    (output, table, diagnostics)
}
