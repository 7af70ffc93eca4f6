//! Conversion plan construction.

use std::collections::HashMap;

use bridgen_core::types::{DeclBody, ModuleIr, TypeNode, ValueDecl};
use bridgen_core::{Interner, Symbol};

use crate::resolve::PublishedTables;
use crate::translate::{source_field_key, NameTable};

/// How a value reshapes when crossing the boundary. `Identity` means the
/// runtime shape is usable as-is in both directions.
#[derive(Debug, Clone, PartialEq)]
pub enum Plan {
    Identity,
    Variant(VariantPlan),
    Record(RecordPlan),
    Option(Box<Plan>),
    Nullable(Box<Plan>),
    List(Box<Plan>),
    Array(Box<Plan>),
    Tuple(Vec<Plan>),
    Function(FunctionPlan),
}

impl Plan {
    pub fn is_identity(&self) -> bool {
        matches!(self, Plan::Identity)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantPlan {
    /// Base identifier for the module-level tag tables (`$$toSource_<name>`).
    /// Derived from the declared type name, or from the declaration context
    /// for anonymous variants, so regeneration is byte-stable.
    pub table_name: String,
    /// Declaration order; a case's position in the *source* case list is its
    /// runtime tag index.
    pub cases: Vec<CasePlan>,
}

impl VariantPlan {
    pub fn nullary_cases(&self) -> impl Iterator<Item = &CasePlan> {
        self.cases.iter().filter(|c| c.payload.is_none())
    }

    pub fn payload_cases(&self) -> impl Iterator<Item = &CasePlan> {
        self.cases.iter().filter(|c| c.payload.is_some())
    }

    pub fn has_nullary(&self) -> bool {
        self.nullary_cases().next().is_some()
    }

    pub fn has_payload(&self) -> bool {
        self.payload_cases().next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CasePlan {
    pub name: String,
    /// Runtime tag index: the case's zero-based position in the declared
    /// case list. Load-bearing; never derived from name order.
    pub index: usize,
    pub payload: Option<Plan>,
    /// `Some(n)` when the payload is an n-ary tuple (the runtime block
    /// carries n cells instead of one).
    pub tuple_arity: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordPlan {
    pub fields: Vec<FieldPlan>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldPlan {
    pub host_name: String,
    /// Runtime object key on the source side (reserved words get `_`).
    pub source_key: String,
    pub plan: Plan,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionPlan {
    pub params: Vec<ParamPlan>,
    pub ret: Box<Plan>,
    /// The host call site groups arguments into one record.
    pub grouped: bool,
    pub curried: bool,
}

impl FunctionPlan {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamPlan {
    /// Host record key for grouped calls (`label`, or `_1`-style position).
    pub key: String,
    pub plan: Plan,
    pub optional: bool,
}

/// Everything plan construction needs to resolve names and references.
pub struct PlanCtx<'a> {
    pub interner: &'a Interner,
    pub names: &'a NameTable,
    pub module: &'a ModuleIr,
    pub siblings: &'a PublishedTables,
}

/// Build the conversion plan for one exported value.
///
/// Errors carry the unsupported shape description; the caller reports the
/// diagnostic and skips the export. Conversion never fails at runtime.
pub fn plan_value(value: &ValueDecl, ctx: &PlanCtx<'_>) -> Result<Plan, String> {
    let Some(node) = value.body.node() else {
        return Err("declaration was skipped".to_string());
    };
    let ctx_name = ctx
        .names
        .emitted_name(ctx.interner.resolve(value.name))
        .to_string();
    let mut planner = Planner {
        ctx,
        visiting: Vec::new(),
    };
    let scope = ctx.module.name.clone();
    planner.plan(node, &scope, &ctx_name)
}

struct Planner<'a, 'b> {
    ctx: &'b PlanCtx<'a>,
    /// `Module.type` keys currently being inlined; re-entry means the type
    /// is recursive through a convertible position.
    visiting: Vec<String>,
}

impl Planner<'_, '_> {
    /// Plan a node. `scope` is the module whose namespace local references
    /// resolve in; `ctx_name` names anonymous variants for table idents.
    fn plan(&mut self, node: &TypeNode, scope: &str, ctx_name: &str) -> Result<Plan, String> {
        match node {
            TypeNode::Primitive(_) | TypeNode::TypeParam(_) => Ok(Plan::Identity),

            TypeNode::Option(inner) => {
                let inner = self.plan(inner, scope, ctx_name)?;
                if inner.is_identity() {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::Option(Box::new(inner)))
                }
            }

            // Nullable always normalizes null/undefined, even for identity
            // element types.
            TypeNode::Nullable(inner) => Ok(Plan::Nullable(Box::new(
                self.plan(inner, scope, ctx_name)?,
            ))),

            TypeNode::List(inner) => {
                let inner = self.plan(inner, scope, ctx_name)?;
                if inner.is_identity() {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::List(Box::new(inner)))
                }
            }

            TypeNode::Array(inner) => {
                let inner = self.plan(inner, scope, ctx_name)?;
                if inner.is_identity() {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::Array(Box::new(inner)))
                }
            }

            TypeNode::Tuple(items) => {
                let plans = items
                    .iter()
                    .map(|i| self.plan(i, scope, ctx_name))
                    .collect::<Result<Vec<_>, _>>()?;
                if plans.iter().all(Plan::is_identity) {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::Tuple(plans))
                }
            }

            TypeNode::Record(r) => {
                let mut fields = Vec::with_capacity(r.fields.len());
                for field in &r.fields {
                    let host_name = self.ctx.interner.resolve(field.name).to_string();
                    let source_key = source_field_key(&host_name);
                    let field_ctx = format!("{ctx_name}_{host_name}");
                    fields.push(FieldPlan {
                        plan: self.plan(&field.ty, scope, &field_ctx)?,
                        host_name,
                        source_key,
                        optional: field.optional,
                    });
                }
                let renames = fields.iter().any(|f| f.host_name != f.source_key);
                if !renames && fields.iter().all(|f| f.plan.is_identity()) {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::Record(RecordPlan { fields }))
                }
            }

            TypeNode::Variant(v) => {
                let mut cases = Vec::with_capacity(v.cases.len());
                for (index, case) in v.cases.iter().enumerate() {
                    let name = self.ctx.interner.resolve(case.name).to_string();
                    let tuple_arity = match &case.payload {
                        Some(TypeNode::Tuple(items)) => Some(items.len()),
                        _ => None,
                    };
                    let payload = match &case.payload {
                        Some(p) => Some(self.plan(p, scope, &format!("{ctx_name}_{name}"))?),
                        None => None,
                    };
                    cases.push(CasePlan {
                        name,
                        index,
                        payload,
                        tuple_arity,
                    });
                }
                Ok(Plan::Variant(VariantPlan {
                    table_name: ctx_name.to_string(),
                    cases,
                }))
            }

            TypeNode::Function(f) => {
                let grouped = f.is_grouped();
                let mut params = Vec::with_capacity(f.params.len());
                for (i, p) in f.params.iter().enumerate() {
                    let key = match p.label {
                        Some(label) => self.ctx.interner.resolve(label).to_string(),
                        None => format!("_{}", i + 1),
                    };
                    params.push(ParamPlan {
                        plan: self.plan(&p.ty, scope, &format!("{ctx_name}_arg{}", i + 1))?,
                        key,
                        optional: p.optional,
                    });
                }
                let ret = self.plan(&f.ret, scope, &format!("{ctx_name}_ret"))?;

                let all_identity =
                    params.iter().all(|p| p.plan.is_identity()) && ret.is_identity();
                let needs_curry_wrapper = f.curried && f.arity() > 1;
                if !grouped && !needs_curry_wrapper && all_identity {
                    Ok(Plan::Identity)
                } else {
                    Ok(Plan::Function(FunctionPlan {
                        params,
                        ret: Box::new(ret),
                        grouped,
                        curried: f.curried,
                    }))
                }
            }

            TypeNode::LocalRef { name, args } => {
                let name_str = self.ctx.interner.resolve(*name).to_string();
                self.plan_ref(scope, &name_str, args)
            }

            TypeNode::ExternalRef(ext) => {
                let module = self.ctx.interner.resolve(ext.module).to_string();
                let name_str = self.ctx.interner.resolve(ext.name).to_string();
                self.plan_ref(&module, &name_str, &ext.args)
            }
        }
    }

    /// Inline a named type's body (local or published) and plan it.
    fn plan_ref(&mut self, scope: &str, name: &str, args: &[TypeNode]) -> Result<Plan, String> {
        let key = format!("{scope}.{name}");
        if self.visiting.contains(&key) {
            return Err(format!("recursive type `{name}` in convertible position"));
        }

        let (params, body, table_name) = self.lookup(scope, name)?;
        let DeclBody::Ok(node) = body else {
            return Err(format!("reference to skipped type `{name}`"));
        };

        let node = if params.is_empty() {
            node.clone()
        } else {
            let map: HashMap<Symbol, TypeNode> =
                params.iter().copied().zip(args.iter().cloned()).collect();
            node.substitute(&map)
        };

        self.visiting.push(key);
        let plan = self.plan(&node, scope, &table_name);
        self.visiting.pop();
        plan
    }

    /// Resolve a named type in `scope`: the module being generated, or a
    /// sibling's published table. Returns (params, body, table ident base).
    fn lookup(&self, scope: &str, name: &str) -> Result<(Vec<Symbol>, &DeclBody, String), String> {
        if scope == self.ctx.module.name {
            let sym = self
                .ctx
                .interner
                .lookup(name)
                .ok_or_else(|| format!("unknown type `{name}`"))?;
            let decl = self
                .ctx
                .module
                .types
                .get(&sym)
                .ok_or_else(|| format!("unknown type `{name}`"))?;
            let table_name = self.ctx.names.emitted_name(name).to_string();
            return Ok((decl.params.clone(), &decl.body, table_name));
        }

        let published = self
            .ctx
            .siblings
            .lookup(scope, name)
            .ok_or_else(|| format!("external type `{scope}.{name}` is not available"))?;
        let table_name = format!("{scope}_{}", published.emitted_name);
        Ok((published.params.clone(), &published.body, table_name))
    }
}
