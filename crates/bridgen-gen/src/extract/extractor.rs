//! Lowering from the raw deserialization layer into the type graph.

use std::collections::{HashMap, HashSet};

use bridgen_core::types::{
    Case, DeclBody, ExternalRef, Field, FunctionType, ModuleIr, Param, Primitive, RecordType,
    TypeDecl, TypeNode, ValueDecl, VariantType,
};
use bridgen_core::utils::is_valid_ident;
use bridgen_core::{Interner, RawCase, RawDecl, RawField, RawModule, RawParam, RawType};

use crate::diagnostics::{DiagnosticKind, Diagnostics, Location};
use crate::{Error, PassResult};

/// Why a single type expression failed to lower.
enum LowerError {
    /// No host encoding exists; the declaration is skipped with a diagnostic.
    Unsupported(String),
    /// The dump itself is inconsistent; the whole module is rejected.
    Malformed(String),
}

/// Extract one module's type graph from its introspection dump.
///
/// Unsupported declarations keep their slot in the graph (with a marker) so
/// sibling lookups and ordering stay stable; they are reported and omitted
/// from emission. Structural inconsistencies reject the whole module.
pub fn extract_module(raw: &RawModule, interner: &mut Interner) -> PassResult<ModuleIr> {
    if !is_valid_ident(&raw.name) {
        return Err(malformed(&raw.name, "module name is not a valid identifier"));
    }

    // Pre-pass: local type names and their parameter counts, for `ref`
    // validation (forward references are legal).
    let mut type_params: HashMap<&str, usize> = HashMap::new();
    let mut value_names: HashSet<&str> = HashSet::new();
    for decl in &raw.declarations {
        match decl {
            RawDecl::Type { name, params, .. } => {
                if type_params.insert(name, params.len()).is_some() {
                    return Err(malformed(&raw.name, &format!("duplicate type `{name}`")));
                }
            }
            RawDecl::Value { name, .. } => {
                if !value_names.insert(name) {
                    return Err(malformed(&raw.name, &format!("duplicate value `{name}`")));
                }
            }
        }
    }

    let mut diagnostics = Diagnostics::new();
    let mut module = ModuleIr {
        name: raw.name.clone(),
        ..ModuleIr::default()
    };

    for decl in &raw.declarations {
        if !is_valid_ident(decl.name()) {
            return Err(malformed(
                &raw.name,
                &format!("declaration name `{}` is not a valid identifier", decl.name()),
            ));
        }

        match decl {
            RawDecl::Type { name, params, def } => {
                let ctx = Ctx {
                    module: &raw.name,
                    type_params: &type_params,
                    bound: params,
                };
                let body = lower_decl(def, &ctx, interner, name, &raw.name, &mut diagnostics)?;
                let name_sym = interner.intern(name);
                let params = params.iter().map(|p| interner.intern(p)).collect();
                module.types.insert(
                    name_sym,
                    TypeDecl {
                        name: name_sym,
                        params,
                        body,
                    },
                );
            }
            RawDecl::Value { name, type_, arity } => {
                let ctx = Ctx {
                    module: &raw.name,
                    type_params: &type_params,
                    bound: &[],
                };
                let body = lower_decl(type_, &ctx, interner, name, &raw.name, &mut diagnostics)?;

                if let Some(declared) = arity {
                    check_arity(&raw.name, name, &body, *declared as usize)?;
                }

                module.values.push(ValueDecl {
                    name: interner.intern(name),
                    body,
                });
            }
        }
    }

    Ok((module, diagnostics))
}

fn check_arity(module: &str, name: &str, body: &DeclBody, declared: usize) -> Result<(), Error> {
    let Some(node) = body.node() else {
        return Ok(());
    };
    match node {
        TypeNode::Function(f) if f.arity() == declared => Ok(()),
        TypeNode::Function(f) => Err(malformed(
            module,
            &format!(
                "value `{name}` declares arity {declared} but its type has {} parameters",
                f.arity()
            ),
        )),
        _ if declared == 0 => Ok(()),
        _ => Err(malformed(
            module,
            &format!("value `{name}` declares arity {declared} but is not a function"),
        )),
    }
}

fn lower_decl(
    raw: &RawType,
    ctx: &Ctx<'_>,
    interner: &mut Interner,
    decl_name: &str,
    module_name: &str,
    diagnostics: &mut Diagnostics,
) -> Result<DeclBody, Error> {
    match lower(raw, ctx, interner) {
        Ok(node) => Ok(DeclBody::Ok(node)),
        Err(LowerError::Unsupported(shape)) => {
            diagnostics
                .report(
                    DiagnosticKind::UnsupportedTypeKind,
                    Location::new(module_name, decl_name),
                )
                .message(&shape)
                .emit();
            Ok(DeclBody::Unsupported { shape })
        }
        Err(LowerError::Malformed(reason)) => Err(malformed(
            module_name,
            &format!("{decl_name}: {reason}"),
        )),
    }
}

struct Ctx<'a> {
    module: &'a str,
    type_params: &'a HashMap<&'a str, usize>,
    /// Type parameters bound by the enclosing declaration.
    bound: &'a [String],
}

fn lower(raw: &RawType, ctx: &Ctx<'_>, interner: &mut Interner) -> Result<TypeNode, LowerError> {
    match raw {
        RawType::Prim { name } => Primitive::from_name(name)
            .map(TypeNode::Primitive)
            .ok_or_else(|| LowerError::Unsupported(format!("primitive `{name}`"))),

        RawType::Variant { unboxed: true, .. } => {
            Err(LowerError::Unsupported("unboxed variant".to_string()))
        }
        RawType::Variant {
            cases,
            unboxed: false,
        } => lower_variant(cases, ctx, interner),

        RawType::Record { fields } => lower_record(fields, ctx, interner),

        RawType::Fn {
            params,
            ret,
            curried,
        } => {
            let params = params
                .iter()
                .map(|p| lower_param(p, ctx, interner))
                .collect::<Result<Vec<_>, _>>()?;
            let ret = Box::new(lower(ret, ctx, interner)?);
            Ok(TypeNode::Function(FunctionType {
                params,
                ret,
                curried: *curried,
            }))
        }

        RawType::Option { inner } => Ok(TypeNode::Option(Box::new(lower(inner, ctx, interner)?))),
        RawType::Nullable { inner } => {
            Ok(TypeNode::Nullable(Box::new(lower(inner, ctx, interner)?)))
        }
        RawType::List { inner } => Ok(TypeNode::List(Box::new(lower(inner, ctx, interner)?))),
        RawType::Array { inner } => Ok(TypeNode::Array(Box::new(lower(inner, ctx, interner)?))),

        RawType::Tuple { items } => {
            if items.len() < 2 {
                return Err(LowerError::Malformed(
                    "tuple with fewer than two items".to_string(),
                ));
            }
            let items = items
                .iter()
                .map(|i| lower(i, ctx, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeNode::Tuple(items))
        }

        RawType::Param { name } => {
            if !ctx.bound.iter().any(|p| p == name) {
                return Err(LowerError::Malformed(format!(
                    "unbound type parameter `{name}`"
                )));
            }
            Ok(TypeNode::TypeParam(interner.intern(name)))
        }

        RawType::Ref { name, args } => {
            let Some(&param_count) = ctx.type_params.get(name.as_str()) else {
                return Err(LowerError::Malformed(format!(
                    "reference to undeclared type `{name}`"
                )));
            };
            if args.len() != param_count {
                return Err(LowerError::Malformed(format!(
                    "`{name}` takes {param_count} type arguments, got {}",
                    args.len()
                )));
            }
            let args = args
                .iter()
                .map(|a| lower(a, ctx, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeNode::LocalRef {
                name: interner.intern(name),
                args,
            })
        }

        RawType::External { module, name, args } => {
            if module == ctx.module {
                return Err(LowerError::Malformed(format!(
                    "`{name}` references the module itself as external"
                )));
            }
            let args = args
                .iter()
                .map(|a| lower(a, ctx, interner))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(TypeNode::ExternalRef(ExternalRef {
                module: interner.intern(module),
                name: interner.intern(name),
                args,
            }))
        }

        RawType::Gadt { feature } => Err(LowerError::Unsupported(match feature {
            Some(f) => format!("GADT constructor ({f})"),
            None => "GADT constructor".to_string(),
        })),
    }
}

fn lower_variant(
    cases: &[RawCase],
    ctx: &Ctx<'_>,
    interner: &mut Interner,
) -> Result<TypeNode, LowerError> {
    if cases.is_empty() {
        return Err(LowerError::Malformed("variant with no cases".to_string()));
    }

    let mut seen = HashSet::new();
    let mut lowered = Vec::with_capacity(cases.len());
    for case in cases {
        if !is_valid_ident(&case.name) {
            return Err(LowerError::Malformed(format!(
                "case name `{}` is not a valid identifier",
                case.name
            )));
        }
        if !seen.insert(case.name.as_str()) {
            return Err(LowerError::Malformed(format!(
                "duplicate case `{}`",
                case.name
            )));
        }

        let payload = match case.payload.len() {
            0 => None,
            1 => Some(lower(&case.payload[0], ctx, interner)?),
            _ => Some(TypeNode::Tuple(
                case.payload
                    .iter()
                    .map(|p| lower(p, ctx, interner))
                    .collect::<Result<Vec<_>, _>>()?,
            )),
        };
        lowered.push(Case {
            name: interner.intern(&case.name),
            payload,
        });
    }

    Ok(TypeNode::Variant(VariantType { cases: lowered }))
}

fn lower_record(
    fields: &[RawField],
    ctx: &Ctx<'_>,
    interner: &mut Interner,
) -> Result<TypeNode, LowerError> {
    if fields.is_empty() {
        return Err(LowerError::Malformed("record with no fields".to_string()));
    }

    let mut seen = HashSet::new();
    let mut lowered = Vec::with_capacity(fields.len());
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(LowerError::Malformed(format!(
                "duplicate field `{}`",
                field.name
            )));
        }
        lowered.push(Field {
            name: interner.intern(&field.name),
            ty: lower(&field.type_, ctx, interner)?,
            optional: field.optional,
        });
    }

    Ok(TypeNode::Record(RecordType { fields: lowered }))
}

fn lower_param(
    param: &RawParam,
    ctx: &Ctx<'_>,
    interner: &mut Interner,
) -> Result<Param, LowerError> {
    Ok(Param {
        label: param.label.as_deref().map(|l| interner.intern(l)),
        ty: lower(&param.type_, ctx, interner)?,
        optional: param.optional,
    })
}

fn malformed(module: &str, reason: &str) -> Error {
    Error::MalformedInput {
        module: module.to_string(),
        reason: reason.to_string(),
    }
}
