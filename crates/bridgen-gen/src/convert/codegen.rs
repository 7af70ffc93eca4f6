//! Encode/decode expression rendering from conversion plans.
//!
//! The same plan renders both directions. `ToSource` (decode) reshapes a
//! host value for the runtime: tagged objects become blocks, string literals
//! become tag values, grouped arguments explode into the positional curried
//! sequence. `ToHost` (encode) is the inverse. Function arguments flip
//! direction.

use indexmap::IndexMap;

use super::plan::{CasePlan, FunctionPlan, Plan, RecordPlan, VariantPlan};

/// Rendering direction across the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Decode: host value → runtime value.
    ToSource,
    /// Encode: runtime value → host value.
    ToHost,
}

/// Nullary tag table usage for one variant type.
#[derive(Debug, Clone, Default)]
pub struct TableUse {
    pub to_source: bool,
    pub to_host: bool,
    /// (runtime tag index, case name) for every nullary case.
    pub nullary: Vec<(usize, String)>,
}

/// Support code a module's wrappers turned out to need. Collected during
/// rendering, in rendering order, so emission is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Support {
    /// Keyed by table ident base (the variant's context name).
    pub tables: IndexMap<String, TableUse>,
    pub needs_block: bool,
    pub needs_curry: bool,
    pub needs_map_list: bool,
}

/// Renders wrapper declarations and conversion expressions.
pub struct CodeGen {
    pub support: Support,
}

impl CodeGen {
    pub fn new() -> Self {
        Self {
            support: Support::default(),
        }
    }

    /// Render one exported value declaration: a direct re-export for
    /// identity plans, a converting wrapper otherwise.
    pub fn render_value(
        &mut self,
        name: &str,
        source_name: &str,
        ts_type: &str,
        impl_binding: &str,
        plan: &Plan,
        export: bool,
    ) -> String {
        let prefix = if export { "export " } else { "" };
        let source_expr = format!("{impl_binding}.{source_name}");

        match plan {
            Plan::Identity => format!("{prefix}const {name}: {ts_type} = {source_expr};"),
            Plan::Function(f) => {
                let wrapper = self.fn_to_host_toplevel(f, &source_expr);
                format!("{prefix}const {name}: {ts_type} = {wrapper};")
            }
            _ => {
                let converted = self.convert(plan, &source_expr, Direction::ToHost, 1);
                format!("{prefix}const {name}: {ts_type} = {converted};")
            }
        }
    }

    /// Render the conversion of `expr` along `plan`. `depth` disambiguates
    /// generated variable names in nested closures.
    pub fn convert(&mut self, plan: &Plan, expr: &str, dir: Direction, depth: usize) -> String {
        match plan {
            Plan::Identity => expr.to_string(),

            Plan::Option(inner) => format!(
                "{expr} === undefined ? undefined : {}",
                self.convert(inner, expr, dir, depth)
            ),

            Plan::Nullable(inner) => {
                let empty = match dir {
                    Direction::ToSource => "null",
                    Direction::ToHost => "undefined",
                };
                format!(
                    "{expr} == null ? {empty} : {}",
                    self.convert(inner, expr, dir, depth)
                )
            }

            Plan::List(inner) => {
                self.support.needs_map_list = true;
                let x = lambda_var(depth);
                format!(
                    "$$mapList({expr}, ({x}: any) => {})",
                    self.convert(inner, &x, dir, depth + 1)
                )
            }

            Plan::Array(inner) => {
                let x = lambda_var(depth);
                format!(
                    "{expr}.map(({x}: any) => {})",
                    self.convert(inner, &x, dir, depth + 1)
                )
            }

            Plan::Tuple(items) => {
                let items: Vec<String> = items
                    .iter()
                    .enumerate()
                    .map(|(i, p)| self.convert(p, &format!("{expr}[{i}]"), dir, depth))
                    .collect();
                format!("[{}]", items.join(", "))
            }

            Plan::Record(r) => self.convert_record(r, expr, dir, depth),
            Plan::Variant(v) => self.convert_variant(v, expr, dir, depth),
            Plan::Function(f) => self.convert_fn(f, expr, dir, depth),
        }
    }

    fn convert_record(&mut self, r: &RecordPlan, expr: &str, dir: Direction, depth: usize) -> String {
        let fields: Vec<String> = r
            .fields
            .iter()
            .map(|f| {
                let (read_key, write_key) = match dir {
                    Direction::ToSource => (&f.host_name, &f.source_key),
                    Direction::ToHost => (&f.source_key, &f.host_name),
                };
                let access = format!("{expr}.{read_key}");
                let value = if f.optional && !f.plan.is_identity() {
                    format!(
                        "{access} === undefined ? undefined : {}",
                        self.convert(&f.plan, &access, dir, depth)
                    )
                } else {
                    self.convert(&f.plan, &access, dir, depth)
                };
                format!("{write_key}:{value}")
            })
            .collect();
        format!("{{{}}}", fields.join(", "))
    }

    fn convert_variant(&mut self, v: &VariantPlan, expr: &str, dir: Direction, depth: usize) -> String {
        match (v.has_payload(), v.has_nullary()) {
            (false, true) => self.table_lookup(v, expr, dir),
            (true, false) => self.payload_chain(v, expr, dir, depth),
            (true, true) => {
                let chain = self.payload_chain(v, expr, dir, depth);
                let table = self.table_lookup(v, expr, dir);
                format!("typeof({expr}) === 'object' ? {chain} : {table}")
            }
            (false, false) => unreachable!("variant with no cases is rejected at extraction"),
        }
    }

    /// Nested ternary over the payload cases, in declaration order; the last
    /// case needs no test.
    fn payload_chain(&mut self, v: &VariantPlan, expr: &str, dir: Direction, depth: usize) -> String {
        let cases: Vec<&CasePlan> = v.payload_cases().collect();
        let mut out = String::new();
        let last = cases.len() - 1;
        for (k, case) in cases.iter().enumerate() {
            let arm = match dir {
                Direction::ToSource => self.decode_case(case, expr, depth),
                Direction::ToHost => self.encode_case(case, expr, depth),
            };
            if k < last {
                let test = match dir {
                    Direction::ToSource => format!("{expr}.tag===\"{}\"", case.name),
                    Direction::ToHost => format!("{expr}.tag==={}", case.index),
                };
                out.push_str(&format!("{test} ? {arm} : "));
            } else {
                out.push_str(&arm);
            }
        }
        out
    }

    /// Host tagged object → runtime block with the case's declared index.
    fn decode_case(&mut self, case: &CasePlan, expr: &str, depth: usize) -> String {
        self.support.needs_block = true;
        let payload = case.payload.as_ref().expect("payload case");
        let value = format!("{expr}.value");
        if case.tuple_arity.is_some() {
            // Tuple payloads are the block's cell array itself.
            let cells = self.convert(payload, &value, Direction::ToSource, depth);
            format!("Block.__({}, {cells})", case.index)
        } else {
            let cell = self.convert(payload, &value, Direction::ToSource, depth);
            format!("Block.__({}, [{cell}])", case.index)
        }
    }

    /// Runtime block → host tagged object, mapped back via the same ordered
    /// case list.
    fn encode_case(&mut self, case: &CasePlan, expr: &str, depth: usize) -> String {
        let payload = case.payload.as_ref().expect("payload case");
        let value = match case.tuple_arity {
            Some(n) => {
                // The block's cells are the tuple elements; rebuild the host
                // array cell by cell (the block carries its tag property).
                let cells: Vec<String> = (0..n)
                    .map(|i| {
                        let plan = match payload {
                            Plan::Tuple(items) => &items[i],
                            _ => &Plan::Identity,
                        };
                        self.convert(plan, &format!("{expr}[{i}]"), Direction::ToHost, depth)
                    })
                    .collect();
                format!("[{}]", cells.join(", "))
            }
            None => self.convert(payload, &format!("{expr}[0]"), Direction::ToHost, depth),
        };
        format!("{{tag: \"{}\", value: {value}}}", case.name)
    }

    fn table_lookup(&mut self, v: &VariantPlan, expr: &str, dir: Direction) -> String {
        let entry = self
            .support
            .tables
            .entry(v.table_name.clone())
            .or_insert_with(|| TableUse {
                nullary: v
                    .nullary_cases()
                    .map(|c| (c.index, c.name.clone()))
                    .collect(),
                ..TableUse::default()
            });
        let ident = match dir {
            Direction::ToSource => {
                entry.to_source = true;
                format!("$$toSource_{}", v.table_name)
            }
            Direction::ToHost => {
                entry.to_host = true;
                format!("$$toHost_{}", v.table_name)
            }
        };
        format!("{ident}[{expr}]")
    }

    /// Top-level wrapper for an exported function: multi-line, matching the
    /// emitted artifact's layout.
    fn fn_to_host_toplevel(&mut self, f: &FunctionPlan, source_expr: &str) -> String {
        let args = self.host_arg_decls(f, 0);
        let call = self.source_call(f, source_expr, 0);
        let ret = self.convert(&f.ret, "result", Direction::ToHost, 1);
        format!("function ({args}) {{\n  const result = {call};\n  return {ret}\n}}")
    }

    /// Function value crossing the boundary as part of a larger value
    /// (callback argument or returned closure). Single-line.
    fn convert_fn(&mut self, f: &FunctionPlan, expr: &str, dir: Direction, depth: usize) -> String {
        let res = result_var(depth);
        match dir {
            // Runtime function exposed to host callers.
            Direction::ToHost => {
                let args = self.host_arg_decls(f, depth);
                let call = self.source_call(f, expr, depth);
                let ret = self.convert(&f.ret, &res, Direction::ToHost, depth + 1);
                format!("function ({args}) {{ const {res} = {call}; return {ret} }}")
            }
            // Host function handed to the runtime: the runtime applies it
            // positionally, so accept the positional sequence and regroup
            // for the host.
            Direction::ToSource => {
                let decls: Vec<String> = (0..f.arity())
                    .map(|i| format!("{}: any", arg_var(i + 1, depth)))
                    .collect();
                let call_args: Vec<String> = f
                    .params
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        let arg = arg_var(i + 1, depth);
                        let converted = self.convert(&p.plan, &arg, Direction::ToHost, depth + 1);
                        if f.grouped {
                            format!("{}:{converted}", p.key)
                        } else {
                            converted
                        }
                    })
                    .collect();
                let call = if f.grouped {
                    format!("{expr}({{{}}})", call_args.join(", "))
                } else {
                    format!("{expr}({})", call_args.join(", "))
                };
                let ret = self.convert(&f.ret, &res, Direction::ToSource, depth + 1);
                format!(
                    "function ({}) {{ const {res} = {call}; return {ret} }}",
                    decls.join(", ")
                )
            }
        }
    }

    /// Host-facing parameter declarations: one grouped record argument, or
    /// the flat positional list.
    fn host_arg_decls(&self, f: &FunctionPlan, depth: usize) -> String {
        if f.grouped {
            format!("{}: any", arg_var(1, depth))
        } else {
            (0..f.arity())
                .map(|i| format!("{}: any", arg_var(i + 1, depth)))
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    /// Positional curried application of the source function, exploding a
    /// grouped host argument in declared parameter order.
    fn source_call(&mut self, f: &FunctionPlan, source_expr: &str, depth: usize) -> String {
        let args: Vec<String> = f
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let access = if f.grouped {
                    format!("{}.{}", arg_var(1, depth), p.key)
                } else {
                    arg_var(i + 1, depth)
                };
                if p.optional && !p.plan.is_identity() {
                    format!(
                        "{access} === undefined ? undefined : {}",
                        self.convert(&p.plan, &access, Direction::ToSource, depth + 1)
                    )
                } else {
                    self.convert(&p.plan, &access, Direction::ToSource, depth + 1)
                }
            })
            .collect();

        if f.curried && f.arity() > 1 {
            self.support.needs_curry = true;
            format!("Curry._{}({source_expr}, {})", f.arity(), args.join(", "))
        } else {
            format!("{source_expr}({})", args.join(", "))
        }
    }
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

fn arg_var(i: usize, depth: usize) -> String {
    if depth == 0 {
        format!("Arg{i}")
    } else {
        format!("Arg{i}{depth}")
    }
}

fn result_var(depth: usize) -> String {
    if depth == 0 {
        "result".to_string()
    } else {
        format!("result{depth}")
    }
}

fn lambda_var(depth: usize) -> String {
    if depth == 0 {
        "x".to_string()
    } else {
        format!("x{depth}")
    }
}
