//! Value conversion: plans and encode/decode code generation.
//!
//! A [`Plan`] describes how a value's runtime shape differs between the
//! source and host representations. Plans are built once per exported value
//! and threaded explicitly through code generation; identity plans collapse
//! structurally so that untouched values are re-exported without a wrapper.
//!
//! Direction is a parameter of *rendering*, not of the plan: the same plan
//! renders decode (host → source) and encode (source → host) expressions,
//! and function arguments flip direction.

mod codegen;
mod plan;


pub use codegen::{CodeGen, Direction, Support, TableUse};
pub use plan::{plan_value, CasePlan, FieldPlan, FunctionPlan, ParamPlan, Plan, PlanCtx,
    RecordPlan, VariantPlan};
