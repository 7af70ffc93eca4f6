//! Binding emission: output module assembly.
//!
//! Emission is a pure function of its inputs: re-running generation on an
//! unchanged module produces byte-identical output, which upstream
//! incremental builds rely on.

mod emitter;


pub use emitter::{emit_module, impl_binding, EmitInput};
