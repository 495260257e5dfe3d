//! Phi - execution core of an object-calculus runtime
//!
//! Programs are graphs of objects. An object is either a data leaf or an
//! instance of a template, whose attributes are free (bound once from
//! outside), variadic (bound positionally) or composite (computed from the
//! owner). Dataization resolves an object to a primitive value by following
//! its data attribute `Δ` or else its decoratee `φ`.
//!
//! # Quick Start
//!
//! ```ignore
//! use phi::{builtin, apply, dataize, DataType, Object, Value};
//!
//! let div = builtin("int.div").unwrap();
//! let object = apply(&div, [Object::data(84i64), Object::data(4i64), Object::data(3i64)])?;
//! assert_eq!(dataize(&object, DataType::Int)?, Value::Int(7));
//! ```
//!
//! # Architecture
//!
//! - `phi-core`: values, data containers, memo cells and errors
//! - `phi-engine`: templates, objects, attributes, dataization and config
//! - `phi-primitives`: built-in objects, operators and native coercion

pub use phi_core::*;
pub use phi_engine::*;
pub use phi_primitives::{apply, builtin, to_phi, ToPhi, BUILTIN_NAMES, OPERANDS};

/// Built-in object modules
pub mod primitives {
    pub use phi_primitives::{array, boolean, float, int, operator, text};
}
