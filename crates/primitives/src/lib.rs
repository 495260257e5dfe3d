//! Built-in objects for Phi
//!
//! Provides the standard objects every program can refer to by name:
//! - **Data objects**: `int`, `float`, `bool`, `bytes`, `string`, `char`,
//!   `regex`, each holding its primitive in the free attribute `Δ`
//! - **Operators**: `int.add`, `int.sub`, `int.mul`, `int.div`, `int.mod`,
//!   `float.add`, `float.sub`, `float.mul`, `float.div`, `bool.and`, `bool.or`
//! - **Arrays**: `array`, a sequence of element objects
//! - **Coercion**: [`ToPhi`], turning a host value into the matching object
//!
//! ## Operators
//!
//! Each operator takes its operands through the variadic attribute `x` and
//! folds them left to right with an [`ExprReduce`](phi_engine::ExprReduce):
//!
//! ```rust,ignore
//! use phi_primitives::{builtin, apply};
//!
//! let div = builtin("int.div").unwrap();
//! let object = apply(&div, [Object::data(84i64), Object::data(4i64), Object::data(3i64)])?;
//! assert_eq!(dataize(&object, DataType::Int)?, Value::Int(7));
//! ```
//!
//! ## Shared Templates
//!
//! Templates are built once per process and shared. Instantiating one always
//! yields an object with its own attribute storage, so two users of
//! `int.div` never observe each other's operands.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod boolean;
pub mod float;
pub mod int;
pub mod operator;
pub mod text;
pub mod to_phi;

pub use operator::{apply, OPERANDS};
pub use to_phi::{to_phi, ToPhi};

use phi_engine::Template;

/// Every name [`builtin`] resolves
pub const BUILTIN_NAMES: &[&str] = &[
    "int",
    "float",
    "bool",
    "bytes",
    "string",
    "char",
    "regex",
    "array",
    "int.add",
    "int.sub",
    "int.mul",
    "int.div",
    "int.mod",
    "float.add",
    "float.sub",
    "float.mul",
    "float.div",
    "bool.and",
    "bool.or",
];

/// Look up a built-in object by its qualified name
pub fn builtin(name: &str) -> Option<Template> {
    let template = match name {
        "int" => int::int(),
        "float" => float::float(),
        "bool" => boolean::boolean(),
        "bytes" => text::bytes(),
        "string" => text::string(),
        "char" => text::character(),
        "regex" => text::regex(),
        "array" => array::array(),
        "int.add" => int::add(),
        "int.sub" => int::sub(),
        "int.mul" => int::mul(),
        "int.div" => int::div(),
        "int.mod" => int::modulo(),
        "float.add" => float::add(),
        "float.sub" => float::sub(),
        "float.mul" => float::mul(),
        "float.div" => float::div(),
        "bool.and" => boolean::and(),
        "bool.or" => boolean::or(),
        _ => return None,
    };
    Some(template)
}
