//! Evaluation engine for Phi
//!
//! This crate owns the object graph and its evaluation:
//! - Template: reusable object definitions, instantiated into fresh objects
//! - Object: data leaves and template instances
//! - Attribute family: free, variadic and composite attributes
//! - Dataization: resolution of objects to primitives, with cycle and depth guards
//! - ExprReduce: generic left fold used to build primitive operators
//! - EngineConfig: limits loaded from `phi.toml`
//!
//! ## Boundary
//!
//! The packaging layer only needs the functions at the crate root:
//! [`instantiate`], [`bind`], [`bind_at`] and [`dataize`]. It hands in
//! templates and receives values or typed errors; nothing here knows about
//! source text or files other than the config.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod config;
pub mod dataize;
pub mod ident;
pub mod object;
pub mod reduce;
pub mod template;

pub use attribute::{rule_fn, AttrKind, AttrSpec, Attribute, FnRule, Rule};
pub use config::{ConfigError, EngineConfig, CONFIG_FILE_NAME, DEFAULT_MAX_DEPTH};
pub use dataize::{Dataizer, Evaluation, DATA_ATTR, VALUE_ATTR};
pub use ident::ObjectId;
pub use object::Object;
pub use reduce::ExprReduce;
pub use template::{Template, TemplateBuilder};

use phi_core::{BindError, DataType, DataizationError, Value};

/// Fresh instance of `template` with all free and variadic attributes unbound
pub fn instantiate(template: &Template) -> Object {
    template.instantiate()
}

/// Bind `value` to attribute `name` of `object`
pub fn bind(object: &Object, name: &str, value: Object) -> Result<(), BindError> {
    object.bind(name, value)
}

/// Bind `value` at position `index` of attribute `name` of `object`
pub fn bind_at(object: &Object, name: &str, index: usize, value: Object) -> Result<(), BindError> {
    object.bind_at(name, index, value)
}

/// Dataize `object` with the default configuration, expecting `expected`
pub fn dataize(object: &Object, expected: DataType) -> Result<Value, DataizationError> {
    Dataizer::default().dataize(object, expected)
}
