//! Native-to-object coercion
//!
//! [`ToPhi`] turns a raw host value into the built-in object wrapping its
//! kind, with the raw value bound as that object's data attribute `Δ`:
//!
//! | Host type | Object |
//! |-----------|--------|
//! | `bool` | `bool` |
//! | `Vec<u8>` | `bytes` |
//! | `i64` | `int` |
//! | `String` | `string` |
//! | `char` | `char` |
//! | `f64` | `float` |
//! | `Regex` | `regex` |
//! | `Vec<Object>` | `array` (elements bound positionally) |
//!
//! Any other type fails with `UnsupportedDataType`. The object is built on
//! first request and memoized in a [`Once`]; later requests return the very
//! same object.

use crate::array;
use crate::boolean::boolean;
use crate::float::float;
use crate::int::int;
use crate::text::{bytes, character, regex, string};
use phi_core::{Data, DataizationError, Once, Regex, Value};
use phi_engine::{Object, Template, DATA_ATTR};
use std::any::Any;
use std::fmt;
use tracing::debug;

type Raw = Box<dyn Any + Send + Sync>;

/// Memoized coercion of one raw value
pub struct ToPhi {
    object: Once<Object>,
}

impl ToPhi {
    /// Prepare the coercion of `raw`; nothing is built until first use
    pub fn new<T: Any + Send + Sync>(raw: T) -> Self {
        let type_name = std::any::type_name::<T>();
        let raw: Raw = Box::new(raw);
        Self {
            object: Once::new(move || coerce(raw.as_ref(), type_name), ""),
        }
    }

    /// The coerced object, built on first call
    pub fn object(&self) -> Result<Object, DataizationError> {
        self.object.take()
    }
}

impl Data<Object> for ToPhi {
    fn take(&self) -> Result<Object, DataizationError> {
        self.object()
    }
}

impl fmt::Display for ToPhi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object.fmt(f)
    }
}

/// Coerce `raw` in one step, without memoization
pub fn to_phi<T: Any + Send + Sync>(raw: T) -> Result<Object, DataizationError> {
    ToPhi::new(raw).object()
}

fn coerce(raw: &(dyn Any + Send + Sync), type_name: &str) -> Result<Object, DataizationError> {
    let (template, value): (Template, Value) = if let Some(b) = raw.downcast_ref::<bool>() {
        (boolean(), Value::Bool(*b))
    } else if let Some(b) = raw.downcast_ref::<Vec<u8>>() {
        (bytes(), Value::Bytes(b.clone()))
    } else if let Some(i) = raw.downcast_ref::<i64>() {
        (int(), Value::Int(*i))
    } else if let Some(s) = raw.downcast_ref::<String>() {
        (string(), Value::String(s.clone()))
    } else if let Some(c) = raw.downcast_ref::<char>() {
        (character(), Value::Char(*c))
    } else if let Some(x) = raw.downcast_ref::<f64>() {
        (float(), Value::Float(*x))
    } else if let Some(re) = raw.downcast_ref::<Regex>() {
        (regex(), Value::Pattern(re.clone()))
    } else if let Some(items) = raw.downcast_ref::<Vec<Object>>() {
        let object = array::of(items.iter().cloned())?;
        debug!(object = %object.label(), elements = items.len(), "coerced array");
        return Ok(object);
    } else {
        return Err(DataizationError::UnsupportedDataType {
            type_name: type_name.to_string(),
        });
    };
    let object = template.instantiate();
    object.bind(DATA_ATTR, Object::data(value))?;
    debug!(object = %object.label(), "coerced");
    Ok(object)
}
