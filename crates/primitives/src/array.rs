//! Array object
//!
//! An array holds its element objects in the variadic attribute `elements`.
//! Dataizing it dataizes each element in order and yields `Value::Array`.
//! Elements are dataized inside the same evaluation, so a cycle through an
//! element is still detected.

use once_cell::sync::Lazy;
use phi_core::{BindError, Value};
use phi_engine::{rule_fn, Object, Template, VALUE_ATTR};

/// Name of the element attribute
pub const ELEMENTS: &str = "elements";

static ARRAY: Lazy<Template> = Lazy::new(|| {
    Template::builder("array")
        .variadic(ELEMENTS)
        .cached(
            VALUE_ATTR,
            rule_fn(|owner, eval| {
                let items = eval.sequence(owner, ELEMENTS)?;
                let mut values = Vec::with_capacity(items.len());
                for item in &items {
                    values.push(eval.resolve(item)?);
                }
                Ok(Object::data(Value::Array(values)))
            }),
        )
        .build()
});

/// The `array` object
pub fn array() -> Template {
    ARRAY.clone()
}

/// Fresh array holding `items` in order
pub fn of<I>(items: I) -> Result<Object, BindError>
where
    I: IntoIterator<Item = Object>,
{
    let object = array().instantiate();
    for item in items {
        object.bind(ELEMENTS, item)?;
    }
    Ok(object)
}
