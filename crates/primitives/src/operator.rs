//! Shared shape of operator templates
//!
//! Every built-in operator is a template with
//! - a variadic attribute `x` holding the operands, and
//! - a cached composite `φ` running an [`ExprReduce`] over `x`.

use phi_core::{BindError, Diagnostic, Primitive};
use phi_engine::{ExprReduce, Object, Template, VALUE_ATTR};

/// Name of the operand attribute of every operator
pub const OPERANDS: &str = "x";

/// Template for an operator backed by `reduce`
pub(crate) fn operator<T: Primitive>(reduce: ExprReduce<T>) -> Template {
    Template::builder(reduce.op().to_string())
        .variadic(reduce.param().to_string())
        .cached(VALUE_ATTR, reduce)
        .build()
}

/// Guard shared by the division operators
pub(crate) fn nonzero_divisor<T: PartialEq + Default>(x: &T) -> Result<(), Diagnostic> {
    if *x == T::default() {
        Err(Diagnostic::DivisionByZero)
    } else {
        Ok(())
    }
}

/// Fresh instance of `template` with `operands` bound to `x` in order
pub fn apply<I>(template: &Template, operands: I) -> Result<Object, BindError>
where
    I: IntoIterator<Item = Object>,
{
    let object = template.instantiate();
    for operand in operands {
        object.bind(OPERANDS, operand)?;
    }
    Ok(object)
}
