//! Float object and its arithmetic
//!
//! IEEE-754 arithmetic, except that division rejects a zero divisor
//! (either sign) instead of producing an infinity or NaN.

use crate::operator::{nonzero_divisor, operator, OPERANDS};
use once_cell::sync::Lazy;
use phi_engine::{ExprReduce, Template, DATA_ATTR};

static FLOAT: Lazy<Template> = Lazy::new(|| Template::builder("float").free(DATA_ATTR).build());

static ADD: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("float.add", OPERANDS, |acc: f64, x: f64| acc + x))
});

static SUB: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("float.sub", OPERANDS, |acc: f64, x: f64| acc - x))
});

static MUL: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("float.mul", OPERANDS, |acc: f64, x: f64| acc * x))
});

static DIV: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::new(
        "float.div",
        OPERANDS,
        |acc: f64, x: f64| acc / x,
        nonzero_divisor::<f64>,
    ))
});

/// The `float` data object
pub fn float() -> Template {
    FLOAT.clone()
}

/// `float.add`
pub fn add() -> Template {
    ADD.clone()
}

/// `float.sub`
pub fn sub() -> Template {
    SUB.clone()
}

/// `float.mul`
pub fn mul() -> Template {
    MUL.clone()
}

/// `float.div`: zero divisors are rejected
pub fn div() -> Template {
    DIV.clone()
}
