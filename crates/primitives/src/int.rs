//! Integer object and its arithmetic
//!
//! All arithmetic is 64-bit two's complement and wraps on overflow,
//! including `i64::MIN / -1`. Division truncates toward zero; the
//! remainder takes the sign of the dividend.

use crate::operator::{nonzero_divisor, operator, OPERANDS};
use once_cell::sync::Lazy;
use phi_core::Diagnostic;
use phi_engine::{ExprReduce, Template, DATA_ATTR};

static INT: Lazy<Template> = Lazy::new(|| Template::builder("int").free(DATA_ATTR).build());

static ADD: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("int.add", OPERANDS, |acc: i64, x: i64| {
        acc.wrapping_add(x)
    }))
});

static SUB: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("int.sub", OPERANDS, |acc: i64, x: i64| {
        acc.wrapping_sub(x)
    }))
});

static MUL: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("int.mul", OPERANDS, |acc: i64, x: i64| {
        acc.wrapping_mul(x)
    }))
});

static DIV: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::new(
        "int.div",
        OPERANDS,
        |acc: i64, x: i64| acc.wrapping_div(x),
        nonzero_divisor::<i64>,
    ))
});

static MOD: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::new(
        "int.mod",
        OPERANDS,
        |acc: i64, x: i64| acc.wrapping_rem(x),
        |x: &i64| {
            if *x == 0 {
                Err(Diagnostic::ModuloByZero)
            } else {
                Ok(())
            }
        },
    ))
});

/// The `int` data object
pub fn int() -> Template {
    INT.clone()
}

/// `int.add`: sum of all operands
pub fn add() -> Template {
    ADD.clone()
}

/// `int.sub`: first operand minus the rest, left to right
pub fn sub() -> Template {
    SUB.clone()
}

/// `int.mul`: product of all operands
pub fn mul() -> Template {
    MUL.clone()
}

/// `int.div`: first operand divided by the rest; zero divisors are rejected
pub fn div() -> Template {
    DIV.clone()
}

/// `int.mod`: remainder, left to right; zero moduli are rejected
pub fn modulo() -> Template {
    MOD.clone()
}
