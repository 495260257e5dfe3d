//! Boolean object and its logic

use crate::operator::{operator, OPERANDS};
use once_cell::sync::Lazy;
use phi_engine::{ExprReduce, Template, DATA_ATTR};

static BOOL: Lazy<Template> = Lazy::new(|| Template::builder("bool").free(DATA_ATTR).build());

// Every operand is dataized before folding, so neither operator short-circuits
static AND: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("bool.and", OPERANDS, |acc: bool, x: bool| acc && x))
});

static OR: Lazy<Template> = Lazy::new(|| {
    operator(ExprReduce::unguarded("bool.or", OPERANDS, |acc: bool, x: bool| acc || x))
});

/// The `bool` data object
pub fn boolean() -> Template {
    BOOL.clone()
}

/// `bool.and`
pub fn and() -> Template {
    AND.clone()
}

/// `bool.or`
pub fn or() -> Template {
    OR.clone()
}
