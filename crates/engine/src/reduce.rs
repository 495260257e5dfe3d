//! Reduction engine
//!
//! [`ExprReduce`] implements a primitive operator as a left fold over the
//! dataized elements of one variadic attribute:
//!
//! 1. Dataize every element, left to right, as `T`. The first failure aborts.
//! 2. No elements: `MissingOperands`.
//! 3. Seed with the first element. For each later element run the guard;
//!    a rejected element fails with `InvalidOperand` and the combinator is
//!    never applied to it. Otherwise fold it in.
//! 4. The accumulator, wrapped in a data leaf, is the result.
//!
//! The fold is left-associative: `sub(10, 3, 2)` is `(10 - 3) - 2`.

use crate::attribute::Rule;
use crate::dataize::Evaluation;
use crate::object::Object;
use phi_core::{DataizationError, Diagnostic, Primitive};
use smallvec::SmallVec;
use std::fmt;
use tracing::debug;

type Combinator<T> = Box<dyn Fn(T, T) -> T + Send + Sync>;
type Guard<T> = Box<dyn Fn(&T) -> Result<(), Diagnostic> + Send + Sync>;

/// Left fold over a variadic attribute, usable as a composite [`Rule`]
pub struct ExprReduce<T> {
    op: String,
    param: String,
    combine: Combinator<T>,
    guard: Guard<T>,
}

impl<T: Primitive> ExprReduce<T> {
    /// Fold `param` of the owner with `combine`, rejecting operands `guard` flags
    pub fn new<C, G>(op: impl Into<String>, param: impl Into<String>, combine: C, guard: G) -> Self
    where
        C: Fn(T, T) -> T + Send + Sync + 'static,
        G: Fn(&T) -> Result<(), Diagnostic> + Send + Sync + 'static,
    {
        Self {
            op: op.into(),
            param: param.into(),
            combine: Box::new(combine),
            guard: Box::new(guard),
        }
    }

    /// Fold without an operand guard
    pub fn unguarded<C>(op: impl Into<String>, param: impl Into<String>, combine: C) -> Self
    where
        C: Fn(T, T) -> T + Send + Sync + 'static,
    {
        Self::new(op, param, combine, |_: &T| Ok(()))
    }

    /// Operation name used in diagnostics
    pub fn op(&self) -> &str {
        &self.op
    }

    /// Name of the variadic attribute supplying operands
    pub fn param(&self) -> &str {
        &self.param
    }

    /// Fold already-dataized operands
    pub fn reduce<I>(&self, operands: I) -> Result<T, DataizationError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut operands = operands.into_iter();
        let mut acc = operands
            .next()
            .ok_or_else(|| DataizationError::MissingOperands {
                op: self.op.clone(),
            })?;
        for next in operands {
            (self.guard)(&next).map_err(|diagnostic| DataizationError::InvalidOperand {
                op: self.op.clone(),
                diagnostic,
            })?;
            acc = (self.combine)(acc, next);
        }
        Ok(acc)
    }
}

impl<T: Primitive> Rule for ExprReduce<T> {
    fn evaluate(&self, owner: &Object, eval: &mut Evaluation) -> Result<Object, DataizationError> {
        let items = eval.sequence(owner, &self.param)?;
        let mut operands: SmallVec<[T; 4]> = SmallVec::with_capacity(items.len());
        for item in &items {
            operands.push(eval.dataize_as::<T>(item)?);
        }
        let result = self.reduce(operands)?;
        debug!(op = %self.op, object = %owner.label(), operands = items.len(), "reduced");
        Ok(Object::data(result.into_value()))
    }
}

impl<T> fmt::Debug for ExprReduce<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprReduce")
            .field("op", &self.op)
            .field("param", &self.param)
            .finish()
    }
}
