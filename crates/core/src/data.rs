//! Data containers
//!
//! A data container holds or computes exactly one primitive value and hands
//! it out through [`Data::take`].
//!
//! - [`Fixed`] wraps an already-known value; `take()` is pure and repeatable
//! - [`Once`] wraps a zero-argument producer and caches its first successful
//!   result in a [`MemoCell`]
//!
//! ## Rendering Policy of `Once`
//!
//! Rendering must not force an expensive or side-effecting producer unless
//! the caller opted in. A `Once` built with a non-empty placeholder renders
//! the placeholder until the value exists; an empty placeholder means
//! "render by forcing".

use crate::error::DataizationError;
use crate::memo::MemoCell;
use std::fmt;

/// Uniform access to a primitive value
pub trait Data<T>: Send + Sync {
    /// Take the data
    fn take(&self) -> Result<T, DataizationError>;
}

/// Container for an already-known value
#[derive(Debug, Clone, PartialEq)]
pub struct Fixed<T> {
    val: T,
}

impl<T> Fixed<T> {
    /// Wrap a value
    pub fn new(val: T) -> Self {
        Self { val }
    }

    /// Borrow the wrapped value
    pub fn get(&self) -> &T {
        &self.val
    }
}

impl<T: Clone + Send + Sync> Data<T> for Fixed<T> {
    fn take(&self) -> Result<T, DataizationError> {
        Ok(self.val.clone())
    }
}

impl<T: fmt::Display> fmt::Display for Fixed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.val.fmt(f)
    }
}

type Producer<T> = Box<dyn Fn() -> Result<T, DataizationError> + Send + Sync>;

/// Memoizing container: runs its producer until one result is published
///
/// Concurrent first calls may each run the producer; all of them return
/// the single published result. A failed run publishes nothing, so the
/// next `take()` retries.
pub struct Once<T> {
    src: Producer<T>,
    cell: MemoCell<T>,
    blank: String,
}

impl<T> Once<T> {
    /// Memoize `src`, rendering `blank` until computed (empty = force on render)
    pub fn new<F>(src: F, blank: impl Into<String>) -> Self
    where
        F: Fn() -> Result<T, DataizationError> + Send + Sync + 'static,
    {
        Self {
            src: Box::new(src),
            cell: MemoCell::new(),
            blank: blank.into(),
        }
    }

    /// Memoize another data container
    pub fn wrap<D>(data: D, blank: impl Into<String>) -> Self
    where
        D: Data<T> + 'static,
    {
        Self::new(move || data.take(), blank)
    }

    /// Whether the producer already published a value
    pub fn is_computed(&self) -> bool {
        self.cell.is_filled()
    }
}

impl<T: Clone + Send + Sync> Data<T> for Once<T> {
    fn take(&self) -> Result<T, DataizationError> {
        self.cell.get_or_try_init(|| (self.src)()).cloned()
    }
}

impl<T: Clone + Send + Sync + fmt::Display> fmt::Display for Once<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.blank.is_empty() {
            return match self.take() {
                Ok(val) => val.fmt(f),
                Err(err) => write!(f, "<{}>", err),
            };
        }
        match self.cell.get() {
            Some(val) => val.fmt(f),
            None => f.write_str(&self.blank),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Once<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once")
            .field("cell", &self.cell)
            .field("blank", &self.blank)
            .finish()
    }
}
