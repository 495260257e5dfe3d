//! Dataization
//!
//! Dataization resolves an object to a primitive [`Value`]:
//!
//! ```text
//! loop:
//!   data leaf        -> take() and stop
//!   has Δ attribute  -> continue with Δ
//!   has φ attribute  -> continue with φ
//!   otherwise        -> Undataizable
//! ```
//!
//! ## Guards
//!
//! - Every composite attribute being evaluated is marked in-progress,
//!   keyed by (object id, attribute name). Re-entering a marked attribute
//!   fails with `CyclicEvaluation`. Markers are cleared on success, on
//!   failure and on unwind.
//! - Revisiting an object along one Δ/φ chain is also a cycle.
//! - Nesting deeper than `max_depth` fails with `DepthExceeded`, so even a
//!   cycle the markers cannot see fails fast instead of overflowing the stack.
//!
//! Markers and the nesting depth are per thread, not per [`Evaluation`]: a
//! rule that starts a fresh dataization of its own owner (for example via
//! the crate-level `dataize`) still hits the markers and the depth count of
//! the evaluation that called it.
//!
//! The first failure aborts the whole dataization and is returned verbatim.
//!
//! ## Stack Budget
//!
//! Evaluation is plain recursion: one composite level costs roughly eight
//! frames, about 5 KiB of stack in an unoptimized build. The default
//! `max_depth` keeps a full-depth dataization well inside the 2 MiB stack
//! of a spawned thread. Raising it requires running dataization on a thread
//! with a proportionally larger stack.

use crate::attribute::Attribute;
use crate::config::EngineConfig;
use crate::object::Object;
use phi_core::{DataType, DataizationError, Primitive, Value};
use rustc_hash::FxHashSet;
use std::cell::{Cell, RefCell};
use tracing::{trace, warn};

/// Name of the data attribute of built-in primitive objects
pub const DATA_ATTR: &str = "Δ";

/// Name of the designated value attribute
pub const VALUE_ATTR: &str = "φ";

type Marker = (u64, String);

thread_local! {
    /// Composite attributes under evaluation on this thread, across every `Evaluation`
    static IN_PROGRESS: RefCell<FxHashSet<Marker>> = RefCell::new(FxHashSet::default());

    /// Nesting of composite evaluations on this thread
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// In-progress marker for one composite evaluation
///
/// Holding it counts one nesting level; dropping it clears the marker.
struct InProgress {
    marker: Marker,
}

impl InProgress {
    fn enter(owner: &Object, name: &str, limit: usize) -> Result<Self, DataizationError> {
        let marker = (owner.id().as_u64(), name.to_string());
        if IN_PROGRESS.with(|active| active.borrow().contains(&marker)) {
            warn!(object = %owner.label(), attr = name, "cyclic evaluation");
            return Err(DataizationError::CyclicEvaluation {
                object: owner.label(),
                attr: name.to_string(),
            });
        }
        if DEPTH.with(Cell::get) >= limit {
            return Err(depth_exceeded(limit));
        }
        IN_PROGRESS.with(|active| active.borrow_mut().insert(marker.clone()));
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Ok(Self { marker })
    }
}

impl Drop for InProgress {
    fn drop(&mut self) {
        IN_PROGRESS.with(|active| active.borrow_mut().remove(&self.marker));
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

fn depth_exceeded(limit: usize) -> DataizationError {
    warn!(limit, "dataization depth limit reached");
    DataizationError::DepthExceeded { limit }
}

/// State of one dataization in progress
#[derive(Debug)]
pub struct Evaluation {
    config: EngineConfig,
}

impl Evaluation {
    /// Start an evaluation with the given limits
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Current nesting depth of composite evaluations on this thread
    pub fn depth(&self) -> usize {
        DEPTH.with(Cell::get)
    }

    /// Dataize `object` and check the result has type `expected`
    pub fn dataize(
        &mut self,
        object: &Object,
        expected: DataType,
    ) -> Result<Value, DataizationError> {
        let value = self.resolve(object)?;
        let actual = value.data_type();
        if actual != expected {
            return Err(DataizationError::TypeMismatch { expected, actual });
        }
        Ok(value)
    }

    /// Dataize `object` into a host primitive
    pub fn dataize_as<T: Primitive>(&mut self, object: &Object) -> Result<T, DataizationError> {
        let value = self.resolve(object)?;
        let actual = value.data_type();
        T::from_value(value).ok_or(DataizationError::TypeMismatch {
            expected: T::TYPE,
            actual,
        })
    }

    /// Dataize `object` without a type check
    pub fn resolve(&mut self, object: &Object) -> Result<Value, DataizationError> {
        let mut current = object.clone();
        let mut chain: FxHashSet<u64> = FxHashSet::default();
        loop {
            if let Some(data) = current.take_data() {
                return data;
            }
            if !chain.insert(current.id().as_u64()) {
                warn!(object = %current.label(), "dataization chain revisits object");
                return Err(DataizationError::CyclicEvaluation {
                    object: current.label(),
                    attr: VALUE_ATTR.to_string(),
                });
            }
            if chain.len() > self.config.max_depth {
                return Err(depth_exceeded(self.config.max_depth));
            }
            let next = if current.has(DATA_ATTR) {
                DATA_ATTR
            } else if current.has(VALUE_ATTR) {
                VALUE_ATTR
            } else {
                return Err(DataizationError::Undataizable {
                    object: current.label(),
                });
            };
            if self.config.trace_dataization {
                trace!(
                    object = %current.label(),
                    attr = next,
                    depth = self.depth(),
                    "dataize step"
                );
            }
            current = self.attr(&current, next)?;
        }
    }

    /// Resolve attribute `name` of `owner` to an object
    ///
    /// Free attributes return their binding; composite attributes run their
    /// rule under the cycle and depth guards.
    pub fn attr(&mut self, owner: &Object, name: &str) -> Result<Object, DataizationError> {
        match owner.attr(name) {
            Some(Attribute::Free(free)) => free.get(&owner.label(), name),
            Some(Attribute::Composite(composite)) => {
                let _marker = InProgress::enter(owner, name, self.config.max_depth)?;
                composite.evaluate(owner, self)
            }
            Some(Attribute::Variadic(_)) => Err(DataizationError::Undataizable {
                object: format!("{}.{}", owner.label(), name),
            }),
            None => Err(DataizationError::UnknownAttribute {
                object: owner.label(),
                attr: name.to_string(),
            }),
        }
    }

    /// Seal variadic `name` of `owner` and return its elements
    pub fn sequence(&self, owner: &Object, name: &str) -> Result<Vec<Object>, DataizationError> {
        owner.sequence(name)
    }
}

/// Entry point for dataizing objects under one configuration
#[derive(Debug, Clone, Default)]
pub struct Dataizer {
    config: EngineConfig,
}

impl Dataizer {
    /// Dataizer with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Dataize `object`, expecting type `expected`
    pub fn dataize(&self, object: &Object, expected: DataType) -> Result<Value, DataizationError> {
        Evaluation::new(self.config.clone()).dataize(object, expected)
    }

    /// Dataize `object` into a host primitive
    pub fn dataize_as<T: Primitive>(&self, object: &Object) -> Result<T, DataizationError> {
        Evaluation::new(self.config.clone()).dataize_as(object)
    }

    /// Dataize `object` without a type check
    pub fn resolve(&self, object: &Object) -> Result<Value, DataizationError> {
        Evaluation::new(self.config.clone()).resolve(object)
    }
}
