//! Attribute family
//!
//! An object is a named bundle of attributes. Three variants exist, declared
//! on a template by [`AttrSpec`] and materialized per instance as [`Attribute`]:
//!
//! | Variant | Storage | Contract |
//! |---------|---------|----------|
//! | Free | write-once cell | `bind` once, `get` fails with `Unbound` before that |
//! | Variadic | ordered list of bound objects | positional `bind_at`, no gaps; sealed on first read |
//! | Composite | none, or a per-instance cache | computed from the owner by a [`Rule`] |
//!
//! The set is closed: every access site matches exhaustively.
//!
//! ## Caching
//!
//! A composite attribute does not cache by itself. Declaring it cached
//! (see [`AttrSpec::Composite`]) gives every instance its own `MemoCell`,
//! so the rule runs at most once per instance and the result never leaks
//! to another instance.

use crate::dataize::Evaluation;
use crate::object::Object;
use parking_lot::RwLock;
use phi_core::{BindError, DataizationError, MemoCell};
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Rule
// ============================================================================

/// Evaluation rule of a composite attribute
///
/// A rule reads the owner's other attributes (through `eval`, so nested
/// dataization is guarded) and returns the attribute's object. It must not
/// touch anything but the owner's own bindings.
pub trait Rule: Send + Sync {
    /// Compute the attribute for `owner`
    fn evaluate(&self, owner: &Object, eval: &mut Evaluation) -> Result<Object, DataizationError>;
}

/// Rule backed by a closure, see [`rule_fn`]
pub struct FnRule<F>(F);

/// Build a rule from a closure
pub fn rule_fn<F>(f: F) -> FnRule<F>
where
    F: Fn(&Object, &mut Evaluation) -> Result<Object, DataizationError> + Send + Sync,
{
    FnRule(f)
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Object, &mut Evaluation) -> Result<Object, DataizationError> + Send + Sync,
{
    fn evaluate(&self, owner: &Object, eval: &mut Evaluation) -> Result<Object, DataizationError> {
        (self.0)(owner, eval)
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Attribute declaration on a template
#[derive(Clone)]
pub enum AttrSpec {
    /// Settable once per instance
    Free,
    /// Ordered free attributes bound positionally
    Variadic,
    /// Computed by `rule`; memoized per instance when `cached`
    Composite {
        /// Evaluation rule
        rule: Arc<dyn Rule>,
        /// Memoize the result per instance
        cached: bool,
    },
}

impl AttrSpec {
    /// Variant of this declaration
    pub fn kind(&self) -> AttrKind {
        match self {
            AttrSpec::Free => AttrKind::Free,
            AttrSpec::Variadic => AttrKind::Variadic,
            AttrSpec::Composite { .. } => AttrKind::Composite,
        }
    }
}

impl fmt::Debug for AttrSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrSpec::Free => f.write_str("Free"),
            AttrSpec::Variadic => f.write_str("Variadic"),
            AttrSpec::Composite { cached, .. } => {
                f.debug_struct("Composite").field("cached", cached).finish()
            }
        }
    }
}

/// Attribute variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKind {
    /// Free attribute
    Free,
    /// Variadic attribute
    Variadic,
    /// Composite attribute
    Composite,
}

// ============================================================================
// Instance storage
// ============================================================================

/// Per-instance attribute storage
pub enum Attribute {
    /// Free attribute
    Free(FreeAttr),
    /// Variadic attribute
    Variadic(VarargAttr),
    /// Composite attribute
    Composite(CompositeAttr),
}

impl Attribute {
    /// Fresh, unbound storage for a declaration
    pub(crate) fn fresh(spec: &AttrSpec) -> Self {
        match spec {
            AttrSpec::Free => Attribute::Free(FreeAttr::new()),
            AttrSpec::Variadic => Attribute::Variadic(VarargAttr::new()),
            AttrSpec::Composite { rule, cached } => {
                Attribute::Composite(CompositeAttr::new(Arc::clone(rule), *cached))
            }
        }
    }

    /// New storage holding the same bindings
    ///
    /// Bound objects are shared, the cells holding them are not. Variadic
    /// copies start unsealed; composite caches start empty.
    pub(crate) fn carry(&self) -> Self {
        match self {
            Attribute::Free(free) => Attribute::Free(match free.peek() {
                Some(value) => FreeAttr::bound(value.clone()),
                None => FreeAttr::new(),
            }),
            Attribute::Variadic(vararg) => {
                Attribute::Variadic(VarargAttr::with_items(vararg.items()))
            }
            Attribute::Composite(composite) => Attribute::Composite(CompositeAttr::new(
                Arc::clone(&composite.rule),
                composite.cache.is_some(),
            )),
        }
    }

    /// Variant of this attribute
    pub fn kind(&self) -> AttrKind {
        match self {
            Attribute::Free(_) => AttrKind::Free,
            Attribute::Variadic(_) => AttrKind::Variadic,
            Attribute::Composite(_) => AttrKind::Composite,
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Free(free) => free.fmt(f),
            Attribute::Variadic(vararg) => vararg.fmt(f),
            Attribute::Composite(composite) => composite.fmt(f),
        }
    }
}

/// Free attribute: unbound, or bound exactly once
pub struct FreeAttr {
    value: MemoCell<Object>,
}

impl FreeAttr {
    pub(crate) fn new() -> Self {
        Self {
            value: MemoCell::new(),
        }
    }

    pub(crate) fn bound(value: Object) -> Self {
        Self {
            value: MemoCell::filled(value),
        }
    }

    /// Whether a value has been bound
    pub fn is_bound(&self) -> bool {
        self.value.is_filled()
    }

    /// The bound value, if any
    pub fn peek(&self) -> Option<&Object> {
        self.value.get()
    }

    pub(crate) fn bind(&self, owner: &str, name: &str, value: Object) -> Result<(), BindError> {
        self.value.set(value).map_err(|_| BindError::AlreadyBound {
            object: owner.to_string(),
            attr: name.to_string(),
        })
    }

    pub(crate) fn get(&self, owner: &str, name: &str) -> Result<Object, DataizationError> {
        self.value
            .get()
            .cloned()
            .ok_or_else(|| DataizationError::Unbound {
                object: owner.to_string(),
                attr: name.to_string(),
            })
    }
}

impl fmt::Debug for FreeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => write!(f, "Free({})", value.label()),
            None => f.write_str("Free(<unbound>)"),
        }
    }
}

struct VarargState {
    items: Vec<Object>,
    sealed: bool,
}

/// Variadic attribute: positional free slots, no gaps
pub struct VarargAttr {
    state: RwLock<VarargState>,
}

impl VarargAttr {
    pub(crate) fn new() -> Self {
        Self::with_items(Vec::new())
    }

    fn with_items(items: Vec<Object>) -> Self {
        Self {
            state: RwLock::new(VarargState {
                items,
                sealed: false,
            }),
        }
    }

    /// Number of bound positions
    pub fn len(&self) -> usize {
        self.state.read().items.len()
    }

    /// Whether no position is bound
    pub fn is_empty(&self) -> bool {
        self.state.read().items.is_empty()
    }

    /// Whether a dataization already read the sequence
    pub fn is_sealed(&self) -> bool {
        self.state.read().sealed
    }

    /// Snapshot of the bound objects, without sealing
    pub fn items(&self) -> Vec<Object> {
        self.state.read().items.clone()
    }

    pub(crate) fn bind_at(
        &self,
        owner: &str,
        name: &str,
        index: usize,
        value: Object,
    ) -> Result<(), BindError> {
        let mut state = self.state.write();
        if state.sealed {
            return Err(BindError::Sealed {
                attr: name.to_string(),
            });
        }
        let len = state.items.len();
        if index < len {
            return Err(BindError::AlreadyBound {
                object: owner.to_string(),
                attr: format!("{}[{}]", name, index),
            });
        }
        if index > len {
            return Err(BindError::PositionGap {
                attr: name.to_string(),
                index,
                len,
            });
        }
        state.items.push(value);
        Ok(())
    }

    /// Bind the next free position, returning its index
    pub(crate) fn push(&self, name: &str, value: Object) -> Result<usize, BindError> {
        let mut state = self.state.write();
        if state.sealed {
            return Err(BindError::Sealed {
                attr: name.to_string(),
            });
        }
        state.items.push(value);
        Ok(state.items.len() - 1)
    }

    /// Seal the sequence and return it
    pub(crate) fn sequence(&self) -> Vec<Object> {
        let mut state = self.state.write();
        state.sealed = true;
        state.items.clone()
    }
}

impl fmt::Debug for VarargAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        let labels: Vec<String> = state.items.iter().map(|item| item.label()).collect();
        f.debug_struct("Variadic")
            .field("items", &labels)
            .field("sealed", &state.sealed)
            .finish()
    }
}

/// Composite attribute: computed from the owner
pub struct CompositeAttr {
    rule: Arc<dyn Rule>,
    cache: Option<MemoCell<Object>>,
}

impl CompositeAttr {
    pub(crate) fn new(rule: Arc<dyn Rule>, cached: bool) -> Self {
        Self {
            rule,
            cache: cached.then(MemoCell::new),
        }
    }

    /// Whether results are memoized for this instance
    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Whether a memoized result exists
    pub fn is_computed(&self) -> bool {
        self.cache.as_ref().map_or(false, MemoCell::is_filled)
    }

    pub(crate) fn evaluate(
        &self,
        owner: &Object,
        eval: &mut Evaluation,
    ) -> Result<Object, DataizationError> {
        match &self.cache {
            Some(cache) => cache
                .get_or_try_init(|| self.rule.evaluate(owner, eval))
                .cloned(),
            None => self.rule.evaluate(owner, eval),
        }
    }
}

impl fmt::Debug for CompositeAttr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("cached", &self.is_cached())
            .field("computed", &self.is_computed())
            .finish()
    }
}
