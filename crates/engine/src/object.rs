//! Objects: nodes of the object graph
//!
//! An [`Object`] is either
//! - a data leaf wrapping a primitive (eagerly via `Fixed`, or lazily via `Once`), or
//! - an instance of a [`Template`] holding its own attribute storage.
//!
//! Objects are reference-counted handles; cloning a handle does not copy
//! the instance. Use [`Template::instantiate`] for a fresh instance, or
//! [`Object::with`] to copy an instance and add one binding.
//!
//! ## Shape vs Bindings
//!
//! The attribute set of an instance is fixed by its template. Only the
//! bindings change, and each free attribute changes at most once.

use crate::attribute::{AttrKind, Attribute};
use crate::ident::ObjectId;
use crate::template::Template;
use phi_core::{BindError, Data, DataizationError, Fixed, Once, Value};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Name reported for data leaves
pub const DATA_LEAF_NAME: &str = "data";

/// Data held by a leaf object
enum DataLeaf {
    Fixed(Fixed<Value>),
    Lazy(Once<Value>),
}

impl DataLeaf {
    fn take(&self) -> Result<Value, DataizationError> {
        match self {
            DataLeaf::Fixed(data) => data.take(),
            DataLeaf::Lazy(data) => data.take(),
        }
    }
}

impl fmt::Display for DataLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataLeaf::Fixed(data) => data.fmt(f),
            DataLeaf::Lazy(data) => data.fmt(f),
        }
    }
}

enum Body {
    Data(DataLeaf),
    Composed {
        template: Template,
        attrs: Vec<Attribute>,
    },
}

struct ObjectInner {
    id: ObjectId,
    body: Body,
}

/// Handle to an object instance
#[derive(Clone)]
pub struct Object {
    inner: Arc<ObjectInner>,
}

impl Object {
    fn from_body(body: Body) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                id: ObjectId::next(),
                body,
            }),
        }
    }

    /// Data leaf holding an already-known value
    pub fn data(value: impl Into<Value>) -> Self {
        Self::from_body(Body::Data(DataLeaf::Fixed(Fixed::new(value.into()))))
    }

    /// Data leaf whose value is produced on first use
    pub fn lazy(data: Once<Value>) -> Self {
        Self::from_body(Body::Data(DataLeaf::Lazy(data)))
    }

    pub(crate) fn composed(template: Template, attrs: Vec<Attribute>) -> Self {
        Self::from_body(Body::Composed { template, attrs })
    }

    /// Identity of this instance
    pub fn id(&self) -> ObjectId {
        self.inner.id
    }

    /// Template name, or `data` for leaves
    pub fn name(&self) -> &str {
        match &self.inner.body {
            Body::Data(_) => DATA_LEAF_NAME,
            Body::Composed { template, .. } => template.name(),
        }
    }

    /// Diagnostic label: name and identity, e.g. `int.div#12`
    pub fn label(&self) -> String {
        format!("{}{}", self.name(), self.inner.id)
    }

    /// Template this object was instantiated from
    pub fn template(&self) -> Option<&Template> {
        match &self.inner.body {
            Body::Data(_) => None,
            Body::Composed { template, .. } => Some(template),
        }
    }

    /// Whether this object is a data leaf
    pub fn is_data(&self) -> bool {
        matches!(self.inner.body, Body::Data(_))
    }

    /// Whether both handles point at the same instance
    pub fn ptr_eq(a: &Object, b: &Object) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Value of a data leaf, `None` for composed objects or failed producers
    pub fn value(&self) -> Option<Value> {
        self.take_data().and_then(Result::ok)
    }

    pub(crate) fn take_data(&self) -> Option<Result<Value, DataizationError>> {
        match &self.inner.body {
            Body::Data(leaf) => Some(leaf.take()),
            Body::Composed { .. } => None,
        }
    }

    /// Attribute storage for `name`
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        match &self.inner.body {
            Body::Data(_) => None,
            Body::Composed { template, attrs } => template.position(name).map(|i| &attrs[i]),
        }
    }

    /// Whether the object defines `name`
    pub fn has(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Variant of attribute `name`
    pub fn kind_of(&self, name: &str) -> Option<AttrKind> {
        self.attr(name).map(Attribute::kind)
    }

    fn require(&self, name: &str) -> Result<&Attribute, BindError> {
        self.attr(name).ok_or_else(|| BindError::UnknownAttribute {
            object: self.label(),
            attr: name.to_string(),
        })
    }

    /// Bind `value` to attribute `name`
    ///
    /// Free attributes accept one binding. Variadic attributes take the
    /// value at their next free position.
    pub fn bind(&self, name: &str, value: Object) -> Result<(), BindError> {
        let label = self.label();
        match self.require(name)? {
            Attribute::Free(free) => free.bind(&label, name, value)?,
            Attribute::Variadic(vararg) => {
                vararg.push(name, value)?;
            }
            Attribute::Composite(_) => {
                return Err(BindError::NotBindable {
                    attr: name.to_string(),
                })
            }
        }
        debug!(object = %label, attr = name, "bound");
        Ok(())
    }

    /// Bind `value` at position `index` (0-based) of attribute `name`
    ///
    /// A free attribute behaves as a variadic one with a single position.
    pub fn bind_at(&self, name: &str, index: usize, value: Object) -> Result<(), BindError> {
        let label = self.label();
        match self.require(name)? {
            Attribute::Variadic(vararg) => vararg.bind_at(&label, name, index, value)?,
            Attribute::Free(free) => {
                if index > 0 {
                    return Err(BindError::PositionGap {
                        attr: name.to_string(),
                        index,
                        len: usize::from(free.is_bound()),
                    });
                }
                free.bind(&label, name, value)?
            }
            Attribute::Composite(_) => {
                return Err(BindError::NotBindable {
                    attr: name.to_string(),
                })
            }
        }
        debug!(object = %label, attr = name, index, "bound at position");
        Ok(())
    }

    /// Copy of this instance in new storage, carrying its current bindings
    ///
    /// Data leaves are immutable and are returned as the same handle.
    pub fn copy(&self) -> Object {
        match &self.inner.body {
            Body::Data(_) => self.clone(),
            Body::Composed { template, attrs } => {
                let attrs = attrs.iter().map(Attribute::carry).collect();
                Object::composed(template.clone(), attrs)
            }
        }
    }

    /// Copy of this instance with one more binding
    ///
    /// The receiver is left untouched; binds on either object afterwards
    /// never affect the other.
    pub fn with(&self, name: &str, value: Object) -> Result<Object, BindError> {
        // Validate against the receiver so data leaves report their own label
        self.require(name)?;
        let copy = self.copy();
        copy.bind(name, value)?;
        Ok(copy)
    }

    /// Seal variadic `name` and return its elements in order
    pub(crate) fn sequence(&self, name: &str) -> Result<Vec<Object>, DataizationError> {
        match self.attr(name) {
            Some(Attribute::Variadic(vararg)) => Ok(vararg.sequence()),
            Some(Attribute::Free(free)) => free.get(&self.label(), name).map(|item| vec![item]),
            Some(Attribute::Composite(_)) => Err(DataizationError::Undataizable {
                object: format!("{}.{}", self.label(), name),
            }),
            None => Err(DataizationError::UnknownAttribute {
                object: self.label(),
                attr: name.to_string(),
            }),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.body {
            Body::Data(leaf) => leaf.fmt(f),
            Body::Composed { template, .. } => write!(f, "{}{}", template.name(), self.inner.id),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner.body {
            Body::Data(leaf) => write!(f, "Object({}: {})", self.label(), leaf),
            Body::Composed { template, attrs } => {
                let mut s = f.debug_struct(&self.label());
                for ((name, _), attr) in template.attributes().zip(attrs) {
                    s.field(name, attr);
                }
                s.finish()
            }
        }
    }
}
