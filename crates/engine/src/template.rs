//! Templates and instantiation
//!
//! A [`Template`] is a reusable, immutable object definition: a name plus an
//! ordered list of attribute declarations. It owns no binding storage.
//!
//! ## Freshness
//!
//! [`Template::instantiate`] is the identity/copy wrapper. Every call
//! allocates new storage for every attribute, so:
//!
//! - all free and variadic attributes of the result are unbound
//! - no other live instance of the template can observe its bindings
//! - cached composite results belong to that instance alone
//!
//! Templates are cheap to clone and safe to share across threads.

use crate::attribute::{AttrSpec, Attribute, Rule};
use crate::object::Object;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

struct TemplateDef {
    name: String,
    attrs: Vec<(String, AttrSpec)>,
}

/// Reusable object definition
#[derive(Clone)]
pub struct Template {
    def: Arc<TemplateDef>,
}

impl Template {
    /// Start declaring a template called `name`
    pub fn builder(name: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    /// Template name, e.g. `int.div`
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Attribute declarations in declaration order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttrSpec)> {
        self.def.attrs.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Declaration position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.def.attrs.iter().position(|(attr, _)| attr == name)
    }

    /// Declaration of `name`
    pub fn spec(&self, name: &str) -> Option<&AttrSpec> {
        self.position(name).map(|i| &self.def.attrs[i].1)
    }

    /// Create an instance with fresh, unbound attribute storage
    pub fn instantiate(&self) -> Object {
        let attrs = self
            .def
            .attrs
            .iter()
            .map(|(_, spec)| Attribute::fresh(spec))
            .collect();
        let object = Object::composed(self.clone(), attrs);
        debug!(template = %self.def.name, object = %object.id(), "instantiated");
        object
    }

    /// Whether both handles point at the same definition
    pub fn ptr_eq(a: &Template, b: &Template) -> bool {
        Arc::ptr_eq(&a.def, &b.def)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.def.name)
            .field("attrs", &self.def.attrs)
            .finish()
    }
}

/// Builder for [`Template`]
///
/// Declaring a name twice replaces the earlier declaration in place.
pub struct TemplateBuilder {
    name: String,
    attrs: Vec<(String, AttrSpec)>,
}

impl TemplateBuilder {
    /// Declare a free attribute
    pub fn free(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), AttrSpec::Free)
    }

    /// Declare a variadic attribute
    pub fn variadic(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), AttrSpec::Variadic)
    }

    /// Declare a composite attribute evaluated on every access
    pub fn composite<R: Rule + 'static>(self, name: impl Into<String>, rule: R) -> Self {
        self.declare(
            name.into(),
            AttrSpec::Composite {
                rule: Arc::new(rule),
                cached: false,
            },
        )
    }

    /// Declare a composite attribute memoized per instance
    pub fn cached<R: Rule + 'static>(self, name: impl Into<String>, rule: R) -> Self {
        self.declare(
            name.into(),
            AttrSpec::Composite {
                rule: Arc::new(rule),
                cached: true,
            },
        )
    }

    fn declare(mut self, name: String, spec: AttrSpec) -> Self {
        match self.attrs.iter_mut().find(|(attr, _)| *attr == name) {
            Some(slot) => slot.1 = spec,
            None => self.attrs.push((name, spec)),
        }
        self
    }

    /// Finish the template
    pub fn build(self) -> Template {
        Template {
            def: Arc::new(TemplateDef {
                name: self.name,
                attrs: self.attrs,
            }),
        }
    }
}
