//! Error types for Phi
//!
//! This module defines all error types used by the evaluation core.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Taxonomy
//!
//! - `BindError`: failures while attaching values to free or variadic attributes
//! - `DataizationError`: failures while resolving an object to a primitive
//! - `Diagnostic`: structured reason carried by `InvalidOperand`
//!
//! Every failure is terminal for the evaluation it occurs in. Errors carry
//! the object label and attribute name so the packaging layer can render
//! them without access to the object graph.

use crate::value::DataType;
use thiserror::Error;

/// Result type alias for Phi operations
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for callers that bind and dataize in one flow
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Binding failed
    #[error(transparent)]
    Bind(#[from] BindError),

    /// Dataization failed
    #[error(transparent)]
    Dataization(#[from] DataizationError),
}

/// Failure while binding an attribute
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    /// Free attribute already holds a value
    #[error("attribute '{attr}' of {object} is already bound")]
    AlreadyBound {
        /// Label of the owning object
        object: String,
        /// Attribute name
        attr: String,
    },

    /// The object defines no attribute with this name
    #[error("{object} has no attribute '{attr}'")]
    UnknownAttribute {
        /// Label of the owning object
        object: String,
        /// Attribute name
        attr: String,
    },

    /// Positional bind would leave a hole in a variadic attribute
    #[error("cannot bind '{attr}' at position {index}: next free position is {len}")]
    PositionGap {
        /// Attribute name
        attr: String,
        /// Requested position
        index: usize,
        /// Number of positions already bound
        len: usize,
    },

    /// Variadic attribute was already read by a dataization
    #[error("variadic attribute '{attr}' is sealed")]
    Sealed {
        /// Attribute name
        attr: String,
    },

    /// Composite attributes are computed, never bound
    #[error("attribute '{attr}' is composite and cannot be bound")]
    NotBindable {
        /// Attribute name
        attr: String,
    },
}

/// Failure while resolving an object to a primitive value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataizationError {
    /// Free attribute read before it was bound
    #[error("attribute '{attr}' of {object} is not bound")]
    Unbound {
        /// Label of the owning object
        object: String,
        /// Attribute name
        attr: String,
    },

    /// Reduction over an empty operand sequence
    #[error("{op}: no operands supplied")]
    MissingOperands {
        /// Operation name
        op: String,
    },

    /// An operand was rejected by the operation's guard
    #[error("{op}: {diagnostic}")]
    InvalidOperand {
        /// Operation name
        op: String,
        /// Why the operand was rejected
        diagnostic: Diagnostic,
    },

    /// Dataized value is not of the requested type
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the caller asked for
        expected: DataType,
        /// Type actually produced
        actual: DataType,
    },

    /// An attribute demanded its own result while computing it
    #[error("cyclic evaluation of '{attr}' in {object}")]
    CyclicEvaluation {
        /// Label of the owning object
        object: String,
        /// Attribute name
        attr: String,
    },

    /// Raw host value has no built-in object counterpart
    #[error("unknown type of data: {type_name}")]
    UnsupportedDataType {
        /// Host type name
        type_name: String,
    },

    /// The object defines no attribute with this name
    #[error("{object} has no attribute '{attr}'")]
    UnknownAttribute {
        /// Label of the owning object
        object: String,
        /// Attribute name
        attr: String,
    },

    /// Object has neither a data attribute nor a value attribute
    #[error("{object} has nothing to dataize")]
    Undataizable {
        /// Label of the object
        object: String,
    },

    /// Recursion went deeper than the configured limit
    #[error("dataization exceeded depth limit of {limit}")]
    DepthExceeded {
        /// Configured maximum depth
        limit: usize,
    },

    /// A rule failed to bind while building its result
    #[error(transparent)]
    Bind(#[from] BindError),
}

/// Structured reason for rejecting an operand
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// Zero divisor
    #[error("division by zero is infinity")]
    DivisionByZero,

    /// Zero modulus
    #[error("modulo by zero is undefined")]
    ModuloByZero,

    /// Caller-supplied reason
    #[error("{0}")]
    Other(String),
}
