//! Primitive value types for Phi
//!
//! This module defines:
//! - Value: the primitive data a dataization terminates in
//! - DataType: the type tag callers use to request a value of a given kind
//! - Primitive: conversion between a host type and its `Value` variant
//!
//! ## Value Model
//!
//! Seven scalar kinds cross the boundary between the evaluation core and
//! the packaging layer: Int, Float, Bool, Bytes, String, Char, Pattern.
//! `Array` is the dataized form of an array object.
//!
//! ### Type Rules
//!
//! - No implicit coercions: `Int(1) != Float(1.0)`
//! - `Bytes` are not `String`
//! - Float uses IEEE-754 equality: `NaN != NaN`, `-0.0 == 0.0`
//! - Patterns are equal when their source text is equal
//!
//! ## Rendering
//!
//! `Display` produces the diagnostic form: strings quoted, byte sequences as
//! hyphen-separated two-digit hex octets, floats always with a fractional
//! part, arrays element-wise.

use regex::Regex;
use std::fmt;

/// Primitive value produced by dataization
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// UTF-8 text
    String(String),
    /// Single character
    Char(char),
    /// Compiled text pattern
    Pattern(Regex),
    /// Dataized elements of an array object
    Array(Vec<Value>),
}

// Custom PartialEq: Regex has no equality of its own
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Pattern(a), Value::Pattern(b)) => a.as_str() == b.as_str(),
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// The type tag of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int(_) => DataType::Int,
            Value::Float(_) => DataType::Float,
            Value::Bool(_) => DataType::Bool,
            Value::Bytes(_) => DataType::Bytes,
            Value::String(_) => DataType::String,
            Value::Char(_) => DataType::Char,
            Value::Pattern(_) => DataType::Pattern,
            Value::Array(_) => DataType::Array,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part: 2.0 renders as "2.0", not "2"
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Bytes(bytes) => {
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str("-")?;
                    }
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Char(c) => write!(f, "{}", c),
            Value::Pattern(re) => f.write_str(re.as_str()),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<Regex> for Value {
    fn from(re: Regex) -> Self {
        Value::Pattern(re)
    }
}

// ============================================================================
// DataType
// ============================================================================

/// Type tag for primitive values
///
/// Callers of dataization name the type they expect; a value of any other
/// type is a `TypeMismatch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
    /// Byte sequence
    Bytes,
    /// UTF-8 text
    String,
    /// Single character
    Char,
    /// Compiled text pattern
    Pattern,
    /// Array of dataized elements
    Array,
}

impl DataType {
    /// All data types (for iteration)
    pub const ALL: [DataType; 8] = [
        DataType::Int,
        DataType::Float,
        DataType::Bool,
        DataType::Bytes,
        DataType::String,
        DataType::Char,
        DataType::Pattern,
        DataType::Array,
    ];

    /// Human-readable name, matching the built-in object that wraps the type
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Bool => "bool",
            DataType::Bytes => "bytes",
            DataType::String => "string",
            DataType::Char => "char",
            DataType::Pattern => "regex",
            DataType::Array => "array",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Primitive
// ============================================================================

/// A host type that is exactly one `Value` variant
///
/// Typed operations (the reduction engine in particular) work over `T`
/// and convert at the boundary.
pub trait Primitive: Sized + Clone + Send + Sync + 'static {
    /// The type tag of the matching variant
    const TYPE: DataType;

    /// Extract from a value of the matching variant
    fn from_value(value: Value) -> Option<Self>;

    /// Wrap into the matching variant
    fn into_value(self) -> Value;
}

macro_rules! primitive {
    ($ty:ty, $variant:ident) => {
        impl Primitive for $ty {
            const TYPE: DataType = DataType::$variant;

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }
        }
    };
}

primitive!(i64, Int);
primitive!(f64, Float);
primitive!(bool, Bool);
primitive!(Vec<u8>, Bytes);
primitive!(String, String);
primitive!(char, Char);
primitive!(Regex, Pattern);
