//! Core types for Phi
//!
//! This crate defines the foundational types used throughout the runtime:
//! - Value: primitive data a dataization terminates in
//! - DataType: type tag used to request and check primitive values
//! - Primitive: typed access to a single `Value` variant
//! - Data: uniform `take()` contract with `Fixed` and memoizing `Once` containers
//! - MemoCell: write-once cell with convergent concurrent reads
//! - Error: bind and dataization error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod error;
pub mod memo;
pub mod value;

pub use data::{Data, Fixed, Once};
pub use error::{BindError, DataizationError, Diagnostic, Error, Result};
pub use memo::MemoCell;
pub use value::{DataType, Primitive, Value};

// Patterns are part of the value model; re-export so callers share one version
pub use regex::Regex;
