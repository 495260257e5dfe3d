//! Object identity
//!
//! Every object instance gets an opaque `ObjectId` at construction. Ids are
//! allocated from a process-wide monotonic counter, so two instances of the
//! same template never share one.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id to hand out
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one object instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
