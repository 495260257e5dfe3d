//! Write-once memoization cell
//!
//! `MemoCell` is the single place in the core that needs explicit
//! concurrency discipline. It transitions exactly once from empty to filled
//! through a compare-and-swap on an atomic pointer (`once_cell::race::OnceBox`),
//! never through a lock.
//!
//! ## Contract
//!
//! - Racing writers may all compute a candidate value
//! - Exactly one candidate is published; the losers are dropped
//! - Every reader, including the losers, observes the published value
//!
//! This is "compute at least once, converge", not "compute exactly once".

use once_cell::race::OnceBox;
use std::fmt;

/// Single-assignment slot with convergent concurrent reads
pub struct MemoCell<T> {
    slot: OnceBox<T>,
}

impl<T> MemoCell<T> {
    /// Create an empty cell
    pub fn new() -> Self {
        Self {
            slot: OnceBox::new(),
        }
    }

    /// Create a cell that is already filled
    pub fn filled(value: T) -> Self {
        let cell = Self::new();
        // A fresh cell cannot already be filled
        let _ = cell.slot.set(Box::new(value));
        cell
    }

    /// The published value, if any
    pub fn get(&self) -> Option<&T> {
        self.slot.get()
    }

    /// Whether a value has been published
    pub fn is_filled(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Publish `value` if the cell is empty
    ///
    /// Returns the rejected value when another writer got there first.
    pub fn set(&self, value: T) -> std::result::Result<(), T> {
        self.slot.set(Box::new(value)).map_err(|rejected| *rejected)
    }

    /// Publish `value` unless another writer won, then return the winner
    pub fn get_or_set(&self, value: T) -> &T {
        self.slot.get_or_init(|| Box::new(value))
    }

    /// Return the published value, computing a candidate if the cell is empty
    ///
    /// `f` may run on several threads at once; only one result is kept.
    /// A failing `f` leaves the cell empty.
    pub fn get_or_try_init<E, F>(&self, f: F) -> std::result::Result<&T, E>
    where
        F: FnOnce() -> std::result::Result<T, E>,
    {
        self.slot.get_or_try_init(|| f().map(Box::new))
    }
}

impl<T> Default for MemoCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MemoCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("MemoCell").field(value).finish(),
            None => f.write_str("MemoCell(<empty>)"),
        }
    }
}
