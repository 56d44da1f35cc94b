//! Entry: the per-key value list.
//!
//! Capacity grows by exactly one slot when the list is full and is never
//! shrunk by removals; slack is only released by [`Entry::compact`] during
//! vacuum. This keeps peak memory at the live size plus whatever removals
//! left behind, at the cost of one reallocation per append on a full list.

use crate::error::IndexError;
use crate::value::ValueRef;

/// What `compact` did to an entry.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Compaction {
    /// No live values remain; the backing array was released and the owning
    /// slot should be deleted.
    Reclaim,
    /// Slack capacity was released.
    Shrunk,
    /// Capacity already matched the live count.
    Tight,
}

/// Values held under one key. `count()` values are live; `size()` is the
/// allocated capacity. An entry with `count() == 0` is a tombstone.
#[derive(Debug)]
pub struct Entry<R> {
    values: Vec<R>,
}

impl<R> Default for Entry<R> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<R> Entry<R> {
    #[inline]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.values.capacity()
    }

    #[inline]
    pub fn values(&self) -> &[R] {
        &self.values
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        self.values.is_empty()
    }

    /// Drop the backing array outright, live values included.
    pub(crate) fn release(&mut self) {
        self.values = Vec::new();
    }

    pub(crate) fn compact(&mut self) -> Compaction {
        if self.values.is_empty() {
            self.release();
            Compaction::Reclaim
        } else if self.values.capacity() > self.values.len() {
            self.values.shrink_to_fit();
            Compaction::Shrunk
        } else {
            Compaction::Tight
        }
    }
}

impl<R: ValueRef> Entry<R> {
    fn position(&self, value: &R) -> Option<usize> {
        self.values.iter().position(|v| v.same(value))
    }

    pub fn contains(&self, value: &R) -> bool {
        self.position(value).is_some()
    }

    /// Append `value`, growing capacity by exactly one when full.
    pub(crate) fn append(&mut self, value: R) -> Result<(), IndexError> {
        if self.values.len() == self.values.capacity() {
            self.values
                .try_reserve_exact(1)
                .map_err(|_| IndexError::OutOfMemory("entry values"))?;
        }
        self.values.push(value);
        Ok(())
    }

    /// Replace whatever the entry holds with the single `value`.
    pub(crate) fn set_single(&mut self, value: R) -> Result<(), IndexError> {
        self.values.clear();
        if self.values.capacity() > 1 {
            self.values = Vec::new();
        }
        self.append(value)
    }

    /// Remove `value` keeping the order of the rest. Capacity is untouched.
    pub(crate) fn remove_value(&mut self, value: &R) -> bool {
        match self.position(value) {
            Some(i) => {
                self.values.remove(i);
                true
            }
            None => false,
        }
    }
}
