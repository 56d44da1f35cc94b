//! SlotStore: the associative layer the index is built on.
//!
//! A store maps byte-string keys to slots it owns and walks them with a
//! single cursor kept inside the store. The cursor protocol is:
//!
//! - `iter_start` positions the cursor on the first slot (or reports empty);
//! - `iter_next` advances it and reports whether a slot is under it;
//! - `current_key` names the slot under the cursor;
//! - `delete_current` removes that slot. Any slot reference obtained earlier
//!   is invalid afterwards; callers re-resolve the following slot by key
//!   after the next `iter_next`.
//!
//! Only one walk may be in flight per store. `&mut self` on every cursor
//! method keeps other mutation out for the duration of a call, but callers
//! must not interleave `cell_or_create` with a walk.

use crate::error::IndexError;

pub trait SlotStore {
    /// What each slot holds. New slots start as `Slot::default()`.
    type Slot: Default;

    /// Number of slots present, including ones whose contents are empty.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the slot for `key`, creating an empty one if absent.
    fn cell_or_create(&mut self, key: &[u8]) -> Result<&mut Self::Slot, IndexError>;

    fn cell(&self, key: &[u8]) -> Option<&Self::Slot>;

    fn cell_mut(&mut self, key: &[u8]) -> Option<&mut Self::Slot>;

    fn iter_start(&mut self) -> Option<&mut Self::Slot>;

    fn iter_next(&mut self) -> bool;

    fn current_key(&self) -> Option<&[u8]>;

    fn delete_current(&mut self) -> Option<Self::Slot>;

    /// Release the store and every slot in it.
    fn close(self)
    where
        Self: Sized;
}

/// Copy key material into an owned buffer without aborting on allocation failure.
pub(crate) fn copy_key(key: &[u8]) -> Result<Box<[u8]>, IndexError> {
    let mut owned = Vec::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| IndexError::OutOfMemory("store key"))?;
    owned.extend_from_slice(key);
    Ok(owned.into_boxed_slice())
}
