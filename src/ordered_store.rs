//! OrderedStore: slots kept in byte-lexicographic key order.
//!
//! The cursor is the key it sits on, not a reference to a slot. Advancing
//! looks up the first key strictly greater than the cursor's, so deleting the
//! slot under the cursor never strands the walk.

use crate::error::IndexError;
use crate::store::{copy_key, SlotStore};
use core::ops::Bound;
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct OrderedStore<T> {
    map: BTreeMap<Box<[u8]>, T>,
    cursor: Vec<u8>,
    positioned: bool,
}

impl<T> OrderedStore<T> {
    pub fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            cursor: Vec::new(),
            positioned: false,
        }
    }

    fn park(&mut self) {
        self.positioned = false;
        self.cursor.clear();
    }
}

impl<T> Default for OrderedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> SlotStore for OrderedStore<T> {
    type Slot = T;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn cell_or_create(&mut self, key: &[u8]) -> Result<&mut T, IndexError> {
        if !self.map.contains_key(key) {
            let owned = copy_key(key)?;
            self.map.insert(owned, T::default());
        }
        Ok(self
            .map
            .get_mut(key)
            .expect("slot must exist immediately after insert"))
    }

    fn cell(&self, key: &[u8]) -> Option<&T> {
        self.map.get(key)
    }

    fn cell_mut(&mut self, key: &[u8]) -> Option<&mut T> {
        self.map.get_mut(key)
    }

    fn iter_start(&mut self) -> Option<&mut T> {
        self.park();
        let (k, slot) = self.map.iter_mut().next()?;
        self.cursor.extend_from_slice(k);
        self.positioned = true;
        Some(slot)
    }

    fn iter_next(&mut self) -> bool {
        if !self.positioned {
            return false;
        }
        let next = self
            .map
            .range::<[u8], _>((Bound::Excluded(self.cursor.as_slice()), Bound::Unbounded))
            .next();
        match next {
            Some((k, _)) => {
                self.cursor.clear();
                self.cursor.extend_from_slice(k);
                true
            }
            None => {
                self.park();
                false
            }
        }
    }

    fn current_key(&self) -> Option<&[u8]> {
        self.positioned.then_some(self.cursor.as_slice())
    }

    fn delete_current(&mut self) -> Option<T> {
        if !self.positioned {
            return None;
        }
        self.map.remove(self.cursor.as_slice())
    }

    fn close(mut self) {
        log::debug!("closing ordered store with {} slots", self.map.len());
        self.park();
        self.map.clear();
    }
}
