//! HashedStore: hash-indexed slots with stable generational handles.
//!
//! Cells live in a `SlotMap`; a `HashTable` maps each key's stored hash to
//! the cell handle, so lookups never re-hash stored keys. A walk snapshots
//! the live handles in slot order; handles whose cells were deleted since
//! the snapshot no longer resolve and are skipped.

use crate::error::IndexError;
use crate::store::{copy_key, SlotStore};
use core::hash::BuildHasher;
use hashbrown::HashTable;
use slotmap::{DefaultKey, SlotMap};
use std::collections::hash_map::RandomState;

struct Cell<T> {
    key: Box<[u8]>,
    slot: T,
    hash: u64,
}

pub struct HashedStore<T, S = RandomState> {
    hasher: S,
    index: HashTable<DefaultKey>,
    cells: SlotMap<DefaultKey, Cell<T>>,
    walk: Vec<DefaultKey>,
    pos: usize,
}

impl<T> HashedStore<T> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<T> Default for HashedStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S: BuildHasher> HashedStore<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::new(),
            cells: SlotMap::with_key(),
            walk: Vec::new(),
            pos: 0,
        }
    }

    fn find(&self, hash: u64, key: &[u8]) -> Option<DefaultKey> {
        self.index
            .find(hash, |&k| {
                self.cells
                    .get(k)
                    .map(|c| &*c.key == key)
                    .unwrap_or(false)
            })
            .copied()
    }

    fn current(&self) -> Option<DefaultKey> {
        self.walk.get(self.pos).copied()
    }

    fn end_walk(&mut self) {
        self.walk = Vec::new();
        self.pos = 0;
    }
}

impl<T: Default, S: BuildHasher> SlotStore for HashedStore<T, S> {
    type Slot = T;

    fn len(&self) -> usize {
        self.cells.len()
    }

    fn cell_or_create(&mut self, key: &[u8]) -> Result<&mut T, IndexError> {
        let hash = self.hasher.hash_one(key);
        if let Some(k) = self.find(hash, key) {
            return Ok(&mut self.cells[k].slot);
        }

        self.index
            .try_reserve(1, |&kk| self.cells.get(kk).map(|c| c.hash).unwrap_or(0))
            .map_err(|_| IndexError::OutOfMemory("store table"))?;
        let owned = copy_key(key)?;
        let k = self.cells.insert(Cell {
            key: owned,
            slot: T::default(),
            hash,
        });
        self.index
            .insert_unique(hash, k, |&kk| self.cells.get(kk).map(|c| c.hash).unwrap_or(0));
        Ok(&mut self.cells[k].slot)
    }

    fn cell(&self, key: &[u8]) -> Option<&T> {
        let k = self.find(self.hasher.hash_one(key), key)?;
        self.cells.get(k).map(|c| &c.slot)
    }

    fn cell_mut(&mut self, key: &[u8]) -> Option<&mut T> {
        let k = self.find(self.hasher.hash_one(key), key)?;
        self.cells.get_mut(k).map(|c| &mut c.slot)
    }

    fn iter_start(&mut self) -> Option<&mut T> {
        self.end_walk();
        self.walk.extend(self.cells.keys());
        let k = self.current()?;
        self.cells.get_mut(k).map(|c| &mut c.slot)
    }

    fn iter_next(&mut self) -> bool {
        if self.pos >= self.walk.len() {
            return false;
        }
        self.pos += 1;
        while self.pos < self.walk.len() && !self.cells.contains_key(self.walk[self.pos]) {
            self.pos += 1;
        }
        if self.pos < self.walk.len() {
            true
        } else {
            self.end_walk();
            false
        }
    }

    fn current_key(&self) -> Option<&[u8]> {
        let k = self.current()?;
        self.cells.get(k).map(|c| &*c.key)
    }

    fn delete_current(&mut self) -> Option<T> {
        let k = self.current()?;
        let cell = self.cells.remove(k)?;
        if let Ok(entry) = self.index.find_entry(cell.hash, |&kk| kk == k) {
            entry.remove();
        }
        Some(cell.slot)
    }

    fn close(mut self) {
        log::debug!("closing hashed store with {} slots", self.cells.len());
        self.end_walk();
        self.index.clear();
        self.cells.clear();
    }
}
