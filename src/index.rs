//! Index: the public facade over a slot store of value lists.

use crate::config::{IndexConfig, Mode};
use crate::entry::{Compaction, Entry};
use crate::error::IndexError;
use crate::ordered_store::OrderedStore;
use crate::store::SlotStore;
use crate::value::ValueRef;
use core::marker::PhantomData;

/// Read-only view of a live entry. Borrows the index, so it is gone before
/// the next mutating call.
#[derive(Debug)]
pub struct EntryView<'a, R> {
    entry: &'a Entry<R>,
}

impl<'a, R> Clone for EntryView<'a, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, R> Copy for EntryView<'a, R> {}

impl<'a, R> EntryView<'a, R> {
    /// Number of live values; always at least one.
    pub fn count(&self) -> usize {
        self.entry.count()
    }

    /// Allocated capacity of the underlying value list.
    pub fn size(&self) -> usize {
        self.entry.size()
    }

    /// Live values in insertion order, minus removals.
    pub fn values(&self) -> &'a [R] {
        self.entry.values()
    }

    pub fn first(&self) -> Option<&'a R> {
        self.entry.values().first()
    }

    pub fn iter(&self) -> core::slice::Iter<'a, R> {
        self.entry.values().iter()
    }
}

impl<'a, R> IntoIterator for EntryView<'a, R> {
    type Item = &'a R;
    type IntoIter = core::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of a [`Index::vacuum`] pass.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct VacuumStats {
    /// Slots walked.
    pub visited: usize,
    /// Tombstoned slots deleted from the store.
    pub reclaimed: usize,
    /// Live entries whose slack capacity was released.
    pub shrunk: usize,
}

/// A map from byte-string keys to one (unique mode) or many (multi mode)
/// caller-owned value references.
///
/// Removing a value never frees memory; the emptied entry stays in its slot
/// as a tombstone and spare capacity stays allocated until [`vacuum`] runs.
///
/// [`vacuum`]: Index::vacuum
pub struct Index<R, S = OrderedStore<Entry<R>>> {
    config: IndexConfig,
    store: S,
    _values: PhantomData<R>,
}

impl<R: ValueRef> Index<R> {
    /// Create an index over an ordered store; `unique` selects the mode.
    pub fn create(unique: bool) -> Self {
        let mode = if unique { Mode::Unique } else { Mode::Multi };
        Self::with_config(IndexConfig::new(mode))
    }

    pub fn with_config(config: IndexConfig) -> Self {
        Self::with_store(config, OrderedStore::new())
    }
}

impl<R, S> Index<R, S>
where
    R: ValueRef,
    S: SlotStore<Slot = Entry<R>>,
{
    pub fn with_store(config: IndexConfig, store: S) -> Self {
        Self {
            config,
            store,
            _values: PhantomData,
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Slots held by the store, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn check_key(&self, key: &[u8]) -> Result<(), IndexError> {
        if key.is_empty() {
            return Err(IndexError::EmptyKey);
        }
        if key.len() >= self.config.max_key_len {
            return Err(IndexError::KeyTooLong {
                len: key.len(),
                max: self.config.max_key_len,
            });
        }
        Ok(())
    }

    fn live(&self, key: &[u8]) -> Result<Option<&Entry<R>>, IndexError> {
        self.check_key(key)?;
        Ok(self.store.cell(key).filter(|e| !e.is_tombstone()))
    }

    /// Add `value` under `key`.
    ///
    /// Unique mode returns `Ok(false)` when the key already holds a live
    /// value and leaves that value in place. Multi mode returns `Ok(true)`
    /// whether or not `value` was already present.
    pub fn add(&mut self, key: &[u8], value: R) -> Result<bool, IndexError> {
        self.check_key(key)?;
        if self.store.cell(key).is_none() {
            // Fill the entry before creating its slot so a failed
            // allocation leaves the store untouched.
            let mut fresh = Entry::default();
            fresh.append(value)?;
            *self.store.cell_or_create(key)? = fresh;
            log::trace!("created entry for key {:?}", key);
            return Ok(true);
        }

        let unique = self.config.is_unique();
        let entry = self.store.cell_or_create(key)?;

        if unique {
            if !entry.is_tombstone() {
                log::trace!("rejecting duplicate key {:?}", key);
                return Ok(false);
            }
            entry.set_single(value)?;
        } else if !entry.contains(&value) {
            entry.append(value)?;
        }
        Ok(true)
    }

    /// Remove `value` from `key`. Returns `Ok(false)` if the key is absent,
    /// tombstoned, or does not hold `value`.
    pub fn remove(&mut self, key: &[u8], value: &R) -> Result<bool, IndexError> {
        self.check_key(key)?;
        match self.store.cell_mut(key) {
            Some(entry) if !entry.is_tombstone() => {
                let removed = entry.remove_value(value);
                if removed && entry.is_tombstone() {
                    log::trace!("key {:?} is now a tombstone", key);
                }
                Ok(removed)
            }
            _ => Ok(false),
        }
    }

    /// Live values under `key`, or `None` if the key is absent or tombstoned.
    pub fn get(&self, key: &[u8]) -> Result<Option<EntryView<'_, R>>, IndexError> {
        Ok(self.live(key)?.map(|entry| EntryView { entry }))
    }

    /// Whether `key` currently holds `value` (by identity).
    pub fn contains(&self, key: &[u8], value: &R) -> Result<bool, IndexError> {
        Ok(self.live(key)?.is_some_and(|e| e.contains(value)))
    }

    fn settle(&mut self, outcome: Compaction, stats: &mut VacuumStats) {
        stats.visited += 1;
        match outcome {
            Compaction::Reclaim => {
                self.store.delete_current();
                stats.reclaimed += 1;
            }
            Compaction::Shrunk => stats.shrunk += 1,
            Compaction::Tight => {}
        }
    }

    /// Delete tombstoned slots and release spare capacity of live entries.
    ///
    /// Observable `get` results are unchanged for every key that still has
    /// a live value. Afterwards every remaining entry has `size == count`.
    pub fn vacuum(&mut self) -> VacuumStats {
        let mut stats = VacuumStats::default();
        let outcome = match self.store.iter_start() {
            Some(entry) => entry.compact(),
            None => return stats,
        };
        self.settle(outcome, &mut stats);

        let mut key = Vec::new();
        while self.store.iter_next() {
            key.clear();
            match self.store.current_key() {
                Some(k) => key.extend_from_slice(k),
                None => break,
            }
            // The previous delete may have moved things; resolve by name.
            let outcome = match self.store.cell_mut(&key) {
                Some(entry) => entry.compact(),
                None => continue,
            };
            self.settle(outcome, &mut stats);
        }

        log::debug!(
            "vacuum visited {} slots, reclaimed {}, shrunk {}",
            stats.visited,
            stats.reclaimed,
            stats.shrunk
        );
        stats
    }

    /// Free every entry, tombstones included, then close the store.
    /// Returns the number of entries freed.
    ///
    /// Slots are not deleted one by one; closing the store releases them.
    pub fn destroy(mut self) -> usize {
        let mut freed = 0;
        if let Some(entry) = self.store.iter_start() {
            drop(core::mem::take(entry));
            freed += 1;

            let mut key = Vec::new();
            while self.store.iter_next() {
                key.clear();
                match self.store.current_key() {
                    Some(k) => key.extend_from_slice(k),
                    None => break,
                }
                if let Some(entry) = self.store.cell_mut(&key) {
                    drop(core::mem::take(entry));
                    freed += 1;
                }
            }
        }

        log::debug!("destroying index: freed {} entries", freed);
        self.store.close();
        freed
    }
}
