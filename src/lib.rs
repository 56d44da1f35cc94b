//! multi-index: an in-memory map from byte-string keys to one or more
//! caller-owned value references.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep value-list bookkeeping separate from key storage so each
//!   can be reasoned about (and replaced) independently.
//! - Layers:
//!   - SlotStore: the associative layer. Maps keys to slots it owns and
//!     walks them with a single store-held cursor. `OrderedStore` walks in
//!     byte order; `HashedStore` walks in slot order over stable
//!     generational handles.
//!   - Entry: per-key value list with a live count and an allocated size.
//!   - Index: public facade. Resolves a key to its slot, then reads or
//!     writes the Entry held there; vacuum and destroy drive the store's
//!     cursor directly.
//!
//! Modes
//! - Unique: at most one live value per key; a second `add` returns
//!   `false` and leaves the stored value alone.
//! - Multi: an ordered list per key, deduplicated by identity. Adding a
//!   value already present is a no-op that still reports success.
//!
//! Removal and vacuum
//! - `remove` never frees memory. A list emptied by removals stays in its
//!   slot as a tombstone, invisible to `get`; capacity freed up by removals
//!   stays allocated.
//! - `vacuum` walks every slot once: tombstones are deleted from the store,
//!   live lists are shrunk to exactly their count.
//! - Capacity grows by one slot per append on a full list. This trades
//!   reallocation count for the lowest peak footprint.
//!
//! Values
//! - Values are borrowed or counted references (`&T`, `Rc<T>`, `Arc<T>`,
//!   `NonNull<T>`), compared by address through [`ValueRef`]. The index
//!   never clones or inspects payloads.
//!
//! Errors
//! - Keys must be non-empty and shorter than `IndexConfig::max_key_len`
//!   (1024 by default); longer keys are rejected, not truncated.
//! - Failed reservations surface as `IndexError::OutOfMemory` and leave
//!   the touched entry unchanged.
//!
//! Notes and non-goals
//! - Single-threaded; wrap the whole index in a lock for shared use, since
//!   resolve-then-mutate sequences are not atomic.
//! - No persistence and no key encoding beyond raw bytes.
//! - `destroy` frees entries without deleting their slots one by one; the
//!   store's `close` releases the slots.

mod config;
mod entry;
mod error;
mod hashed_store;
mod index;
#[cfg(test)]
mod index_proptest;
mod ordered_store;
mod store;
mod value;

// Public surface
pub use config::{IndexConfig, Mode, DEFAULT_MAX_KEY_SIZE};
pub use entry::Entry;
pub use error::IndexError;
pub use hashed_store::HashedStore;
pub use index::{EntryView, Index, VacuumStats};
pub use ordered_store::OrderedStore;
pub use store::SlotStore;
pub use value::ValueRef;
