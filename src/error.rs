//! Error taxonomy shared by the index and its stores.

use thiserror::Error as ThisError;

///
/// IndexError
///
/// Failures surfaced by the index and its slot stores. Duplicate keys and
/// missing keys are not errors; they are reported as `false` / `None`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum IndexError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("key length {len} bytes reaches the {max}-byte limit")]
    KeyTooLong { len: usize, max: usize },

    #[error("out of memory while allocating {0}")]
    OutOfMemory(&'static str),
}
