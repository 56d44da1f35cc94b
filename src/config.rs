//! Index configuration: value mode and key-length limit.

/// Keys must be strictly shorter than this many bytes unless configured otherwise.
pub const DEFAULT_MAX_KEY_SIZE: usize = 1024;

/// How many live values a key may hold.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Mode {
    /// At most one live value per key; a second `add` is rejected.
    Unique,
    /// An ordered, identity-deduplicated list of values per key.
    #[default]
    Multi,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IndexConfig {
    pub mode: Mode,
    /// Exclusive upper bound on key length in bytes.
    pub max_key_len: usize,
}

impl IndexConfig {
    pub const fn new(mode: Mode) -> Self {
        Self {
            mode,
            max_key_len: DEFAULT_MAX_KEY_SIZE,
        }
    }

    pub const fn unique() -> Self {
        Self::new(Mode::Unique)
    }

    pub const fn multi() -> Self {
        Self::new(Mode::Multi)
    }

    pub const fn with_max_key_len(mut self, max_key_len: usize) -> Self {
        self.max_key_len = max_key_len;
        self
    }

    pub fn is_unique(&self) -> bool {
        self.mode == Mode::Unique
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
