//! Cache entry definitions.

use serde::{Deserialize, Serialize};

use crate::scanner::{hash_to_hex, hex_to_hash, FileEntry, Hash};

/// A single file fingerprint in the hash cache.
///
/// Serialized form in the cache file:
///
/// ```json
/// { "size": 1024, "mtime": 1719855600.25, "hash": "a1b2..." }
/// ```
///
/// An entry is valid only while the file's current size and modification
/// time match the stored values; otherwise it must be recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// File size in bytes at hashing time.
    pub size: u64,
    /// Modification time as fractional seconds since the Unix epoch.
    pub mtime: f64,
    /// Lowercase hex digest of the file content.
    pub hash: String,
}

impl CacheEntry {
    /// Build an entry from a scanned file and its computed digest.
    #[must_use]
    pub fn new(file: &FileEntry, hash: &Hash) -> Self {
        Self {
            size: file.size,
            mtime: file.mtime_seconds(),
            hash: hash_to_hex(hash),
        }
    }

    /// Check whether this entry is still valid for the given metadata.
    ///
    /// mtime comparison is bit-exact: the stored value round-trips through
    /// JSON unchanged, and any real modification produces a different
    /// timestamp.
    #[must_use]
    pub fn matches(&self, size: u64, mtime: f64) -> bool {
        self.size == size && self.mtime.to_bits() == mtime.to_bits()
    }

    /// Decode the stored digest.
    ///
    /// Returns `None` for malformed hex, which callers treat as a miss.
    #[must_use]
    pub fn digest(&self) -> Option<Hash> {
        hex_to_hash(&self.hash)
    }
}
