//! JSON-file-backed fingerprint cache.
//!
//! The cache is a mapping from absolute path strings to [`CacheEntry`]
//! fingerprints, persisted as a hidden JSON document in the scan root. It is
//! loaded once at scan start, updated in memory during hashing (from
//! multiple worker threads), and written back once at scan end.
//!
//! This is the sole component that touches the cache file. Concurrent runs
//! against the same directory race on it; last writer wins.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use thiserror::Error;

use super::CacheEntry;
use crate::scanner::Hash;

/// Default cache file name, hidden, inside the scan root.
pub const CACHE_FILE_NAME: &str = ".dupescan-cache.json";

/// Errors from cache persistence.
///
/// These are reported but never fatal to the scan's primary purpose.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Failed to write the cache file.
    #[error("failed to write cache file {path}: {source}")]
    Io {
        /// Cache file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the cache contents.
    #[error("failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Thread-safe in-memory fingerprint cache with JSON persistence.
///
/// Lookups validate the stored size and mtime against the file's current
/// metadata; a mismatch is a miss and forces recomputation. Hit/miss
/// counters are exposed for instrumentation.
#[derive(Debug)]
pub struct HashCache {
    /// On-disk location of the cache file.
    path: PathBuf,
    /// Path string -> fingerprint. Mutex serializes phase-2 worker updates.
    entries: Mutex<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl HashCache {
    /// Load the cache from the given scan root.
    ///
    /// Fails soft: a missing file yields an empty cache silently; an
    /// unreadable or unparseable file yields an empty cache with a warning.
    /// The scan never aborts because of the cache.
    #[must_use]
    pub fn load(root: &Path) -> Self {
        let path = root.join(CACHE_FILE_NAME);
        let entries = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<HashMap<String, CacheEntry>>(&text) {
                Ok(map) => {
                    log::debug!("Loaded {} cache entries from {}", map.len(), path.display());
                    map
                }
                Err(e) => {
                    log::warn!(
                        "Cache file {} is corrupt, starting with an empty cache: {}",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!(
                    "Cannot read cache file {}, starting with an empty cache: {}",
                    path.display(),
                    e
                );
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up the cached digest for a file.
    ///
    /// Returns the digest only if the stored size and modification time
    /// match the current values; stale or malformed entries are misses.
    pub fn lookup(&self, path: &Path, size: u64, mtime: f64) -> Option<Hash> {
        let key = path.to_string_lossy();
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());

        let digest = entries
            .get(key.as_ref())
            .filter(|entry| entry.matches(size, mtime))
            .and_then(CacheEntry::digest);

        match digest {
            Some(hash) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::trace!("Cache hit: {}", path.display());
                Some(hash)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::trace!("Cache miss: {}", path.display());
                None
            }
        }
    }

    /// Record or overwrite an entry in memory.
    pub fn update(&self, path: &Path, entry: CacheEntry) {
        let key = path.to_string_lossy().into_owned();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, entry);
    }

    /// Write the full in-memory mapping back to disk.
    ///
    /// Best-effort: the caller logs failures and carries on.
    pub fn persist(&self) -> Result<(), CacheError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let json = serde_json::to_string_pretty(&*entries)?;
        drop(entries);

        fs::write(&self.path, json).map_err(|source| CacheError::Io {
            path: self.path.clone(),
            source,
        })?;

        log::debug!("Persisted cache to {}", self.path.display());
        Ok(())
    }

    /// Number of cache hits since load.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Number of cache misses since load.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check if the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// On-disk location of the cache file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
