//! Fingerprint caching module.
//!
//! This module provides persistent storage for file content hashes to speed
//! up subsequent scans by avoiding re-hashing of unchanged files.
//!
//! # Architecture
//!
//! The caching system is split into two components:
//!
//! * [`store`]: Handles JSON-file persistence, lookup, and thread-safe updates.
//! * [`entry`]: Defines the fingerprint stored per file and its validation logic.
//!
//! # Cache Invalidation
//!
//! Entries are keyed by absolute path and validated using:
//! * File size
//! * Modification time (mtime)
//!
//! If either attribute changed, the entry is stale and the file is re-hashed
//! during the next scan.
//!
//! # Failure Model
//!
//! The cache is an accelerator, never a correctness dependency. A missing,
//! corrupt, or unwritable cache file degrades to an empty cache with a
//! warning; it never aborts a scan.

pub mod entry;
pub mod store;

pub use entry::CacheEntry;
pub use store::{CacheError, HashCache, CACHE_FILE_NAME};
