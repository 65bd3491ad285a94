//! Duplicate finder implementation with two-phase detection.
//!
//! # Overview
//!
//! This module orchestrates the duplicate detection pipeline:
//! 1. **Phase 1 - Size grouping**: Group files by size (see [`crate::duplicates::groups`])
//! 2. **Phase 2 - Hash partition**: Hash same-size files and sub-partition by digest
//!
//! Phase 2 is skipped entirely in size-only mode, where the size partition
//! is the final grouping (accepted false positives).
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let config = FinderConfig::default().with_io_threads(4);
//! let finder = DuplicateFinder::new(config);
//!
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate sets", summary.duplicate_groups);
//! println!("Wasted space: {}", summary.wasted_display());
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bytesize::ByteSize;
use rayon::prelude::*;

use crate::cache::{CacheEntry, HashCache};
use crate::progress::ProgressCallback;
use crate::scanner::{FileEntry, Hash, HashError, Hasher, ScanError, Walker, WalkerConfig};

use super::groups::{group_by_size, DuplicateGroup, GroupingStats};

/// Configuration for the duplicate finder.
///
/// Controls the behavior of the two-phase duplicate detection pipeline.
#[derive(Clone)]
pub struct FinderConfig {
    /// Number of I/O threads for parallel hashing.
    /// Default is 4 to prevent disk thrashing.
    pub io_threads: usize,
    /// Confirm duplicates by content hash. When false, the size partition
    /// is the final grouping (size-only mode).
    pub hash_enabled: bool,
    /// Optional fingerprint cache for faster rescans.
    pub cache: Option<Arc<HashCache>>,
    /// Walker configuration for directory traversal.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback for reporting.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("hash_enabled", &self.hash_enabled)
            .field("cache", &self.cache.as_ref().map(|_| "<cache>"))
            .field("walker_config", &self.walker_config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            io_threads: 4,
            hash_enabled: true,
            cache: None,
            walker_config: WalkerConfig::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Create a new configuration with custom I/O thread count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads.max(1);
        self
    }

    /// Enable or disable hash confirmation (disabled = size-only mode).
    #[must_use]
    pub fn with_hash_enabled(mut self, enabled: bool) -> Self {
        self.hash_enabled = enabled;
        self
    }

    /// Set the fingerprint cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<HashCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Check if shutdown has been requested.
    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from a duplicate scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Total number of files that passed the walker's filters
    pub total_files: usize,
    /// Total size of all scanned files in bytes
    pub total_size: u64,
    /// Number of files eliminated by size grouping (unique sizes)
    pub eliminated_by_size: usize,
    /// Number of fingerprint cache hits
    pub cache_hits: u64,
    /// Number of fingerprint cache misses
    pub cache_misses: u64,
    /// Number of duplicate sets found
    pub duplicate_groups: usize,
    /// Total number of redundant files (excluding one keeper per set)
    pub duplicate_files: usize,
    /// Total wasted bytes: sum over sets of (members - 1) x size
    pub wasted_bytes: u64,
    /// Duration of the entire scan
    pub scan_duration: Duration,
    /// Whether the scan was cut short by a cancellation signal
    pub interrupted: bool,
    /// Traversal errors encountered during the walk
    pub scan_errors: Vec<ScanError>,
    /// Per-file hashing failures (file excluded from its set)
    pub hash_errors: Vec<HashError>,
}

impl ScanSummary {
    /// Percentage of scanned bytes that are redundant copies.
    #[must_use]
    pub fn wasted_percentage(&self) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            (self.wasted_bytes as f64 / self.total_size as f64) * 100.0
        }
    }

    /// Wasted space as a human-readable string.
    #[must_use]
    pub fn wasted_display(&self) -> String {
        ByteSize::b(self.wasted_bytes).to_string()
    }

    /// Total scanned size as a human-readable string.
    #[must_use]
    pub fn total_size_display(&self) -> String {
        ByteSize::b(self.total_size).to_string()
    }

    /// Number of per-file failures (traversal + hashing).
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.scan_errors.len() + self.hash_errors.len()
    }
}

/// Errors that abort a scan before it starts.
///
/// Per-file read failures are never represented here; they are collected in
/// [`ScanSummary`] and the scan continues.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred during setup.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Duplicate finder that orchestrates the detection pipeline.
///
/// 1. **Walk** - stream candidate files from the target directory
/// 2. **Phase 1** - group files by size, pruning unique sizes
/// 3. **Phase 2** - hash survivors (cache-assisted, parallel) and
///    sub-partition by digest
///
/// # Example
///
/// ```no_run
/// use dupescan::duplicates::DuplicateFinder;
/// use std::path::Path;
///
/// let finder = DuplicateFinder::with_defaults();
/// match finder.find_duplicates(Path::new(".")) {
///     Ok((groups, summary)) => {
///         println!("Found {} duplicate sets", groups.len());
///         println!("Can reclaim {} bytes", summary.wasted_bytes);
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files starting from the given path.
    ///
    /// Runs the complete pipeline and returns duplicate sets (members in
    /// scan-encounter order) along with summary statistics.
    ///
    /// A cancellation signal does not error the scan: the finder stops
    /// issuing new hash computations and returns the sets completed so far
    /// with `summary.interrupted` set.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] only for setup failures: the path does not
    /// exist or is not a directory. Per-file read failures are collected in
    /// the summary.
    pub fn find_duplicates(
        &self,
        path: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start_time = std::time::Instant::now();
        let mut summary = ScanSummary::default();

        // Validate path
        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        log::info!("Starting duplicate scan of {}", path.display());

        // Phase 0 + 1: walk the directory, bucketing by size in the same pass
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("walking", 0);
            callback.on_message(&format!("Walking {}", path.display()));
        }

        let walker = Walker::new(path, self.config.walker_config.clone());
        let mut scan_errors = Vec::new();
        let (size_groups, group_stats) = {
            let errors = &mut scan_errors;
            group_by_size(
                walker
                    .walk()
                    .take_while(|_| !self.config.is_shutdown_requested())
                    .filter_map(|result| match result {
                        Ok(file) => Some(file),
                        Err(e) => {
                            errors.push(e);
                            None
                        }
                    }),
            )
        };

        summary.scan_errors = scan_errors;
        summary.total_files = group_stats.total_files;
        summary.total_size = group_stats.total_size;
        summary.eliminated_by_size = group_stats.eliminated_unique;

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("walking");
        }

        log::info!(
            "Found {} files ({})",
            summary.total_files,
            summary.total_size_display()
        );

        if self.config.is_shutdown_requested() {
            summary.interrupted = true;
        }

        // Phase 2: hash partition (or short-circuit in size-only mode)
        let groups = if !self.config.hash_enabled {
            log::info!("Hash comparison disabled: size partition is the final grouping");
            size_groups
                .into_iter()
                .map(|(size, files)| DuplicateGroup::new_unverified(size, files))
                .collect()
        } else if summary.interrupted {
            // Cancelled during the walk: issue no hash computations at all
            Vec::new()
        } else {
            self.hash_partition(size_groups, &group_stats, &mut summary)
        };

        if let Some(ref cache) = self.config.cache {
            summary.cache_hits = cache.hits();
            summary.cache_misses = cache.misses();
        }

        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.wasted_bytes = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start_time.elapsed();

        log::info!(
            "Scan complete: {} duplicate sets, {} wasted, {} per-file failures ({:.2?})",
            summary.duplicate_groups,
            summary.wasted_display(),
            summary.failure_count(),
            summary.scan_duration
        );

        Ok((groups, summary))
    }

    /// Phase 2: hash every surviving size bucket and sub-partition by digest.
    fn hash_partition(
        &self,
        size_groups: HashMap<u64, Vec<FileEntry>>,
        group_stats: &GroupingStats,
        summary: &mut ScanSummary,
    ) -> Vec<DuplicateGroup> {
        let total = group_stats.potential_duplicates;
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("hashing", total);
        }
        log::info!("Phase 2: hashing {} candidate files", total);

        // Bounded pool keeps disk seeks under control; a build failure falls
        // back to the global pool with a warning.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads.max(1))
            .build();
        if let Err(ref e) = pool {
            log::warn!("Failed to create I/O thread pool, using global pool: {e}");
        }

        let progress_counter = AtomicUsize::new(0);
        let mut groups = Vec::new();

        for (size, files) in size_groups {
            // Zero-byte files are all equal without reading content.
            if size == 0 {
                progress_counter.fetch_add(files.len(), Ordering::Relaxed);
                groups.push(DuplicateGroup::new(Hasher::empty_hash(), 0, files));
                continue;
            }

            if self.config.is_shutdown_requested() {
                summary.interrupted = true;
                log::info!("Cancellation requested: reporting sets completed so far");
                break;
            }

            let run = || self.hash_bucket(files, &progress_counter);
            let outcomes = match &pool {
                Ok(p) => p.install(run),
                Err(_) => run(),
            };

            // Sub-partition by digest, preserving encounter order both within
            // and across hash buckets.
            let mut by_hash: HashMap<Hash, Vec<FileEntry>> = HashMap::new();
            let mut first_seen: Vec<Hash> = Vec::new();
            for (file, outcome) in outcomes {
                match outcome {
                    Some(Ok(hash)) => {
                        by_hash
                            .entry(hash)
                            .or_insert_with(|| {
                                first_seen.push(hash);
                                Vec::new()
                            })
                            .push(file);
                    }
                    Some(Err(e)) => {
                        log::warn!("Failed to hash {}: {}", file.path.display(), e);
                        summary.hash_errors.push(e);
                    }
                    None => {
                        // Hash was never issued due to cancellation
                        summary.interrupted = true;
                    }
                }
            }

            for hash in first_seen {
                if let Some(members) = by_hash.remove(&hash) {
                    if members.len() >= 2 {
                        groups.push(DuplicateGroup::new(hash, size, members));
                    }
                }
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("hashing");
        }

        groups
    }

    /// Hash one size bucket in parallel.
    ///
    /// Returns one outcome per input file, in input order. `None` marks a
    /// file whose hash was never issued because cancellation was observed.
    fn hash_bucket(
        &self,
        files: Vec<FileEntry>,
        progress_counter: &AtomicUsize,
    ) -> Vec<(FileEntry, Option<Result<Hash, HashError>>)> {
        files
            .into_par_iter()
            .map(|file| {
                if self.config.is_shutdown_requested() {
                    return (file, None);
                }

                let done = progress_counter.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_progress(done, file.path.to_string_lossy().as_ref());
                }

                let outcome = self.hash_one(&file);
                if outcome.is_ok() {
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_item_completed(file.size);
                    }
                }
                (file, Some(outcome))
            })
            .collect()
    }

    /// Compute one file's digest, consulting and updating the cache.
    fn hash_one(&self, file: &FileEntry) -> Result<Hash, HashError> {
        if let Some(ref cache) = self.config.cache {
            if let Some(hash) = cache.lookup(&file.path, file.size, file.mtime_seconds()) {
                return Ok(hash);
            }
        }

        let hash = self.hasher.hash_file(&file.path)?;

        if let Some(ref cache) = self.config.cache {
            cache.update(&file.path, CacheEntry::new(file, &hash));
        }

        Ok(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) {
        let mut f = File::create(dir.join(name)).unwrap();
        f.write_all(content).unwrap();
    }

    fn recursive_finder() -> DuplicateFinder {
        let config = FinderConfig::default().with_walker_config(WalkerConfig {
            recursive: true,
            ..Default::default()
        });
        DuplicateFinder::new(config)
    }

    #[test]
    fn test_find_duplicates_missing_path() {
        let finder = DuplicateFinder::with_defaults();
        let err = finder
            .find_duplicates(Path::new("/nonexistent/dir-98765"))
            .unwrap_err();
        assert!(matches!(err, FinderError::PathNotFound(_)));
    }

    #[test]
    fn test_find_duplicates_not_a_directory() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "plain.txt", b"not a dir");

        let finder = DuplicateFinder::with_defaults();
        let err = finder
            .find_duplicates(&dir.path().join("plain.txt"))
            .unwrap_err();
        assert!(matches!(err, FinderError::NotADirectory(_)));
    }

    #[test]
    fn test_basic_duplicate_detection() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"X");
        write_file(dir.path(), "b.txt", b"X");
        write_file(dir.path(), "c.txt", b"Y");

        let (groups, summary) = recursive_finder().find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(summary.duplicate_groups, 1);
        assert_eq!(summary.wasted_bytes, 1);
        assert!(groups[0].verified);
    }

    #[test]
    fn test_same_size_different_content_not_grouped() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"foo");
        write_file(dir.path(), "b.txt", b"bar");

        let (groups, summary) = recursive_finder().find_duplicates(dir.path()).unwrap();

        assert!(groups.is_empty());
        assert_eq!(summary.wasted_bytes, 0);
    }

    #[test]
    fn test_size_only_mode_groups_by_size() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"foo");
        write_file(dir.path(), "b.txt", b"bar");

        let config = FinderConfig::default()
            .with_hash_enabled(false)
            .with_walker_config(WalkerConfig {
                recursive: true,
                ..Default::default()
            });
        let (groups, _) = DuplicateFinder::new(config)
            .find_duplicates(dir.path())
            .unwrap();

        // Accepted false positive: same size, different content
        assert_eq!(groups.len(), 1);
        assert!(!groups[0].verified);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_zero_byte_files_grouped_without_io() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("e1")).unwrap();
        File::create(dir.path().join("e2")).unwrap();
        File::create(dir.path().join("e3")).unwrap();

        let (groups, _) = recursive_finder().find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].size, 0);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].hash, Hasher::empty_hash());
    }

    #[test]
    fn test_group_members_in_encounter_order() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "zz.txt", b"same");
        write_file(dir.path(), "aa.txt", b"same");
        write_file(dir.path(), "mm.txt", b"same");

        let (groups, _) = recursive_finder().find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        let names: Vec<_> = groups[0]
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        // Walker visits children sorted by name
        assert_eq!(names, vec!["aa.txt", "mm.txt", "zz.txt"]);
    }

    #[test]
    fn test_vanished_file_excluded_but_scan_continues() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"same-content");
        write_file(dir.path(), "b.txt", b"same-content");
        write_file(dir.path(), "c.txt", b"gone-content");
        write_file(dir.path(), "d.txt", b"gone-content");

        // Remove one candidate between the walk and the hash phase by
        // pre-building entries: simplest robust simulation is a subdir scan
        // where one file is deleted after walking. Instead, hash a bucket
        // directly with a dead path.
        let finder = recursive_finder();
        let files = vec![
            FileEntry::new(dir.path().join("a.txt"), 12, std::time::SystemTime::now()),
            FileEntry::new(dir.path().join("missing.txt"), 12, std::time::SystemTime::now()),
        ];
        let counter = AtomicUsize::new(0);
        let outcomes = finder.hash_bucket(files, &counter);

        assert!(matches!(outcomes[0].1, Some(Ok(_))));
        assert!(matches!(outcomes[1].1, Some(Err(HashError::NotFound(_)))));
    }

    #[test]
    fn test_interrupted_scan_reports_partial_results() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"XY");
        write_file(dir.path(), "b.txt", b"XY");

        let flag = Arc::new(AtomicBool::new(true));
        let config = FinderConfig::default()
            .with_shutdown_flag(flag)
            .with_walker_config(WalkerConfig {
                recursive: true,
                ..Default::default()
            });

        let (groups, summary) = DuplicateFinder::new(config)
            .find_duplicates(dir.path())
            .unwrap();

        // Flag was already set: no hashes issued, no error, partial result
        assert!(summary.interrupted);
        assert!(groups.is_empty());
    }

    #[test]
    fn test_mixed_bucket_groups_only_equal_content() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a.txt", b"dup");
        write_file(dir.path(), "b.txt", b"dup");
        fs::create_dir(dir.path().join("sub")).unwrap();
        write_file(&dir.path().join("sub"), "c.txt", b"xyz");

        let (groups, summary) = recursive_finder().find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(summary.duplicate_files, 1);
        assert_eq!(summary.failure_count(), 0);
    }
}
