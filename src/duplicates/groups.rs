//! Duplicate grouping and size-based file organization.
//!
//! # Overview
//!
//! This module provides the size-grouping phase of duplicate detection and
//! the [`DuplicateGroup`] type emitted by the pipeline.
//!
//! ## Size Grouping (Phase 1)
//!
//! Size grouping buckets files by their exact byte size, eliminating most
//! non-duplicates instantly since files with different sizes cannot be
//! duplicates. It is a single pass over the walker's lazy stream and
//! performs no file I/O.
//!
//! # Example
//!
//! ```
//! use dupescan::scanner::FileEntry;
//! use dupescan::duplicates::group_by_size;
//! use std::path::PathBuf;
//! use std::time::SystemTime;
//!
//! let files = vec![
//!     FileEntry::new(PathBuf::from("/file1.txt"), 1024, SystemTime::now()),
//!     FileEntry::new(PathBuf::from("/file2.txt"), 1024, SystemTime::now()),
//!     FileEntry::new(PathBuf::from("/file3.txt"), 2048, SystemTime::now()),
//! ];
//!
//! // Group by size - only groups with 2+ files are potential duplicates
//! let (groups, stats) = group_by_size(files);
//!
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.potential_duplicates, 2);  // Two 1024-byte files
//! assert_eq!(groups.len(), 1);  // Only one size group with multiple files
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// Confirmed set of duplicate files.
///
/// Members share both size and, unless the group is unverified (size-only
/// mode), content hash. `files` preserves scan-encounter order; the `first`
/// retention strategy relies on this.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// BLAKE3 hash of the file content. All zeros for unverified groups.
    pub hash: Hash,
    /// File size in bytes, shared by all members.
    pub size: u64,
    /// Member files in scan-encounter order. Always 2 or more.
    pub files: Vec<FileEntry>,
    /// False when the group was formed by size alone without hashing.
    pub verified: bool,
}

impl DuplicateGroup {
    /// Create a hash-confirmed duplicate group.
    #[must_use]
    pub fn new(hash: Hash, size: u64, files: Vec<FileEntry>) -> Self {
        Self {
            hash,
            size,
            files,
            verified: true,
        }
    }

    /// Create a size-only group (content not verified).
    #[must_use]
    pub fn new_unverified(size: u64, files: Vec<FileEntry>) -> Self {
        Self {
            hash: [0u8; 32],
            size,
            files,
            verified: false,
        }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (total minus the one to keep).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes wasted by redundant copies: (members - 1) x size.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Statistics from the size grouping phase.
///
/// Provides insight into the distribution of files by size and the
/// effectiveness of the size filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupingStats {
    /// Total number of files processed
    pub total_files: usize,
    /// Total size of all files in bytes
    pub total_size: u64,
    /// Number of unique file sizes
    pub unique_sizes: usize,
    /// Number of files that could be duplicates (in groups of 2+)
    pub potential_duplicates: usize,
    /// Number of files eliminated as unique (singleton groups)
    pub eliminated_unique: usize,
    /// Number of size groups with 2+ files
    pub duplicate_groups: usize,
}

impl GroupingStats {
    /// Percentage of files eliminated by size grouping.
    #[must_use]
    pub fn elimination_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.eliminated_unique as f64 / self.total_files as f64) * 100.0
        }
    }
}

/// Group files by size (Phase 1 of duplicate detection).
///
/// Consumes the input stream in a single pass; files with a unique size are
/// pruned since they cannot have duplicates. Bucket vectors preserve the
/// order files arrived in.
///
/// Zero-byte files are grouped like any other size: they are trivially
/// identical to each other and short-circuit phase 2 without any I/O.
///
/// # Arguments
///
/// * `files` - Stream of file entries to group
///
/// # Returns
///
/// A tuple of:
/// - `HashMap<u64, Vec<FileEntry>>` - Files grouped by size (only groups with 2+ files)
/// - `GroupingStats` - Statistics about the grouping operation
///
/// # Example
///
/// ```
/// use dupescan::scanner::FileEntry;
/// use dupescan::duplicates::group_by_size;
/// use std::path::PathBuf;
/// use std::time::SystemTime;
///
/// let files = vec![
///     FileEntry::new(PathBuf::from("/a.txt"), 100, SystemTime::now()),
///     FileEntry::new(PathBuf::from("/b.txt"), 100, SystemTime::now()),
///     FileEntry::new(PathBuf::from("/c.txt"), 200, SystemTime::now()),
/// ];
///
/// let (groups, stats) = group_by_size(files);
///
/// // Only the 100-byte group is returned (has 2 files)
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[&100].len(), 2);
///
/// assert_eq!(stats.total_files, 3);
/// assert_eq!(stats.eliminated_unique, 1);  // The 200-byte file
/// ```
#[must_use]
pub fn group_by_size(
    files: impl IntoIterator<Item = FileEntry>,
) -> (HashMap<u64, Vec<FileEntry>>, GroupingStats) {
    let mut all_groups: HashMap<u64, Vec<FileEntry>> = HashMap::new();
    let mut stats = GroupingStats::default();

    for file in files {
        stats.total_files += 1;
        stats.total_size += file.size;
        all_groups.entry(file.size).or_default().push(file);
    }

    stats.unique_sizes = all_groups.len();

    let filtered_groups: HashMap<u64, Vec<FileEntry>> = all_groups
        .into_iter()
        .filter(|(size, files)| {
            if files.len() == 1 {
                stats.eliminated_unique += 1;
                log::trace!(
                    "Eliminated unique size {}: {}",
                    size,
                    files[0].path.display()
                );
                false
            } else {
                stats.potential_duplicates += files.len();
                stats.duplicate_groups += 1;
                log::debug!(
                    "Size group {} bytes: {} potential duplicates",
                    size,
                    files.len()
                );
                true
            }
        })
        .collect();

    log::info!(
        "Phase 1 complete: {} files, {} potential duplicates ({:.1}% eliminated)",
        stats.total_files,
        stats.potential_duplicates,
        stats.elimination_rate()
    );

    (filtered_groups, stats)
}
