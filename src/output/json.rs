//! JSON output for automation and scripting.
//!
//! The JSON document carries the duplicate sets, scan statistics, and the
//! per-file failures so scripted callers never need to parse the text
//! report.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::scanner::FileEntry;

/// Serializable scan report.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Number of files that passed the walker's filters
    pub scanned_files: usize,
    /// Total size of scanned files in bytes
    pub total_size_bytes: u64,
    /// Number of duplicate sets
    pub duplicate_sets: usize,
    /// Number of redundant files across all sets
    pub duplicate_files: usize,
    /// Total wasted bytes: (members - 1) x size per set
    pub wasted_bytes: u64,
    /// Fingerprint cache hits during hashing
    pub cache_hits: u64,
    /// Fingerprint cache misses during hashing
    pub cache_misses: u64,
    /// True when the scan was cut short by a cancellation signal
    pub interrupted: bool,
    /// The duplicate sets themselves
    pub sets: Vec<JsonGroup>,
    /// Per-file failures, as display strings
    pub errors: Vec<String>,
}

/// One duplicate set in the JSON report.
#[derive(Debug, Serialize)]
pub struct JsonGroup {
    /// Content hash in hex; `null` for size-only (unverified) sets
    pub hash: Option<String>,
    /// Member file size in bytes
    pub size: u64,
    /// Number of members
    pub count: usize,
    /// Wasted bytes within this set
    pub wasted_bytes: u64,
    /// Member files in scan-encounter order
    pub files: Vec<JsonFile>,
}

/// One file within a duplicate set.
#[derive(Debug, Serialize)]
pub struct JsonFile {
    /// Absolute path
    pub path: String,
    /// Modification time, RFC 3339
    pub modified: String,
}

impl JsonFile {
    fn from_entry(file: &FileEntry) -> Self {
        Self {
            path: file.path.to_string_lossy().into_owned(),
            modified: DateTime::<Utc>::from(file.modified).to_rfc3339(),
        }
    }
}

/// JSON formatter over scan results.
///
/// # Example
///
/// ```no_run
/// use dupescan::duplicates::DuplicateFinder;
/// use dupescan::output::JsonOutput;
/// use std::path::Path;
///
/// let finder = DuplicateFinder::with_defaults();
/// let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
/// println!("{}", JsonOutput::new(&groups, &summary).to_json_pretty().unwrap());
/// ```
pub struct JsonOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> JsonOutput<'a> {
    /// Create a JSON formatter over sorted duplicate sets and the summary.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Build the serializable report.
    #[must_use]
    pub fn report(&self) -> JsonReport {
        let sets = self
            .groups
            .iter()
            .map(|group| JsonGroup {
                hash: group.verified.then(|| group.hash_hex()),
                size: group.size,
                count: group.len(),
                wasted_bytes: group.wasted_space(),
                files: group.files.iter().map(JsonFile::from_entry).collect(),
            })
            .collect();

        let errors = self
            .summary
            .scan_errors
            .iter()
            .map(ToString::to_string)
            .chain(self.summary.hash_errors.iter().map(ToString::to_string))
            .collect();

        JsonReport {
            scanned_files: self.summary.total_files,
            total_size_bytes: self.summary.total_size,
            duplicate_sets: self.summary.duplicate_groups,
            duplicate_files: self.summary.duplicate_files,
            wasted_bytes: self.summary.wasted_bytes,
            cache_hits: self.summary.cache_hits,
            cache_misses: self.summary.cache_misses,
            interrupted: self.summary.interrupted,
            sets,
            errors,
        }
    }

    /// Serialize the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.report())
    }
}
