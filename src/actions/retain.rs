//! Retention policy: which member of a duplicate set survives deletion.
//!
//! # Overview
//!
//! [`select`] is a pure function from a duplicate set and a strategy to a
//! keep/discard split. It performs no I/O and never deletes anything; the
//! orchestrator applies the decision through [`crate::actions::delete`].
//!
//! Timestamp ties under `newest`/`oldest` are broken by encounter order for
//! determinism: the earliest-encountered member among the tied extremes wins.

use clap::ValueEnum;

use crate::duplicates::DuplicateGroup;
use crate::scanner::FileEntry;

/// Policy choosing which member of a duplicate set to keep.
///
/// Parsed once from the CLI into this closed enum; deletion logic never
/// compares strategy strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum KeepStrategy {
    /// Keep the member with the latest modification time.
    #[default]
    Newest,
    /// Keep the member with the earliest modification time.
    Oldest,
    /// Keep the member first encountered during the scan.
    First,
}

impl std::fmt::Display for KeepStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeepStrategy::Newest => write!(f, "newest"),
            KeepStrategy::Oldest => write!(f, "oldest"),
            KeepStrategy::First => write!(f, "first"),
        }
    }
}

/// Result of applying a retention strategy to one duplicate set.
#[derive(Debug, Clone)]
pub struct Retention {
    /// The member that survives.
    pub keep: FileEntry,
    /// Members to remove, in encounter order.
    pub discard: Vec<FileEntry>,
}

impl Retention {
    /// Total bytes that deletion of the discards would free.
    #[must_use]
    pub fn reclaimable(&self) -> u64 {
        self.discard.iter().map(|f| f.size).sum()
    }
}

/// Pick the member of a duplicate set to keep under the given strategy.
///
/// Returns `None` for an empty set (a [`DuplicateGroup`] is never empty in
/// practice, but the selector does not rely on that invariant).
///
/// # Example
///
/// ```
/// use dupescan::actions::{select, KeepStrategy};
/// use dupescan::duplicates::DuplicateGroup;
/// use dupescan::scanner::FileEntry;
/// use std::path::PathBuf;
/// use std::time::{Duration, UNIX_EPOCH};
///
/// let group = DuplicateGroup::new(
///     [0u8; 32],
///     10,
///     vec![
///         FileEntry::new(PathBuf::from("/old"), 10, UNIX_EPOCH + Duration::from_secs(100)),
///         FileEntry::new(PathBuf::from("/new"), 10, UNIX_EPOCH + Duration::from_secs(200)),
///     ],
/// );
///
/// let retention = select(&group, KeepStrategy::Newest).unwrap();
/// assert_eq!(retention.keep.path, PathBuf::from("/new"));
/// assert_eq!(retention.discard.len(), 1);
/// ```
#[must_use]
pub fn select(group: &DuplicateGroup, strategy: KeepStrategy) -> Option<Retention> {
    if group.files.is_empty() {
        return None;
    }

    let keep_index = match strategy {
        KeepStrategy::First => 0,
        KeepStrategy::Newest => extreme_index(&group.files, |candidate, best| candidate > best),
        KeepStrategy::Oldest => extreme_index(&group.files, |candidate, best| candidate < best),
    };

    let mut discard = Vec::with_capacity(group.files.len() - 1);
    for (i, file) in group.files.iter().enumerate() {
        if i != keep_index {
            discard.push(file.clone());
        }
    }

    Some(Retention {
        keep: group.files[keep_index].clone(),
        discard,
    })
}

/// Index of the extreme mtime under a strict comparison.
///
/// The strict comparison means ties keep the earlier index, which is the
/// encounter-order tie-break.
fn extreme_index(
    files: &[FileEntry],
    better: impl Fn(std::time::SystemTime, std::time::SystemTime) -> bool,
) -> usize {
    let mut best = 0;
    for (i, file) in files.iter().enumerate().skip(1) {
        if better(file.modified, files[best].modified) {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn make_file(path: &str, mtime_secs: u64) -> FileEntry {
        FileEntry::new(
            PathBuf::from(path),
            10,
            UNIX_EPOCH + Duration::from_secs(mtime_secs),
        )
    }

    fn make_group(files: Vec<FileEntry>) -> DuplicateGroup {
        DuplicateGroup::new([0u8; 32], 10, files)
    }

    #[test]
    fn test_newest_keeps_latest_mtime() {
        let group = make_group(vec![
            make_file("/a", 100),
            make_file("/b", 300),
            make_file("/c", 200),
        ]);

        let retention = select(&group, KeepStrategy::Newest).unwrap();

        assert_eq!(retention.keep.path, PathBuf::from("/b"));
        for file in &retention.discard {
            assert!(file.modified <= retention.keep.modified);
        }
    }

    #[test]
    fn test_oldest_keeps_earliest_mtime() {
        let group = make_group(vec![
            make_file("/a", 100),
            make_file("/b", 300),
            make_file("/c", 50),
        ]);

        let retention = select(&group, KeepStrategy::Oldest).unwrap();

        assert_eq!(retention.keep.path, PathBuf::from("/c"));
        for file in &retention.discard {
            assert!(file.modified >= retention.keep.modified);
        }
    }

    #[test]
    fn test_first_keeps_encounter_index_zero() {
        let group = make_group(vec![
            make_file("/later-but-first", 999),
            make_file("/a", 100),
            make_file("/b", 100),
        ]);

        let retention = select(&group, KeepStrategy::First).unwrap();
        assert_eq!(retention.keep.path, PathBuf::from("/later-but-first"));
        assert_eq!(retention.discard.len(), 2);
    }

    #[test]
    fn test_mtime_tie_broken_by_encounter_order() {
        let group = make_group(vec![
            make_file("/first-of-tie", 100),
            make_file("/second-of-tie", 100),
            make_file("/third", 50),
        ]);

        // Both strategies must pick the earliest-encountered tied member
        let newest = select(&group, KeepStrategy::Newest).unwrap();
        assert_eq!(newest.keep.path, PathBuf::from("/first-of-tie"));

        let group_all_tied = make_group(vec![
            make_file("/x", 100),
            make_file("/y", 100),
            make_file("/z", 100),
        ]);
        let oldest = select(&group_all_tied, KeepStrategy::Oldest).unwrap();
        assert_eq!(oldest.keep.path, PathBuf::from("/x"));
    }

    #[test]
    fn test_discard_preserves_encounter_order() {
        let group = make_group(vec![
            make_file("/a", 100),
            make_file("/b", 500),
            make_file("/c", 200),
            make_file("/d", 300),
        ]);

        let retention = select(&group, KeepStrategy::Newest).unwrap();
        let discarded: Vec<_> = retention
            .discard
            .iter()
            .map(|f| f.path.to_string_lossy().into_owned())
            .collect();
        assert_eq!(discarded, vec!["/a", "/c", "/d"]);
    }

    #[test]
    fn test_reclaimable_bytes() {
        let group = make_group(vec![
            make_file("/a", 1),
            make_file("/b", 2),
            make_file("/c", 3),
        ]);
        let retention = select(&group, KeepStrategy::First).unwrap();
        assert_eq!(retention.reclaimable(), 20);
    }

    #[test]
    fn test_empty_group_selects_nothing() {
        let group = make_group(Vec::new());
        assert!(select(&group, KeepStrategy::Newest).is_none());
    }

    #[test]
    fn test_selection_is_pure() {
        let group = make_group(vec![make_file("/a", 1), make_file("/b", 2)]);
        let before = group.paths();

        let _ = select(&group, KeepStrategy::Newest);
        let _ = select(&group, KeepStrategy::Oldest);

        assert_eq!(group.paths(), before);
    }
}
