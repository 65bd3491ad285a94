//! Duplicate detection pipeline.
//!
//! Two-phase detection: group candidate files by exact size, then confirm
//! duplicates by hashing the survivors. See [`finder`] for the orchestrating
//! [`DuplicateFinder`] and [`groups`] for the grouping primitives.

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_size, DuplicateGroup, GroupingStats};
