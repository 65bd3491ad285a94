//! Output formatters for duplicate scan results.
//!
//! This module provides the two report formats:
//! - [`text`]: human-readable console report
//! - [`json`]: JSON for automation and scripting
//!
//! # Example
//!
//! ```no_run
//! use dupescan::duplicates::DuplicateFinder;
//! use dupescan::output::json::JsonOutput;
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::with_defaults();
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//!
//! let output = JsonOutput::new(&groups, &summary);
//! println!("{}", output.to_json_pretty().unwrap());
//! ```

pub mod json;
pub mod text;

// Re-export main types
pub use json::JsonOutput;
pub use text::TextReport;

use crate::cli::SortKey;
use crate::duplicates::DuplicateGroup;

/// Sort duplicate sets for display.
///
/// `size` orders by member file size descending (biggest savings first);
/// `count` orders by member count descending. Ties fall back to the other
/// key so the order is fully determined.
pub fn sort_groups(groups: &mut [DuplicateGroup], key: SortKey) {
    match key {
        SortKey::Size => {
            groups.sort_by(|a, b| b.size.cmp(&a.size).then(b.len().cmp(&a.len())));
        }
        SortKey::Count => {
            groups.sort_by(|a, b| b.len().cmp(&a.len()).then(b.size.cmp(&a.size)));
        }
    }
}
