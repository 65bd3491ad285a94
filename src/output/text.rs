//! Human-readable console report.
//!
//! Mirrors what the finder produced: duplicate sets with per-member
//! modification times, totals, per-file failures, and (when deletion is
//! requested) the retention plan or deletion results.

use std::io::{self, Write};

use bytesize::ByteSize;
use chrono::{DateTime, Local};
use yansi::Paint;

use crate::actions::{BatchDeleteResult, Retention};
use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::scanner::FileEntry;

/// Text report writer for scan results.
pub struct TextReport<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextReport<'a> {
    /// Create a report over sorted duplicate sets and the scan summary.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Write the full report.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.summary.interrupted {
            writeln!(
                w,
                "{}",
                "Scan interrupted: results below are partial.".yellow()
            )?;
        }

        if self.groups.is_empty() {
            writeln!(w, "\n{}", "No duplicates found!".green())?;
            self.write_failures(w)?;
            return Ok(());
        }

        writeln!(
            w,
            "\nFound {} sets of duplicates",
            self.groups.len().bold()
        )?;
        writeln!(
            w,
            "Total duplicate files: {}",
            self.summary.duplicate_files
        )?;
        writeln!(
            w,
            "Total wasted space: {}",
            self.summary.wasted_display().red().bold()
        )?;
        writeln!(w, "{}", "=".repeat(50))?;

        for (i, group) in self.groups.iter().enumerate() {
            let marker = if group.verified { "" } else { " [size match only]" };
            writeln!(
                w,
                "\nDuplicate set #{} (Size: {}){}",
                i + 1,
                ByteSize::b(group.size),
                marker.yellow()
            )?;

            for (j, file) in group.files.iter().enumerate() {
                writeln!(
                    w,
                    "  {}. {} - Modified: {}",
                    j + 1,
                    file.path.display(),
                    format_mtime(file)
                )?;
            }
        }

        writeln!(w, "{}", "=".repeat(50))?;
        self.write_failures(w)
    }

    /// Append the per-file failure summary, if any failures occurred.
    fn write_failures<W: Write>(&self, w: &mut W) -> io::Result<()> {
        if self.summary.failure_count() == 0 {
            return Ok(());
        }

        writeln!(
            w,
            "\n{} file(s) could not be read:",
            self.summary.failure_count().red()
        )?;
        for err in &self.summary.scan_errors {
            writeln!(w, "  {err}")?;
        }
        for err in &self.summary.hash_errors {
            writeln!(w, "  {err}")?;
        }
        Ok(())
    }
}

/// Write the retention plan for `--dry-run` (or ahead of deletion).
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_retention_plan<W: Write>(
    w: &mut W,
    retentions: &[Retention],
    dry_run: bool,
) -> io::Result<()> {
    let header = if dry_run {
        "DRY RUN: no files will be removed".yellow().to_string()
    } else {
        "Removing duplicates...".to_string()
    };
    writeln!(w, "\n{header}")?;

    let mut candidates = 0usize;
    let mut reclaimable = 0u64;
    for retention in retentions {
        writeln!(w, "Keeping: {}", retention.keep.path.display())?;
        for file in &retention.discard {
            writeln!(w, "  Would delete: {}", file.path.display())?;
            candidates += 1;
            reclaimable += file.size;
        }
    }

    writeln!(
        w,
        "\nWould delete {} file(s), freeing {}",
        candidates,
        ByteSize::b(reclaimable)
    )
}

/// Write the outcome of an actual deletion pass.
///
/// # Errors
///
/// Returns any I/O error from the underlying writer.
pub fn write_delete_result<W: Write>(w: &mut W, result: &BatchDeleteResult) -> io::Result<()> {
    writeln!(w, "\n{}", result.summary())?;

    if !result.all_succeeded() {
        writeln!(w, "\n{} deletion(s) failed:", result.failure_count().red())?;
        for (path, message) in &result.failures {
            writeln!(w, "  {}: {}", path.display(), message)?;
        }
    }
    Ok(())
}

/// Format a file's modification time for display.
fn format_mtime(file: &FileEntry) -> String {
    DateTime::<Local>::from(file.modified)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{select, KeepStrategy};
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn make_file(path: &str, size: u64) -> FileEntry {
        FileEntry::new(
            PathBuf::from(path),
            size,
            UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        )
    }

    fn render(groups: &[DuplicateGroup], summary: &ScanSummary) -> String {
        // Match the app's non-color path (lib.rs calls yansi::disable() when
        // color is off) so text-content assertions operate on plain output
        // rather than yansi's always-on ANSI escapes.
        yansi::disable();
        let mut buf = Vec::new();
        TextReport::new(groups, summary).write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_no_duplicates() {
        let summary = ScanSummary::default();
        let out = render(&[], &summary);
        assert!(out.contains("No duplicates found!"));
    }

    #[test]
    fn test_report_lists_sets_and_totals() {
        let groups = vec![DuplicateGroup::new(
            [1u8; 32],
            100,
            vec![make_file("/a", 100), make_file("/b", 100)],
        )];
        let summary = ScanSummary {
            duplicate_groups: 1,
            duplicate_files: 1,
            wasted_bytes: 100,
            ..Default::default()
        };

        let out = render(&groups, &summary);
        assert!(out.contains("Found 1 sets of duplicates"));
        assert!(out.contains("Duplicate set #1"));
        assert!(out.contains("/a"));
        assert!(out.contains("/b"));
        assert!(out.contains("Modified: "));
    }

    #[test]
    fn test_report_marks_unverified_sets() {
        let groups = vec![DuplicateGroup::new_unverified(
            100,
            vec![make_file("/a", 100), make_file("/b", 100)],
        )];
        let summary = ScanSummary::default();

        let out = render(&groups, &summary);
        assert!(out.contains("[size match only]"));
    }

    #[test]
    fn test_report_includes_failure_summary() {
        let summary = ScanSummary {
            hash_errors: vec![crate::scanner::HashError::NotFound(PathBuf::from("/gone"))],
            ..Default::default()
        };

        let out = render(&[], &summary);
        assert!(out.contains("could not be read"));
        assert!(out.contains("/gone"));
    }

    #[test]
    fn test_report_flags_interrupted_scan() {
        let summary = ScanSummary {
            interrupted: true,
            ..Default::default()
        };
        let out = render(&[], &summary);
        assert!(out.contains("partial"));
    }

    #[test]
    fn test_retention_plan_dry_run() {
        let group = DuplicateGroup::new(
            [1u8; 32],
            10,
            vec![make_file("/keep", 10), make_file("/toss", 10)],
        );
        let retention = select(&group, KeepStrategy::First).unwrap();

        let mut buf = Vec::new();
        write_retention_plan(&mut buf, &[retention], true).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("DRY RUN"));
        assert!(out.contains("Keeping: /keep"));
        assert!(out.contains("Would delete: /toss"));
        assert!(out.contains("Would delete 1 file(s)"));
    }

    #[test]
    fn test_delete_result_output() {
        let result = BatchDeleteResult {
            successes: Vec::new(),
            failures: vec![(PathBuf::from("/stuck"), "permission denied".into())],
            bytes_freed: 0,
        };

        let mut buf = Vec::new();
        write_delete_result(&mut buf, &result).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("1 failed"));
        assert!(out.contains("/stuck: permission denied"));
    }
}
