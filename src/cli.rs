//! Command-line interface definitions.
//!
//! This module defines all CLI arguments and options using the clap derive
//! API. There is a single invocation form: scan a directory, report
//! duplicate sets, and optionally delete redundant copies.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates under the current directory
//! dupescan -r
//!
//! # Only images over 1MB, JSON output for scripting
//! dupescan -r ~/Pictures -e .jpg,.png --min-size 1MB --output json
//!
//! # Delete redundant copies, keeping the oldest of each set
//! dupescan -r ~/Downloads --delete --keep oldest
//!
//! # Preview what deletion would do
//! dupescan -r ~/Downloads --delete --dry-run
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::actions::KeepStrategy;

/// Find and optionally remove duplicate files.
///
/// Files are compared by size first and then by BLAKE3 content hash, with a
/// fingerprint cache in the scan root to skip re-hashing unchanged files on
/// subsequent runs.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to search (default: current directory)
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Search recursively in subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Delete duplicate files, keeping one copy per set
    #[arg(short, long)]
    pub delete: bool,

    /// Show what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Minimum file size to consider (e.g., 1KB, 1MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Maximum file size to consider (e.g., 1GB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(long, value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Comma-separated list of file extensions to include (e.g., .jpg,.png)
    ///
    /// Case-insensitive; the leading dot is optional.
    #[arg(short, long, value_name = "LIST")]
    pub extensions: Option<String>,

    /// Include hidden files and directories (starting with .)
    #[arg(short = 'a', long)]
    pub include_hidden: bool,

    /// Don't use hash comparison (same grouping as --size-only)
    #[arg(long)]
    pub no_hash: bool,

    /// Compare files by size only (faster, may report false positives)
    #[arg(long)]
    pub size_only: bool,

    /// Don't read or write the fingerprint cache
    #[arg(long)]
    pub no_cache: bool,

    /// Sort duplicate sets by file size or member count
    #[arg(short, long, value_enum, default_value = "size")]
    pub sort: SortKey,

    /// Which file to keep when deleting duplicates
    #[arg(long, value_enum, default_value = "newest")]
    pub keep: KeepStrategy,

    /// Move discarded files to the system trash instead of deleting permanently
    #[arg(long)]
    pub trash: bool,

    /// Number of I/O threads for hashing
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,
}

impl Cli {
    /// Whether content hashing is enabled for this invocation.
    ///
    /// Both `--no-hash` and `--size-only` skip the hash phase entirely and
    /// accept the size partition as the final grouping.
    #[must_use]
    pub fn hash_enabled(&self) -> bool {
        !(self.no_hash || self.size_only)
    }

    /// Parsed extension allow-list, normalized for matching.
    #[must_use]
    pub fn extension_list(&self) -> Option<Vec<String>> {
        self.extensions.as_deref().map(parse_extensions)
    }
}

/// Sort order for reported duplicate sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    /// Largest file size first
    Size,
    /// Most members first
    Count,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Size => write!(f, "size"),
            SortKey::Count => write!(f, "count"),
        }
    }
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console report
    Text,
    /// JSON output for scripting
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB.
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupescan::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Find where the number ends and the suffix begins
    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    if num < 0.0 {
        return Err("Size cannot be negative".to_string());
    }

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}

/// Normalize a comma-separated extension list for matching.
///
/// Extensions are lowercased and dot-prefixed; empty items are dropped.
/// `"JPG, .png"` becomes `[".jpg", ".png"]`.
#[must_use]
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty() && *ext != ".")
        .map(|ext| {
            let ext = ext.to_lowercase();
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}
