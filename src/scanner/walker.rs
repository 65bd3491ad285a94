//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing a directory
//! tree and collecting file metadata for duplicate detection. Traversal is
//! lazy: entries are yielded one at a time so the grouping phase can consume
//! them in a single pass without materializing the whole tree.
//!
//! # Features
//!
//! - Recursive or single-level traversal
//! - Hidden file and directory filtering
//! - Size filtering (min/max)
//! - Extension allow-list filtering
//! - The fingerprint cache file is never yielded as a candidate
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig {
//!     recursive: true,
//!     min_size: 1024,    // Skip files under 1KB
//!     ..Default::default()
//! };
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, ScanError, WalkerConfig};
use crate::cache::CACHE_FILE_NAME;

/// Directory walker for streaming file discovery.
///
/// Yields a lazy, finite, non-restartable sequence of [`FileEntry`] values
/// honoring the configured filters. Errors are yielded inline as
/// [`ScanError`] values rather than stopping iteration.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - Root directory to scan
    /// * `config` - Walker configuration options
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupescan::scanner::{Walker, WalkerConfig};
    /// use std::path::Path;
    ///
    /// let walker = Walker::new(Path::new("."), WalkerConfig::default());
    /// ```
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Children are visited in file-name order so encounter order is
    /// deterministic for a given tree.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let max_depth = if self.config.recursive { usize::MAX } else { 1 };
        let include_hidden = self.config.include_hidden;

        WalkDir::new(&self.root)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                // Never prune the root itself; hidden filtering also prunes
                // whole hidden directories before descending into them.
                entry.depth() == 0 || include_hidden || !is_hidden(entry.file_name())
            })
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry),
                Err(e) => Some(Err(self.map_walk_error(e))),
            })
    }

    /// Apply per-file filters and build a FileEntry if the entry qualifies.
    fn process_entry(&self, entry: &DirEntry) -> Option<Result<FileEntry, ScanError>> {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            return None;
        }

        // Symlinks are never followed; hashing through them would double-count
        // the target's content.
        if file_type.is_symlink() {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        // The fingerprint cache lives inside the scan root; it is not a candidate.
        if entry.file_name() == OsStr::new(CACHE_FILE_NAME) {
            log::trace!("Skipping cache file: {}", entry.path().display());
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                let path = entry.path().to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("metadata unavailable"));
                return Some(Err(self.map_io_error(path, source)));
            }
        };

        if !metadata.is_file() {
            return None;
        }

        let size = metadata.len();
        if !self.passes_size_filter(size) {
            log::trace!(
                "Skipping file due to size filter ({}): {}",
                size,
                entry.path().display()
            );
            return None;
        }

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let file = FileEntry::new(entry.path().to_path_buf(), size, modified);

        if !self.passes_extension_filter(&file) {
            log::trace!("Skipping file due to extension filter: {}", file.path.display());
            return None;
        }

        Some(Ok(file))
    }

    /// Check if a file passes size filters.
    fn passes_size_filter(&self, size: u64) -> bool {
        if size < self.config.min_size {
            return false;
        }
        if let Some(max) = self.config.max_size {
            if size > max {
                return false;
            }
        }
        true
    }

    /// Check if a file passes the extension allow-list.
    fn passes_extension_filter(&self, file: &FileEntry) -> bool {
        match &self.config.extensions {
            None => true,
            Some(allowed) => file
                .extension
                .as_ref()
                .is_some_and(|ext| allowed.iter().any(|a| a == ext)),
        }
    }

    /// Map a walkdir error to a ScanError.
    fn map_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.into_io_error() {
            Some(io) => self.map_io_error(path, io),
            None => ScanError::Io {
                path,
                source: std::io::Error::other("filesystem loop detected"),
            },
        }
    }

    /// Map an I/O error during file access to a ScanError.
    fn map_io_error(&self, path: PathBuf, error: std::io::Error) -> ScanError {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            ErrorKind::NotFound => {
                log::debug!("File not found (may have been deleted): {}", path.display());
                ScanError::NotFound(path)
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
                ScanError::Io {
                    path,
                    source: error,
                }
            }
        }
    }
}

/// Check whether a file name is hidden (starts with `.`).
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}
