//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Streaming directory walking using walkdir
//! - Content hashing with BLAKE3
//! - Size, extension, and hidden-file filtering
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! // Configure the walker
//! let config = WalkerConfig {
//!     recursive: true,
//!     min_size: 1024,        // Skip files under 1KB
//!     ..Default::default()
//! };
//!
//! // Walk the directory
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// Re-export main types
pub use hasher::{hash_to_hex, hex_to_hash, Hash, Hasher, BLOCK_SIZE};
pub use walker::Walker;

/// Metadata snapshot for a discovered file.
///
/// Contains all information needed for duplicate detection: path, size,
/// modification time, and the lowercased extension used by the allow-list
/// filter. Immutable once produced by the walker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
    /// Lowercased, dot-prefixed extension (e.g. `.jpg`), if any
    pub extension: Option<String>,
}

impl FileEntry {
    /// Create a new FileEntry, deriving the extension from the path.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `size` - File size in bytes
    /// * `modified` - Last modification time
    #[must_use]
    pub fn new(path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let extension = normalized_extension(&path);
        Self {
            path,
            size,
            modified,
            extension,
        }
    }

    /// Modification time as fractional seconds since the Unix epoch.
    ///
    /// This is the representation stored in the fingerprint cache.
    /// Pre-epoch timestamps collapse to 0.0.
    #[must_use]
    pub fn mtime_seconds(&self) -> f64 {
        self.modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Extract the lowercased, dot-prefixed extension from a path.
fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// Configuration for directory walking.
///
/// Controls recursion, filtering, and hidden-file behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories. When false, only the top level is scanned.
    pub recursive: bool,

    /// Include hidden files and directories (names starting with `.`).
    pub include_hidden: bool,

    /// Minimum file size to include (in bytes).
    pub min_size: u64,

    /// Maximum file size to include (in bytes).
    /// Files larger than this are skipped.
    pub max_size: Option<u64>,

    /// Extension allow-list (lowercased, dot-prefixed).
    /// When set, only files whose extension appears here are yielded.
    pub extensions: Option<Vec<String>>,
}

impl WalkerConfig {
    /// Create a new configuration from CLI arguments.
    #[must_use]
    pub fn new(
        recursive: bool,
        include_hidden: bool,
        min_size: u64,
        max_size: Option<u64>,
        extensions: Option<Vec<String>>,
    ) -> Self {
        Self {
            recursive,
            include_hidden,
            min_size,
            max_size,
            extensions,
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
///
/// These are per-file failures; a hashing error excludes the file from its
/// group but never aborts the scan.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found (may have vanished mid-scan).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// Map an I/O error for a given path into the matching variant.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }

    /// The path this failure concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_new() {
        let entry = FileEntry::new(PathBuf::from("/test/photo.JPG"), 1024, SystemTime::now());

        assert_eq!(entry.path, PathBuf::from("/test/photo.JPG"));
        assert_eq!(entry.size, 1024);
        assert_eq!(entry.extension.as_deref(), Some(".jpg"));
    }

    #[test]
    fn test_file_entry_no_extension() {
        let entry = FileEntry::new(PathBuf::from("/test/Makefile"), 64, SystemTime::now());
        assert_eq!(entry.extension, None);
    }

    #[test]
    fn test_mtime_seconds_epoch() {
        let entry = FileEntry::new(PathBuf::from("/a"), 1, UNIX_EPOCH);
        assert_eq!(entry.mtime_seconds(), 0.0);
    }

    #[test]
    fn test_walker_config_default() {
        let config = WalkerConfig::default();

        assert!(!config.recursive);
        assert!(!config.include_hidden);
        assert_eq!(config.min_size, 0);
        assert!(config.max_size.is_none());
        assert!(config.extensions.is_none());
    }

    #[test]
    fn test_walker_config_new() {
        let config = WalkerConfig::new(
            true,
            true,
            1024,
            Some(1_000_000),
            Some(vec![".jpg".to_string()]),
        );

        assert!(config.recursive);
        assert!(config.include_hidden);
        assert_eq!(config.min_size, 1024);
        assert_eq!(config.max_size, Some(1_000_000));
        assert_eq!(config.extensions, Some(vec![".jpg".to_string()]));
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::PermissionDenied(PathBuf::from("/test"));
        assert_eq!(err.to_string(), "Permission denied: /test");

        let err = ScanError::NotFound(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Path not found: /missing");
    }

    #[test]
    fn test_hash_error_from_io() {
        let err = HashError::from_io(
            Path::new("/secret"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, HashError::PermissionDenied(_)));
        assert_eq!(err.path(), Path::new("/secret"));

        let err = HashError::from_io(
            Path::new("/gone"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, HashError::NotFound(_)));
    }
}
