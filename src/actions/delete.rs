//! File deletion for discarded duplicates.
//!
//! # Overview
//!
//! This module applies retention decisions to the filesystem:
//! - Permanent deletion (default)
//! - Move to system trash (recoverable, via the `trash` crate)
//! - Batch operations that continue past per-file failures
//!
//! # Safety
//!
//! Deletion only ever receives the discard side of a [`Retention`], so at
//! least one copy of every duplicate set always survives. Dry-run is handled
//! upstream: the orchestrator reports the discard list without calling into
//! this module at all.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::retain::Retention;

/// Error type for deletion operations.
///
/// All variants are local to one file; batch deletion records them and
/// continues with the remaining discard candidates.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (may have been deleted or moved since the scan).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed {
        /// Path that could not be trashed
        path: PathBuf,
        /// Backend error message
        message: String,
    },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::TrashFailed { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

/// Result of a successful deletion operation.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Whether the file went to the trash (true) or was removed permanently.
    pub trashed: bool,
}

/// Results of a batch deletion operation.
#[derive(Debug, Clone, Default)]
pub struct BatchDeleteResult {
    /// Successfully deleted files.
    pub successes: Vec<DeleteResult>,
    /// Failed deletions with their error messages.
    pub failures: Vec<(PathBuf, String)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

impl BatchDeleteResult {
    /// Number of successful deletions.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed deletions.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if all deletions succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable summary of the operation.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.all_succeeded() {
            format!(
                "Deleted {} file(s), freed {}",
                self.success_count(),
                bytesize::ByteSize::b(self.bytes_freed)
            )
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                bytesize::ByteSize::b(self.bytes_freed)
            )
        }
    }
}

/// Configuration for deletion operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteConfig {
    /// Move files to the system trash instead of deleting permanently.
    pub use_trash: bool,
}

impl DeleteConfig {
    /// Create config for permanent deletion.
    #[must_use]
    pub fn permanent() -> Self {
        Self { use_trash: false }
    }

    /// Create config for recoverable deletion via the system trash.
    #[must_use]
    pub fn trash() -> Self {
        Self { use_trash: true }
    }
}

/// Delete a single file according to the configuration.
///
/// # Errors
///
/// Returns [`DeleteError`] if the file cannot be removed; the error is local
/// to this file.
pub fn delete_file(path: &Path, size: u64, config: DeleteConfig) -> Result<DeleteResult, DeleteError> {
    if config.use_trash {
        trash::delete(path).map_err(|e| DeleteError::TrashFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    } else {
        fs::remove_file(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
            _ => DeleteError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
    }

    log::debug!(
        "{} {}",
        if config.use_trash { "Trashed" } else { "Deleted" },
        path.display()
    );

    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        trashed: config.use_trash,
    })
}

/// Delete the discard side of every retention decision.
///
/// Failures are recorded per file and deletion continues with the remaining
/// candidates; the kept member of each set is never touched.
#[must_use]
pub fn delete_discards(retentions: &[Retention], config: DeleteConfig) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for retention in retentions {
        for file in &retention.discard {
            match delete_file(&file.path, file.size, config) {
                Ok(deleted) => {
                    result.bytes_freed += deleted.size;
                    result.successes.push(deleted);
                }
                Err(e) => {
                    log::warn!("Failed to delete {}: {}", file.path.display(), e);
                    result.failures.push((file.path.clone(), e.to_string()));
                }
            }
        }
    }

    result
}
