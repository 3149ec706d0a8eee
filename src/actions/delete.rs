//! Permanent file deletion.
//!
//! # Overview
//!
//! This module provides file deletion functionality:
//! - Single-file permanent deletion with classified errors
//! - Batch deletion with a progress callback
//! - A stop-at-first-failure default and an opt-in best-effort mode
//! - Dry runs that report without touching the filesystem
//!
//! # Example
//!
//! ```no_run
//! use dejavu::actions::delete::delete_file;
//! use std::path::PathBuf;
//!
//! let path = PathBuf::from("/path/to/duplicate.txt");
//! match delete_file(&path) {
//!     Ok(result) => println!("Deleted {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Why a single file could not be removed.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The file vanished between scanning and deletion.
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The directory does not allow removing the entry.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other failure reported by the OS.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }

    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) | Self::Io { path: p, .. } => p,
        }
    }
}

/// A file that was removed (or, in a dry run, would be).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteResult {
    /// Removed path.
    pub path: PathBuf,
    /// Size in bytes just before removal.
    pub size: u64,
}

impl DeleteResult {
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// A failed deletion, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteFailure {
    /// Path that could not be deleted.
    pub path: PathBuf,
    /// Error message.
    pub error: String,
}

/// Outcome of [`delete_batch`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchDeleteResult {
    /// Successfully deleted files (or files that would be deleted in a dry run).
    pub successes: Vec<DeleteResult>,
    /// Paths that could not be removed, with the error text.
    pub failures: Vec<DeleteFailure>,
    /// Files never attempted because an earlier deletion failed.
    pub skipped: Vec<PathBuf>,
    /// Sum of the sizes of `successes`.
    pub bytes_freed: u64,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl BatchDeleteResult {
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Paths that were attempted, successful or not.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// True when no attempted deletion failed.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary for the log.
    #[must_use]
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "Would delete" } else { "Deleted" };
        if self.all_succeeded() {
            format!(
                "{} {} file(s), {} bytes",
                verb,
                self.success_count(),
                self.bytes_freed
            )
        } else {
            format!(
                "{} {} file(s), {} failed, {} not attempted, {} bytes",
                verb,
                self.success_count(),
                self.failure_count(),
                self.skipped.len(),
                self.bytes_freed
            )
        }
    }
}

/// Failure policy and dry-run switch for [`delete_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfig {
    /// Attempt every path even after a failure.
    /// Off by default: the first failure stops the batch.
    pub continue_on_error: bool,
    /// Report what would be deleted without removing anything.
    pub dry_run: bool,
}

impl DeleteConfig {
    /// Switch between stop-at-first-failure and best effort.
    #[must_use]
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Enable/disable dry run.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Hooks invoked by [`delete_batch`] as it works through the paths.
pub trait DeleteProgressCallback {
    /// Before `path` (number `index` of `total`) is attempted.
    fn on_before_delete(&self, path: &Path, index: usize, total: usize);

    /// After `path` was removed.
    fn on_delete_success(&self, path: &Path, size: u64);

    /// After removing `path` failed.
    fn on_delete_failure(&self, path: &Path, error: &DeleteError);

    /// Once, after the last attempt.
    fn on_complete(&self, result: &BatchDeleteResult);
}

/// Callback for batches whose outcome is reported after the fact.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl DeleteProgressCallback for NoProgress {
    fn on_before_delete(&self, _path: &Path, _index: usize, _total: usize) {}
    fn on_delete_success(&self, _path: &Path, _size: u64) {}
    fn on_delete_failure(&self, _path: &Path, _error: &DeleteError) {}
    fn on_complete(&self, _result: &BatchDeleteResult) {}
}

/// Remove one file from the filesystem.
///
/// **WARNING**: This operation cannot be undone.
///
/// # Errors
///
/// - `NotFound` if nothing exists at `path`
/// - `PermissionDenied` if the OS refuses the removal
/// - `Io` for any other failure
pub fn delete_file(path: &Path) -> Result<DeleteResult, DeleteError> {
    let size = file_size(path)?;

    fs::remove_file(path).map_err(|e| {
        log::error!("Delete failed for {}: {}", path.display(), e);
        DeleteError::from_io(path, e)
    })?;

    log::info!("Deleted: {} ({} bytes)", path.display(), size);

    Ok(DeleteResult::new(path.to_path_buf(), size))
}

fn file_size(path: &Path) -> Result<u64, DeleteError> {
    fs::symlink_metadata(path)
        .map(|m| m.len())
        .map_err(|e| DeleteError::from_io(path, e))
}

/// Delete multiple files in order.
///
/// With the default configuration the batch stops at the first failure and
/// the remaining paths are listed in [`BatchDeleteResult::skipped`]. With
/// `continue_on_error` every path is attempted.
///
/// In a dry run nothing is removed; each path is checked for existence and
/// reported as a success with its current size.
pub fn delete_batch<C: DeleteProgressCallback>(
    paths: &[PathBuf],
    config: &DeleteConfig,
    callback: Option<&C>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult {
        dry_run: config.dry_run,
        ..Default::default()
    };
    let total = paths.len();

    for (index, path) in paths.iter().enumerate() {
        if let Some(cb) = callback {
            cb.on_before_delete(path, index, total);
        }

        let outcome = if config.dry_run {
            file_size(path).map(|size| DeleteResult::new(path.clone(), size))
        } else {
            delete_file(path)
        };

        match outcome {
            Ok(del) => {
                result.bytes_freed += del.size;
                if let Some(cb) = callback {
                    cb.on_delete_success(path, del.size);
                }
                result.successes.push(del);
            }
            Err(e) => {
                if let Some(cb) = callback {
                    cb.on_delete_failure(path, &e);
                }
                result.failures.push(DeleteFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });

                if !config.continue_on_error {
                    log::warn!(
                        "Stopping after failure; {} file(s) not attempted",
                        total - index - 1
                    );
                    result.skipped.extend(paths[index + 1..].iter().cloned());
                    break;
                }
            }
        }
    }

    if let Some(cb) = callback {
        cb.on_complete(&result);
    }

    log::info!("{}", result.summary());
    result
}
