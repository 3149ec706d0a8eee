//! Duplicate finder: directory scan followed by digest grouping.
//!
//! # Overview
//!
//! This module orchestrates the detection pipeline:
//! 1. **Validate** - the path must exist and be a directory
//! 2. **Index** - digest every regular file directly inside it
//!    (see [`crate::scanner::index_files`])
//! 3. **Group** - keep digests shared by 2+ files
//!    (see [`crate::duplicates::groups`])
//!
//! The stages run strictly one after another on a single thread.
//!
//! # Example
//!
//! ```no_run
//! use dejavu::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let config = FinderConfig::default().with_algorithm("sha256");
//! let finder = DuplicateFinder::new(config);
//!
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/path")).unwrap();
//!
//! println!("Found {} duplicate groups", summary.duplicate_groups);
//! println!("Reclaimable space: {}", summary.reclaimable_display());
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::Serialize;

use super::groups::{group_by_digest, DuplicateGroups};
use crate::scanner::{index_files, Algorithm, HashError, Hasher, ScanError, DEFAULT_BUFFER_SIZE};

/// Settings for [`DuplicateFinder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    /// Name of the digest algorithm (e.g. `"md5"`, `"sha256"`).
    pub algorithm: String,
    /// Read chunk size for hashing, in bytes.
    pub buffer_size: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default().name().to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl FinderConfig {
    /// Set the digest algorithm by name.
    #[must_use]
    pub fn with_algorithm(mut self, name: impl Into<String>) -> Self {
        self.algorithm = name.into();
        self
    }

    /// Set the read chunk size (minimum 1 byte).
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }
}

/// Counts and sizes gathered while scanning one directory.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Digest algorithm used
    pub algorithm: String,
    /// Total number of regular files scanned
    pub total_files: usize,
    /// Bytes across all indexed files
    pub total_size: u64,
    /// Groups with two or more members
    pub duplicate_groups: usize,
    /// Total number of redundant files (excluding one survivor per group)
    pub duplicate_files: usize,
    /// Total space that can be reclaimed by removing redundant files
    pub reclaimable_space: u64,
    /// Wall-clock time from validation to grouping
    #[serde(serialize_with = "serialize_millis", rename = "scan_duration_ms")]
    pub scan_duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl ScanSummary {
    /// Reclaimable space with a binary unit suffix, e.g. `"1.50 MB"`.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        format_size(self.reclaimable_space)
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, UNITS[unit])
}

/// Why a scan could not produce groups.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The provided path does not exist.
    #[error("Folder {0} does not exist")]
    PathNotFound(PathBuf),

    /// The provided path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// The digest algorithm could not be set up.
    #[error(transparent)]
    Hash(#[from] HashError),

    /// The directory scan failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl FinderError {
    /// Whether the error was caused by the supplied path rather than by I/O.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::PathNotFound(_) | Self::NotADirectory(_))
    }
}

/// Duplicate finder that runs the scan and grouping stages.
///
/// # Example
///
/// ```no_run
/// use dejavu::duplicates::DuplicateFinder;
/// use std::path::Path;
///
/// let finder = DuplicateFinder::with_defaults();
/// match finder.find_duplicates(Path::new(".")) {
///     Ok((groups, summary)) => {
///         println!("Found {} duplicate groups", groups.len());
///         println!("Can reclaim {} bytes", summary.reclaimable_space);
///     }
///     Err(e) => eprintln!("Scan failed: {}", e),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Finder using `config`.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration (MD5).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// The configuration this finder was built with.
    #[must_use]
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Find all duplicate files directly inside `path`.
    ///
    /// # Errors
    ///
    /// Returns `FinderError` if:
    /// - The path does not exist
    /// - The path is not a directory
    /// - The configured algorithm is not available (checked before any file is read)
    /// - Any file can't be listed or read (the whole scan aborts)
    pub fn find_duplicates(&self, path: &Path) -> Result<(DuplicateGroups, ScanSummary), FinderError> {
        let start_time = Instant::now();

        if !path.exists() {
            return Err(FinderError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(FinderError::NotADirectory(path.to_path_buf()));
        }

        let hasher = Hasher::from_name(&self.config.algorithm)?
            .with_buffer_size(self.config.buffer_size);

        log::info!(
            "Starting duplicate scan of {} ({})",
            path.display(),
            hasher.algorithm()
        );

        let index = index_files(path, &hasher)?;
        let (groups, stats) = group_by_digest(&index);

        let mut summary = ScanSummary {
            algorithm: hasher.algorithm().name().to_string(),
            total_files: stats.total_files,
            duplicate_groups: stats.duplicate_groups,
            duplicate_files: stats.redundant_files,
            ..Default::default()
        };

        for file in index.files() {
            summary.total_size += file_len(file.path());
        }
        for group in &groups {
            let size = group.files.first().map_or(0, |f| file_len(f.path()));
            summary.reclaimable_space += size * group.duplicate_count() as u64;
        }

        summary.scan_duration = start_time.elapsed();
        log::info!(
            "Scan complete: {} files, {} duplicate group(s), {} reclaimable in {:?}",
            summary.total_files,
            summary.duplicate_groups,
            summary.reclaimable_display(),
            summary.scan_duration
        );

        Ok((groups, summary))
    }
}

/// Size of a file for reporting only; a failed lookup counts as zero.
fn file_len(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
