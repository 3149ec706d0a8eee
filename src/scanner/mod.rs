//! Scanner module for directory listing and file hashing.
//!
//! This module provides functionality for:
//! - Listing the regular files directly inside a directory (no recursion)
//! - Content hashing with a named digest algorithm (MD5 by default)
//! - The [`FileIndex`] mapping each scanned file to its digest
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Non-recursive directory listing and index construction
//! - [`hasher`]: Streaming file hashing
//!
//! # Example
//!
//! ```no_run
//! use dejavu::scanner::{index_files, Hasher};
//! use std::path::Path;
//!
//! let hasher = Hasher::new();
//! let index = index_files(Path::new("."), &hasher).unwrap();
//! for (file, digest) in index.iter() {
//!     println!("{}  {}", digest, file.path().display());
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::collections::btree_map::{self, BTreeMap};
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

// Re-export main types
pub use hasher::{Algorithm, Digest, Hasher, DEFAULT_BUFFER_SIZE};
pub use walker::index_files;

/// A regular file discovered during a scan.
///
/// Equality and ordering follow the path, which keeps every map keyed by
/// `FileEntry` in a reproducible order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FileEntry(PathBuf);

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Path to the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Consume the entry, returning its path.
    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.0
    }
}

impl From<PathBuf> for FileEntry {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl AsRef<Path> for FileEntry {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Digest of every regular file in one directory, ordered by path.
///
/// Holds exactly one digest per file. Directories never appear as keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileIndex {
    entries: BTreeMap<FileEntry, Digest>,
}

impl FileIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the digest of a file, returning the previous digest if the file
    /// was already indexed.
    pub fn insert(&mut self, file: FileEntry, digest: Digest) -> Option<Digest> {
        self.entries.insert(file, digest)
    }

    /// Look up the digest of a file.
    #[must_use]
    pub fn get(&self, file: &FileEntry) -> Option<&Digest> {
        self.entries.get(file)
    }

    /// Number of indexed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(file, digest)` pairs in path order.
    pub fn iter(&self) -> btree_map::Iter<'_, FileEntry, Digest> {
        self.entries.iter()
    }

    /// Iterate over indexed files in path order.
    pub fn files(&self) -> btree_map::Keys<'_, FileEntry, Digest> {
        self.entries.keys()
    }
}

impl FromIterator<(FileEntry, Digest)> for FileIndex {
    fn from_iter<I: IntoIterator<Item = (FileEntry, Digest)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FileIndex {
    type Item = (&'a FileEntry, &'a Digest);
    type IntoIter = btree_map::Iter<'a, FileEntry, Digest>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Errors that can occur while scanning a directory.
///
/// Any of these aborts the scan; no partial index is produced.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The directory listing could not be read.
    #[error("Failed to list {path}: {source}")]
    Walk {
        /// Path being listed when the error occurred
        path: PathBuf,
        /// The underlying walk error
        #[source]
        source: walkdir::Error,
    },

    /// A file could not be hashed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors that can occur during file hashing.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The named digest algorithm is not supported.
    #[error("Digest algorithm not available: {0}")]
    AlgorithmUnavailable(String),

    /// The specified file was not found.
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
        source: io::Error,
    },
}

impl HashError {
    /// Classify an I/O error raised while opening or reading `path`.
    #[must_use]
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
