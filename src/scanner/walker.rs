//! Non-recursive directory listing and index construction.
//!
//! # Overview
//!
//! [`index_files`] lists the direct children of a directory with
//! [`walkdir`] (depth exactly 1, sorted by file name), skips everything that
//! is not a regular file and hashes the rest one at a time. Subdirectories
//! are never descended into.
//!
//! Symbolic links are never followed. A link next to its own target would
//! otherwise form a group with it, and removing the target would leave only
//! a dangling link.
//!
//! The scan is all-or-nothing. The first listing or hashing error aborts it
//! and no partial [`FileIndex`] is returned.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use super::{Digest, FileEntry, FileIndex, HashError, Hasher, ScanError};

/// Hash every regular file directly inside `dir`.
///
/// Files are opened strictly one after another; each handle is released
/// before the next file is opened.
///
/// # Errors
///
/// - [`ScanError::Walk`] if the directory listing fails
/// - [`ScanError::Hash`] if any file can't be opened or read
///
/// # Example
///
/// ```no_run
/// use dejavu::scanner::{index_files, Hasher};
/// use std::path::Path;
///
/// let index = index_files(Path::new("/tmp"), &Hasher::new()).unwrap();
/// println!("{} files indexed", index.len());
/// ```
pub fn index_files(dir: &Path, hasher: &Hasher) -> Result<FileIndex, ScanError> {
    let index = index_with(dir, |path| hasher.hash_file(path))?;

    log::info!(
        "Indexed {} file(s) in {} using {}",
        index.len(),
        dir.display(),
        hasher.algorithm()
    );

    Ok(index)
}

/// The listing loop behind [`index_files`], with the per-file digest step
/// supplied by the caller.
fn index_with<F>(dir: &Path, mut digest_of: F) -> Result<FileIndex, ScanError>
where
    F: FnMut(&Path) -> Result<Digest, HashError>,
{
    let mut index = FileIndex::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| ScanError::Walk {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e,
        })?;

        if !is_regular_file(&entry) {
            continue;
        }

        let path = entry.into_path();
        let digest = digest_of(&path)?;
        log::debug!("Indexed {}", path.display());
        index.insert(FileEntry::new(path), digest);
    }

    Ok(index)
}

/// Regular files only; directories, symlinks and special files are skipped.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();

    if file_type.is_dir() {
        log::trace!("Skipping directory: {}", entry.path().display());
        false
    } else if file_type.is_symlink() {
        log::debug!("Skipping symlink: {}", entry.path().display());
        false
    } else if !file_type.is_file() {
        log::debug!("Skipping special file: {}", entry.path().display());
        false
    } else {
        true
    }
}
