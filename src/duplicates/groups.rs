//! Duplicate grouping by content digest.
//!
//! # Overview
//!
//! [`group_by_digest`] inverts a [`FileIndex`] (file → digest) into
//! digest → files and then drops every digest shared by fewer than two
//! files. What remains is a [`DuplicateGroups`] value: digests in
//! byte-lexicographic order, each with the files that produced it in the
//! order the index listed them.
//!
//! Grouping is a pure function of the index. Running it twice on the same
//! index gives equal results.
//!
//! # Example
//!
//! ```
//! use dejavu::duplicates::group_by_digest;
//! use dejavu::scanner::{Digest, FileEntry, FileIndex};
//!
//! let index: FileIndex = vec![
//!     (FileEntry::new("/d/a.txt"), Digest::from([1u8].as_slice())),
//!     (FileEntry::new("/d/b.txt"), Digest::from([1u8].as_slice())),
//!     (FileEntry::new("/d/c.txt"), Digest::from([2u8].as_slice())),
//! ]
//! .into_iter()
//! .collect();
//!
//! let (groups, stats) = group_by_digest(&index);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(stats.total_files, 3);
//! assert_eq!(stats.redundant_files, 1);
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::path::PathBuf;

use serde::Serialize;

use crate::scanner::{Digest, FileEntry, FileIndex};

/// A set of files sharing one digest. Always has at least two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup<'a> {
    /// Digest shared by every file in the group
    pub digest: &'a Digest,
    /// Files with this digest, in index order
    pub files: &'a [FileEntry],
}

impl<'a> DuplicateGroup<'a> {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty. Never true for a group produced by
    /// [`group_by_digest`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (all files minus the one kept).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path().to_path_buf()).collect()
    }
}

/// Confirmed duplicate groups keyed by digest.
///
/// Keys iterate in byte-lexicographic digest order. Every value list has
/// length two or more.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateGroups {
    groups: BTreeMap<Digest, Vec<FileEntry>>,
}

impl DuplicateGroups {
    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Files sharing `digest`, if it forms a group.
    #[must_use]
    pub fn get(&self, digest: &Digest) -> Option<DuplicateGroup<'_>> {
        self.groups
            .get_key_value(digest)
            .map(|(digest, files)| DuplicateGroup { digest, files })
    }

    /// Iterate over groups in digest order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.groups.iter(),
        }
    }

    /// Total number of files across all groups.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Number of files that are redundant copies: sum of (group size - 1).
    #[must_use]
    pub fn redundant_count(&self) -> usize {
        self.groups.values().map(|f| f.len() - 1).sum()
    }
}

/// Iterator over [`DuplicateGroups`] in digest order.
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, Digest, Vec<FileEntry>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = DuplicateGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(digest, files)| DuplicateGroup { digest, files })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a DuplicateGroups {
    type Item = DuplicateGroup<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Statistics from digest grouping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupingStats {
    /// Total number of files in the index
    pub total_files: usize,
    /// Number of distinct digests
    pub unique_digests: usize,
    /// Number of digests shared by 2+ files
    pub duplicate_groups: usize,
    /// Number of files that belong to some group
    pub files_in_groups: usize,
    /// Number of files eliminated as unique (singleton digests)
    pub eliminated_unique: usize,
    /// Files in groups minus one survivor per group
    pub redundant_files: usize,
}

/// Group indexed files by digest, keeping only digests shared by 2+ files.
///
/// # Arguments
///
/// * `index` - File digests from a directory scan
///
/// # Returns
///
/// A tuple of:
/// - [`DuplicateGroups`] - Files grouped by digest (only groups with 2+ files)
/// - [`GroupingStats`] - Statistics about the grouping operation
#[must_use]
pub fn group_by_digest(index: &FileIndex) -> (DuplicateGroups, GroupingStats) {
    let mut stats = GroupingStats {
        total_files: index.len(),
        ..Default::default()
    };

    // Invert: digest -> files, appending in index (path) order
    let mut by_digest: BTreeMap<Digest, Vec<FileEntry>> = BTreeMap::new();
    for (file, digest) in index {
        by_digest
            .entry(digest.clone())
            .or_default()
            .push(file.clone());
    }
    stats.unique_digests = by_digest.len();

    // Rebuild with groups of 2+ only
    let groups: BTreeMap<Digest, Vec<FileEntry>> = by_digest
        .into_iter()
        .filter(|(digest, files)| {
            if files.len() < 2 {
                stats.eliminated_unique += files.len();
                log::trace!("Unique digest {}: {}", digest, files[0].path().display());
                false
            } else {
                stats.duplicate_groups += 1;
                stats.files_in_groups += files.len();
                stats.redundant_files += files.len() - 1;
                log::debug!("Digest {}: {} identical files", digest, files.len());
                true
            }
        })
        .collect();

    log::info!(
        "Grouping complete: {} files → {} duplicate group(s), {} redundant",
        stats.total_files,
        stats.duplicate_groups,
        stats.redundant_files
    );

    (DuplicateGroups { groups }, stats)
}
