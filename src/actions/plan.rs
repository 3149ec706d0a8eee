//! Survivor selection: which files of each duplicate group get deleted.
//!
//! Within each group the **last** file is kept and every earlier file is
//! marked redundant. Groups list their files in path order, so the survivor
//! is the lexicographically greatest path of the group. No other heuristic
//! (modification time, path depth, ...) is considered.
//!
//! # Example
//!
//! ```no_run
//! use dejavu::actions::plan::select_redundant;
//! use dejavu::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! let plan = select_redundant(&groups).unwrap();
//! for path in &plan.redundant {
//!     println!("would delete {}", path.display());
//! }
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::DuplicateGroups;

/// Error type for survivor selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The redundant set does not have (files in groups - groups) members.
    #[error("deletion plan has {actual} redundant file(s), expected {expected}")]
    InvariantViolated { expected: usize, actual: usize },

    /// The plan would remove every copy of some group.
    #[error("cannot delete all copies - at least one file must be preserved")]
    AllCopiesWouldBeDeleted,
}

/// Files to delete and files to keep, derived from duplicate groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionPlan {
    /// Redundant files, in digest-group order then path order
    pub redundant: Vec<PathBuf>,
    /// One survivor per group, in digest-group order
    pub kept: Vec<PathBuf>,
}

impl DeletionPlan {
    /// Number of files to delete.
    #[must_use]
    pub fn len(&self) -> usize {
        self.redundant.len()
    }

    /// Whether there is nothing to delete.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.redundant.is_empty()
    }

    /// Check that no survivor is also scheduled for deletion.
    ///
    /// Plans from [`select_redundant`] pass by construction, since files in
    /// different groups are distinct. This is for plans assembled or edited
    /// elsewhere before they reach [`delete_batch`](crate::actions::delete_batch).
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::AllCopiesWouldBeDeleted`] if any kept file also
    /// appears in the redundant set.
    pub fn validate_preserves_copy(&self) -> Result<(), PlanError> {
        let redundant: BTreeSet<&PathBuf> = self.redundant.iter().collect();
        if self.kept.iter().any(|k| redundant.contains(k)) {
            return Err(PlanError::AllCopiesWouldBeDeleted);
        }
        Ok(())
    }
}

/// Choose the redundant files of every group, keeping the last of each.
///
/// # Errors
///
/// Returns [`PlanError::InvariantViolated`] if the number of distinct
/// redundant files differs from `groups.total_files() - groups.len()`.
pub fn select_redundant(groups: &DuplicateGroups) -> Result<DeletionPlan, PlanError> {
    let mut plan = DeletionPlan::default();

    for group in groups {
        let Some((last, rest)) = group.files.split_last() else {
            continue;
        };
        plan.redundant
            .extend(rest.iter().map(|f| f.path().to_path_buf()));
        plan.kept.push(last.path().to_path_buf());
        log::debug!(
            "Group {}: keeping {}, {} redundant",
            group.digest,
            last.path().display(),
            rest.len()
        );
    }

    let expected = groups.total_files() - groups.len();
    let distinct: BTreeSet<&PathBuf> = plan.redundant.iter().collect();
    if distinct.len() != expected || plan.redundant.len() != expected {
        log::error!(
            "Deletion plan invariant violated: {} redundant, expected {}",
            distinct.len(),
            expected
        );
        return Err(PlanError::InvariantViolated {
            expected,
            actual: distinct.len(),
        });
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::group_by_digest;
    use crate::scanner::{Digest, FileEntry, FileIndex};

    fn groups(pairs: &[(&str, u8)]) -> DuplicateGroups {
        let index: FileIndex = pairs
            .iter()
            .map(|(p, b)| (FileEntry::new(*p), Digest::from([*b].as_slice())))
            .collect();
        group_by_digest(&index).0
    }

    #[test]
    fn test_select_keeps_last_of_group() {
        let plan = select_redundant(&groups(&[
            ("/d/a.txt", 1),
            ("/d/b.txt", 1),
            ("/d/c.txt", 2),
        ]))
        .unwrap();

        assert_eq!(plan.redundant, vec![PathBuf::from("/d/a.txt")]);
        assert_eq!(plan.kept, vec![PathBuf::from("/d/b.txt")]);
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_select_n_minus_one_per_group() {
        let plan = select_redundant(&groups(&[
            ("/a", 1),
            ("/b", 1),
            ("/c", 1),
            ("/d", 2),
            ("/e", 2),
        ]))
        .unwrap();

        assert_eq!(
            plan.redundant,
            vec![PathBuf::from("/a"), PathBuf::from("/b"), PathBuf::from("/d")]
        );
        assert_eq!(plan.kept, vec![PathBuf::from("/c"), PathBuf::from("/e")]);
    }

    #[test]
    fn test_select_empty_groups() {
        let plan = select_redundant(&DuplicateGroups::default()).unwrap();
        assert!(plan.is_empty());
        assert!(plan.kept.is_empty());
    }

    #[test]
    fn test_selected_plan_always_preserves_a_copy() {
        let plan = select_redundant(&groups(&[
            ("/d/a", 1),
            ("/d/b", 1),
            ("/d/c", 1),
            ("/d/d", 2),
            ("/d/e", 2),
        ]))
        .unwrap();
        assert!(plan.validate_preserves_copy().is_ok());
    }

    #[test]
    fn test_validate_preserves_copy_rejects_overlap() {
        let plan = DeletionPlan {
            redundant: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            kept: vec![PathBuf::from("/b")],
        };
        assert_eq!(
            plan.validate_preserves_copy(),
            Err(PlanError::AllCopiesWouldBeDeleted)
        );
    }

    #[test]
    fn test_validate_preserves_copy_ok() {
        let plan = DeletionPlan {
            redundant: vec![PathBuf::from("/a")],
            kept: vec![PathBuf::from("/b")],
        };
        assert!(plan.validate_preserves_copy().is_ok());
    }

    #[test]
    fn test_plan_error_display() {
        let err = PlanError::InvariantViolated {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "deletion plan has 2 redundant file(s), expected 3"
        );
    }
}
