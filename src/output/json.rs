//! JSON output formatter for scan and deletion results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "algorithm": "md5",
//!   "groups": [
//!     {
//!       "digest": "5d41402abc4b2a76b9719d911017c592",
//!       "files": ["/dir/a.txt", "/dir/b.txt"]
//!     }
//!   ],
//!   "redundant": ["/dir/a.txt"],
//!   "kept": ["/dir/b.txt"],
//!   "deletion": {
//!     "successes": [{ "path": "/dir/a.txt", "size": 5 }],
//!     "failures": [],
//!     "skipped": [],
//!     "bytes_freed": 5,
//!     "dry_run": false
//!   },
//!   "summary": {
//!     "algorithm": "md5",
//!     "total_files": 3,
//!     "total_size": 15,
//!     "duplicate_groups": 1,
//!     "duplicate_files": 1,
//!     "reclaimable_space": 5,
//!     "scan_duration_ms": 2
//!   },
//!   "exit_code": 0,
//!   "exit_code_name": "DJ000"
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::actions::{BatchDeleteResult, DeletionPlan};
use crate::duplicates::{DuplicateGroup, DuplicateGroups, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Digest as lower-case hexadecimal
    pub digest: String,
    /// Paths of all files in the group, in path order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a DuplicateGroup.
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup<'_>) -> Self {
        Self {
            digest: group.digest.to_hex(),
            files: group
                .files
                .iter()
                .map(|f| f.path().to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Complete JSON report.
#[derive(Debug, Serialize)]
pub struct JsonOutput<'a> {
    /// Digest algorithm name
    pub algorithm: &'a str,
    /// Duplicate groups in digest order
    pub groups: Vec<JsonDuplicateGroup>,
    /// Files selected for deletion
    pub redundant: &'a [std::path::PathBuf],
    /// One survivor per group
    pub kept: &'a [std::path::PathBuf],
    /// Deletion outcome, if deletion ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deletion: Option<&'a BatchDeleteResult>,
    /// Scan statistics
    pub summary: &'a ScanSummary,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DJ000")
    pub exit_code_name: &'static str,
}

impl<'a> JsonOutput<'a> {
    /// Build a report from scan results, the deletion plan and the outcome.
    #[must_use]
    pub fn new(
        groups: &DuplicateGroups,
        plan: &'a DeletionPlan,
        deletion: Option<&'a BatchDeleteResult>,
        summary: &'a ScanSummary,
        exit_code: ExitCode,
    ) -> Self {
        Self {
            algorithm: &summary.algorithm,
            groups: groups
                .iter()
                .map(|g| JsonDuplicateGroup::from_duplicate_group(&g))
                .collect(),
            redundant: &plan.redundant,
            kept: &plan.kept,
            deletion,
            summary,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix(),
        }
    }

    /// Compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)
    }
}
