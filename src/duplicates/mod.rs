//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Digest grouping of an indexed directory
//! - The [`DuplicateFinder`] that runs scan and grouping together

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{group_by_digest, DuplicateGroup, DuplicateGroups, GroupingStats};
