//! File actions module.
//!
//! This module provides functionality for:
//! - Survivor selection: which files of each duplicate group are redundant
//! - Permanent deletion of the redundant files
//!
//! # Deletion
//!
//! ```no_run
//! use dejavu::actions::{delete_batch, select_redundant, DeleteConfig};
//! use dejavu::duplicates::DuplicateFinder;
//! use dejavu::output::TextOutput;
//! use std::path::Path;
//!
//! let (groups, _) = DuplicateFinder::with_defaults()
//!     .find_duplicates(Path::new("."))
//!     .unwrap();
//! let plan = select_redundant(&groups).unwrap();
//! let reporter = TextOutput::stdout();
//! let result = delete_batch(&plan.redundant, &DeleteConfig::default(), Some(&reporter));
//! println!("{}", result.summary());
//! ```

pub mod delete;
pub mod plan;

// Re-export commonly used types
pub use delete::{
    delete_batch, delete_file, BatchDeleteResult, DeleteConfig, DeleteError, DeleteFailure,
    DeleteProgressCallback, DeleteResult, NoProgress,
};
pub use plan::{select_redundant, DeletionPlan, PlanError};
