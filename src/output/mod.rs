//! Output formatters for scan and deletion results.
//!
//! This module provides two output formats:
//! - Text: one human-readable line per deleted file (the default)
//! - JSON for automation and scripting
//!
//! # Example
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
//!
//! // Prints "Deleted <path>" as each file goes
//! let output = TextOutput::stdout();
//! delete_batch(&plan.redundant, &DeleteConfig::default(), Some(&output));
//! ```

pub mod json;

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use yansi::Paint;

use crate::actions::{BatchDeleteResult, DeleteError, DeleteProgressCallback};

// Re-export main types
pub use json::JsonOutput;

/// Line-oriented text reporter.
///
/// Writes `Deleted <path>` (or `Would delete <path>` in a dry run) for each
/// file as it is removed. Failures go to the log, not to this writer.
///
/// Lines are plain unless colour is switched on with [`TextOutput::with_color`].
/// Coloured lines still honour yansi's global switch, so `--no-color` and a
/// non-terminal stdout both yield plain text.
pub struct TextOutput<W: Write> {
    writer: RefCell<W>,
    dry_run: bool,
    color: bool,
}

impl TextOutput<io::Stdout> {
    /// Reporter writing to standard output, coloured when yansi allows it.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_color(true)
    }
}

impl<W: Write> TextOutput<W> {
    /// Reporter writing to `writer`.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            dry_run: false,
            color: false,
        }
    }

    /// Colour the leading word of each line.
    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Word lines as "Would delete" instead of "Deleted".
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Consume the reporter, returning the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn line(&self, line: impl Display) {
        let mut writer = self.writer.borrow_mut();
        if let Err(e) = writeln!(writer, "{}", line) {
            log::warn!("Failed to write report line: {}", e);
        }
    }
}

impl<W: Write> DeleteProgressCallback for TextOutput<W> {
    fn on_before_delete(&self, path: &Path, index: usize, total: usize) {
        log::trace!("[{}/{}] {}", index + 1, total, path.display());
    }

    fn on_delete_success(&self, path: &Path, _size: u64) {
        let label = if self.dry_run { "Would delete" } else { "Deleted" };
        if !self.color {
            self.line(format_args!("{} {}", label, path.display()));
        } else if self.dry_run {
            self.line(format_args!("{} {}", label.yellow(), path.display()));
        } else {
            self.line(format_args!("{} {}", label.red(), path.display()));
        }
    }

    fn on_delete_failure(&self, path: &Path, error: &DeleteError) {
        log::error!("Could not delete {}: {}", path.display(), error);
    }

    fn on_complete(&self, result: &BatchDeleteResult) {
        if let Err(e) = self.writer.borrow_mut().flush() {
            log::warn!("Failed to flush report: {}", e);
        }
        log::debug!("{}", result.summary());
    }
}
