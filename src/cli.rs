//! Command-line interface definitions for dejavu.
//!
//! This module defines all CLI arguments and options using the clap derive API.
//! Options left unset on the command line fall back to the configuration file
//! and `DEJAVU_*` environment variables (see [`crate::config`]).
//!
//! # Example
//!
//! ```bash
//! # Delete duplicates in a directory (MD5, keep the last file of each group)
//! dejavu ~/Downloads
//!
//! # Show what would be deleted, as JSON
//! dejavu ~/Downloads --dry-run --output json
//!
//! # Use SHA-256 and keep going past deletion failures
//! dejavu ~/Downloads --algorithm sha256 --keep-going
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find and delete duplicate files in a directory.
///
/// Every regular file directly inside PATH is hashed (no recursion). Files
/// with identical digests form a group; in each group all files but the last
/// in path order are deleted.
#[derive(Debug, Parser)]
#[command(name = "dejavu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory to deduplicate
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Digest algorithm (md5, sha256, sha512, blake3)
    #[arg(short, long, value_name = "NAME")]
    pub algorithm: Option<String>,

    /// Read chunk size in bytes used while hashing
    #[arg(long, value_name = "BYTES")]
    pub buffer_size: Option<usize>,

    /// Report what would be deleted without deleting anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Keep deleting after a failure instead of stopping at the first one
    #[arg(long)]
    pub keep_going: bool,

    /// Output format (text lines or a JSON report)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per deleted file
    #[default]
    Text,
    /// JSON report of groups, plan and deletions
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_minimal() {
        let cli = Cli::try_parse_from(["dejavu", "/tmp/photos"]).unwrap();
        assert_eq!(cli.path, PathBuf::from("/tmp/photos"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.dry_run);
        assert!(!cli.keep_going);
        assert!(cli.algorithm.is_none());
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_all_options() {
        let cli = Cli::try_parse_from([
            "dejavu",
            "-vv",
            "--algorithm",
            "sha256",
            "--buffer-size",
            "16",
            "--dry-run",
            "--keep-going",
            "--output",
            "json",
            "--json-errors",
            "--config",
            "/etc/dejavu.toml",
            "dir",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.algorithm.as_deref(), Some("sha256"));
        assert_eq!(cli.buffer_size, Some(16));
        assert!(cli.dry_run);
        assert!(cli.keep_going);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert!(cli.json_errors);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/dejavu.toml")));
    }

    #[test]
    fn test_cli_requires_path() {
        assert!(Cli::try_parse_from(["dejavu"]).is_err());
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dejavu", "-q", "-v", "dir"]).is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
