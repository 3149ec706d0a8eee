//! dejavu - Duplicate File Remover
//!
//! Finds files with identical content directly inside one directory by
//! comparing content digests (MD5 by default) and deletes the redundant
//! copies, keeping one file per group.
//!
//! The pipeline runs sequentially:
//! [`scanner::index_files`] → [`duplicates::group_by_digest`] →
//! [`actions::select_redundant`] → [`actions::delete_batch`].

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use std::io;

use anyhow::{Context, Result};

use crate::actions::{delete_batch, select_redundant, DeleteConfig, NoProgress};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig};
use crate::error::ExitCode;
use crate::output::{JsonOutput, TextOutput};

/// Run the application: scan, plan, delete and report.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the path is not an
/// existing directory, the algorithm is unavailable, or the scan fails.
/// Deletion failures do not produce an error; they are reflected in the
/// returned exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    } else {
        yansi::whenever(yansi::Condition::TTY_AND_COLOR);
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    log::debug!("Effective configuration: {:?}", config);

    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_algorithm(config.algorithm.clone())
            .with_buffer_size(config.buffer_size),
    );
    let (groups, summary) = finder.find_duplicates(&cli.path)?;

    let plan = select_redundant(&groups).context("Failed to select redundant files")?;
    log::info!(
        "{} redundant file(s) in {} group(s)",
        plan.len(),
        groups.len()
    );

    let delete_config = DeleteConfig::default()
        .with_continue_on_error(config.continue_on_error)
        .with_dry_run(cli.dry_run);

    let result = match config.output {
        OutputFormat::Text => {
            let reporter = TextOutput::stdout().with_dry_run(cli.dry_run);
            delete_batch(&plan.redundant, &delete_config, Some(&reporter))
        }
        OutputFormat::Json => {
            delete_batch(&plan.redundant, &delete_config, Some(&NoProgress))
        }
    };

    let exit_code = if result.all_succeeded() {
        ExitCode::Success
    } else if config.continue_on_error {
        ExitCode::PartialSuccess
    } else {
        ExitCode::GeneralError
    };

    if config.output == OutputFormat::Json {
        for failure in &result.failures {
            log::error!("Could not delete {}: {}", failure.path.display(), failure.error);
        }
    }
    if !result.skipped.is_empty() {
        log::error!(
            "Stopped after a failed deletion; {} file(s) left in place",
            result.skipped.len()
        );
    }

    if config.output == OutputFormat::Json {
        JsonOutput::new(&groups, &plan, Some(&result), &summary, exit_code)
            .write_to(io::stdout().lock())
            .context("Failed to write JSON report")?;
    }

    Ok(exit_code)
}
