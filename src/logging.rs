//! Logger setup for the `dejavu` binary.
//!
//! Diagnostics go through the `log` facade to an `env_logger` backend on
//! stderr, leaving stdout to the `Deleted <path>` report. The level comes
//! from `RUST_LOG` when it is set, otherwise from `-q` / `-v`:
//!
//! | flags   | level |
//! |---------|-------|
//! | `-q`    | error |
//! | (none)  | info  |
//! | `-v`    | debug |
//! | `-vv`   | trace |

use std::env;
use std::io::Write;

use env_logger::{Builder, Target};
use log::LevelFilter;

/// Install the global logger.
///
/// Only the first call has an effect; later calls leave the installed
/// logger untouched.
pub fn init_logging(verbose: u8, quiet: bool) {
    let rust_log = env::var("RUST_LOG").ok();
    let level = level_for(verbose, quiet);

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    match rust_log {
        Some(ref filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_level(level);
        }
    }

    let with_module = verbose > 0;
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        write!(buf, "{style}{:<5}{style:#} ", record.level())?;
        if with_module {
            if let Some(module) = record.module_path() {
                write!(buf, "[{}] ", module)?;
            }
        }
        writeln!(buf, "{}", record.args())
    });

    if builder.try_init().is_ok() {
        match rust_log {
            Some(filters) => log::debug!("Log filters taken from RUST_LOG={}", filters),
            None => log::debug!("Log level {}", level),
        }
    }
}

fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_without_flags_is_info() {
        assert_eq!(level_for(0, false), LevelFilter::Info);
    }

    #[test]
    fn test_level_follows_verbose_count() {
        assert_eq!(level_for(1, false), LevelFilter::Debug);
        assert_eq!(level_for(2, false), LevelFilter::Trace);
        assert_eq!(level_for(7, false), LevelFilter::Trace);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }

    #[test]
    fn test_second_init_is_ignored() {
        init_logging(0, true);
        init_logging(2, false);
    }
}
