//! Application configuration management.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Built-in defaults
//! 2. Config file: `--config <FILE>` or the platform default
//!    (`<config dir>/dejavu/config.toml`)
//! 3. Environment variables prefixed with `DEJAVU_` (e.g. `DEJAVU_ALGORITHM=sha256`)
//! 4. Command-line flags (applied by [`Config::apply_cli`])

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};
use crate::scanner::{Algorithm, DEFAULT_BUFFER_SIZE};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DEJAVU_";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Digest algorithm name.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    /// Read chunk size for hashing, in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Keep deleting after a failed deletion.
    #[serde(default)]
    pub continue_on_error: bool,
    /// Output format.
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_algorithm() -> String {
    Algorithm::default().name().to_string()
}

fn default_buffer_size() -> usize {
    DEFAULT_BUFFER_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            buffer_size: default_buffer_size(),
            continue_on_error: false,
            output: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, a config file and the environment.
    ///
    /// With `explicit` set, that file must exist and parse. Without it, the
    /// platform default file is used if present and any failure to read it
    /// falls back to defaults plus environment.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing or invalid, or if
    /// environment values don't deserialize.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            return Self::figment(Some(path))
                .extract()
                .with_context(|| format!("Invalid config file {}", path.display()));
        }

        let default_path = Self::config_path();
        match Self::figment(default_path.as_deref()).extract() {
            Ok(config) => Ok(config),
            Err(e) => {
                log::debug!("Failed to load config file, using defaults: {}", e);
                Self::figment(None)
                    .extract()
                    .context("Invalid DEJAVU_* environment configuration")
            }
        }
    }

    /// Build the layered figment: defaults < file < environment.
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Override settings with flags given on the command line.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref algorithm) = cli.algorithm {
            self.algorithm = algorithm.clone();
        }
        if let Some(size) = cli.buffer_size {
            self.buffer_size = size;
        }
        if cli.keep_going {
            self.continue_on_error = true;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
    }

    /// Get the default platform-specific configuration path.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "mantono", "dejavu").map(|d| d.config_dir().join("config.toml"))
    }
}
