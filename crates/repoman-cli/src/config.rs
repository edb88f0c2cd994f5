//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `REPOMAN_<SECTION>__<KEY>`, e.g.
//!    `REPOMAN_GIT__TIMEOUT_SECS=30`
//! 3. Config file: `--config <FILE>` (must exist) or [`AppConfig::config_path`]
//!    (optional)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use repoman_core::application::services::{DEFAULT_BRANCH, DEFAULT_REMOTE, DEFAULT_TOOL};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "REPOMAN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// How git is invoked.
    pub git: GitConfig,
    /// Defaults for push and pull.
    pub remote: RemoteConfig,
    /// License template settings.
    pub license: LicenseConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Append logs to this file in addition to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Program name or path.
    pub program: String,
    /// Kill a git process that runs longer than this. Unset or `0` waits
    /// forever.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub name: String,
    pub branch: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    /// JSON license definition file. When unset, `licenses.json` in the
    /// working directory is used if present, else the built-in licenses.
    pub definitions: Option<PathBuf>,
    /// Copyright holder used when `--author` is not given.
    pub default_author: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TOOL.into(),
            timeout_secs: None,
        }
    }
}

impl GitConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|&secs| secs > 0)
            .map(Duration::from_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REMOTE.into(),
            branch: DEFAULT_BRANCH.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let defaults =
            Config::try_from(&Self::default()).context("Failed to serialise defaults")?;

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.repoman.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "repoman", "repoman")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".repoman.toml"))
    }
}
