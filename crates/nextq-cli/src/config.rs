//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NEXTQ_<SECTION>__<KEY>`, e.g.
//!    `NEXTQ_RUNNER__MAX_ATTEMPTS=5`
//! 3. Config file (`--config FILE`, or the platform default path if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use nextq_core::domain::RetryPolicy;

const ENV_PREFIX: &str = "NEXTQ";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Command runner settings.
    pub runner: RunnerConfig,
    /// Settings for `nextq new`.
    pub new: NewConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`; `--output-format` overrides it.
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Attempts per command, including the first.
    pub max_attempts: u32,
    /// Constant delay between attempts.
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewConfig {
    /// Options offered by the package manager question, in order.
    pub package_managers: Vec<String>,
    pub default_package_manager: String,
    /// Command prefix used to invoke the generator.
    pub create_next_app: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_ms: 2000,
        }
    }
}

impl Default for NewConfig {
    fn default() -> Self {
        Self {
            package_managers: ["npm", "pnpm", "yarn", "bun"].map(String::from).to_vec(),
            default_package_manager: "npm".into(),
            create_next_app: "npx --yes create-next-app@latest".into(),
        }
    }
}

impl RunnerConfig {
    /// Retry policy with optional per-invocation overrides.
    pub fn retry_policy(&self, attempts: Option<u32>, delay_ms: Option<u64>) -> RetryPolicy {
        RetryPolicy::new(
            attempts.unwrap_or(self.max_attempts),
            Duration::from_millis(delay_ms.unwrap_or(self.retry_delay_ms)),
        )
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `NEXTQ_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default path is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, Self::environment())
    }

    fn load_with_env(config_file: Option<&PathBuf>, env: Environment) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file.format(FileFormat::Toml))
            .add_source(env)
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("new.package_managers")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nextq.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "nextq", "nextq")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".nextq.toml"))
    }

    /// The file `load` reads for the given `--config` value.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }
}
