//! Configuration file loading with precedence handling.

use crate::model::DEFAULT_DETAILS_PLACEHOLDER;
use crate::state::DEFAULT_BUFFER_CAPACITY;
use crate::view::ConsoleOptions;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use super::KeyBindings;

/// Environment variable naming an explicit config file.
pub const ENV_CONFIG: &str = "LOGCON_CONFIG";
/// Environment override for `buffer_capacity`.
pub const ENV_BUFFER_CAPACITY: &str = "LOGCON_BUFFER_CAPACITY";
/// Environment override for `poll_interval_ms`.
pub const ENV_POLL_INTERVAL_MS: &str = "LOGCON_POLL_INTERVAL_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting is syntactically valid but out of range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/logcon/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum number of retained log entries.
    #[serde(default)]
    pub buffer_capacity: Option<usize>,

    /// Sleep between poll-loop iterations, in milliseconds.
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Detail text shown for entries logged without details.
    #[serde(default)]
    pub details_placeholder: Option<String>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Maximum number of retained log entries (at least 1 once validated).
    pub buffer_capacity: usize,
    /// Sleep between poll-loop iterations, in milliseconds.
    pub poll_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Detail text for entries logged without details.
    pub details_placeholder: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            poll_interval_ms: 1,
            log_file_path: default_log_path(),
            details_placeholder: DEFAULT_DETAILS_PLACEHOLDER.to_string(),
        }
    }
}

impl ResolvedConfig {
    /// Reject settings the console cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "buffer_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Console tunables derived from this configuration.
    pub fn console_options(&self) -> ConsoleOptions {
        ConsoleOptions {
            buffer_capacity: self.buffer_capacity,
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            details_placeholder: self.details_placeholder.clone(),
            key_bindings: KeyBindings::default(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/logcon/logcon.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("logcon").join("logcon.log")
    } else {
        PathBuf::from("logcon.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/logcon/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("logcon").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `LOGCON_CONFIG` environment variable
/// 3. Default path `~/.config/logcon/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        buffer_capacity: config.buffer_capacity.unwrap_or(defaults.buffer_capacity),
        poll_interval_ms: config.poll_interval_ms.unwrap_or(defaults.poll_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        details_placeholder: config
            .details_placeholder
            .unwrap_or(defaults.details_placeholder),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks `LOGCON_BUFFER_CAPACITY` and `LOGCON_POLL_INTERVAL_MS`. Values
/// that do not parse are ignored with a warning.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(capacity) = env_number(ENV_BUFFER_CAPACITY) {
        config.buffer_capacity = capacity;
    }

    if let Some(interval) = env_number(ENV_POLL_INTERVAL_MS) {
        config.poll_interval_ms = interval;
    }

    config
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(variable = name, value = %raw, "Ignoring unparsable environment override");
            None
        }
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    capacity_override: Option<usize>,
    poll_interval_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(capacity) = capacity_override {
        config.buffer_capacity = capacity;
    }

    if let Some(interval) = poll_interval_override {
        config.poll_interval_ms = interval;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
