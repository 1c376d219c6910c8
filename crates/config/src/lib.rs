//! Configuration loading, validation, and management for Crewlink.
//!
//! Loads configuration from `~/.crewlink/config.toml` with environment
//! variable overrides. Validates all settings at load time. The core
//! never reads any of this ambiently — the CLI turns it into an explicit
//! `CallContext` per call.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.crewlink/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend host and port
    #[serde(default = "default_backend_host")]
    pub backend_host: String,

    /// Team whose chat the tools operate on
    #[serde(default = "default_team_id")]
    pub team_id: String,

    /// Calling-user identity (outgoing sender, mention target)
    #[serde(default = "default_user")]
    pub user: String,

    /// Default timeout for `wait_for_message`, in seconds
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,

    /// Optional pause after every successful tool dispatch, in
    /// milliseconds. Off unless set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_dispatch_delay_ms: Option<u64>,
}

fn default_backend_host() -> String {
    "localhost:8000".into()
}
fn default_team_id() -> String {
    "default".into()
}
fn default_user() -> String {
    "agent".into()
}
fn default_wait_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from the default path (~/.crewlink/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `CREWLINK_BACKEND_HOST`
    /// - `CREWLINK_TEAM_ID`
    /// - `CREWLINK_USER`
    /// - `CREWLINK_WAIT_TIMEOUT_SECS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CREWLINK_*` overrides. The lookup is injected so the
    /// override logic is testable without mutating process state.
    fn apply_env_overrides(
        &mut self,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = var("CREWLINK_BACKEND_HOST") {
            self.backend_host = host;
        }
        if let Some(team) = var("CREWLINK_TEAM_ID") {
            self.team_id = team;
        }
        if let Some(user) = var("CREWLINK_USER") {
            self.user = user;
        }
        if let Some(secs) = var("CREWLINK_WAIT_TIMEOUT_SECS") {
            self.wait_timeout_secs = secs.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CREWLINK_WAIT_TIMEOUT_SECS is not an integer: {secs}"
                ))
            })?;
        }
        Ok(())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".crewlink")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend_host must not be empty".into(),
            ));
        }
        if self.wait_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "wait_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_host: default_backend_host(),
            team_id: default_team_id(),
            user: default_user(),
            wait_timeout_secs: default_wait_timeout_secs(),
            post_dispatch_delay_ms: None,
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
