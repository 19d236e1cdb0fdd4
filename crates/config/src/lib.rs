//! Configuration loading, validation, and management for Sparkle.
//!
//! Loads configuration from `~/.sparkle/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.sparkle/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generative backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Generative backend configuration.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session lifecycle configuration.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("backend", &self.backend)
            .field("session", &self.session)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Settings for the generative backend client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Model name to request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout. Exceeding it counts as a backend failure and
    /// triggers the rule-based fallback.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-1.5-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Settings for session lifecycle and progress accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Idle seconds after which a session is evicted by the sweep.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Interval between eviction sweeps.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Progress added per permitted exchange.
    #[serde(default = "default_progress_per_turn")]
    pub progress_per_turn: u32,
}

fn default_idle_timeout_secs() -> u64 {
    1800
}
fn default_sweep_interval_secs() -> u64 {
    60
}
fn default_progress_per_turn() -> u32 {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            progress_per_turn: default_progress_per_turn(),
        }
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl AppConfig {
    /// Load configuration from the default path (~/.sparkle/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `SPARKLE_API_KEY` (highest priority)
    /// - `GEMINI_API_KEY`
    /// - `GOOGLE_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("SPARKLE_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok())
                .or_else(|| std::env::var("GOOGLE_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("SPARKLE_MODEL") {
            config.backend.model = model;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path. A missing file yields the
    /// defaults rather than an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Validate settings. Called after load; also usable on hand-built
    /// configs in tests.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(ConfigError::Invalid(format!(
                "backend.temperature must be in 0.0..=2.0, got {}",
                self.backend.temperature
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "backend.timeout_secs must be at least 1".into(),
            ));
        }
        if self.session.idle_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "session.idle_timeout_secs must be at least 1".into(),
            ));
        }
        if self.session.progress_per_turn == 0 {
            return Err(ConfigError::Invalid(
                "session.progress_per_turn must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The configuration directory (~/.sparkle).
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".sparkle")
    }

    /// Write the default config file if none exists. Returns the path.
    pub fn write_default() -> Result<PathBuf, ConfigError> {
        let dir = Self::config_dir();
        let path = dir.join("config.toml");
        if path.exists() {
            return Ok(path);
        }
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::Io {
            path: dir.clone(),
            source: e,
        })?;
        let contents = toml::to_string_pretty(&Self::default())
            .expect("default config serializes");
        std::fs::write(&path, contents).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::info!(path = %path.display(), "Wrote default config");
        Ok(path)
    }
}

fn dirs_home() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
