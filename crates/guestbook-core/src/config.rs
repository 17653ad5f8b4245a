//! Configuration file handling.
//!
//! Reads from `~/.config/guestbook/guestbook.toml`, then applies
//! `GUESTBOOK_API_URL` / `GUESTBOOK_SCHEMA` from the environment (or `.env`).

use crate::models::Schema;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`Config::api_url`].
pub const API_URL_ENV: &str = "GUESTBOOK_API_URL";
/// Environment variable overriding [`Config::schema`].
pub const SCHEMA_ENV: &str = "GUESTBOOK_SCHEMA";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Which backend layout to talk to.
    #[serde(default)]
    pub schema: Schema,
    /// Write logs here instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            schema: Schema::default(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the config file and the environment.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        let mut config = if config_path.exists() {
            Self::from_file(&config_path)?
        } else if is_custom {
            anyhow::bail!("Config file not found: {}", config_path.display());
        } else {
            let config = Config::default();
            config.save_to(&config_path)?;
            tracing::info!("Created default config at {}", config_path.display());
            config
        };

        // A missing .env is the common case
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        config.apply_env(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Override fields from environment variables, looked up through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = var(API_URL_ENV).filter(|v| !v.is_empty()) {
            tracing::info!("Overriding API URL from {}: {}", API_URL_ENV, url);
            self.api_url = url;
        }

        if let Some(schema) = var(SCHEMA_ENV).filter(|v| !v.is_empty()) {
            self.schema = schema
                .parse()
                .with_context(|| format!("Invalid {}", SCHEMA_ENV))?;
            tracing::info!("Overriding schema from {}: {}", SCHEMA_ENV, self.schema);
        }

        Ok(())
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Get the path to the config file.
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("guestbook").join("guestbook.toml"))
    }
}
