//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Environment variable overriding `backend_url`
pub const BACKEND_URL_ENV: &str = "LOG_INSIGHT_BACKEND_URL";

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Open the default config file (~/.log-insight/config.json)
    pub fn new() -> AppResult<Self> {
        Self::open(config_path()?)
    }

    /// Open a config file, creating it with defaults if it doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = path.into();
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            tracing::info!(path = %config_path.display(), "created default config");
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Configuration with environment and command-line overrides applied.
    /// Overrides are not written back to disk.
    pub fn effective_config(&self, backend_url: Option<&str>) -> AppResult<AppConfig> {
        let mut config = self.config.clone();
        let env_url = std::env::var(BACKEND_URL_ENV).ok();
        if let Some(url) = backend_url.map(str::to_string).or(env_url) {
            config.backend_url = url;
        }
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Update the configuration with a partial update
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        Self::save_to_file(&self.config_path, &candidate)?;
        self.config = candidate;
        Ok(self.config.clone())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        let defaults = AppConfig::default();
        Self::save_to_file(&self.config_path, &defaults)?;
        self.config = defaults;
        Ok(())
    }
}
