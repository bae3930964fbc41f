use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::activity::ChartDimensions;
use crate::error::{ConfigError, Result};

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable that overrides the configured backend URL
pub const API_URL_ENV: &str = "SKILLSTACK_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub chart: ChartDimensions,
    /// Locale for weekday labels (e.g. "de_DE"); viewer environment when unset
    pub locale: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            chart: ChartDimensions::default(),
            locale: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "skillstack", "skillstack")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Load the configuration, applying the environment override
    ///
    /// A missing file is not an error; defaults are used instead. Nothing is
    /// validated here: callers apply their own overrides first, then check
    /// whatever they are about to use.
    pub fn load() -> Result<Self> {
        let mut config = match Self::get_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Config::default(),
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if config.override_api_url(&url) {
                tracing::debug!(url = %config.api_url, "api url overridden from environment");
            }
        }

        Ok(config)
    }

    /// Replace `api_url` with a non-blank override; returns whether it applied
    pub fn override_api_url(&mut self, url: &str) -> bool {
        let url = url.trim();
        if url.is_empty() {
            return false;
        }
        self.api_url = url.to_string();
        true
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        let config: Config = serde_json::from_str(&data)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(format!("{}: {}", parent.display(), e)))?;
        }

        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data)
            .map_err(|e| ConfigError::SaveFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.validate_api_url()?;
        self.validate_chart()
    }

    /// Only needed by commands that talk to the backend
    pub fn validate_api_url(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()).into());
        }
        Ok(())
    }

    pub fn validate_chart(&self) -> Result<()> {
        let chart = &self.chart;
        if chart.inner_width() <= 0.0 || chart.inner_height() <= 0.0 || chart.padding < 0.0 {
            return Err(ConfigError::InvalidChart(format!(
                "{}x{} with padding {} leaves no drawing area",
                chart.width, chart.height, chart.padding
            ))
            .into());
        }

        Ok(())
    }
}
