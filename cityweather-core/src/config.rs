use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Environment variable holding the weather provider API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable holding the listening port.
pub const PORT_VAR: &str = "PORT";

/// Service configuration.
///
/// Loaded once at startup (file first, then environment) and handed to the
/// components that need it; nothing reads the environment after that.
///
/// Example TOML:
/// api_key = "..."
/// port = 5000
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// WeatherAPI.com key.
    pub api_key: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the municipality directory (IBGE localities API).
    #[serde(default = "default_directory_url")]
    pub directory_url: String,

    /// Base URL of the weather provider.
    #[serde(default = "default_weather_url")]
    pub weather_url: String,

    /// Language of provider condition texts.
    #[serde(default = "default_language")]
    pub language: String,

    /// Timeout applied to every outbound request.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_port() -> u16 {
    5000
}

fn default_directory_url() -> String {
    "https://servicodados.ibge.gov.br/api/v1".to_string()
}

fn default_weather_url() -> String {
    "https://api.weatherapi.com/v1".to_string()
}

fn default_language() -> String {
    "pt".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            port: default_port(),
            directory_url: default_directory_url(),
            weather_url: default_weather_url(),
            language: default_language(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| std::env::var(name).ok())?;
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Override fields from `API_KEY` and `PORT`, looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = var(API_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }

        if let Some(port) = var(PORT_VAR) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid {PORT_VAR} value '{port}'"))?;
        }

        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// The provider API key, or an error telling the operator how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No weather API key configured.\n\
                 Hint: set the {API_KEY_VAR} environment variable or run `cityweather configure`."
            )
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
