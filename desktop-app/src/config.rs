use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DesktopConfig {
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the interview backend, including the `/api` prefix.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
        }
    }
}

impl DesktopConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    fn load_from(config_path: PathBuf) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: DesktopConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Default::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            home.join(".config").join("prepdeck").join("desktop.toml")
        } else {
            PathBuf::from("./prepdeck-desktop.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = DesktopConfig::load_from(PathBuf::from("/nonexistent/desktop.toml")).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: DesktopConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = DesktopConfig::default();
        config.api.base_url = "https://staging.prepdeck.dev/api".to_string();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reloaded: DesktopConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reloaded.api.base_url, "https://staging.prepdeck.dev/api");
    }
}
