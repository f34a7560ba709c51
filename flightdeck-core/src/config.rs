use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// weather_api_key = "..."
/// airport_api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Credential for the weather provider.
    pub weather_api_key: Option<String>,

    /// Credential for the geolocation/airport provider.
    pub airport_api_key: Option<String>,
}

impl Config {
    /// Weather provider key, or a hint on how to set one.
    pub fn require_weather_api_key(&self) -> Result<&str> {
        self.weather_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No weather API key configured.\n\
                 Hint: run `flightdeck configure` and enter your weather API key."
            )
        })
    }

    /// Airport provider key, or a hint on how to set one.
    pub fn require_airport_api_key(&self) -> Result<&str> {
        self.airport_api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No airport API key configured.\n\
                 Hint: run `flightdeck configure` and enter your airport API key."
            )
        })
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
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
        let dirs = ProjectDirs::from("dev", "flightdeck", "flightdeck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_produce_hints() {
        let cfg = Config::default();

        let err = cfg.require_weather_api_key().unwrap_err();
        assert!(err.to_string().contains("No weather API key configured"));

        let err = cfg.require_airport_api_key().unwrap_err();
        assert!(err.to_string().contains("No airport API key configured"));
    }

    #[test]
    fn configured_keys_are_returned() {
        let cfg = Config {
            weather_api_key: Some("WEATHER_KEY".to_string()),
            airport_api_key: Some("AIRPORT_KEY".to_string()),
        };

        assert_eq!(cfg.require_weather_api_key().unwrap(), "WEATHER_KEY");
        assert_eq!(cfg.require_airport_api_key().unwrap(), "AIRPORT_KEY");
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            weather_api_key: Some("w".to_string()),
            airport_api_key: None,
        };

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.weather_api_key.as_deref(), Some("w"));
        assert!(parsed.airport_api_key.is_none());
    }
}
