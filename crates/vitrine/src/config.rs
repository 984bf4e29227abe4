use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "vitrine";

/// Auto-rotation bounds for `defaults.interval`, milliseconds.
const INTERVAL_MIN: u64 = 250;
const INTERVAL_MAX: u64 = 600_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Auto-rotation period in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// "auto" starts rotating, "paused" waits for input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `vitrine config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents =
            format!("# Vitrine configuration - https://github.com/mklab-se/vitrine\n{yaml}");
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.interval" => {
                let ms: u64 = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid interval: {value}. Must be a number of milliseconds."))?;
                if !(INTERVAL_MIN..=INTERVAL_MAX).contains(&ms) {
                    anyhow::bail!(
                        "Invalid interval: {value}. Must be between {INTERVAL_MIN} and {INTERVAL_MAX} ms."
                    );
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .interval = Some(ms);
            }
            "defaults.start_mode" => {
                if value != "auto" && value != "paused" {
                    anyhow::bail!("Invalid start_mode: {value}. Must be 'auto' or 'paused'.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .start_mode = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: defaults.theme, defaults.interval, defaults.start_mode"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_theme_validates() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        assert_eq!(
            config.defaults.as_ref().unwrap().theme.as_deref(),
            Some("dark")
        );
        assert!(config.set("defaults.theme", "sepia").is_err());
    }

    #[test]
    fn test_set_interval_bounds() {
        let mut config = Config::default();
        config.set("defaults.interval", "5000").unwrap();
        assert_eq!(config.defaults.as_ref().unwrap().interval, Some(5000));
        assert!(config.set("defaults.interval", "100").is_err());
        assert!(config.set("defaults.interval", "not-a-number").is_err());
    }

    #[test]
    fn test_set_start_mode_validates() {
        let mut config = Config::default();
        config.set("defaults.start_mode", "paused").unwrap();
        assert!(config.set("defaults.start_mode", "overview").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut config = Config::default();
        assert!(config.set("defaults.unknown", "x").is_err());
    }

    #[test]
    fn test_roundtrip_yaml() {
        let mut config = Config::default();
        config.set("defaults.theme", "dark").unwrap();
        config.set("defaults.interval", "3000").unwrap();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: Config = serde_yaml::from_str(&yaml).unwrap();
        let defaults = back.defaults.unwrap();
        assert_eq!(defaults.theme.as_deref(), Some("dark"));
        assert_eq!(defaults.interval, Some(3000));
    }
}
