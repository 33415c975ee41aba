use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `sqlite:<path>`, `sqlite::memory:` or a bare file path
    pub database_path: String,

    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/torrentbox.db".to_string(),
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Seconds to wait for the connection (default: 10)
    pub connect_timeout_seconds: u64,

    /// Log every SQL statement through sqlx
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            connect_timeout_seconds: 10,
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("torrentbox").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".torrentbox").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("general.database_path cannot be empty");
        }

        if !matches!(self.general.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!(
                "general.log_format must be \"pretty\" or \"json\", got \"{}\"",
                self.general.log_format
            );
        }

        if self.database.connect_timeout_seconds == 0 {
            anyhow::bail!("database.connect_timeout_seconds must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn json_logs(&self) -> bool {
        self.general.log_format == "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.database_path, "sqlite:data/torrentbox.db");
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(10));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[database]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"
            log_format = "json"

            [database]
            sqlx_logging = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(config.json_logs());
        assert!(config.database.sqlx_logging);

        assert_eq!(config.general.database_path, "sqlite:data/torrentbox.db");
        assert_eq!(config.database.connect_timeout_seconds, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.general.log_format = "xml".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.database_path = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database.connect_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("torrentbox-config-{}", std::process::id()))
            .join("config.toml");

        let mut config = Config::default();
        config.general.database_path = "sqlite:/tmp/elsewhere.db".to_string();
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.general.database_path, "sqlite:/tmp/elsewhere.db");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
