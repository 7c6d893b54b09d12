//! Configuration management for roster.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::storage::DEFAULT_SLOT_KEY;
use crate::view::{Viewport, DEFAULT_ROW_HEIGHT, DEFAULT_SCROLL_MAX_HEIGHT};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "roster";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "roster.db";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ROSTER_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ROSTER_`, `__` between sections)
/// 2. TOML config file at `~/.config/roster/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/roster/roster.db`
    pub database_path: Option<PathBuf>,
    /// Name of the slot holding the record list.
    #[serde(deserialize_with = "string_or_number")]
    pub slot_key: String,
}

/// Display-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Table height beyond which the viewport scrolls.
    pub scroll_max_height: u32,
    /// Height of one table row.
    pub row_height: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: None, // Will be resolved to default at runtime
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scroll_max_height: DEFAULT_SCROLL_MAX_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        Self::from_figment(&Self::figment(&config_file, ENV_PREFIX))
    }

    /// Layer defaults, the TOML file, and `env_prefix` variables.
    fn figment(config_file: &Path, env_prefix: &str) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(env_prefix).split("__"))
    }

    fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.storage.slot_key.trim().is_empty() {
            return Err(Error::config_validation("slot_key must not be empty"));
        }

        if self.display.row_height == 0 {
            return Err(Error::config_validation(
                "row_height must be greater than 0",
            ));
        }

        if self.display.scroll_max_height == 0 {
            return Err(Error::config_validation(
                "scroll_max_height must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the table viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.display.scroll_max_height, self.display.row_height)
    }
}

/// Accept a slot key given as a number, e.g. `ROSTER_STORAGE__SLOT_KEY=2026`.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SlotKey {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    Ok(match SlotKey::deserialize(deserializer)? {
        SlotKey::Text(s) => s,
        SlotKey::Unsigned(n) => n.to_string(),
        SlotKey::Signed(n) => n.to_string(),
        SlotKey::Float(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "roster_config_{}_{}.toml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.storage.slot_key, "studentRegistrationRecords");
        assert_eq!(config.display.scroll_max_height, 400);
        assert_eq!(config.display.row_height, 40);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_slot_key() {
        let mut config = Config::default();
        config.storage.slot_key = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("slot_key"));
    }

    #[test]
    fn test_validate_zero_row_height() {
        let mut config = Config::default();
        config.display.row_height = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("row_height"));
    }

    #[test]
    fn test_validate_zero_scroll_height() {
        let mut config = Config::default();
        config.display.scroll_max_height = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("scroll_max_height"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("roster.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_viewport_from_config() {
        let mut config = Config::default();
        config.display.scroll_max_height = 120;
        config.display.row_height = 30;

        assert_eq!(config.viewport(), Viewport::new(120, 30));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("roster"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config.storage.slot_key, DEFAULT_SLOT_KEY);
    }

    #[test]
    fn test_load_from_toml_file() {
        let path = write_temp_config(
            "valid",
            r#"
            [storage]
            slot_key = "classOf2026"

            [display]
            scroll_max_height = 200
            "#,
        );

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.storage.slot_key, "classOf2026");
        assert_eq!(config.display.scroll_max_height, 200);
        assert_eq!(config.display.row_height, 40);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_numeric_slot_key_from_env() {
        let prefix = "ROSTER_NUMERIC_KEY_TEST_";
        std::env::set_var(format!("{prefix}STORAGE__SLOT_KEY"), "2026");

        let figment = Config::figment(Path::new("/nonexistent/config.toml"), prefix);
        let config = Config::from_figment(&figment).unwrap();
        assert_eq!(config.storage.slot_key, "2026");

        std::env::remove_var(format!("{prefix}STORAGE__SLOT_KEY"));
    }

    #[test]
    fn test_numeric_slot_key_from_toml() {
        let path = write_temp_config("numeric_key", "[storage]\nslot_key = 42\n");

        let config = Config::load_from(Some(path.clone())).unwrap();
        assert_eq!(config.storage.slot_key, "42");

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = write_temp_config("invalid", "[display]\nrow_height = 0\n");

        let result = Config::load_from(Some(path.clone()));
        assert!(matches!(result, Err(Error::ConfigValidation { .. })));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_config_serializes_to_json() {
        let json = serde_json::to_value(Config::default()).unwrap();
        assert_eq!(json["storage"]["slot_key"], "studentRegistrationRecords");
        assert_eq!(json["display"]["row_height"], 40);
    }
}
