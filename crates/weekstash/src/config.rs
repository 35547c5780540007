//! Configuration management for weekstash.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::NaiveDate;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::week::{WeekKey, WeekScheme};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "weekstash";

/// Default store file name.
const STORE_FILE_NAME: &str = "uploads.json";

/// Default upload size bound: 5 MiB.
const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`WEEKSTASH_` prefix, `__` between section and
///    key, e.g. `WEEKSTASH_UPLOAD__MAX_FILE_BYTES`)
/// 2. TOML config file at `~/.config/weekstash/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Week scheme configuration.
    pub weeks: WeeksConfig,
    /// Upload configuration.
    pub upload: UploadConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the store file.
    /// Defaults to `~/.local/share/weekstash/uploads.json`
    pub store_path: Option<PathBuf>,
    /// Pretty-print the persisted JSON.
    pub pretty: bool,
}

/// Week scheme configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeksConfig {
    /// How week keys are derived from upload dates.
    pub scheme: WeekScheme,
    /// First day of week 1 for the fixed scheme.
    pub term_start: Option<NaiveDate>,
    /// Number of weeks in the fixed term.
    pub term_weeks: u8,
}

/// Upload-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum size of a single file accepted for stashing, in bytes.
    pub max_file_bytes: u64,
}

impl Default for WeeksConfig {
    fn default() -> Self {
        Self {
            scheme: WeekScheme::Calendar,
            term_start: None,
            term_weeks: 16,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

impl WeeksConfig {
    /// Derive the week key for an upload date under this configuration.
    ///
    /// A fixed scheme without a term start (rejected by validation, but
    /// reachable through a hand-built config) falls back to calendar keys.
    #[must_use]
    pub fn key_for(&self, date: NaiveDate) -> WeekKey {
        match (self.scheme, self.term_start) {
            (WeekScheme::Fixed, Some(start)) => WeekKey::fixed_for(date, start, self.term_weeks),
            (WeekScheme::Fixed, None) => {
                warn!("fixed week scheme without term_start, using calendar keys");
                WeekKey::calendar_for(date)
            }
            (WeekScheme::Calendar, _) => WeekKey::calendar_for(date),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `WEEKSTASH_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// Environment overrides use a double underscore between the section
    /// and the key: `WEEKSTASH_STORAGE__PRETTY`,
    /// `WEEKSTASH_WEEKS__TERM_WEEKS`, `WEEKSTASH_UPLOAD__MAX_FILE_BYTES`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        // The TOML tables are plain sections, not figment profiles, and the
        // env separator is a double underscore so multi-word keys like
        // max_file_bytes survive the split.
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("WEEKSTASH_").split("__"));

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
        if self.weeks.term_weeks == 0 {
            return Err(Error::ConfigValidation {
                message: "term_weeks must be greater than 0".to_string(),
            });
        }

        if self.weeks.scheme == WeekScheme::Fixed && self.weeks.term_start.is_none() {
            return Err(Error::ConfigValidation {
                message: "the fixed week scheme requires weeks.term_start".to_string(),
            });
        }

        if self.upload.max_file_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "max_file_bytes must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Get the store path, resolving defaults if not set.
    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.storage
            .store_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(STORE_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.weeks.scheme, WeekScheme::Calendar);
        assert!(config.weeks.term_start.is_none());
        assert_eq!(config.weeks.term_weeks, 16);
        assert!(!config.storage.pretty);
    }

    #[test]
    fn test_default_storage_config() {
        let storage = StorageConfig::default();

        assert!(storage.store_path.is_none());
        assert!(!storage.pretty);
    }

    #[test]
    fn test_default_upload_config() {
        let upload = UploadConfig::default();
        assert_eq!(upload.max_file_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_term_weeks() {
        let mut config = Config::default();
        config.weeks.term_weeks = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("term_weeks"));
    }

    #[test]
    fn test_validate_fixed_scheme_requires_term_start() {
        let mut config = Config::default();
        config.weeks.scheme = WeekScheme::Fixed;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("term_start"));
    }

    #[test]
    fn test_validate_fixed_scheme_with_term_start() {
        let mut config = Config::default();
        config.weeks.scheme = WeekScheme::Fixed;
        config.weeks.term_start = NaiveDate::from_ymd_opt(2026, 8, 24);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_max_file_bytes() {
        let mut config = Config::default();
        config.upload.max_file_bytes = 0;

        let result = config.validate();
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("max_file_bytes"));
    }

    #[test]
    fn test_store_path_default() {
        let config = Config::default();
        let path = config.store_path();

        assert!(path.to_string_lossy().contains("uploads.json"));
    }

    #[test]
    fn test_store_path_custom() {
        let mut config = Config::default();
        config.storage.store_path = Some(PathBuf::from("/custom/path/files.json"));

        assert_eq!(
            config.store_path(),
            PathBuf::from("/custom/path/files.json")
        );
    }

    #[test]
    fn test_key_for_calendar() {
        let weeks = WeeksConfig::default();
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

        assert_eq!(
            weeks.key_for(date),
            WeekKey::Calendar("2026-W35".to_string())
        );
    }

    #[test]
    fn test_key_for_fixed() {
        let weeks = WeeksConfig {
            scheme: WeekScheme::Fixed,
            term_start: NaiveDate::from_ymd_opt(2026, 8, 24),
            term_weeks: 16,
        };
        let date = NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();

        assert_eq!(weeks.key_for(date), WeekKey::Fixed(2));
    }

    #[test]
    fn test_key_for_fixed_without_term_start_falls_back() {
        let weeks = WeeksConfig {
            scheme: WeekScheme::Fixed,
            term_start: None,
            term_weeks: 16,
        };
        let date = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

        assert!(weeks.key_for(date).is_calendar());
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("weekstash"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_default_data_dir() {
        let path = Config::default_data_dir();
        assert!(path.to_string_lossy().contains("weekstash"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        // Loading from a nonexistent path should work (uses defaults)
        figment::Jail::expect_with(|_jail| {
            let result = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")));
            assert!(result.is_ok());

            let config = result.unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_reads_toml_sections() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[storage]
pretty = true

[weeks]
scheme = "fixed"
term_start = "2026-08-24"
term_weeks = 12

[upload]
max_file_bytes = 1024
"#,
            )?;

            let config =
                Config::load_from(Some(PathBuf::from("config.toml"))).expect("load config");
            assert!(config.storage.pretty);
            assert_eq!(config.weeks.scheme, WeekScheme::Fixed);
            assert_eq!(
                config.weeks.term_start,
                NaiveDate::from_ymd_opt(2026, 8, 24)
            );
            assert_eq!(config.weeks.term_weeks, 12);
            assert_eq!(config.upload.max_file_bytes, 1024);
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_partial_file_keeps_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[storage]\npretty = true\n")?;

            let config =
                Config::load_from(Some(PathBuf::from("config.toml"))).expect("load config");
            assert!(config.storage.pretty);
            // Untouched sections keep their defaults
            assert_eq!(config.weeks.term_weeks, 16);
            assert_eq!(config.upload.max_file_bytes, 5 * 1024 * 1024);
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_multi_word_keys() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WEEKSTASH_UPLOAD__MAX_FILE_BYTES", "1234");
            jail.set_env("WEEKSTASH_STORAGE__PRETTY", "true");
            jail.set_env("WEEKSTASH_WEEKS__TERM_WEEKS", "4");

            let config =
                Config::load_from(Some(PathBuf::from("missing.toml"))).expect("load config");
            assert_eq!(config.upload.max_file_bytes, 1234);
            assert!(config.storage.pretty);
            assert_eq!(config.weeks.term_weeks, 4);
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[weeks]\nterm_weeks = 12\n")?;
            jail.set_env("WEEKSTASH_WEEKS__TERM_WEEKS", "8");

            let config =
                Config::load_from(Some(PathBuf::from("config.toml"))).expect("load config");
            assert_eq!(config.weeks.term_weeks, 8);
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("max_file_bytes"));
        assert!(json.contains("term_weeks"));
    }

    #[test]
    fn test_weeks_config_deserialize() {
        let json = r#"{"scheme": "fixed", "term_start": "2026-08-24", "term_weeks": 12}"#;
        let weeks: WeeksConfig = serde_json::from_str(json).unwrap();
        assert_eq!(weeks.scheme, WeekScheme::Fixed);
        assert_eq!(weeks.term_start, NaiveDate::from_ymd_opt(2026, 8, 24));
        assert_eq!(weeks.term_weeks, 12);
    }

    #[test]
    fn test_config_clone() {
        let config = Config::default();
        let cloned = config.clone();
        assert_eq!(config, cloned);
    }
}
