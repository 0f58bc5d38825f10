//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/fare-service/config.toml`).
//! Every section and field has a default, so a partial file is valid and a
//! missing file falls back to [`AppConfig::default`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::{DatabaseConfig, MappingConfig};
use crate::shared::RetryConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default config location: `$CONFIG_DIR/fare-service/config.toml`,
/// falling back to the working directory when no config dir is known.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fare-service")
        .join("config.toml")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds in-flight requests get to finish on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SeaORM connection URL; SQLite and Postgres are supported
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DatabaseConfig::default().url,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Database,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Attempts per route lookup, including the first
    pub retry_attempts: u32,
    pub retry_initial_delay_ms: u64,
}

impl Default for MappingSettings {
    fn default() -> Self {
        let client = MappingConfig::default();
        let retry = RetryConfig::default();
        Self {
            base_url: client.base_url,
            timeout_secs: client.timeout_secs,
            retry_attempts: retry.max_attempts,
            retry_initial_delay_ms: retry.initial_delay.as_millis() as u64,
        }
    }
}

impl MappingSettings {
    pub fn client_config(&self) -> MappingConfig {
        MappingConfig::default()
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_initial_delay_ms),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, e.g. `info` or `fare_service=debug,sqlx=warn`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Where a loaded configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file did not exist; built-in defaults are in effect.
    Defaults,
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub mapping: MappingSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Load and validate the config at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Like [`load`](Self::load), but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<(Self, ConfigSource), ConfigError> {
        if path.exists() {
            Ok((Self::load(path)?, ConfigSource::File))
        } else {
            Ok((Self::default(), ConfigSource::Defaults))
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, raw).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.api_host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.api_host is empty".into()));
        }
        if self.storage.backend == StorageBackend::Database && self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.url is required for the database backend".into(),
            ));
        }
        let base_url = self.mapping.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "mapping.base_url must be an http(s) URL, got {:?}",
                self.mapping.base_url
            )));
        }
        if self.mapping.timeout_secs == 0 {
            return Err(ConfigError::Invalid("mapping.timeout_secs must be positive".into()));
        }
        if self.mapping.retry_attempts == 0 {
            return Err(ConfigError::Invalid("mapping.retry_attempts must be at least 1".into()));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
        }
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.backend, StorageBackend::Database);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9100

            [storage]
            backend = "memory"

            [mapping]
            base_url = "http://maps.internal:8085"
            retry_attempts = 5

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.api_port, 9100);
        assert_eq!(config.server.api_host, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.mapping.retry_attempts, 5);
        assert_eq!(config.mapping.timeout_secs, MappingSettings::default().timeout_secs);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.mapping.retry_config().max_attempts, 5);
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let err = AppConfig::from_toml("[storage]\nbackend = \"redis\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn non_http_mapping_url_is_rejected() {
        let err = AppConfig::from_toml("[mapping]\nbase_url = \"maps:8085\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn save_then_load_restores_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.server.api_port = 9200;
        config.storage.backend = StorageBackend::Memory;
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::Read { .. })));
        assert_eq!(
            AppConfig::load_or_default(&path).unwrap(),
            (AppConfig::default(), ConfigSource::Defaults)
        );
    }

    #[test]
    fn existing_file_is_reported_as_file_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        AppConfig::default().save(&path).unwrap();
        let (_, source) = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(source, ConfigSource::File);
    }

    #[test]
    fn default_path_ends_with_service_dir() {
        let path = default_config_path();
        assert!(path.ends_with("fare-service/config.toml"));
    }
}
