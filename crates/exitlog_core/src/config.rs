//! Application configuration.
//!
//! # Responsibility
//! - Describe storage, remote, latency and logging settings.
//! - Parse them from TOML with a default for every field.
//!
//! # Invariants
//! - An empty document yields [`AppConfig::default`].
//! - Unknown keys are rejected so typos surface early.

use crate::persist::record_persistence::DEFAULT_SLOT_KEY;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REMOTE_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub latency: LatencyConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads and parses a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(source.as_str())
    }
}

/// Persistence slot location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file; `None` keeps the slot in memory.
    pub db_path: Option<PathBuf>,
    pub slot_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            slot_key: DEFAULT_SLOT_KEY.to_string(),
        }
    }
}

/// Remote demo integration settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    pub enabled: bool,
    pub base_url: String,
    pub timeout_ms: u64,
    pub demo_user_id: u32,
    pub demo_posts_limit: u32,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_REMOTE_BASE_URL.to_string(),
            timeout_ms: 10_000,
            demo_user_id: 1,
            demo_posts_limit: 5,
        }
    }
}

/// Artificial delays, in milliseconds, applied before each step.
///
/// All zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyConfig {
    pub load_ms: u64,
    pub add_ms: u64,
    pub remove_ms: u64,
    pub persist_ms: u64,
    pub render_ms: u64,
    pub name_search_ms: u64,
    pub date_filter_ms: u64,
    pub person_totals_ms: u64,
    pub top_reasons_ms: u64,
}

impl LatencyConfig {
    /// Pacing that reproduces the original interactive feel.
    pub fn original_pacing() -> Self {
        Self {
            load_ms: 1_000,
            add_ms: 1_000,
            remove_ms: 800,
            persist_ms: 300,
            render_ms: 500,
            name_search_ms: 500,
            date_filter_ms: 500,
            person_totals_ms: 700,
            top_reasons_ms: 600,
        }
    }
}

/// Logging bootstrap settings; see [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute log directory; logging stays off when `None`.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LatencyConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.slot_key, "registros");
        assert!(!config.remote.enabled);
        assert_eq!(config.latency, LatencyConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            db_path = "/tmp/exitlog.sqlite3"

            [remote]
            enabled = true
            demo_posts_limit = 3

            [latency]
            persist_ms = 300
            top_reasons_ms = 600
            "#,
        )
        .unwrap();

        assert_eq!(
            config.storage.db_path.as_deref(),
            Some(std::path::Path::new("/tmp/exitlog.sqlite3"))
        );
        assert_eq!(config.storage.slot_key, "registros");
        assert!(config.remote.enabled);
        assert_eq!(config.remote.demo_posts_limit, 3);
        assert_eq!(config.remote.demo_user_id, 1);
        assert_eq!(config.latency.persist_ms, 300);
        assert_eq!(config.latency.top_reasons_ms, 600);
        assert_eq!(config.latency.person_totals_ms, 0);
        assert_eq!(config.latency.add_ms, 0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("[storage]\nslot = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load("/nonexistent/exitlog.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/exitlog.toml"));
    }
}
