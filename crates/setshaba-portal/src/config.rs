//! Portal configuration (`setshaba.toml`).
//!
//! Every section and key is optional; an empty file yields the defaults.

use serde::{Deserialize, Serialize};
use setshaba_store::{CommunityStore, SeedData, SeedError, StoreError};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::AdminCredentials;

pub const DEFAULT_CONFIG_PATH: &str = "setshaba.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub admin: AdminCredentials,
    pub display: DisplayConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// How many items the home page and the admin dashboard list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub recent_issues: usize,
    pub recent_announcements: usize,
    pub dashboard_recent_issues: usize,
    pub dashboard_recent_feedback: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_issues: 3,
            recent_announcements: 2,
            dashboard_recent_issues: 5,
            dashboard_recent_feedback: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Alternative seed JSON. The built-in sample is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl PortalConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            origin: "inline config".to_string(),
            message: source.to_string(),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            message: source.to_string(),
        })
    }

    /// Load `path` when given; otherwise load [`DEFAULT_CONFIG_PATH`] if it
    /// exists, else use defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn seed_data(&self) -> Result<SeedData, ConfigError> {
        match &self.store.seed {
            Some(path) => Ok(SeedData::load_json(path)?),
            None => Ok(SeedData::sample()),
        }
    }

    /// A fresh store for one session.
    pub fn build_store(&self) -> Result<CommunityStore, ConfigError> {
        Ok(CommunityStore::from_seed(self.seed_data()?)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(String),

    #[error("config parse error in {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = PortalConfig::from_toml_str("").expect("empty config");
        assert_eq!(config, PortalConfig::default());
        assert!(config.admin.matches("admin", "admin"));
        assert_eq!(config.display.recent_issues, 3);
        assert_eq!(config.display.recent_announcements, 2);
        assert_eq!(config.display.dashboard_recent_issues, 5);
        assert_eq!(config.display.dashboard_recent_feedback, 5);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = PortalConfig::from_toml_str(
            r#"
            [admin]
            password = "s3cret"

            [display]
            recent_issues = 5
            "#,
        )
        .expect("partial config");

        assert!(config.admin.matches("admin", "s3cret"));
        assert_eq!(config.display.recent_issues, 5);
        assert_eq!(config.display.recent_announcements, 2);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = PortalConfig::from_toml_str("[display\nrecent_issues = 1")
            .expect_err("bad toml");
        assert!(matches!(err, ConfigError::Parse { ref origin, .. } if origin == "inline config"));
    }

    #[test]
    fn default_config_builds_sample_store() {
        let store = PortalConfig::default().build_store().expect("sample store");
        assert_eq!(store, CommunityStore::seeded());
    }

    #[test]
    fn missing_seed_file_surfaces_seed_error() {
        let config = PortalConfig {
            store: StoreConfig {
                seed: Some(PathBuf::from("/nonexistent/setshaba-seed.json")),
            },
            ..PortalConfig::default()
        };
        let err = config.build_store().expect_err("missing seed");
        assert!(matches!(err, ConfigError::Seed(SeedError::Io(_))));
    }
}
