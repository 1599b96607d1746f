//! Configuration management.
//!
//! Two endpoint base URLs (primary, fallback), each overridable via config
//! file or environment, with hard-coded defaults when unset.

use sentiq_core::{CoreError, Endpoint};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{default_config_path, default_history_path};

/// Environment variable overriding the primary endpoint.
pub const ENV_PRIMARY_URL: &str = "SENTIQ_PRIMARY_URL";

/// Environment variable overriding the fallback endpoint.
pub const ENV_FALLBACK_URL: &str = "SENTIQ_FALLBACK_URL";

fn default_primary_url() -> String {
    "https://api.sentiq.dev".to_string()
}

fn default_fallback_url() -> String {
    "http://sentiq-fallback.us-east-2.elb.amazonaws.com".to_string()
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the primary backend.
    #[serde(default = "default_primary_url")]
    pub primary_url: String,
    /// Base URL of the fallback backend.
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
    /// Whether the embedding surface is https-only; plain-http probes are
    /// then reported as mixed-content blocks instead of being attempted.
    #[serde(default)]
    pub secure_context: bool,
    /// Override for the history file location.
    #[serde(default)]
    pub history_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_url: default_primary_url(),
            fallback_url: default_fallback_url(),
            secure_context: false,
            history_path: None,
        }
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Applies environment overrides on top of the loaded values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(ENV_PRIMARY_URL) {
            debug!(url = %url, "Primary URL overridden from environment");
            self.primary_url = url;
        }
        if let Ok(url) = std::env::var(ENV_FALLBACK_URL) {
            debug!(url = %url, "Fallback URL overridden from environment");
            self.fallback_url = url;
        }
        self
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks that both base URLs carry an http(s) scheme and a host.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, url) in [("primary", &self.primary_url), ("fallback", &self.fallback_url)] {
            let rest = url
                .strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .ok_or_else(|| {
                    CoreError::InvalidEndpoint(format!("{name} URL must be http(s): {url}"))
                })?;
            if rest.is_empty() {
                return Err(CoreError::InvalidEndpoint(format!(
                    "{name} URL has no host: {url}"
                )));
            }
        }
        Ok(())
    }

    /// Returns the configured candidates in priority order.
    pub fn endpoints(&self) -> [Endpoint; 2] {
        [
            Endpoint::primary(&self.primary_url),
            Endpoint::fallback(&self.fallback_url),
        ]
    }

    /// Returns the effective history file path.
    pub fn history_path(&self) -> PathBuf {
        self.history_path.clone().unwrap_or_else(default_history_path)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sentiq_core::EndpointRole;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();

        let [primary, fallback] = config.endpoints();
        assert_eq!(primary.role, EndpointRole::Primary);
        assert_eq!(fallback.role, EndpointRole::Fallback);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config.primary_url, default_primary_url());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"primary_url":"http://localhost:8000"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.primary_url, "http://localhost:8000");
        assert_eq!(config.fallback_url, default_fallback_url());
        assert!(!config.secure_context);
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = Config {
            primary_url: "ftp://a.example".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            fallback_url: "http://".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let config = Config {
            primary_url: "https://a.example".to_string(),
            fallback_url: "http://b.example".to_string(),
            secure_context: true,
            history_path: None,
        };
        config.save_to(&path).unwrap();

        let back = Config::load_from(&path).unwrap();
        assert_eq!(back.primary_url, config.primary_url);
        assert!(back.secure_context);
    }
}
