//! # Gateway Configuration
//!
//! JSON configuration file loaded at startup. Every field has a
//! development convenience default, so an empty object is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dispatch::QueryConfig;
use crate::http_server::HttpServerConfig;
use crate::provision::ProvisionPolicy;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Connection settings for the storage backend.
///
/// URL and credentials are the contract for a remote store client; the
/// in-memory backend ignores them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store connection URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Store username
    #[serde(default = "default_username")]
    pub username: String,

    /// Store password
    #[serde(default = "default_password")]
    pub password: String,

    /// Target database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Target collection name
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_url() -> String {
    "http://arangodb:8529".to_string()
}
fn default_username() -> String {
    "root".to_string()
}
fn default_password() -> String {
    "root".to_string()
}
fn default_database() -> String {
    "myDatabase".to_string()
}
fn default_collection() -> String {
    "myCollection".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: default_username(),
            password: default_password(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// Provisioning settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvisioningConfig {
    /// Which ensure-exists policy to run on every request.
    #[serde(default)]
    pub policy: ProvisionPolicy,
}

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,

    /// Storage backend settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Provisioning policy selection
    #[serde(default)]
    pub provisioning: ProvisioningConfig,

    /// Query execution path settings
    #[serde(default)]
    pub query: QueryConfig,
}

impl GatewayConfig {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.url.is_empty() {
            return Err(ConfigError::Invalid("store.url must not be empty".into()));
        }
        if self.store.database.is_empty() {
            return Err(ConfigError::Invalid(
                "store.database must not be empty".into(),
            ));
        }
        if self.store.collection.is_empty() {
            return Err(ConfigError::Invalid(
                "store.collection must not be empty".into(),
            ));
        }
        if self.http.port == 0 {
            return Err(ConfigError::Invalid("http.port must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config: GatewayConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.store.url, "http://arangodb:8529");
        assert_eq!(config.store.database, "myDatabase");
        assert_eq!(config.store.collection, "myCollection");
        assert_eq!(config.provisioning.policy, ProvisionPolicy::CheckThenCreate);
        assert!(!config.query.ignore_errors);
        config.validate().unwrap();
    }

    #[test]
    fn test_policy_and_query_flags_parse() {
        let config: GatewayConfig = serde_json::from_str(
            r#"{
                "provisioning": {"policy": "create-then-fallback"},
                "query": {"ignore_errors": true, "upsert": true}
            }"#,
        )
        .unwrap();
        assert_eq!(config.provisioning.policy, ProvisionPolicy::CreateThenFallback);
        assert!(config.query.ignore_errors);
        assert!(config.query.upsert);
    }

    #[test]
    fn test_empty_collection_rejected() {
        let config: GatewayConfig =
            serde_json::from_str(r#"{"store": {"collection": ""}}"#).unwrap();
        assert!(config.validate().is_err());
    }
}
