//! Configuration management for the prediction client
//!
//! This module provides utilities for loading and validating configuration
//! for the remote prediction service, with support for environment variables.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;

use once_cell::sync::Lazy;
use url::Url;

use crate::error::{PredictionError, Result};

/// Default base URL of the prediction service
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default path of the prediction endpoint
pub const DEFAULT_ENDPOINT: &str = "/sendCrop";

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get_string(key)?;
        value.parse::<i64>().map_err(|e| {
            PredictionError::configuration(format!("Invalid integer for key {}: {}", key, e))
        })
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }
}

impl<T: ConfigProvider> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Format a configuration key as an environment variable
    fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                PredictionError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => PredictionError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values.get(key).cloned().ok_or_else(|| {
            PredictionError::configuration(format!("Configuration key not found: {}", key))
        })
    }
}

/// Global default configuration provider
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("CROP_ADVISOR")));

/// Connection settings for the remote prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionServiceConfig {
    /// Base URL, e.g. `http://localhost:5000`
    pub base_url: String,

    /// Path of the prediction endpoint relative to the base URL
    pub endpoint: String,

    /// Request timeout; `None` keeps the transport default
    pub timeout_seconds: Option<u64>,
}

impl Default for PredictionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: None,
        }
    }
}

impl PredictionServiceConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider>(provider: &P) -> Result<Self> {
        let base_url = provider.get_string_or("prediction_base_url", DEFAULT_BASE_URL);
        let endpoint = provider.get_string_or("prediction_endpoint", DEFAULT_ENDPOINT);
        let timeout_seconds = match provider.get_string("prediction_timeout_seconds") {
            Ok(_) => {
                let value = provider.get_int("prediction_timeout_seconds")?;
                Some(u64::try_from(value).map_err(|_| {
                    PredictionError::configuration(format!(
                        "Timeout must be a positive integer, got {}",
                        value
                    ))
                })?)
            }
            Err(_) => None,
        };

        let config = Self {
            base_url,
            endpoint,
            timeout_seconds,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(PredictionError::configuration("Prediction service base URL is required"));
        }

        if self.endpoint.trim().is_empty() {
            return Err(PredictionError::configuration("Prediction endpoint path is required"));
        }

        if self.timeout_seconds == Some(0) {
            return Err(PredictionError::configuration("Timeout must be greater than zero"));
        }

        self.prediction_url()?;
        Ok(())
    }

    /// Full URL of the prediction endpoint
    pub fn prediction_url(&self) -> Result<Url> {
        join_url(&self.base_url, &self.endpoint)
    }

    /// Full URL of the health endpoint
    pub fn health_url(&self) -> Result<Url> {
        join_url(&self.base_url, "/health")
    }
}

fn join_url(base: &str, path: &str) -> Result<Url> {
    let base = Url::parse(base.trim_end_matches('/'))?;
    if base.cannot_be_a_base() {
        return Err(PredictionError::configuration(format!("Not a base URL: {}", base)));
    }
    let mut url = base;
    let joined = format!(
        "{}/{}",
        url.path().trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    url.set_path(&joined);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("key1", "value1");
        provider.set("key2", "123");

        assert_eq!(provider.get_string("key1").unwrap(), "value1");
        assert_eq!(provider.get_int("key2").unwrap(), 123);
        assert!(provider.get_string("key3").is_err());
    }

    #[test]
    fn test_env_config_provider_key_format() {
        let provider = EnvConfigProvider::new().with_prefix("TEST");

        assert_eq!(provider.format_key("prediction_base_url"), "TEST_PREDICTION_BASE_URL");
        assert_eq!(provider.format_key("base-url"), "TEST_BASE_URL");
    }

    #[test]
    fn test_url_joining() {
        let config = PredictionServiceConfig {
            base_url: "http://localhost:5000/".to_string(),
            ..PredictionServiceConfig::default()
        };
        assert_eq!(
            config.prediction_url().unwrap().as_str(),
            "http://localhost:5000/sendCrop"
        );
        assert_eq!(config.health_url().unwrap().as_str(), "http://localhost:5000/health");

        let prefixed = PredictionServiceConfig {
            base_url: "http://models.internal/api".to_string(),
            endpoint: "sendCrop".to_string(),
            timeout_seconds: None,
        };
        assert_eq!(
            prefixed.prediction_url().unwrap().as_str(),
            "http://models.internal/api/sendCrop"
        );
    }
}
