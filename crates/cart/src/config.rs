//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `INVENTORY_API_URL` - Base URL of the inventory API
//!   (e.g., `http://localhost:3333/`). A trailing slash matters: request
//!   paths are joined onto it.
//!
//! ## Optional
//! - `CART_SNAPSHOT_PATH` - Path of the snapshot file backing the durable
//!   store (default: `rocketshoes-cart.json`)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_SNAPSHOT_PATH: &str = "rocketshoes-cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base URL of the inventory API.
    pub inventory_api_url: Url,
    /// Path of the snapshot file backing the durable store.
    pub snapshot_path: PathBuf,
}

impl CartConfig {
    /// Load configuration from the environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or the base URL
    /// does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let raw_url = get_required_env("INVENTORY_API_URL")?;
        let inventory_api_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("INVENTORY_API_URL".to_string(), e.to_string())
        })?;
        let snapshot_path =
            PathBuf::from(get_env_or_default("CART_SNAPSHOT_PATH", DEFAULT_SNAPSHOT_PATH));

        Ok(Self {
            inventory_api_url,
            snapshot_path,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_env() {
        let err = get_required_env("ROCKETSHOES_TEST_UNSET_VAR").expect_err("must be unset");
        assert_eq!(
            err.to_string(),
            "Missing environment variable: ROCKETSHOES_TEST_UNSET_VAR"
        );
    }

    #[test]
    fn test_env_default_applies_when_unset() {
        let value = get_env_or_default("ROCKETSHOES_TEST_UNSET_VAR", DEFAULT_SNAPSHOT_PATH);
        assert_eq!(value, DEFAULT_SNAPSHOT_PATH);
    }
}
