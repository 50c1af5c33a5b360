//! Configuration management for the NurtureWise Agro dashboard
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with NWA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT session token configuration
    pub jwt: JwtConfig,

    /// Hosted disease inference API configuration
    pub inference: InferenceConfig,

    /// Economic impact settings
    pub economics: EconomicsConfig,

    /// Image upload limits
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing session tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InferenceConfig {
    /// Base URL of the inference API
    pub api_url: String,

    /// API key sent with every inference request
    pub api_key: String,

    /// Model identifier, `<project>/<version>`
    pub model_id: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EconomicsConfig {
    /// Symbol shown next to monetary results
    pub currency_symbol: String,

    /// Fixed USD to INR rate applied to prices entered in USD.
    /// Not refreshed from any market source; review periodically.
    pub usd_to_inr_rate: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted leaf image, in bytes
    pub max_image_bytes: usize,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("NWA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = Self::defaults(config::Config::builder(), &environment)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (NWA prefix)
            .add_source(
                Environment::with_prefix("NWA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    fn defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("environment", environment)?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.url", "sqlite://farmers_data.db?mode=rwc")?
            .set_default("database.max_connections", 5)?
            .set_default("database.min_connections", 1)?
            .set_default("jwt.access_token_expiry", 3600)?
            .set_default("inference.api_url", "https://detect.roboflow.com")?
            .set_default(
                "inference.model_id",
                "plants-diseases-detection-and-classification/12",
            )?
            .set_default("inference.timeout_secs", 60)?
            .set_default("economics.currency_symbol", "₹")?
            .set_default("economics.usd_to_inr_rate", 83.0)?
            .set_default("upload.max_image_bytes", 10_i64 * 1024 * 1024)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_with(overrides: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let mut builder = Config::defaults(config::Config::builder(), "test")?;
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value)?;
        }
        builder.build()?.try_deserialize()
    }

    #[test]
    fn test_defaults_with_required_secrets() {
        let config = load_with(&[("jwt.secret", "s3cret"), ("inference.api_key", "key")]).unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(
            config.inference.model_id,
            "plants-diseases-detection-and-classification/12"
        );
        assert_eq!(config.economics.currency_symbol, "₹");
        assert_eq!(config.economics.usd_to_inr_rate, 83.0);
        assert_eq!(config.upload.max_image_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        assert!(load_with(&[("jwt.secret", "s3cret")]).is_err());
    }
}
