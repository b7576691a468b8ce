//! Configuration management for the DiaCheck backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: DIACHECK__)
//! 4. `API_BASE`, which overrides the prediction service URL

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Fallback prediction service used when nothing else is configured
pub const DEFAULT_API_BASE: &str = "https://pirpir-diacheck-backend.hf.space";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Prediction service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Base URL; requests go to `{api_base}/predict`
    pub api_base: String,
    /// Unset means no client-side timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl PredictionConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    /// Full URL of the predict endpoint
    pub fn predict_url(&self) -> String {
        format!("{}/predict", self.base_url())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            prediction: PredictionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with DIACHECK__ prefix
    /// 4. API_BASE
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(
                config::File::with_name(&config_file)
                    .required(false)
            )
            // Override with environment variables (DIACHECK__ prefix)
            // e.g., DIACHECK__SERVER__PORT=9000 sets server.port
            .add_source(
                config::Environment::with_prefix("DIACHECK")
                    .separator("__")
            )
            .set_override_option(
                "prediction.api_base",
                env::var("API_BASE").ok().filter(|v| !v.trim().is_empty()),
            )?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        is_production_env(env::var("RUST_ENV").ok().as_deref())
    }
}

fn is_production_env(rust_env: Option<&str>) -> bool {
    rust_env == Some("production")
}
