//! Configuration management for the Fitplan engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: FP__)

use anyhow::Result;
use fitplan_shared::EnginePolicy;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// `development` or `production`
    pub environment: String,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub policy: EnginePolicy,
    pub store: StoreConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Force JSON output outside production
    pub json: bool,
}

/// Which document store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            logging: LoggingConfig {
                filter: None,
                json: false,
            },
            policy: EnginePolicy::default(),
            store: StoreConfig {
                backend: StoreBackend::Memory,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with FP__ prefix
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file
        dotenvy::dotenv().ok();

        let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", environment);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig {
                environment,
                ..AppConfig::default()
            })?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., FP__POLICY__MACROS__COOLDOWN_DAYS=3 sets policy.macros.cooldown_days
            .add_source(config::Environment::with_prefix("FP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Defaults overlaid with an inline TOML document
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
