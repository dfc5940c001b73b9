//! Tracing setup

use crate::config::AppConfig;
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `logging.filter` is set
pub fn default_filter(config: &AppConfig) -> &str {
    match &config.logging.filter {
        Some(filter) => filter.as_str(),
        None if config.is_production() => "fitplan_backend=info",
        None => "fitplan_backend=debug",
    }
}

/// Initialize tracing/logging
///
/// JSON output in production (or when `logging.json` is set), pretty output
/// otherwise. Fails if a global subscriber is already installed.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(config)))?;

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config.is_production() || config.logging.json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?;
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?;
    }
    Ok(())
}
