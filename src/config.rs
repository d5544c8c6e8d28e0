//! Application configuration from environment variables

use std::{env, fmt::Display, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use tracing::{info, warn};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub pricing_cache_ttl: Duration,
    pub cache_warm_interval: Duration,
}

impl Config {
    /// Load from the environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        if dotenvy::dotenv().is_err() {
            info!("No .env file found, using process environment");
        }

        Ok(Self {
            host: try_load("HOST", "0.0.0.0")?,
            port: try_load("PORT", "3000")?,
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: try_load("DATABASE_MAX_CONNECTIONS", "5")?,
            pricing_cache_ttl: Duration::from_secs(try_load("PRICING_CACHE_TTL_SECS", "1800")?),
            cache_warm_interval: Duration::from_secs(try_load("CACHE_WARM_INTERVAL_SECS", "600")?),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow::anyhow!("invalid value for {key}: {raw}")
    })
}
