//! Environment-driven application configuration
//!
//! All date decomposition in the pricing engine is pinned to the resort's
//! timezone rather than whatever zone the server happens to run in, so the
//! timezone is part of the configuration, not ambient state.

use std::net::SocketAddr;

use chrono_tz::Tz;

/// Application configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Postgres connection string
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_addr: SocketAddr,
    /// Timezone used for check-in date and day-of-week derivation
    pub resort_timezone: Tz,
    /// TTL for the pricing rule/config caches, in seconds
    pub pricing_cache_ttl_secs: u64,
    /// Maximum database connections in the pool
    pub max_db_connections: u32,
}

impl AppConfig {
    /// Load configuration from environment variables (after dotenvy).
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("invalid BIND_ADDR: {}", e))?;

        let resort_timezone = std::env::var("RESORT_TIMEZONE")
            .unwrap_or_else(|_| "America/Cancun".to_string())
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid RESORT_TIMEZONE: {}", e))?;

        let pricing_cache_ttl_secs = std::env::var("PRICING_CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);

        let max_db_connections = std::env::var("MAX_DB_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            bind_addr,
            resort_timezone,
            pricing_cache_ttl_secs,
            max_db_connections,
        })
    }
}
