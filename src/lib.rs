//! Resort pricing service library.
//!
//! Exposes the seasonal/dynamic pricing engine and its HTTP surface. The
//! binary in `main.rs` wires the Postgres-backed stores into [`AppState`].

use std::sync::Arc;

use sqlx::PgPool;

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;

use cache::AppCache;
use config::AppConfig;
use pricing::engine::PricingEngine;
use pricing::occupancy::PgOccupancySource;
use pricing::queries::PgRuleStore;

/// Shared application state for axum handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<AppConfig>,
    pub engine: Arc<PricingEngine>,
}

impl AppState {
    /// Build the state with Postgres-backed rule and occupancy stores.
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let cache = AppCache::new(config.pricing_cache_ttl_secs);
        let engine = PricingEngine::new(
            Arc::new(PgRuleStore::new(db.clone(), cache.clone())),
            Arc::new(PgOccupancySource::new(db.clone())),
            config.resort_timezone,
        );
        Self {
            db,
            cache,
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }
}
