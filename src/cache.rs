//! In-memory caching using moka
//!
//! Pricing rules and configuration change rarely compared to how often they
//! are read (every price calculation re-reads all of them), so the rule
//! store reads through short-TTL caches. Admin writes invalidate eagerly,
//! so the TTL only bounds staleness across multiple service instances.

use moka::future::Cache;
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::pricing::models::{DynamicPricingConfig, SeasonalPricingRule, WeekendPricingConfig};
use crate::pricing::queries;

const ACTIVE_RULES_KEY: &str = "active_rules";
const DYNAMIC_CONFIG_KEY: &str = "dynamic_config";
const WEEKEND_CONFIG_KEY: &str = "weekend_config";

/// Application cache holding pricing rules and configuration singletons
///
/// Absence is cached too (`None` entries), so a missing settings row does
/// not cause a database round-trip on every calculation.
#[derive(Clone)]
pub struct AppCache {
    /// Active seasonal rules, priority-descending (single entry)
    pub active_rules: Cache<&'static str, Arc<Vec<SeasonalPricingRule>>>,
    /// Dynamic pricing config singleton
    pub dynamic_config: Cache<&'static str, Arc<Option<DynamicPricingConfig>>>,
    /// Weekend pricing config singleton
    pub weekend_config: Cache<&'static str, Arc<Option<WeekendPricingConfig>>>,
}

impl AppCache {
    /// Create a new cache instance with the given TTL
    pub fn new(ttl_secs: u64) -> Self {
        let ttl = Duration::from_secs(ttl_secs);
        Self {
            active_rules: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build(),
            dynamic_config: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build(),
            weekend_config: Cache::builder()
                .max_capacity(1)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn get_active_rules(&self) -> Option<Arc<Vec<SeasonalPricingRule>>> {
        self.active_rules.get(ACTIVE_RULES_KEY).await
    }

    pub async fn set_active_rules(&self, rules: Vec<SeasonalPricingRule>) {
        self.active_rules
            .insert(ACTIVE_RULES_KEY, Arc::new(rules))
            .await;
    }

    pub async fn get_dynamic_config(&self) -> Option<Arc<Option<DynamicPricingConfig>>> {
        self.dynamic_config.get(DYNAMIC_CONFIG_KEY).await
    }

    pub async fn set_dynamic_config(&self, config: Option<DynamicPricingConfig>) {
        self.dynamic_config
            .insert(DYNAMIC_CONFIG_KEY, Arc::new(config))
            .await;
    }

    pub async fn get_weekend_config(&self) -> Option<Arc<Option<WeekendPricingConfig>>> {
        self.weekend_config.get(WEEKEND_CONFIG_KEY).await
    }

    pub async fn set_weekend_config(&self, config: Option<WeekendPricingConfig>) {
        self.weekend_config
            .insert(WEEKEND_CONFIG_KEY, Arc::new(config))
            .await;
    }

    /// Invalidate everything after an admin write
    pub fn invalidate_all(&self) {
        self.active_rules.invalidate_all();
        self.dynamic_config.invalidate_all();
        self.weekend_config.invalidate_all();
        info!("Pricing caches invalidated");
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            rules_cached: self.active_rules.entry_count() > 0,
            dynamic_config_cached: self.dynamic_config.entry_count() > 0,
            weekend_config_cached: self.weekend_config.entry_count() > 0,
        }
    }
}

/// Cache statistics for the monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub rules_cached: bool,
    pub dynamic_config_cached: bool,
    pub weekend_config_cached: bool,
}

/// Start background cache warmer
///
/// Warms the cache on startup and refreshes on a fixed interval so the
/// first calculation after a quiet period does not pay the warm-up cost.
pub async fn start_cache_warmer(cache: AppCache, db: PgPool, refresh_secs: u64) {
    warm_cache(&cache, &db).await;

    let mut interval = interval(Duration::from_secs(refresh_secs.max(1)));
    interval.tick().await; // first tick fires immediately
    loop {
        interval.tick().await;
        warm_cache(&cache, &db).await;
    }
}

/// Warm the cache with the rule set and configuration singletons
async fn warm_cache(cache: &AppCache, db: &PgPool) {
    match queries::fetch_active_rules(db).await {
        Ok(rules) => cache.set_active_rules(rules).await,
        Err(e) => warn!("Failed to warm rules cache: {}", e),
    }

    match queries::fetch_dynamic_config(db).await {
        Ok(config) => cache.set_dynamic_config(config).await,
        Err(e) => warn!("Failed to warm dynamic config cache: {}", e),
    }

    match queries::fetch_weekend_config(db).await {
        Ok(config) => cache.set_weekend_config(config).await,
        Err(e) => warn!("Failed to warm weekend config cache: {}", e),
    }

    info!("Pricing cache warm-up complete. Stats: {:?}", cache.stats());
}
