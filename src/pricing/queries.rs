//! Database queries for the pricing rule store.
//!
//! The rule and settings tables are owned by the main resort application;
//! this service only reads them on the calculation path and writes them
//! through the admin endpoints.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::cache::AppCache;
use crate::error::AppError;

use super::engine::RuleStore;
use super::models::{
    DynamicPricingConfig, SeasonalPricingRule, WeekendPricingConfig, DYNAMIC_PRICING_KEY,
    WEEKEND_PRICING_KEY,
};

/// Fetch all active seasonal rules, priority-descending.
pub async fn fetch_active_rules(pool: &PgPool) -> Result<Vec<SeasonalPricingRule>, AppError> {
    let rules = sqlx::query_as::<_, SeasonalPricingRule>(
        r#"
        SELECT
            id, name, start_date, end_date, price_multiplier,
            applicable_to, specific_items, priority, is_active,
            created_at, updated_at
        FROM pricing_seasonal_rule
        WHERE is_active = true
        ORDER BY priority DESC, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rules)
}

/// Fetch a settings singleton by key and deserialize its JSONB value.
async fn fetch_settings<T: serde::de::DeserializeOwned>(
    pool: &PgPool,
    key: &str,
) -> Result<Option<T>, AppError> {
    let row: Option<(serde_json::Value,)> = sqlx::query_as(
        r#"
        SELECT value
        FROM pricing_settings
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((value,)) => {
            let config = serde_json::from_value(value).map_err(|e| {
                AppError::Internal(format!("malformed settings value for '{}': {}", key, e))
            })?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Fetch the dynamic pricing config singleton. `None` means disabled defaults.
pub async fn fetch_dynamic_config(pool: &PgPool) -> Result<Option<DynamicPricingConfig>, AppError> {
    fetch_settings(pool, DYNAMIC_PRICING_KEY).await
}

/// Fetch the weekend pricing config singleton. `None` disables the surcharge.
pub async fn fetch_weekend_config(pool: &PgPool) -> Result<Option<WeekendPricingConfig>, AppError> {
    fetch_settings(pool, WEEKEND_PRICING_KEY).await
}

/// Upsert a settings singleton.
pub async fn upsert_settings<T: serde::Serialize>(
    pool: &PgPool,
    key: &str,
    value: &T,
) -> Result<(), AppError> {
    let json = serde_json::to_value(value)
        .map_err(|e| AppError::Internal(format!("failed to serialize settings: {}", e)))?;

    sqlx::query(
        r#"
        INSERT INTO pricing_settings (key, value, updated_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (key) DO UPDATE
        SET value = EXCLUDED.value, updated_at = NOW()
        "#,
    )
    .bind(key)
    .bind(json)
    .execute(pool)
    .await?;

    Ok(())
}

/// Postgres rule store reading through the application cache.
///
/// The cache is injected rather than held as module state so tests can run
/// the engine against in-memory fakes deterministically.
#[derive(Clone)]
pub struct PgRuleStore {
    pool: PgPool,
    cache: AppCache,
}

impl PgRuleStore {
    pub fn new(pool: PgPool, cache: AppCache) -> Self {
        Self { pool, cache }
    }
}

#[async_trait]
impl RuleStore for PgRuleStore {
    async fn list_active_rules(&self) -> Result<Vec<SeasonalPricingRule>, AppError> {
        if let Some(cached) = self.cache.get_active_rules().await {
            tracing::debug!("Cache HIT for active pricing rules");
            return Ok((*cached).clone());
        }
        tracing::debug!("Cache MISS for active pricing rules");
        let rules = fetch_active_rules(&self.pool).await?;
        self.cache.set_active_rules(rules.clone()).await;
        Ok(rules)
    }

    async fn dynamic_config(&self) -> Result<Option<DynamicPricingConfig>, AppError> {
        if let Some(cached) = self.cache.get_dynamic_config().await {
            return Ok((*cached).clone());
        }
        let config = fetch_dynamic_config(&self.pool).await?;
        self.cache.set_dynamic_config(config.clone()).await;
        Ok(config)
    }

    async fn weekend_config(&self) -> Result<Option<WeekendPricingConfig>, AppError> {
        if let Some(cached) = self.cache.get_weekend_config().await {
            return Ok((*cached).clone());
        }
        let config = fetch_weekend_config(&self.pool).await?;
        self.cache.set_weekend_config(config.clone()).await;
        Ok(config)
    }
}
