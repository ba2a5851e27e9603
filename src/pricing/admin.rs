//! Admin write path: seasonal rule CRUD and configuration upserts.
//!
//! Validation happens here, at write time. Stored `MM-DD` dates are
//! guaranteed well-formed for every rule created through this path; rule
//! lookup still treats a malformed date as "never matches" so legacy rows
//! cannot break calculation.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::validate_season_date;
use super::models::{
    DynamicPricingConfig, ItemType, SeasonalPricingRule, WeekendPricingConfig,
    DYNAMIC_PRICING_KEY, WEEKEND_PRICING_KEY,
};
use super::queries;
use super::requests::{NewSeasonalRule, SeasonalRuleUpdate};

fn validate_multiplier(multiplier: Decimal) -> Result<(), AppError> {
    if multiplier <= Decimal::ZERO {
        return Err(AppError::Validation(
            "price_multiplier must be positive".to_string(),
        ));
    }
    Ok(())
}

fn item_types_to_strings(types: &[ItemType]) -> Vec<String> {
    types.iter().map(|t| t.as_str().to_string()).collect()
}

/// List all rules, active or not, priority-descending.
pub async fn list_rules(pool: &PgPool) -> Result<Vec<SeasonalPricingRule>, AppError> {
    let rules = sqlx::query_as::<_, SeasonalPricingRule>(
        r#"
        SELECT
            id, name, start_date, end_date, price_multiplier,
            applicable_to, specific_items, priority, is_active,
            created_at, updated_at
        FROM pricing_seasonal_rule
        ORDER BY priority DESC, name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rules)
}

/// Create a seasonal rule.
pub async fn create_rule(
    pool: &PgPool,
    cache: &AppCache,
    rule: NewSeasonalRule,
) -> Result<SeasonalPricingRule, AppError> {
    validate_season_date(&rule.start_date).map_err(AppError::Validation)?;
    validate_season_date(&rule.end_date).map_err(AppError::Validation)?;
    validate_multiplier(rule.price_multiplier)?;
    if rule.applicable_to.is_empty() {
        return Err(AppError::Validation(
            "applicable_to must name at least one unit type".to_string(),
        ));
    }

    let created = sqlx::query_as::<_, SeasonalPricingRule>(
        r#"
        INSERT INTO pricing_seasonal_rule
            (id, name, start_date, end_date, price_multiplier,
             applicable_to, specific_items, priority, is_active,
             created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW(), NOW())
        RETURNING
            id, name, start_date, end_date, price_multiplier,
            applicable_to, specific_items, priority, is_active,
            created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&rule.name)
    .bind(&rule.start_date)
    .bind(&rule.end_date)
    .bind(rule.price_multiplier)
    .bind(item_types_to_strings(&rule.applicable_to))
    .bind(&rule.specific_items)
    .bind(rule.priority)
    .bind(rule.is_active)
    .fetch_one(pool)
    .await?;

    cache.invalidate_all();
    tracing::info!("Created seasonal pricing rule '{}'", created.name);
    Ok(created)
}

/// Partially update a seasonal rule. Omitted fields stay unchanged; an
/// empty `specific_items` list clears the allow-list.
pub async fn update_rule(
    pool: &PgPool,
    cache: &AppCache,
    id: Uuid,
    update: SeasonalRuleUpdate,
) -> Result<SeasonalPricingRule, AppError> {
    if let Some(start) = &update.start_date {
        validate_season_date(start).map_err(AppError::Validation)?;
    }
    if let Some(end) = &update.end_date {
        validate_season_date(end).map_err(AppError::Validation)?;
    }
    if let Some(multiplier) = update.price_multiplier {
        validate_multiplier(multiplier)?;
    }
    if let Some(types) = &update.applicable_to {
        if types.is_empty() {
            return Err(AppError::Validation(
                "applicable_to must name at least one unit type".to_string(),
            ));
        }
    }

    let updated = sqlx::query_as::<_, SeasonalPricingRule>(
        r#"
        UPDATE pricing_seasonal_rule SET
            name = COALESCE($2, name),
            start_date = COALESCE($3, start_date),
            end_date = COALESCE($4, end_date),
            price_multiplier = COALESCE($5, price_multiplier),
            applicable_to = COALESCE($6, applicable_to),
            specific_items = CASE
                WHEN $7::uuid[] IS NULL THEN specific_items
                ELSE NULLIF($7, '{}'::uuid[])
            END,
            priority = COALESCE($8, priority),
            is_active = COALESCE($9, is_active),
            updated_at = NOW()
        WHERE id = $1
        RETURNING
            id, name, start_date, end_date, price_multiplier,
            applicable_to, specific_items, priority, is_active,
            created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&update.name)
    .bind(&update.start_date)
    .bind(&update.end_date)
    .bind(update.price_multiplier)
    .bind(update.applicable_to.as_deref().map(item_types_to_strings))
    .bind(&update.specific_items)
    .bind(update.priority)
    .bind(update.is_active)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound)?;

    cache.invalidate_all();
    tracing::info!("Updated seasonal pricing rule {}", id);
    Ok(updated)
}

/// Delete a seasonal rule.
pub async fn delete_rule(pool: &PgPool, cache: &AppCache, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query(
        r#"
        DELETE FROM pricing_seasonal_rule
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    cache.invalidate_all();
    tracing::info!("Deleted seasonal pricing rule {}", id);
    Ok(())
}

/// Current dynamic pricing config, or the disabled defaults when unset.
pub async fn get_dynamic_config(pool: &PgPool) -> Result<DynamicPricingConfig, AppError> {
    Ok(queries::fetch_dynamic_config(pool).await?.unwrap_or_default())
}

/// Upsert the dynamic pricing config singleton.
pub async fn put_dynamic_config(
    pool: &PgPool,
    cache: &AppCache,
    config: DynamicPricingConfig,
) -> Result<DynamicPricingConfig, AppError> {
    let pct = Decimal::ONE_HUNDRED;
    if config.min_occupancy_threshold < Decimal::ZERO
        || config.max_occupancy_threshold > pct
        || config.min_occupancy_threshold >= config.max_occupancy_threshold
    {
        return Err(AppError::Validation(
            "occupancy thresholds must satisfy 0 <= min < max <= 100".to_string(),
        ));
    }
    validate_multiplier(config.min_price_multiplier)?;
    validate_multiplier(config.max_price_multiplier)?;

    queries::upsert_settings(pool, DYNAMIC_PRICING_KEY, &config).await?;
    cache.invalidate_all();
    tracing::info!("Dynamic pricing config updated (enabled={})", config.enabled);
    Ok(config)
}

/// Current weekend pricing config, or the disabled defaults when unset.
pub async fn get_weekend_config(pool: &PgPool) -> Result<WeekendPricingConfig, AppError> {
    Ok(queries::fetch_weekend_config(pool).await?.unwrap_or_default())
}

/// Upsert the weekend pricing config singleton.
pub async fn put_weekend_config(
    pool: &PgPool,
    cache: &AppCache,
    config: WeekendPricingConfig,
) -> Result<WeekendPricingConfig, AppError> {
    validate_multiplier(config.multiplier)?;

    queries::upsert_settings(pool, WEEKEND_PRICING_KEY, &config).await?;
    cache.invalidate_all();
    tracing::info!("Weekend pricing config updated (enabled={})", config.enabled);
    Ok(config)
}
