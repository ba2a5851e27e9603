//! Pricing API route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::Result;
use crate::AppState;

use super::admin;
use super::models::{DynamicPricingConfig, SeasonalPricingRule, WeekendPricingConfig};
use super::requests::{
    CalculatePriceParams, NewSeasonalRule, PricingCalendarParams, SeasonalRuleUpdate,
};
use super::responses::PriceCalculationResult;

/// Build the pricing router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pricing/calculate", get(calculate))
        .route("/pricing/calendar", get(calendar))
        .route(
            "/admin/pricing/rules",
            get(list_rules).post(create_rule),
        )
        .route(
            "/admin/pricing/rules/:id",
            axum::routing::patch(update_rule).delete(delete_rule),
        )
        .route(
            "/admin/pricing/config/dynamic",
            get(get_dynamic_config).put(put_dynamic_config),
        )
        .route(
            "/admin/pricing/config/weekend",
            put(put_weekend_config).get(get_weekend_config),
        )
        .route("/admin/cache/stats", get(cache_stats))
}

fn validate_base_price(base_price: Decimal) -> Result<()> {
    if base_price < Decimal::ZERO {
        return Err(crate::error::AppError::Validation(
            "base_price must not be negative".to_string(),
        ));
    }
    Ok(())
}

/// GET /pricing/calculate
async fn calculate(
    State(state): State<AppState>,
    Query(params): Query<CalculatePriceParams>,
) -> Result<Json<PriceCalculationResult>> {
    validate_base_price(params.base_price)?;

    let check_in = state.engine.resort_midnight(params.check_in_date);
    let check_out = params.check_out_date.map(|d| state.engine.resort_midnight(d));

    let result = state
        .engine
        .calculate_price(
            params.item_type,
            params.item_id,
            params.base_price,
            check_in,
            check_out,
            None,
        )
        .await?;

    Ok(Json(result))
}

/// GET /pricing/calendar
async fn calendar(
    State(state): State<AppState>,
    Query(params): Query<PricingCalendarParams>,
) -> Result<Json<BTreeMap<chrono::NaiveDate, PriceCalculationResult>>> {
    validate_base_price(params.base_price)?;

    let calendar = state
        .engine
        .pricing_calendar(
            params.item_type,
            params.item_id,
            params.base_price,
            params.start_date,
            params.end_date,
            None,
        )
        .await?;

    Ok(Json(calendar))
}

/// GET /admin/pricing/rules
async fn list_rules(State(state): State<AppState>) -> Result<Json<Vec<SeasonalPricingRule>>> {
    Ok(Json(admin::list_rules(&state.db).await?))
}

/// POST /admin/pricing/rules
async fn create_rule(
    State(state): State<AppState>,
    Json(rule): Json<NewSeasonalRule>,
) -> Result<Json<SeasonalPricingRule>> {
    Ok(Json(admin::create_rule(&state.db, &state.cache, rule).await?))
}

/// PATCH /admin/pricing/rules/:id
async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SeasonalRuleUpdate>,
) -> Result<Json<SeasonalPricingRule>> {
    Ok(Json(
        admin::update_rule(&state.db, &state.cache, id, update).await?,
    ))
}

/// DELETE /admin/pricing/rules/:id
async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>> {
    admin::delete_rule(&state.db, &state.cache, id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

/// GET /admin/pricing/config/dynamic
async fn get_dynamic_config(State(state): State<AppState>) -> Result<Json<DynamicPricingConfig>> {
    Ok(Json(admin::get_dynamic_config(&state.db).await?))
}

/// PUT /admin/pricing/config/dynamic
async fn put_dynamic_config(
    State(state): State<AppState>,
    Json(config): Json<DynamicPricingConfig>,
) -> Result<Json<DynamicPricingConfig>> {
    Ok(Json(
        admin::put_dynamic_config(&state.db, &state.cache, config).await?,
    ))
}

/// GET /admin/pricing/config/weekend
async fn get_weekend_config(State(state): State<AppState>) -> Result<Json<WeekendPricingConfig>> {
    Ok(Json(admin::get_weekend_config(&state.db).await?))
}

/// PUT /admin/pricing/config/weekend
async fn put_weekend_config(
    State(state): State<AppState>,
    Json(config): Json<WeekendPricingConfig>,
) -> Result<Json<WeekendPricingConfig>> {
    Ok(Json(
        admin::put_weekend_config(&state.db, &state.cache, config).await?,
    ))
}

/// GET /admin/cache/stats
async fn cache_stats(State(state): State<AppState>) -> Json<crate::cache::CacheStats> {
    Json(state.cache.stats())
}
