//! Request DTOs for pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::models::ItemType;

/// Query parameters for GET /pricing/calculate
#[derive(Debug, Deserialize)]
pub struct CalculatePriceParams {
    pub item_type: ItemType,
    pub item_id: Uuid,
    pub base_price: Decimal,
    pub check_in_date: NaiveDate,
    /// Accepted for forward compatibility; multi-night logic is not applied yet
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
}

/// Query parameters for GET /pricing/calendar
#[derive(Debug, Deserialize)]
pub struct PricingCalendarParams {
    pub item_type: ItemType,
    pub item_id: Uuid,
    pub base_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body for POST /admin/pricing/rules
#[derive(Debug, Deserialize)]
pub struct NewSeasonalRule {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub price_multiplier: Decimal,
    pub applicable_to: Vec<ItemType>,
    #[serde(default)]
    pub specific_items: Option<Vec<Uuid>>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Body for PATCH /admin/pricing/rules/:id
///
/// Omitted fields are left unchanged. Sending an empty `specific_items`
/// list clears the allow-list.
#[derive(Debug, Default, Deserialize)]
pub struct SeasonalRuleUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub price_multiplier: Option<Decimal>,
    #[serde(default)]
    pub applicable_to: Option<Vec<ItemType>>,
    #[serde(default)]
    pub specific_items: Option<Vec<Uuid>>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}
