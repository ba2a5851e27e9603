//! Database models for the pricing engine.
//!
//! Rules live in their own table; the dynamic and weekend configurations are
//! singleton JSONB rows in `pricing_settings`, keyed by a fixed settings key.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Unit types a pricing rule can apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Chalets,
    Pool,
    Restaurant,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Chalets => "chalets",
            ItemType::Pool => "pool",
            ItemType::Restaurant => "restaurant",
        }
    }
}

/// Seasonal pricing rule from pricing_seasonal_rule
///
/// `start_date` and `end_date` are year-independent `MM-DD` strings so a
/// season recurs every year. A range whose start sorts after its end wraps
/// across the year boundary (e.g. 12-15 through 01-05).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SeasonalPricingRule {
    pub id: Uuid,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_multiplier: Decimal,
    /// Unit types the rule may affect ("chalets", "pool", "restaurant")
    pub applicable_to: Vec<String>,
    /// Optional allow-list; empty or absent means all items of the type
    pub specific_items: Option<Vec<Uuid>>,
    pub priority: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SeasonalPricingRule {
    /// Whether this rule may affect the given item.
    ///
    /// An empty `specific_items` list behaves like no allow-list at all.
    pub fn applies_to(&self, item_type: ItemType, item_id: Uuid) -> bool {
        if !self.applicable_to.iter().any(|t| t == item_type.as_str()) {
            return false;
        }
        match &self.specific_items {
            Some(items) if !items.is_empty() => items.contains(&item_id),
            _ => true,
        }
    }
}

/// Dynamic pricing configuration (singleton settings row)
///
/// Occupancy thresholds are percentages in 0–100; the price multiplier is
/// interpolated linearly between the two thresholds. Lead-time bands are
/// expressed in whole days until check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicPricingConfig {
    pub enabled: bool,
    pub min_occupancy_threshold: Decimal,
    pub max_occupancy_threshold: Decimal,
    pub min_price_multiplier: Decimal,
    pub max_price_multiplier: Decimal,
    pub advance_booking_days: i64,
    /// Fractional discount (0.1 = 10% off) for far-ahead bookings
    pub early_bird_discount: Decimal,
    pub last_minute_days: i64,
    /// Fractional adjustment for close-in bookings; may be zero or negative
    pub last_minute_premium: Decimal,
}

impl Default for DynamicPricingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            min_occupancy_threshold: dec!(30),
            max_occupancy_threshold: dec!(80),
            min_price_multiplier: dec!(0.85),
            max_price_multiplier: dec!(1.25),
            advance_booking_days: 30,
            early_bird_discount: dec!(0.10),
            last_minute_days: 3,
            last_minute_premium: dec!(0.15),
        }
    }
}

/// Weekend surcharge configuration (singleton settings row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekendPricingConfig {
    pub enabled: bool,
    pub multiplier: Decimal,
}

impl Default for WeekendPricingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            multiplier: dec!(1.15),
        }
    }
}

/// Settings keys for the singleton configuration rows
pub const DYNAMIC_PRICING_KEY: &str = "dynamic_pricing";
pub const WEEKEND_PRICING_KEY: &str = "weekend_pricing";
