//! The pricing engine: composes seasonal, weekend and dynamic adjustments
//! into a final price.
//!
//! The engine is stateless between calls; every calculation re-reads rules,
//! configuration and occupancy through its injected ports, so concurrent
//! callers never contend. Data-access failures propagate unchanged - there
//! is no retry at this layer.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;

use super::calculators::{
    self, date_code, days_until_checkin, in_season_range, is_weekend_checkin, round_money,
    LeadTimeBand,
};
use super::models::{DynamicPricingConfig, ItemType, SeasonalPricingRule, WeekendPricingConfig};
use super::responses::{AppliedRule, PriceBreakdown, PriceCalculationResult, RuleKind};

/// Read side of the rule and configuration store.
///
/// `list_active_rules` returns rules in priority-descending order. Priority
/// only controls evaluation and display order: every matching rule's
/// adjustment is summed, higher priority never suppresses lower.
#[async_trait]
pub trait RuleStore: Send + Sync {
    async fn list_active_rules(&self) -> Result<Vec<SeasonalPricingRule>, AppError>;
    /// `None` means dynamic pricing has never been configured (disabled).
    async fn dynamic_config(&self) -> Result<Option<DynamicPricingConfig>, AppError>;
    /// `None` disables the weekend surcharge.
    async fn weekend_config(&self) -> Result<Option<WeekendPricingConfig>, AppError>;
}

/// Reports current occupancy percentage for a unit type on a date.
#[async_trait]
pub trait OccupancySource: Send + Sync {
    /// `None` means occupancy is unknown and the demand step is skipped.
    async fn occupancy_percentage(
        &self,
        item_type: ItemType,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, AppError>;
}

/// Pricing engine over injected store ports
pub struct PricingEngine {
    rules: Arc<dyn RuleStore>,
    occupancy: Arc<dyn OccupancySource>,
    timezone: Tz,
}

impl PricingEngine {
    pub fn new(rules: Arc<dyn RuleStore>, occupancy: Arc<dyn OccupancySource>, timezone: Tz) -> Self {
        Self {
            rules,
            occupancy,
            timezone,
        }
    }

    /// Midnight of a calendar date in the resort's timezone, as UTC.
    pub(crate) fn resort_midnight(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(NaiveTime::MIN);
        self.timezone
            .from_local_datetime(&local)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            // midnight skipped by a DST jump: fall back to the UTC reading
            .unwrap_or_else(|| local.and_utc())
    }

    /// Calculate the price for one item on one check-in date.
    ///
    /// `check_out` is accepted but not used yet (reserved for multi-night
    /// logic). `as_of` pins "now" for the lead-time bands; `None` uses the
    /// wall clock.
    pub async fn calculate_price(
        &self,
        item_type: ItemType,
        item_id: Uuid,
        base_price: Decimal,
        check_in: DateTime<Utc>,
        _check_out: Option<DateTime<Utc>>,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<PriceCalculationResult, AppError> {
        let local_check_in = check_in.with_timezone(&self.timezone);
        let check_in_code = date_code(local_check_in.date_naive());

        let mut seasonal_adjustment = Decimal::ZERO;
        let mut weekend_adjustment = Decimal::ZERO;
        let mut dynamic_adjustment = Decimal::ZERO;
        let mut applied_rules: Vec<AppliedRule> = Vec::new();

        // Seasonal date-range rules: all matching rules stack.
        for rule in self.rules.list_active_rules().await? {
            if !rule.applies_to(item_type, item_id) {
                continue;
            }
            if !in_season_range(check_in_code, &rule.start_date, &rule.end_date) {
                continue;
            }
            seasonal_adjustment += base_price * (rule.price_multiplier - Decimal::ONE);
            applied_rules.push(AppliedRule {
                name: rule.name.clone(),
                multiplier: rule.price_multiplier,
                kind: RuleKind::Seasonal,
            });
        }

        // Weekend surcharge on Fri/Sat/Sun check-ins.
        if let Some(weekend) = self.rules.weekend_config().await? {
            if weekend.enabled && is_weekend_checkin(local_check_in.weekday()) {
                weekend_adjustment += base_price * (weekend.multiplier - Decimal::ONE);
                applied_rules.push(AppliedRule {
                    name: "Weekend Pricing".to_string(),
                    multiplier: weekend.multiplier,
                    kind: RuleKind::Weekend,
                });
            }
        }

        // Dynamic pricing: chalets only, and only when enabled.
        let dynamic = self.rules.dynamic_config().await?;
        if let Some(config) = dynamic.filter(|c| c.enabled) {
            if item_type == ItemType::Chalets {
                let now = as_of.unwrap_or_else(Utc::now);
                let days_until = days_until_checkin(check_in, now);

                match calculators::lead_time_band(days_until, &config) {
                    Some(LeadTimeBand::EarlyBird) => {
                        dynamic_adjustment += base_price * (-config.early_bird_discount);
                        applied_rules.push(AppliedRule {
                            name: "Early Bird Discount".to_string(),
                            multiplier: Decimal::ONE - config.early_bird_discount,
                            kind: RuleKind::EarlyBird,
                        });
                    }
                    Some(LeadTimeBand::LastMinute) => {
                        dynamic_adjustment += base_price * config.last_minute_premium;
                        if config.last_minute_premium != Decimal::ZERO {
                            applied_rules.push(AppliedRule {
                                name: "Last Minute Rate".to_string(),
                                multiplier: Decimal::ONE + config.last_minute_premium,
                                kind: RuleKind::LastMinute,
                            });
                        }
                    }
                    None => {}
                }

                let occupancy = self
                    .occupancy
                    .occupancy_percentage(item_type, local_check_in.date_naive())
                    .await?;
                if let Some(occupancy) = occupancy {
                    let multiplier = calculators::occupancy_multiplier(occupancy, &config);
                    dynamic_adjustment += base_price * (multiplier - Decimal::ONE);
                    applied_rules.push(AppliedRule {
                        name: format!(
                            "Demand-based ({}% occupancy)",
                            round_money(occupancy, 0).normalize()
                        ),
                        multiplier,
                        kind: RuleKind::Dynamic,
                    });
                }
            }
        }

        let total_adjustments = seasonal_adjustment + dynamic_adjustment + weekend_adjustment;
        let final_price = round_money(
            (base_price + total_adjustments).max(Decimal::ZERO),
            2,
        );

        Ok(PriceCalculationResult {
            base_price: round_money(base_price, 2),
            final_price,
            applied_rules,
            breakdown: PriceBreakdown {
                base_price: round_money(base_price, 2),
                seasonal_adjustment: round_money(seasonal_adjustment, 2),
                dynamic_adjustment: round_money(dynamic_adjustment, 2),
                weekend_adjustment: round_money(weekend_adjustment, 2),
                total_adjustments: round_money(total_adjustments, 2),
            },
        })
    }
}
