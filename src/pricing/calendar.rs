//! Day-by-day pricing calendar.
//!
//! Repeated-call wrapper over [`PricingEngine::calculate_price`]: one entry
//! per calendar day, ascending. Each day is an independent pure computation
//! over the same read-only state, so the sequential awaits are a latency
//! choice, not a correctness requirement.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppError;

use super::engine::PricingEngine;
use super::models::ItemType;
use super::responses::PriceCalculationResult;

/// Hard cap on calendar size; one year plus the leap day.
const MAX_CALENDAR_DAYS: i64 = 366;

impl PricingEngine {
    /// Price every day from `start_date` to `end_date` inclusive.
    ///
    /// Returns a map keyed by calendar date, ascending. `as_of` pins "now"
    /// for the lead-time bands across all days of the calendar.
    pub async fn pricing_calendar(
        &self,
        item_type: ItemType,
        item_id: Uuid,
        base_price: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
        as_of: Option<DateTime<Utc>>,
    ) -> Result<BTreeMap<NaiveDate, PriceCalculationResult>, AppError> {
        if end_date < start_date {
            return Err(AppError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
        let span_days = (end_date - start_date).num_days() + 1;
        if span_days > MAX_CALENDAR_DAYS {
            return Err(AppError::Validation(format!(
                "calendar range is limited to {} days",
                MAX_CALENDAR_DAYS
            )));
        }

        let mut calendar = BTreeMap::new();
        for date in start_date.iter_days().take(span_days as usize) {
            let check_in = self.resort_midnight(date);
            let result = self
                .calculate_price(item_type, item_id, base_price, check_in, None, as_of)
                .await?;
            calendar.insert(date, result);
        }

        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::engine::tests::{engine, seasonal_rule, FakeRuleStore};
    use crate::pricing::models::WeekendPricingConfig;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_calendar_five_consecutive_days() {
        let engine = engine(FakeRuleStore::empty(), None);
        let calendar = engine
            .pricing_calendar(
                ItemType::Chalets,
                Uuid::new_v4(),
                dec!(100),
                date(2026, 9, 1),
                date(2026, 9, 5),
                as_of(),
            )
            .await
            .unwrap();

        assert_eq!(calendar.len(), 5);
        let days: Vec<NaiveDate> = calendar.keys().copied().collect();
        assert_eq!(
            days,
            vec![
                date(2026, 9, 1),
                date(2026, 9, 2),
                date(2026, 9, 3),
                date(2026, 9, 4),
                date(2026, 9, 5),
            ]
        );
    }

    #[tokio::test]
    async fn test_calendar_single_day() {
        let engine = engine(FakeRuleStore::empty(), None);
        let calendar = engine
            .pricing_calendar(
                ItemType::Pool,
                Uuid::new_v4(),
                dec!(25),
                date(2026, 9, 1),
                date(2026, 9, 1),
                as_of(),
            )
            .await
            .unwrap();
        assert_eq!(calendar.len(), 1);
    }

    #[tokio::test]
    async fn test_calendar_reflects_per_day_rules() {
        let store = FakeRuleStore {
            rules: vec![seasonal_rule(
                "September Special",
                "09-03",
                "09-04",
                dec!(1.5),
                vec!["chalets"],
            )],
            dynamic: None,
            weekend: Some(WeekendPricingConfig {
                enabled: true,
                multiplier: dec!(1.2),
            }),
        };
        let engine = engine(store, None);
        let calendar = engine
            .pricing_calendar(
                ItemType::Chalets,
                Uuid::new_v4(),
                dec!(100),
                date(2026, 9, 1),
                date(2026, 9, 5),
                as_of(),
            )
            .await
            .unwrap();

        // Tue/Wed: base only
        assert_eq!(calendar[&date(2026, 9, 1)].final_price, dec!(100));
        assert_eq!(calendar[&date(2026, 9, 2)].final_price, dec!(100));
        // Thu: seasonal rule only
        assert_eq!(calendar[&date(2026, 9, 3)].final_price, dec!(150));
        // Fri: seasonal + weekend
        assert_eq!(calendar[&date(2026, 9, 4)].final_price, dec!(170));
        // Sat: weekend only
        assert_eq!(calendar[&date(2026, 9, 5)].final_price, dec!(120));
    }

    #[tokio::test]
    async fn test_calendar_rejects_inverted_range() {
        let engine = engine(FakeRuleStore::empty(), None);
        let err = engine
            .pricing_calendar(
                ItemType::Chalets,
                Uuid::new_v4(),
                dec!(100),
                date(2026, 9, 5),
                date(2026, 9, 1),
                as_of(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_calendar_rejects_oversized_range() {
        let engine = engine(FakeRuleStore::empty(), None);
        let err = engine
            .pricing_calendar(
                ItemType::Chalets,
                Uuid::new_v4(),
                dec!(100),
                date(2026, 1, 1),
                date(2027, 6, 1),
                as_of(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
