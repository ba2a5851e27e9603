//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use super::models::DynamicPricingConfig;

/// Round to specified decimal places, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use resort_pricing::pricing::round_money;
///
/// assert_eq!(round_money(dec!(11.3663), 2), dec!(11.37));
/// assert_eq!(round_money(dec!(2.345), 2), dec!(2.35));
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Parse a year-independent `MM-DD` season date into a comparable code
/// (`month * 100 + day`).
///
/// Returns `None` for anything malformed. Rule lookup treats a malformed
/// stored date as "never matches" rather than an error, so a bad row can
/// never take calculation down; admin writes reject malformed dates up
/// front (see [`validate_season_date`]).
pub fn parse_season_code(s: &str) -> Option<u32> {
    let (month, day) = s.split_once('-')?;
    if month.len() != 2 || day.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(month * 100 + day)
}

/// Validate an `MM-DD` season date for rule writes.
pub fn validate_season_date(s: &str) -> Result<(), String> {
    match parse_season_code(s) {
        Some(_) => Ok(()),
        None => Err(format!("'{}' is not a valid MM-DD season date", s)),
    }
}

/// Season code for a concrete calendar date.
pub fn date_code(date: NaiveDate) -> u32 {
    date.month() * 100 + date.day()
}

/// Test whether a date code falls inside a recurring `MM-DD` range.
///
/// When the start sorts after the end the season wraps across the year
/// boundary (e.g. 12-15 through 01-05) and the test becomes
/// `code >= start || code <= end`.
pub fn in_season_range(code: u32, start_date: &str, end_date: &str) -> bool {
    let (Some(start), Some(end)) = (
        parse_season_code(start_date),
        parse_season_code(end_date),
    ) else {
        return false;
    };

    if start <= end {
        start <= code && code <= end
    } else {
        code >= start || code <= end
    }
}

/// Weekend surcharge applies to Friday, Saturday and Sunday check-ins.
pub fn is_weekend_checkin(day: Weekday) -> bool {
    matches!(day, Weekday::Fri | Weekday::Sat | Weekday::Sun)
}

/// Whole days until check-in, rounded up.
///
/// A check-in later today counts as 0 days out; any positive fraction of a
/// day rounds up to the next whole day.
pub fn days_until_checkin(check_in: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    const DAY_SECS: i64 = 86_400;
    let secs = (check_in - now).num_seconds();
    secs.div_euclid(DAY_SECS) + i64::from(secs.rem_euclid(DAY_SECS) > 0)
}

/// Lead-time pricing band for a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadTimeBand {
    EarlyBird,
    LastMinute,
}

/// Classify a booking's lead time against the configured bands.
///
/// Early bird wins when both thresholds could apply; a booking between the
/// two thresholds is in neither band.
pub fn lead_time_band(days_until: i64, config: &DynamicPricingConfig) -> Option<LeadTimeBand> {
    if days_until >= config.advance_booking_days {
        Some(LeadTimeBand::EarlyBird)
    } else if days_until <= config.last_minute_days {
        Some(LeadTimeBand::LastMinute)
    } else {
        None
    }
}

/// Demand multiplier for an occupancy percentage.
///
/// Clamps to the configured multipliers at or beyond the thresholds and
/// interpolates linearly in between.
pub fn occupancy_multiplier(occupancy: Decimal, config: &DynamicPricingConfig) -> Decimal {
    if occupancy >= config.max_occupancy_threshold {
        config.max_price_multiplier
    } else if occupancy <= config.min_occupancy_threshold {
        config.min_price_multiplier
    } else {
        let position = (occupancy - config.min_occupancy_threshold)
            / (config.max_occupancy_threshold - config.min_occupancy_threshold);
        config.min_price_multiplier
            + position * (config.max_price_multiplier - config.min_price_multiplier)
    }
}
