//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

/// Kind of adjustment an applied rule describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Seasonal,
    Weekend,
    EarlyBird,
    LastMinute,
    Dynamic,
}

/// Descriptive record of an adjustment that fired.
///
/// Purely informational for display and audit; the final price is computed
/// from the breakdown sums, never re-derived from these entries.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedRule {
    pub name: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    #[serde(rename = "type")]
    pub kind: RuleKind,
}

/// Per-component adjustment breakdown, each figure rounded to 2 decimals
/// independently for display.
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub seasonal_adjustment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub dynamic_adjustment: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weekend_adjustment: Decimal,
    /// Rounded from the unrounded component sums, so it can differ from the
    /// sum of the rounded components by a cent.
    #[serde(with = "rust_decimal::serde::str")]
    pub total_adjustments: Decimal,
}

/// Full result of a price calculation
#[derive(Debug, Clone, Serialize)]
pub struct PriceCalculationResult {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    pub applied_rules: Vec<AppliedRule>,
    pub breakdown: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_applied_rule_json_shape() {
        let rule = AppliedRule {
            name: "Weekend Pricing".to_string(),
            multiplier: dec!(1.2),
            kind: RuleKind::Weekend,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["name"], "Weekend Pricing");
        assert_eq!(json["multiplier"], "1.2");
        assert_eq!(json["type"], "weekend");
    }

    #[test]
    fn test_rule_kind_snake_case() {
        assert_eq!(
            serde_json::to_string(&RuleKind::EarlyBird).unwrap(),
            "\"early_bird\""
        );
        assert_eq!(
            serde_json::to_string(&RuleKind::LastMinute).unwrap(),
            "\"last_minute\""
        );
    }

    #[test]
    fn test_money_serialized_as_string() {
        let breakdown = PriceBreakdown {
            base_price: dec!(100),
            seasonal_adjustment: dec!(10.00),
            dynamic_adjustment: dec!(-5.00),
            weekend_adjustment: dec!(0),
            total_adjustments: dec!(5.00),
        };
        let json = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(json["base_price"], "100");
        assert_eq!(json["dynamic_adjustment"], "-5.00");
    }
}
