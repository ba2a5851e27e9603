//! Occupancy queries backing demand-based pricing.
//!
//! Occupancy is the percentage of a unit type's capacity booked for a given
//! date. Chalet occupancy is derived from bookings whose stay interval
//! contains the date; pool occupancy comes from a stored daily counter.
//! `None` means occupancy is unknown for that unit/date and the demand
//! adjustment is skipped, never treated as zero.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::error::AppError;

use super::engine::OccupancySource;
use super::models::ItemType;

/// Chalet occupancy for a date: booked distinct chalets over active chalets.
///
/// Counts bookings with status `confirmed` or `checked_in` whose
/// `[check_in_date, check_out_date)` interval contains the date.
pub async fn chalet_occupancy(pool: &PgPool, date: NaiveDate) -> Result<Option<Decimal>, AppError> {
    let (booked, total): (i64, i64) = sqlx::query_as(
        r#"
        SELECT
            (SELECT COUNT(DISTINCT b.chalet_id)
               FROM chalet_booking b
              WHERE b.status IN ('confirmed', 'checked_in')
                AND b.check_in_date <= $1
                AND b.check_out_date > $1) AS booked,
            (SELECT COUNT(*) FROM chalet WHERE is_active = true) AS total
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await?;

    if total <= 0 {
        return Ok(None);
    }
    Ok(Some(
        Decimal::from(booked) * Decimal::ONE_HUNDRED / Decimal::from(total),
    ))
}

/// Pool occupancy for a date from the stored daily capacity counter.
pub async fn pool_occupancy(pool: &PgPool, date: NaiveDate) -> Result<Option<Decimal>, AppError> {
    let row: Option<(i32, i32)> = sqlx::query_as(
        r#"
        SELECT tickets_sold, capacity
        FROM pool_daily_occupancy
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;

    match row {
        Some((sold, capacity)) if capacity > 0 => Ok(Some(
            Decimal::from(sold) * Decimal::ONE_HUNDRED / Decimal::from(capacity),
        )),
        _ => Ok(None),
    }
}

/// Postgres occupancy source
#[derive(Clone)]
pub struct PgOccupancySource {
    pool: PgPool,
}

impl PgOccupancySource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OccupancySource for PgOccupancySource {
    async fn occupancy_percentage(
        &self,
        item_type: ItemType,
        date: NaiveDate,
    ) -> Result<Option<Decimal>, AppError> {
        match item_type {
            ItemType::Chalets => chalet_occupancy(&self.pool, date).await,
            ItemType::Pool => pool_occupancy(&self.pool, date).await,
            // No occupancy notion for the restaurant
            ItemType::Restaurant => Ok(None),
        }
    }
}
