use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::YearMonth;

/// Read-only aggregations over a nurse's raw activity records. All three
/// queries filter on the same half-open UTC month window and treat missing
/// values as zero contribution; an unknown nurse simply aggregates to zero.
#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Total recorded travel for the month, converted from meters to km.
    pub async fn total_distance_km(&self, nurse_id: &str, year_month: YearMonth) -> Result<f64> {
        let (start, end) = year_month.utc_range();

        let total_m: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(distance_m), 0)::BIGINT
            FROM shift_location_records
            WHERE nurse_id = $1 AND date_time >= $2 AND date_time < $3
            "#,
        )
        .bind(nurse_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total_m as f64 / 1000.0)
    }

    /// Total worked minutes for the month.
    pub async fn total_minutes(&self, nurse_id: &str, year_month: YearMonth) -> Result<i64> {
        let (start, end) = year_month.utc_range();

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(required_time), 0)::BIGINT
            FROM shift_records
            WHERE nurse_id = $1 AND start_datetime >= $2 AND start_datetime < $3
            "#,
        )
        .bind(nurse_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Count of vital-sign recordings the nurse's user account created in the
    /// month. Attribution is via `created_by`, not shift/resident linkage.
    pub async fn total_vital_count(&self, user_id: Uuid, year_month: YearMonth) -> Result<i64> {
        let (start, end) = year_month.utc_range();

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM vital_records
            WHERE created_by = $1 AND measured_at >= $2 AND measured_at < $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
