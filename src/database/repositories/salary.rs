use anyhow::Result;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    NurseSalary, NurseSalaryInput, NurseSalaryPatch, SalaryBreakdown, SalaryQuery, YearMonth,
};

const SALARY_COLUMNS: &str = "id, user_id, nurse_id, year_month, total_amount, distance_pay, \
     time_pay, vital_pay, total_distance_km, total_minutes, total_vital_count, \
     calculation_details, calculated_at, created_at, updated_at";

/// Owns the `nurse_salaries` table: at most one row per (nurse_id, year_month),
/// enforced by the unique index and written through a single ON CONFLICT path.
#[derive(Clone)]
pub struct SalaryRepository {
    pool: PgPool,
}

impl SalaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert-or-overwrite for the calculate-and-save flow. Concurrent calls
    /// for the same (nurse, month) resolve at the storage layer as
    /// last-write-wins; `created_at` survives, everything else is replaced.
    pub async fn upsert(&self, breakdown: &SalaryBreakdown) -> Result<NurseSalary> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO nurse_salaries (user_id, nurse_id, year_month, total_amount, distance_pay,
                time_pay, vital_pay, total_distance_km, total_minutes, total_vital_count,
                calculation_details, calculated_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            ON CONFLICT (nurse_id, year_month) DO UPDATE
            SET user_id = EXCLUDED.user_id,
                total_amount = EXCLUDED.total_amount,
                distance_pay = EXCLUDED.distance_pay,
                time_pay = EXCLUDED.time_pay,
                vital_pay = EXCLUDED.vital_pay,
                total_distance_km = EXCLUDED.total_distance_km,
                total_minutes = EXCLUDED.total_minutes,
                total_vital_count = EXCLUDED.total_vital_count,
                calculation_details = EXCLUDED.calculation_details,
                calculated_at = EXCLUDED.calculated_at,
                updated_at = EXCLUDED.updated_at
            RETURNING {SALARY_COLUMNS}
            "#
        );

        let salary = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(breakdown.user_id)
            .bind(&breakdown.nurse_id)
            .bind(breakdown.year_month)
            .bind(breakdown.total_amount)
            .bind(breakdown.distance_pay)
            .bind(breakdown.time_pay)
            .bind(breakdown.vital_pay)
            .bind(breakdown.total_distance_km)
            .bind(breakdown.total_minutes)
            .bind(breakdown.total_vital_count)
            .bind(Json(&breakdown.calculation_details))
            .bind(breakdown.calculated_at)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(salary)
    }

    /// Plain insert for administrative corrections; a duplicate
    /// (nurse_id, year_month) surfaces as a unique violation.
    pub async fn insert(&self, input: NurseSalaryInput) -> Result<NurseSalary> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO nurse_salaries (user_id, nurse_id, year_month, total_amount, distance_pay,
                time_pay, vital_pay, total_distance_km, total_minutes, total_vital_count,
                calculation_details, calculated_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING {SALARY_COLUMNS}
            "#
        );

        let salary = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(input.user_id)
            .bind(&input.nurse_id)
            .bind(input.year_month)
            .bind(input.total_amount)
            .bind(input.distance_pay)
            .bind(input.time_pay)
            .bind(input.vital_pay)
            .bind(input.total_distance_km)
            .bind(input.total_minutes)
            .bind(input.total_vital_count)
            .bind(Json(&input.calculation_details))
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;

        Ok(salary)
    }

    pub async fn find_by_nurse_month(
        &self,
        nurse_id: &str,
        year_month: YearMonth,
    ) -> Result<Option<NurseSalary>> {
        let sql = format!(
            "SELECT {SALARY_COLUMNS} FROM nurse_salaries WHERE nurse_id = $1 AND year_month = $2"
        );

        let salary = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(nurse_id)
            .bind(year_month)
            .fetch_optional(&self.pool)
            .await?;

        Ok(salary)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<NurseSalary>> {
        let sql = format!("SELECT {SALARY_COLUMNS} FROM nurse_salaries WHERE id = $1");

        let salary = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(salary)
    }

    pub async fn list(&self, query: SalaryQuery) -> Result<Vec<NurseSalary>> {
        let sql = format!(
            r#"
            SELECT {SALARY_COLUMNS}
            FROM nurse_salaries
            WHERE ($1::UUID IS NULL OR user_id = $1)
              AND ($2::TEXT IS NULL OR nurse_id = $2)
              AND ($3::TEXT IS NULL OR year_month = $3)
            ORDER BY year_month DESC, nurse_id
            "#
        );

        let salaries = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(query.user_id)
            .bind(query.nurse_id)
            .bind(query.year_month)
            .fetch_all(&self.pool)
            .await?;

        Ok(salaries)
    }

    /// Applies an explicit patch; absent fields keep their stored value.
    /// `total_amount` is taken from the patch as given, manual corrections are
    /// trusted to foot their own breakdown.
    pub async fn update(&self, id: Uuid, patch: NurseSalaryPatch) -> Result<Option<NurseSalary>> {
        let now = Utc::now();
        let sql = format!(
            r#"
            UPDATE nurse_salaries
            SET total_amount = COALESCE($1, total_amount),
                distance_pay = COALESCE($2, distance_pay),
                time_pay = COALESCE($3, time_pay),
                vital_pay = COALESCE($4, vital_pay),
                total_distance_km = COALESCE($5, total_distance_km),
                total_minutes = COALESCE($6, total_minutes),
                total_vital_count = COALESCE($7, total_vital_count),
                calculation_details = COALESCE($8, calculation_details),
                updated_at = $9
            WHERE id = $10
            RETURNING {SALARY_COLUMNS}
            "#
        );

        let salary = sqlx::query_as::<_, NurseSalary>(&sql)
            .bind(patch.total_amount)
            .bind(patch.distance_pay)
            .bind(patch.time_pay)
            .bind(patch.vital_pay)
            .bind(patch.total_distance_km)
            .bind(patch.total_minutes)
            .bind(patch.total_vital_count)
            .bind(patch.calculation_details.as_ref().map(Json))
            .bind(now)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(salary)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM nurse_salaries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
