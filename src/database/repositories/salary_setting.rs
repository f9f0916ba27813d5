use anyhow::Result;
use bigdecimal::BigDecimal;
use chrono::Utc;
use sqlx::PgPool;

use crate::database::models::{SalarySetting, SalarySettingInput};
use crate::error::AppError;

/// Negative rates never reach the database; the CHECK (value >= 0) constraint
/// is the storage backstop. Surfaces as a 400 through the error taxonomy.
pub fn require_non_negative(key: &str, value: &BigDecimal) -> Result<(), AppError> {
    if *value < BigDecimal::from(0) {
        return Err(AppError::BadRequest(format!(
            "Setting value must be non-negative: {}",
            key
        )));
    }
    Ok(())
}

/// Rate configuration store. Reads always hit the database so an
/// administrative rate change is visible to the very next calculation; there
/// is deliberately no cache in front of this table.
#[derive(Clone)]
pub struct SalarySettingRepository {
    pool: PgPool,
}

impl SalarySettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<SalarySetting>> {
        let setting = sqlx::query_as::<_, SalarySetting>(
            r#"
            SELECT id, key, value, description, updated_by, created_at, updated_at
            FROM salary_settings
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(setting)
    }

    pub async fn get_all(&self) -> Result<Vec<SalarySetting>> {
        let settings = sqlx::query_as::<_, SalarySetting>(
            r#"
            SELECT id, key, value, description, updated_by, created_at, updated_at
            FROM salary_settings
            ORDER BY key
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(settings)
    }

    /// Upserts a setting by key, rejecting negative values.
    pub async fn set(&self, input: SalarySettingInput) -> Result<SalarySetting> {
        require_non_negative(&input.key, &input.value)?;

        let now = Utc::now();
        let setting = sqlx::query_as::<_, SalarySetting>(
            r#"
            INSERT INTO salary_settings (key, value, description, updated_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (key) DO UPDATE
            SET value = EXCLUDED.value,
                description = COALESCE(EXCLUDED.description, salary_settings.description),
                updated_by = EXCLUDED.updated_by,
                updated_at = EXCLUDED.updated_at
            RETURNING id, key, value, description, updated_by, created_at, updated_at
            "#,
        )
        .bind(&input.key)
        .bind(&input.value)
        .bind(&input.description)
        .bind(input.updated_by)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(setting)
    }

    pub async fn delete(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM salary_settings WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
