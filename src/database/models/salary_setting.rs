use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Well-known rate keys the calculator reads. Administrators may add further
/// settings; these three must exist for a calculation to succeed.
pub const DISTANCE_RATE_KEY: &str = "distance_rate";
pub const TIME_RATE_KEY: &str = "time_rate";
pub const VITAL_RATE_KEY: &str = "vital_rate";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalarySetting {
    pub id: Uuid,
    pub key: String,
    pub value: BigDecimal, // NUMERIC(12,2)
    pub description: Option<String>,
    pub updated_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalarySettingInput {
    pub key: String,
    pub value: BigDecimal,
    pub description: Option<String>,
    pub updated_by: Option<Uuid>,
}
