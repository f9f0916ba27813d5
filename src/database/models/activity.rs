use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded movement leg (e.g. facility-to-facility travel) from the GPS
/// attendance subsystem. Immutable once created; this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShiftLocationRecord {
    pub id: Uuid,
    pub facility_id: Uuid,
    pub nurse_id: String,
    pub date_time: DateTime<Utc>,
    /// Meters; None when the device reported no distance for the leg.
    pub distance_m: Option<i64>,
    pub duration_sec: Option<i64>,
    pub shift_period: Option<String>,
}

/// One scheduled/worked shift occurrence from the shift roster.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: Uuid,
    pub nurse_id: String,
    pub facility_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    /// Worked duration in minutes; None for shifts without a recorded duration.
    pub required_time: Option<i32>,
}

/// One vital-sign measurement event, attributed to the recording user.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VitalRecord {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub measured_at: DateTime<Utc>,
    pub created_by: Uuid,
}
