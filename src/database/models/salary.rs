use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One salary period, keyed as `"YYYY-MM"`. Month boundaries are the UTC
/// calendar month: `[first instant of the month, first instant of the next)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&month) {
            return Err(format!("Invalid month: {}", month));
        }
        if !(1970..=9999).contains(&year) {
            return Err(format!("Invalid year: {}", year));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Half-open UTC window covering this calendar month.
    pub fn utc_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };

        (
            month_start(self.year, self.month),
            month_start(next_year, next_month),
        )
    }
}

// Total for any (year, month) admitted by YearMonth::new.
fn month_start(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("validated year-month")
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid year-month: {}", s))?;
        if year.len() != 4 || month.len() != 2 {
            return Err(format!("Invalid year-month: {}", s));
        }

        let year: i32 = year
            .parse()
            .map_err(|_| format!("Invalid year-month: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("Invalid year-month: {}", s))?;

        YearMonth::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl sqlx::Type<sqlx::Postgres> for YearMonth {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for YearMonth {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        let s = self.to_string();
        <String as sqlx::Encode<'q, sqlx::Postgres>>::encode_by_ref(&s, buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for YearMonth {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        s.parse::<YearMonth>().map_err(|e| e.into())
    }
}

/// Scalar activity aggregates for one nurse over one salary period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityTotals {
    pub total_distance_km: f64,
    pub total_minutes: i64,
    pub total_vital_count: i64,
}

impl ActivityTotals {
    pub fn zero() -> Self {
        Self {
            total_distance_km: 0.0,
            total_minutes: 0,
            total_vital_count: 0,
        }
    }
}

/// Pay-rate parameters in effect at calculation time: yen per kilometer, yen
/// per worked hour, yen per vital-sign recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub distance_rate: f64,
    pub time_rate: f64,
    pub vital_rate: f64,
}

/// Audit record of a single calculation, persisted verbatim alongside the
/// salary row so later rate changes never alter a saved breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub year_month: YearMonth,
    pub rates: RateTable,
    pub aggregates: ActivityTotals,
    pub distance_pay: i64,
    pub time_pay: i64,
    pub vital_pay: i64,
    pub total_amount: i64,
}

/// Transient calculation result, returned by the preview endpoint and fed to
/// the upsert when persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    pub user_id: Uuid,
    pub nurse_id: String,
    pub year_month: YearMonth,
    pub total_amount: i64,
    pub distance_pay: i64,
    pub time_pay: i64,
    pub vital_pay: i64,
    pub total_distance_km: f64,
    pub total_minutes: i64,
    pub total_vital_count: i64,
    pub calculation_details: CalculationDetails,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NurseSalary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nurse_id: String,
    pub year_month: YearMonth,
    pub total_amount: i64,
    pub distance_pay: i64,
    pub time_pay: i64,
    pub vital_pay: i64,
    pub total_distance_km: f64,
    pub total_minutes: i64,
    pub total_vital_count: i64,
    pub calculation_details: sqlx::types::Json<CalculationDetails>,
    pub calculated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Direct-insert input for administrative corrections. Unlike the upsert path
/// this fails on a duplicate `(nurse_id, year_month)` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseSalaryInput {
    pub user_id: Uuid,
    pub nurse_id: String,
    pub year_month: YearMonth,
    pub total_amount: i64,
    pub distance_pay: i64,
    pub time_pay: i64,
    pub vital_pay: i64,
    pub total_distance_km: f64,
    pub total_minutes: i64,
    pub total_vital_count: i64,
    pub calculation_details: CalculationDetails,
}

/// Explicit patch for administrative updates; every updatable column is
/// enumerated here, `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseSalaryPatch {
    pub total_amount: Option<i64>,
    pub distance_pay: Option<i64>,
    pub time_pay: Option<i64>,
    pub vital_pay: Option<i64>,
    pub total_distance_km: Option<f64>,
    pub total_minutes: Option<i64>,
    pub total_vital_count: Option<i64>,
    pub calculation_details: Option<CalculationDetails>,
}

/// List filters for `GET /salaries`; all optional, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryQuery {
    pub user_id: Option<Uuid>,
    pub nurse_id: Option<String>,
    pub year_month: Option<YearMonth>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn year_month_parses_and_formats() {
        let ym: YearMonth = "2025-05".parse().unwrap();
        assert_eq!(ym.year(), 2025);
        assert_eq!(ym.month(), 5);
        assert_eq!(ym.to_string(), "2025-05");
    }

    #[test]
    fn year_month_rejects_malformed_keys() {
        for bad in ["2025", "2025-13", "2025-00", "25-05", "2025-5", "2025/05", "abcd-ef"] {
            assert!(bad.parse::<YearMonth>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn utc_range_is_half_open_calendar_month() {
        let ym: YearMonth = "2025-05".parse().unwrap();
        let (start, end) = ym.utc_range();

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn utc_range_rolls_over_december() {
        let ym: YearMonth = "2025-12".parse().unwrap();
        let (start, end) = ym.utc_range();

        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn year_month_serde_uses_the_string_form() {
        let ym: YearMonth = "2025-05".parse().unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, "\"2025-05\"");

        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }

    #[test]
    fn calculation_details_round_trip_losslessly() {
        let details = CalculationDetails {
            year_month: "2025-05".parse().unwrap(),
            rates: RateTable {
                distance_rate: 150.0,
                time_rate: 1200.0,
                vital_rate: 50.0,
            },
            aggregates: ActivityTotals {
                total_distance_km: 21.0,
                total_minutes: 480,
                total_vital_count: 3,
            },
            distance_pay: 3150,
            time_pay: 9600,
            vital_pay: 150,
            total_amount: 12900,
        };

        let json = serde_json::to_string(&details).unwrap();
        let back: CalculationDetails = serde_json::from_str(&json).unwrap();
        assert_eq!(back, details);
    }
}
