use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use careops_be::database::init_database;
use careops_be::database::models::{
    ActivityTotals, CalculationDetails, RateTable, SalaryBreakdown, YearMonth,
};

/// Connects to the test database named by TEST_DATABASE_URL (or DATABASE_URL)
/// and runs migrations. Returns None when neither is set so the DB-backed
/// tests skip on machines without a Postgres instance.
pub async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;

    match init_database(&url).await {
        Ok(pool) => Some(pool),
        Err(e) => panic!("Failed to initialize test database: {}", e),
    }
}

/// Inserts a nurse user with a unique nurse_id so tests never collide across
/// runs. Returns (user_id, nurse_id).
pub async fn create_test_nurse(pool: &PgPool) -> (Uuid, String) {
    let nurse_id = format!("N-{}", Uuid::new_v4());

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, name, role, nurse_id)
        VALUES ($1, $2, 'nurse', $3)
        RETURNING id
        "#,
    )
    .bind(format!("{}@example.com", nurse_id))
    .bind("Test Nurse")
    .bind(&nurse_id)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test nurse");

    (user_id, nurse_id)
}

pub async fn add_location_record(
    pool: &PgPool,
    nurse_id: &str,
    date_time: DateTime<Utc>,
    distance_m: Option<i64>,
) {
    sqlx::query(
        r#"
        INSERT INTO shift_location_records (facility_id, nurse_id, date_time, distance_m, shift_period)
        VALUES ($1, $2, $3, $4, 'day')
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(nurse_id)
    .bind(date_time)
    .bind(distance_m)
    .execute(pool)
    .await
    .expect("Failed to insert location record");
}

pub async fn add_shift_record(
    pool: &PgPool,
    nurse_id: &str,
    start_datetime: DateTime<Utc>,
    required_time: Option<i32>,
) {
    sqlx::query(
        r#"
        INSERT INTO shift_records (nurse_id, facility_id, start_datetime, required_time)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(nurse_id)
    .bind(Uuid::new_v4())
    .bind(start_datetime)
    .bind(required_time)
    .execute(pool)
    .await
    .expect("Failed to insert shift record");
}

pub async fn add_vital_record(pool: &PgPool, created_by: Uuid, measured_at: DateTime<Utc>) {
    sqlx::query(
        r#"
        INSERT INTO vital_records (resident_id, measured_at, created_by)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(measured_at)
    .bind(created_by)
    .execute(pool)
    .await
    .expect("Failed to insert vital record");
}

/// A breakdown with the worked-example figures, ready to upsert.
pub fn example_breakdown(user_id: Uuid, nurse_id: &str, year_month: YearMonth) -> SalaryBreakdown {
    let rates = RateTable {
        distance_rate: 150.0,
        time_rate: 1200.0,
        vital_rate: 50.0,
    };
    let aggregates = ActivityTotals {
        total_distance_km: 21.0,
        total_minutes: 480,
        total_vital_count: 3,
    };

    SalaryBreakdown {
        user_id,
        nurse_id: nurse_id.to_string(),
        year_month,
        total_amount: 12900,
        distance_pay: 3150,
        time_pay: 9600,
        vital_pay: 150,
        total_distance_km: aggregates.total_distance_km,
        total_minutes: aggregates.total_minutes,
        total_vital_count: aggregates.total_vital_count,
        calculation_details: CalculationDetails {
            year_month,
            rates,
            aggregates,
            distance_pay: 3150,
            time_pay: 9600,
            vital_pay: 150,
            total_amount: 12900,
        },
        calculated_at: Utc::now(),
    }
}
