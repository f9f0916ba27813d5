use bigdecimal::ToPrimitive;
use chrono::Utc;

use crate::database::models::salary_setting::{DISTANCE_RATE_KEY, TIME_RATE_KEY, VITAL_RATE_KEY};
use crate::database::models::{
    ActivityTotals, CalculationDetails, NurseSalary, RateTable, SalaryBreakdown, YearMonth,
};
use crate::database::repositories::{
    ActivityRepository, SalaryRepository, SalarySettingRepository, UserRepository,
};
use crate::error::AppError;
use crate::services::salary_calculator;

/// Orchestrates one salary calculation: resolve the nurse, aggregate the
/// month's activity, read the current rates, run the pure calculator, and
/// (for the persisting variant) upsert as the final step. The rate store is
/// injected here rather than read from process-wide state so tests and
/// callers control exactly which configuration a calculation sees.
#[derive(Clone)]
pub struct SalaryService {
    user_repository: UserRepository,
    setting_repository: SalarySettingRepository,
    activity_repository: ActivityRepository,
    salary_repository: SalaryRepository,
}

impl SalaryService {
    pub fn new(
        user_repository: UserRepository,
        setting_repository: SalarySettingRepository,
        activity_repository: ActivityRepository,
        salary_repository: SalaryRepository,
    ) -> Self {
        Self {
            user_repository,
            setting_repository,
            activity_repository,
            salary_repository,
        }
    }

    /// Transient calculation for preview; nothing is written.
    pub async fn calculate(
        &self,
        nurse_id: &str,
        year_month: YearMonth,
    ) -> Result<SalaryBreakdown, AppError> {
        let user = self
            .user_repository
            .find_by_nurse_id(nurse_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Nurse not found: {}", nurse_id)))?;

        // The three aggregates touch disjoint tables; read them concurrently.
        let (total_distance_km, total_minutes, total_vital_count) = futures::try_join!(
            self.activity_repository.total_distance_km(nurse_id, year_month),
            self.activity_repository.total_minutes(nurse_id, year_month),
            self.activity_repository.total_vital_count(user.id, year_month),
        )?;

        let totals = ActivityTotals {
            total_distance_km,
            total_minutes,
            total_vital_count,
        };

        // Rates are read fresh on every calculation so administrative changes
        // apply immediately.
        let rates = self.load_rates().await?;

        let pay = salary_calculator::calculate(&totals, &rates);

        let details = CalculationDetails {
            year_month,
            rates,
            aggregates: totals,
            distance_pay: pay.distance_pay,
            time_pay: pay.time_pay,
            vital_pay: pay.vital_pay,
            total_amount: pay.total_amount,
        };

        Ok(SalaryBreakdown {
            user_id: user.id,
            nurse_id: nurse_id.to_string(),
            year_month,
            total_amount: pay.total_amount,
            distance_pay: pay.distance_pay,
            time_pay: pay.time_pay,
            vital_pay: pay.vital_pay,
            total_distance_km: totals.total_distance_km,
            total_minutes: totals.total_minutes,
            total_vital_count: totals.total_vital_count,
            calculation_details: details,
            calculated_at: Utc::now(),
        })
    }

    /// Calculates and persists. The upsert runs strictly after every read has
    /// completed, so a partially-read month is never written, and the unique
    /// (nurse_id, year_month) index makes concurrent calls last-write-wins.
    pub async fn calculate_and_save(
        &self,
        nurse_id: &str,
        year_month: YearMonth,
    ) -> Result<NurseSalary, AppError> {
        let breakdown = self.calculate(nurse_id, year_month).await?;
        let salary = self.salary_repository.upsert(&breakdown).await?;

        Ok(salary)
    }

    async fn load_rates(&self) -> Result<RateTable, AppError> {
        let (distance_rate, time_rate, vital_rate) = futures::try_join!(
            self.load_rate(DISTANCE_RATE_KEY),
            self.load_rate(TIME_RATE_KEY),
            self.load_rate(VITAL_RATE_KEY),
        )?;

        Ok(RateTable {
            distance_rate,
            time_rate,
            vital_rate,
        })
    }

    async fn load_rate(&self, key: &str) -> Result<f64, AppError> {
        let setting = self
            .setting_repository
            .get(key)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Salary setting not found: {}", key)))?;

        setting.value.to_f64().ok_or_else(|| {
            AppError::internal_server_error_message(format!(
                "Salary setting {} is not representable as a number",
                key
            ))
        })
    }
}
