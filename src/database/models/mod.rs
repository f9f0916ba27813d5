pub mod activity;
pub mod salary;
pub mod salary_setting;
pub mod user;

pub use activity::{ShiftLocationRecord, ShiftRecord, VitalRecord};
pub use salary::{
    ActivityTotals, CalculationDetails, NurseSalary, NurseSalaryInput, NurseSalaryPatch,
    RateTable, SalaryBreakdown, SalaryQuery, YearMonth,
};
pub use salary_setting::{SalarySetting, SalarySettingInput};
pub use user::{User, UserRole};
