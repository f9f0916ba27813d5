pub mod salaries;
pub mod salary_settings;
pub mod shared;
