pub mod activity;
pub mod salary;
pub mod salary_setting;
pub mod user;

pub use activity::ActivityRepository;
pub use salary::SalaryRepository;
pub use salary_setting::SalarySettingRepository;
pub use user::UserRepository;
