pub mod salary_calculator;
pub mod salary_service;

pub use salary_service::SalaryService;
