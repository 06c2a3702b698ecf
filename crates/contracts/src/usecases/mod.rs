pub mod common;
pub mod u501_employee_wizard;
