pub mod a001_employee;
pub mod a002_employee_registration;
pub mod common;
