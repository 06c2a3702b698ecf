pub mod config;
pub mod dates;
pub mod formatters;
pub mod validation;
