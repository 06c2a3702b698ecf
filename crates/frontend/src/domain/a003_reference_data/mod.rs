//! Read-only lookup lists (banks, address chain, schedules, ...)

pub mod service;

pub use service::{use_reference_data, LookupState, ReferenceDataService};
