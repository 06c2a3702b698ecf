//! Domain model of the employee registration module: form state, the data
//! transformer, the validation schema and the wizard state machine.
//!
//! Nothing here touches the browser; the frontend crate drives these types
//! from signals and performs the HTTP calls.

pub mod domain;
pub mod shared;
pub mod usecases;
