//! Employee wizard
//!
//! MVVM split:
//! - model.rs: API calls (record fetch, multipart submit)
//! - view_model.rs: owns the wizard state and runs its effects
//! - view.rs: modal shell, stepper, footer
//! - tabs/: one component per step
//! - file_store.rs: picked browser files, kept outside the reactive state

mod file_store;
mod model;
mod tabs;
mod view;
mod view_model;

pub use file_store::FileStore;
pub use view::EmployeeWizard;
pub use view_model::{EmployeeWizardVm, WizardHooks};
