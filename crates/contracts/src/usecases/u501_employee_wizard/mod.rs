pub mod errors;
pub mod events;
pub mod state;

pub use errors::SubmissionError;
pub use events::{FieldEdit, RecordSource, SubmitTarget, WizardAction, WizardEffect};
pub use state::{WizardPhase, WizardState};

use crate::usecases::common::UseCaseMetadata;

pub struct EmployeeWizard;

impl UseCaseMetadata for EmployeeWizard {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "employee_wizard"
    }

    fn display_name() -> &'static str {
        "Employee Registration"
    }

    fn description() -> &'static str {
        "Step-by-step creation, review and correction of employee registrations"
    }
}
