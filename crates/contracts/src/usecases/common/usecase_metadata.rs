/// Identification of a use case for logs and page titles
pub trait UseCaseMetadata {
    /// Index, e.g. "u501"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "employee_wizard"
    fn usecase_name() -> &'static str;

    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// "u501_employee_wizard"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_employee_wizard::EmployeeWizard;

    #[test]
    fn test_full_name() {
        assert_eq!(EmployeeWizard::full_name(), "u501_employee_wizard");
    }
}
