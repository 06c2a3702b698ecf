use crate::shared::api_utils::{get_json, post_empty, ApiError};
use contracts::domain::a002_employee_registration::{
    RegistrationListQuery, RegistrationPage, SubmissionId,
};

const LIST_PATH: &str = "/me/employee-registrations";

/// Workflow transitions a row offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Resubmit,
    Cancel,
}

impl RowAction {
    pub fn path(&self, id: SubmissionId) -> String {
        match self {
            Self::Resubmit => format!("/form-submissions/{}/resubmit", id),
            Self::Cancel => format!("/form-submissions/{}/cancel", id),
        }
    }

    pub fn confirm_text(&self) -> &'static str {
        match self {
            Self::Resubmit => "Resubmit this registration for approval?",
            Self::Cancel => "Cancel this registration? A cancelled registration cannot be restored.",
        }
    }
}

pub fn query_string(query: &RegistrationListQuery) -> Result<String, ApiError> {
    serde_qs::to_string(query).map_err(|e| ApiError::Request(e.to_string()))
}

pub async fn fetch_page(query: &RegistrationListQuery) -> Result<RegistrationPage, ApiError> {
    let qs = query_string(query)?;
    let body = get_json(LIST_PATH, Some(&qs)).await?;
    Ok(RegistrationPage::from_json(&body, query.approval_status))
}

pub async fn run_action(action: RowAction, id: SubmissionId) -> Result<(), ApiError> {
    post_empty(&action.path(id)).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_employee_registration::RegistrationBucket;

    #[test]
    fn test_query_string() {
        let query = RegistrationListQuery::new(RegistrationBucket::ForApproval, 2, 10)
            .with_search("ana");
        assert_eq!(
            query_string(&query).unwrap(),
            "pagination=true&page=2&per_page=10&status=pending&approval_status=for_approval&search=ana"
        );
    }

    #[test]
    fn test_action_paths() {
        assert_eq!(
            RowAction::Resubmit.path(SubmissionId(5)),
            "/form-submissions/5/resubmit"
        );
        assert_eq!(RowAction::Cancel.path(SubmissionId(5)), "/form-submissions/5/cancel");
    }
}
