use super::file_store::FileStore;
use crate::shared::api_utils::{get_json, post_multipart, unwrap_data, ApiError};
use contracts::domain::a002_employee_registration::{resolve_submission_payload, SubmissionPayload};
use contracts::domain::a001_employee::WirePayload;
use contracts::usecases::u501_employee_wizard::{RecordSource, SubmitTarget};
use serde_json::Value;

/// Fetch the record a wizard session was opened on.
///
/// Pending registrations whose payload does not embed the employee data are
/// followed to `GET /employees/{submittable id}`.
pub async fn fetch_record(source: RecordSource) -> Result<Value, ApiError> {
    let Some(path) = source.fetch_path() else {
        return Err(ApiError::Request("no record to load".to_string()));
    };
    let body = get_json(&path, None).await?;

    match source {
        RecordSource::Submission(id) => match resolve_submission_payload(&body) {
            SubmissionPayload::Embedded(record) => Ok(record),
            SubmissionPayload::Submittable(employee_id) => {
                log::debug!(
                    "Submission {} has no embedded payload, loading employee {}",
                    id,
                    employee_id
                );
                let employee = get_json(&format!("/employees/{}", employee_id), None).await?;
                Ok(unwrap_data(employee))
            }
        },
        _ => Ok(unwrap_data(body)),
    }
}

/// Send a wizard payload to its endpoint.
pub async fn submit(
    target: SubmitTarget,
    payload: &WirePayload,
    files: FileStore,
) -> Result<Value, ApiError> {
    post_multipart(&target.path(), payload, move |key| files.get(key)).await
}
