use crate::domain::a001_employee::ValidationErrors;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a submission did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// Rejected locally by the schema; never reaches the backend
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Structured `{message, errors}` rejection from the backend
    #[error("backend rejected the submission: {message}")]
    Backend {
        message: String,
        field_errors: ValidationErrors,
    },

    /// Update requested without a record id
    #[error("cannot update a record without an identifier")]
    MissingIdentifier,

    /// Transport failure, 5xx or unreadable response
    #[error("request failed (status {status:?}): {detail}")]
    Network { status: Option<u16>, detail: String },
}

impl SubmissionError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            detail: detail.into(),
        }
    }

    /// Turn a non-2xx HTTP response into an error variant.
    ///
    /// 400/409/422 bodies shaped like `{message, errors}` become `Backend`;
    /// everything else (5xx, timeouts, unparseable bodies) is `Network`.
    pub fn classify(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        if matches!(status, 400 | 409 | 422) {
            if let Some(value) = &parsed {
                let field_errors = parse_field_errors(value.get("errors"));
                if message.is_some() || !field_errors.is_empty() {
                    return Self::Backend {
                        message: message.unwrap_or_default(),
                        field_errors,
                    };
                }
            }
        }

        Self::Network {
            status: Some(status),
            detail: message.unwrap_or_else(|| body.chars().take(200).collect()),
        }
    }

    /// Field errors to attach back onto the form, if any.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Backend { field_errors, .. } if !field_errors.is_empty() => Some(field_errors),
            _ => None,
        }
    }

    /// Text for the submission-result banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) => errors.summary(),
            Self::Backend {
                message,
                field_errors,
            } => {
                if message.is_empty() {
                    field_errors.summary()
                } else {
                    message.clone()
                }
            }
            Self::MissingIdentifier => {
                "Cannot update this record because it has no identifier.".to_string()
            }
            Self::Network {
                status: Some(status),
                ..
            } if *status >= 500 => {
                "The server could not process the request. Please try again.".to_string()
            }
            Self::Network { .. } => {
                "Could not complete the request. Check your connection and try again.".to_string()
            }
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// `{field: ["msg", ...]}` or `{field: "msg"}` → form errors.
fn parse_field_errors(errors: Option<&Value>) -> ValidationErrors {
    let Some(Value::Object(map)) = errors else {
        return ValidationErrors::new();
    };
    let raw: BTreeMap<String, Vec<String>> = map
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
                Value::String(s) => vec![s.clone()],
                _ => Vec::new(),
            };
            (field.clone(), messages)
        })
        .collect();
    ValidationErrors::from_backend(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_employee::FormStep;

    #[test]
    fn test_classify_backend_validation() {
        let body = r#"{"message":"The given data was invalid.","errors":{"sss_number":["format invalid"],"files[0][file_attachment]":"too large"}}"#;
        let error = SubmissionError::classify(422, body);
        let fields = error.field_errors().unwrap();
        assert_eq!(fields.get("sss_number"), Some("format invalid"));
        assert_eq!(fields.get("files.0.file_attachment"), Some("too large"));
        assert_eq!(fields.first_step(), Some(FormStep::Account));
        assert_eq!(error.user_message(), "The given data was invalid.");
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_classify_server_and_garbage() {
        let error = SubmissionError::classify(500, "<html>oops</html>");
        assert!(error.is_retryable());
        assert!(error.user_message().contains("Please try again"));

        let error = SubmissionError::classify(422, "not json");
        assert!(matches!(error, SubmissionError::Network { status: Some(422), .. }));
    }

    #[test]
    fn test_backend_without_message_uses_summary() {
        let error = SubmissionError::classify(422, r#"{"errors":{"sss_number":["format invalid"]}}"#);
        assert_eq!(error.user_message(), "Account: format invalid");
    }
}
