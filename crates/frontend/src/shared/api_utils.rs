//! API utilities for frontend-backend communication
//!
//! URL construction plus the three request shapes the HR screens use:
//! JSON reads, multipart form posts and body-less state transitions.

use crate::shared::config::app_config;
use contracts::domain::a001_employee::{BlobKey, WirePayload, WireValue};
use contracts::usecases::u501_employee_wizard::SubmissionError;
use gloo_net::http::Request;
use serde_json::Value;
use std::fmt;
use wasm_bindgen::JsCast;

/// Get the base URL for API requests
///
/// Page protocol and hostname, the configured backend port and the API prefix,
/// e.g. "http://localhost:3000/api".
pub fn api_base() -> String {
    let api = &app_config().api;
    let window = match web_sys::window() {
        Some(w) => w,
        None => return api.prefix.clone(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}{}", protocol, hostname, api.port, api.prefix)
}

/// Build a full API URL from a path relative to the API prefix
///
/// # Example
/// ```ignore
/// let url = api_url("/employees/12");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request could not be built or sent
    Request(String),
    /// Non-2xx response
    Status { status: u16, body: String },
    /// 2xx response with a body that is not the expected JSON
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(detail) => write!(f, "Network error: {}", detail),
            Self::Status { status, .. } => write!(f, "Server error: {}", status),
            Self::Decode(detail) => write!(f, "Unexpected response: {}", detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for SubmissionError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, body } => SubmissionError::classify(status, &body),
            ApiError::Request(detail) | ApiError::Decode(detail) => {
                SubmissionError::network(detail)
            }
        }
    }
}

/// Unwrap a `{ "data": {...} }` resource envelope.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Empty bodies (204, or 200 with nothing) read as `null`.
fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET `path` (relative to the API prefix) with an optional query string.
pub async fn get_json(path: &str, query: Option<&str>) -> Result<Value, ApiError> {
    let url = match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}?{}", api_url(path), q),
        None => api_url(path),
    };
    log::debug!("GET {}", url);

    let response = Request::get(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            log::warn!("GET {} failed: {}", path, e);
            ApiError::Request(e.to_string())
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !response.ok() {
        log::warn!("GET {} -> {}", path, status);
        return Err(ApiError::Status { status, body: text });
    }
    parse_body(&text)
}

/// POST with no body, used for workflow transitions.
pub async fn post_empty(path: &str) -> Result<Value, ApiError> {
    let url = api_url(path);
    log::debug!("POST {}", url);

    let response = Request::post(&url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| {
            log::warn!("POST {} failed: {}", path, e);
            ApiError::Request(e.to_string())
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    if !response.ok() {
        log::warn!("POST {} -> {}", path, status);
        return Err(ApiError::Status { status, body: text });
    }
    parse_body(&text)
}

/// POST a flat payload as `multipart/form-data`.
///
/// Text parts keep payload order; `Null` goes out as an empty part. File
/// parts are looked up through `resolve_file`; a key that no longer resolves
/// fails the request before anything is sent.
pub async fn post_multipart(
    path: &str,
    payload: &WirePayload,
    resolve_file: impl Fn(BlobKey) -> Option<web_sys::File>,
) -> Result<Value, ApiError> {
    use web_sys::{FormData, Request, RequestInit, RequestMode, Response};

    let form_data = FormData::new().map_err(|e| ApiError::Request(format!("{e:?}")))?;
    for (key, value) in payload.fields() {
        match value {
            WireValue::File(upload) => {
                let file = resolve_file(upload.key).ok_or_else(|| {
                    ApiError::Request(format!("attachment {} is no longer available", upload.name))
                })?;
                form_data
                    .append_with_blob_and_filename(key, &file, &upload.name)
                    .map_err(|e| ApiError::Request(format!("{e:?}")))?;
            }
            other => {
                let text = other.to_part_text().unwrap_or_default();
                form_data
                    .append_with_str(key, &text)
                    .map_err(|e| ApiError::Request(format!("{e:?}")))?;
            }
        }
    }

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form_data);

    let url = api_url(path);
    log::debug!("POST {} (multipart, {} fields)", url, payload.len());
    let request =
        Request::new_with_str_and_init(&url, &opts).map_err(|e| ApiError::Request(format!("{e:?}")))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;

    let window = web_sys::window().ok_or_else(|| ApiError::Request("no window".to_string()))?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            log::warn!("POST {} failed: {:?}", path, e);
            ApiError::Request(format!("{e:?}"))
        })?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|e| ApiError::Request(format!("{e:?}")))?;

    let text = wasm_bindgen_futures::JsFuture::from(
        resp.text().map_err(|e| ApiError::Decode(format!("{e:?}")))?,
    )
    .await
    .map_err(|e| ApiError::Decode(format!("{e:?}")))?;
    let text: String = text.as_string().unwrap_or_default();

    if !resp.ok() {
        log::warn!("POST {} -> {}", path, resp.status());
        return Err(ApiError::Status {
            status: resp.status(),
            body: text,
        });
    }
    parse_body(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_error_maps_to_backend_errors() {
        let error: SubmissionError = ApiError::Status {
            status: 422,
            body: r#"{"message":"Invalid","errors":{"sss_number":["format invalid"]}}"#.into(),
        }
        .into();
        assert_eq!(
            error.field_errors().and_then(|f| f.get("sss_number")),
            Some("format invalid")
        );
    }

    #[test]
    fn test_transport_errors_are_retryable() {
        let error: SubmissionError = ApiError::Request("offline".into()).into();
        assert!(error.is_retryable());
        let error: SubmissionError = ApiError::Status {
            status: 503,
            body: String::new(),
        }
        .into();
        assert!(error.is_retryable());
    }

    #[test]
    fn test_unwrap_data() {
        assert_eq!(unwrap_data(json!({"data": {"id": 1}})), json!({"id": 1}));
        assert_eq!(
            unwrap_data(json!({"data": [1, 2], "meta": {}})),
            json!({"data": [1, 2], "meta": {}})
        );
        assert_eq!(unwrap_data(json!({"id": 2})), json!({"id": 2}));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("  "), Ok(Value::Null));
        assert!(matches!(parse_body("<html>"), Err(ApiError::Decode(_))));
    }
}
