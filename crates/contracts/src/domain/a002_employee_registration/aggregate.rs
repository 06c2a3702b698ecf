use crate::domain::a001_employee::defaults::first_present;
use crate::domain::a001_employee::EmployeeId;
use crate::domain::common::json_to_id;
use crate::integer_id;
use crate::shared::dates::normalize_date_value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// ID Type
// ============================================================================

integer_id!(
    /// Backend id of a form submission (pending registration)
    SubmissionId
);

// ============================================================================
// Approval workflow
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    ForApproval,
    AwaitingResubmission,
    Rejected,
    Cancelled,
    Approved,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ForApproval => "for_approval",
            Self::AwaitingResubmission => "awaiting_resubmission",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Approved => "approved",
        }
    }

    /// Accepts snake_case, spaced or upper-case spellings.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "for_approval" | "pending" => Some(Self::ForApproval),
            "awaiting_resubmission" | "for_resubmission" => Some(Self::AwaitingResubmission),
            "rejected" | "declined" => Some(Self::Rejected),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            "approved" => Some(Self::Approved),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ForApproval => "For Approval",
            Self::AwaitingResubmission => "Awaiting Resubmission",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Approved => "Approved",
        }
    }

    /// Cancelling is terminal and impossible once cancelled or approved.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Approved)
    }

    pub fn can_resubmit(&self) -> bool {
        matches!(self, Self::AwaitingResubmission)
    }
}

/// One of the list tabs; each fetches independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationBucket {
    ForApproval,
    AwaitingResubmission,
    Rejected,
    Cancelled,
}

impl RegistrationBucket {
    pub const ALL: [RegistrationBucket; 4] = [
        Self::ForApproval,
        Self::AwaitingResubmission,
        Self::Rejected,
        Self::Cancelled,
    ];

    pub fn approval_status(&self) -> ApprovalStatus {
        match self {
            Self::ForApproval => ApprovalStatus::ForApproval,
            Self::AwaitingResubmission => ApprovalStatus::AwaitingResubmission,
            Self::Rejected => ApprovalStatus::Rejected,
            Self::Cancelled => ApprovalStatus::Cancelled,
        }
    }

    /// Coarse submission status sent alongside the approval status
    pub fn status(&self) -> &'static str {
        match self {
            Self::ForApproval | Self::AwaitingResubmission => "pending",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn title(&self) -> &'static str {
        self.approval_status().display_name()
    }
}

// ============================================================================
// List query
// ============================================================================

/// Query string of `GET /me/employee-registrations`. Page is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationListQuery {
    pub pagination: bool,
    pub page: usize,
    pub per_page: usize,
    pub status: String,
    pub approval_status: ApprovalStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

impl RegistrationListQuery {
    pub fn new(bucket: RegistrationBucket, page: usize, per_page: usize) -> Self {
        Self {
            pagination: true,
            page: page.max(1),
            per_page,
            status: bucket.status().to_string(),
            approval_status: bucket.approval_status(),
            search: None,
            date_from: None,
            date_to: None,
        }
    }

    /// Blank search text is not sent.
    pub fn with_search(mut self, search: &str) -> Self {
        let search = search.trim();
        self.search = (!search.is_empty()).then(|| search.to_string());
        self
    }

    /// Either bound may be open; an inverted range is swapped.
    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        let (from, to) = match (from, to) {
            (Some(a), Some(b)) if b < a => (Some(b), Some(a)),
            other => other,
        };
        self.date_from = from.map(crate::shared::dates::to_wire_date);
        self.date_to = to.map(crate::shared::dates::to_wire_date);
        self
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRow {
    pub id: SubmissionId,
    /// Employee record the submission is attached to, if already created
    pub submittable_id: Option<i64>,
    pub employee_name: String,
    pub position_title: String,
    pub approval_status: ApprovalStatus,
    pub submitted_at: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl RegistrationRow {
    /// Lenient row parse; rows without an id are dropped.
    pub fn from_json(value: &Value, fallback_status: ApprovalStatus) -> Option<Self> {
        let id = value.get("id").and_then(json_to_id)?;
        let text = |paths: &[&str]| text_at(value, paths);

        let employee_name = text(&["employee_name", "name", "submittable.full_name"]).unwrap_or_else(|| {
            ["first_name", "last_name"]
                .iter()
                .filter_map(|field| {
                    text_at(
                        value,
                        &[
                            format!("submittable.{}", field),
                            format!("payload.{}", field),
                            format!("data.{}", field),
                        ],
                    )
                })
                .collect::<Vec<_>>()
                .join(" ")
        });

        Some(Self {
            id: SubmissionId(id),
            submittable_id: first_present(value, &["submittable_id", "submittable.id"]).and_then(json_to_id),
            employee_name,
            position_title: text(&["position_title", "submittable.position_title", "payload.position_title"])
                .unwrap_or_default(),
            approval_status: text(&["approval_status", "status"])
                .and_then(|s| ApprovalStatus::parse(&s))
                .unwrap_or(fallback_status),
            submitted_at: first_present(value, &["submitted_at", "created_at"]).and_then(normalize_date_value),
            remarks: text(&["remarks", "approver_remarks"]),
        })
    }
}

// ============================================================================
// Submission detail
// ============================================================================

/// Where the employee data of a pending registration lives.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionPayload {
    /// Employee data is embedded in the submission response
    Embedded(Value),
    /// Only the nested submittable id is present; fetch `/employees/{id}`
    Submittable(EmployeeId),
}

fn looks_like_employee(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.keys().any(|k| {
            matches!(
                k.as_str(),
                "first_name" | "last_name" | "general_info" | "employment_types"
            ) || k.starts_with("employment_types[")
        }),
        _ => false,
    }
}

/// Decide whether a `GET /form-submissions/{id}` body needs a secondary fetch.
pub fn resolve_submission_payload(record: &Value) -> SubmissionPayload {
    let body = record.get("data").filter(|d| d.is_object()).unwrap_or(record);
    for path in ["payload", "form_data", "data", "submittable"] {
        if let Some(candidate) = body.get(path).filter(|v| looks_like_employee(v)) {
            return SubmissionPayload::Embedded(candidate.clone());
        }
    }
    if looks_like_employee(body) {
        return SubmissionPayload::Embedded(body.clone());
    }
    match first_present(body, &["submittable_id", "submittable.id"]).and_then(json_to_id) {
        Some(id) => SubmissionPayload::Submittable(EmployeeId(id)),
        None => SubmissionPayload::Embedded(body.clone()),
    }
}

fn text_at<S: AsRef<str>>(value: &Value, paths: &[S]) -> Option<String> {
    first_present(value, paths)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
}

/// One page of rows plus the paginator fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegistrationPage {
    pub rows: Vec<RegistrationRow>,
    pub current_page: usize,
    pub last_page: usize,
    pub per_page: usize,
    pub total: usize,
}

impl RegistrationPage {
    /// Accepts `{data, meta: {...}}`, `{data, current_page, ...}` or a bare array.
    pub fn from_json(value: &Value, fallback_status: ApprovalStatus) -> Self {
        let items = match value {
            Value::Array(items) => items.as_slice(),
            _ => value
                .get("data")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        };
        let rows: Vec<RegistrationRow> = items
            .iter()
            .filter_map(|item| RegistrationRow::from_json(item, fallback_status))
            .collect();

        let number = |name: &str| {
            first_present(value, &[format!("meta.{}", name), name.to_string()])
                .and_then(json_to_id)
                .and_then(|n| usize::try_from(n).ok())
        };
        let total = number("total").unwrap_or(rows.len());
        let per_page = number("per_page").unwrap_or(rows.len().max(1));

        Self {
            current_page: number("current_page").unwrap_or(1),
            last_page: number("last_page").unwrap_or_else(|| total.div_ceil(per_page).max(1)),
            per_page,
            total,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cancel_and_resubmit_availability() {
        assert!(ApprovalStatus::ForApproval.can_cancel());
        assert!(!ApprovalStatus::Cancelled.can_cancel());
        assert!(!ApprovalStatus::Approved.can_cancel());
        assert!(ApprovalStatus::AwaitingResubmission.can_resubmit());
        assert!(!ApprovalStatus::Rejected.can_resubmit());
    }

    #[test]
    fn test_query_serialization() {
        let query = RegistrationListQuery::new(RegistrationBucket::AwaitingResubmission, 2, 25)
            .with_search("  ")
            .with_date_range(NaiveDate::from_ymd_opt(2024, 5, 1), NaiveDate::from_ymd_opt(2024, 4, 1));
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["approval_status"], "awaiting_resubmission");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["page"], 2);
        assert_eq!(value["date_from"], "2024-04-01");
        assert!(value.get("search").is_none());
    }

    #[test]
    fn test_submission_payload_resolution() {
        let embedded = json!({"data": {"id": 3, "payload": {"first_name": "Ana"}}});
        assert_eq!(
            resolve_submission_payload(&embedded),
            SubmissionPayload::Embedded(json!({"first_name": "Ana"}))
        );

        let nested = json!({"id": 3, "submittable_id": "42", "approval_status": "for_approval"});
        assert_eq!(
            resolve_submission_payload(&nested),
            SubmissionPayload::Submittable(EmployeeId(42))
        );
    }

    #[test]
    fn test_page_from_laravel_paginator() {
        let body = json!({
            "data": [
                {
                    "id": 7,
                    "approval_status": "FOR APPROVAL",
                    "submittable": {"id": 42, "first_name": "Ana", "last_name": "Santos"},
                    "created_at": "2024-03-01T08:00:00Z"
                },
                {"approval_status": "rejected"}
            ],
            "meta": {"current_page": 1, "last_page": 3, "per_page": 10, "total": 21}
        });
        let page = RegistrationPage::from_json(&body, ApprovalStatus::ForApproval);
        assert_eq!(page.rows.len(), 1);
        assert_eq!(page.last_page, 3);
        assert_eq!(page.total, 21);

        let row = &page.rows[0];
        assert_eq!(row.submittable_id, Some(42));
        assert_eq!(row.employee_name, "Ana Santos");
        assert_eq!(row.approval_status, ApprovalStatus::ForApproval);
        assert_eq!(row.submitted_at, NaiveDate::from_ymd_opt(2024, 3, 1));
    }
}
