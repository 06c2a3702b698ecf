use super::errors::SubmissionError;
use crate::domain::a001_employee::{
    DateField, EmployeeId, EmploymentDateField, EmploymentLabel, FileValue, FormMode, FormStep,
    RefSlot, TextField, WirePayload,
};
use crate::domain::a002_employee_registration::SubmissionId;
use crate::domain::common::{RefField, ReferenceEntity, ReferenceKind};
use chrono::NaiveDate;
use serde_json::Value;

/// Where the record shown in the wizard comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    New,
    Employee(EmployeeId),
    /// Pending registration (`/form-submissions/{id}`)
    Submission(SubmissionId),
}

impl RecordSource {
    pub fn fetch_path(&self) -> Option<String> {
        match self {
            Self::New => None,
            Self::Employee(id) => Some(format!("/employees/{}", id)),
            Self::Submission(id) => Some(format!("/form-submissions/{}", id)),
        }
    }
}

/// Endpoint a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    CreateEmployee,
    /// Sent as POST with `_method=PATCH`
    UpdateEmployee(EmployeeId),
    UpdateSubmission(SubmissionId),
}

impl SubmitTarget {
    pub fn path(&self) -> String {
        match self {
            Self::CreateEmployee => "/employees".to_string(),
            Self::UpdateEmployee(id) => format!("/employees/{}", id),
            Self::UpdateSubmission(id) => format!("/form-submissions/{}", id),
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, Self::CreateEmployee)
    }
}

/// One user edit. Edits are ignored while the wizard is read-only.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Text(TextField, String),
    Date(DateField, Option<NaiveDate>),
    Reference(RefSlot, RefField),
    EmploymentLabel {
        index: usize,
        label: Option<EmploymentLabel>,
    },
    EmploymentDate {
        index: usize,
        field: EmploymentDateField,
        value: Option<NaiveDate>,
    },
    AddEmploymentType,
    RemoveEmploymentType(usize),
    AddFile,
    RemoveFile(usize),
    FileType {
        index: usize,
        file_type_id: Option<i64>,
    },
    FileDescription {
        index: usize,
        description: String,
    },
    FileContent {
        index: usize,
        value: FileValue,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardAction {
    /// Open a session. Without a record, a stored source is fetched first.
    Open {
        mode: FormMode,
        source: RecordSource,
        record: Option<Value>,
        /// Seed for placeholder ids minted in this session
        seed: String,
    },
    RecordLoaded {
        token: u64,
        record: Value,
    },
    LoadFailed {
        token: u64,
        message: String,
    },
    Next {
        today: NaiveDate,
    },
    Back,
    /// Jump straight to a step: any step in view mode, earlier steps otherwise.
    GoTo(FormStep),
    Edit(FieldEdit),
    ReferencesLoaded {
        kind: ReferenceKind,
        parent: Option<i64>,
        entries: Vec<ReferenceEntity>,
    },
    EnterEditMode,
    CancelEdit,
    Submit {
        today: NaiveDate,
    },
    SubmitSucceeded {
        token: u64,
    },
    SubmitFailed {
        token: u64,
        error: SubmissionError,
    },
    CloseAfterSuccess {
        token: u64,
    },
    Close,
}

/// Work the caller must perform after a transition, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEffect {
    FetchRecord {
        token: u64,
        source: RecordSource,
    },
    Submit {
        token: u64,
        target: SubmitTarget,
        payload: WirePayload,
    },
    /// Caller-supplied refetch callbacks; always precedes `NotifySaved`
    RunRefetch,
    NotifySaved,
    ScheduleClose {
        token: u64,
        delay_ms: u32,
    },
}
