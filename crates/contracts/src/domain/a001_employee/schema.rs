//! Step-partitioned validation schema.
//!
//! `validate_step` looks at the whole form but only checks the keys owned by
//! one step, so unvisited steps never block navigation. `validate_all` runs
//! every step and collects every error.

use std::collections::BTreeMap;
use std::fmt;

use super::aggregate::{DateField, EmployeeForm, RefSlot, TextField};
use super::attachment::FileValue;
use super::employment::{EmploymentDateField, EmploymentLabel};
use super::steps::FormStep;
use super::wire::bracket_to_path;
use crate::domain::common::RefField;
use crate::shared::config::UploadConfig;
use crate::shared::dates::age_on;
use crate::shared::formatters::{
    MOBILE_MASK, PAGIBIG_MASK, PHILHEALTH_MASK, SSS_MASK, TIN_MASK,
};
use crate::shared::validation::{is_valid_email, ValidationRules};
use chrono::NaiveDate;

pub const MINIMUM_AGE: i32 = 18;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted form path, e.g. `employment_types.0.employment_end_date`
    pub key: String,
    pub step: FormStep,
    pub label: String,
    pub message: String,
}

/// Ordered set of field errors, at most one per key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first error reported for a key.
    pub fn push(&mut self, error: FieldError) {
        if !self.errors.iter().any(|e| e.key == error.key) {
            self.errors.push(error);
        }
    }

    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        let key = key.into();
        let (step, label) = describe_key(&key);
        self.push(FieldError {
            key,
            step,
            label,
            message: message.into(),
        });
    }

    pub fn remove(&mut self, key: &str) {
        self.errors.retain(|e| e.key != key);
    }

    /// Drop every error under `prefix` (the key itself and its children).
    pub fn remove_prefix(&mut self, prefix: &str) {
        let nested = format!("{}.", prefix);
        self.errors
            .retain(|e| e.key != prefix && !e.key.starts_with(&nested));
    }

    pub fn clear_step(&mut self, step: FormStep) {
        self.errors.retain(|e| e.step != step);
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        for error in other.errors {
            self.push(error);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Message attached to a form key, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.message.as_str())
    }

    pub fn for_step(&self, step: FormStep) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.step == step)
    }

    /// Earliest step holding an error.
    pub fn first_step(&self) -> Option<FormStep> {
        self.errors.iter().map(|e| e.step).min()
    }

    /// Step-grouped summary: `"General Info: First Name is required; Account: ..."`.
    pub fn summary(&self) -> String {
        let mut grouped: BTreeMap<FormStep, Vec<&str>> = BTreeMap::new();
        for error in &self.errors {
            grouped.entry(error.step).or_default().push(&error.message);
        }
        grouped
            .into_iter()
            .map(|(step, messages)| format!("{}: {}", step.title(), messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Map a backend `{field: [messages]}` object onto form keys. Bracketed
    /// keys (`employment_types[0][employment_end_date]`) are normalised to
    /// dotted paths; the first message per field is kept.
    pub fn from_backend(errors: &BTreeMap<String, Vec<String>>) -> Self {
        let mut out = Self::new();
        for (field, messages) in errors {
            let Some(message) = messages.iter().find(|m| !m.trim().is_empty()) else {
                continue;
            };
            out.add(bracket_to_path(field), message.clone());
        }
        out
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

impl std::error::Error for ValidationErrors {}

/// Step and label for a dotted form key. Unknown keys land on the review step.
pub fn describe_key(key: &str) -> (FormStep, String) {
    if let Some(field) = TextField::ALL.iter().find(|f| f.path() == key) {
        return (field.step(), field.label().to_string());
    }
    if let Some(field) = DateField::ALL.iter().find(|f| f.path() == key) {
        return (field.step(), field.label().to_string());
    }
    if let Some(slot) = RefSlot::ALL.iter().find(|s| s.path() == key) {
        return (slot.step(), slot.label().to_string());
    }

    let leaf = key.rsplit('.').next().unwrap_or(key);
    let date_label = [
        EmploymentDateField::Start,
        EmploymentDateField::End,
        EmploymentDateField::Regularization,
    ]
    .into_iter()
    .find(|f| f.key() == leaf)
    .map(|f| f.label().to_string());

    if key.starts_with("employment_types") || date_label.is_some() {
        let label = date_label.unwrap_or_else(|| "Employment Type".to_string());
        return (FormStep::EmploymentType, label);
    }
    if key.starts_with("files") {
        let label = match leaf {
            "file_type_id" => "File Type",
            "file_description" => "File Description",
            _ => "File",
        };
        return (FormStep::Files, label.to_string());
    }
    if key.starts_with("attainments") {
        return (FormStep::Attainment, humanize(leaf));
    }
    (FormStep::Review, humanize(leaf))
}

fn humanize(key: &str) -> String {
    let key = key.strip_suffix("_id").unwrap_or(key);
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ============================================================================
// Rules
// ============================================================================

/// Rule set for each free-text field.
pub fn text_rules(field: TextField) -> ValidationRules {
    match field {
        TextField::FirstName | TextField::LastName => ValidationRules::required().max_length(100),
        TextField::MiddleName | TextField::Suffix => ValidationRules::none().max_length(100),
        TextField::Gender | TextField::CivilStatus => ValidationRules::required(),
        TextField::PositionTitle => ValidationRules::required().max_length(150),
        TextField::SchoolName => ValidationRules::required().max_length(255),
        TextField::YearGraduated => {
            ValidationRules::none().mask("XXXX").with_error("Year Graduated must be a 4-digit year")
        }
        TextField::SssNumber => ValidationRules::none().mask(SSS_MASK),
        TextField::PhilhealthNumber => ValidationRules::none().mask(PHILHEALTH_MASK),
        TextField::PagibigNumber => ValidationRules::none().mask(PAGIBIG_MASK),
        TextField::TinNumber => ValidationRules::none().mask(TIN_MASK),
        TextField::MobileNumber => ValidationRules::required().mask(MOBILE_MASK),
        TextField::EmergencyContactNumber => ValidationRules::none().mask(MOBILE_MASK),
        TextField::Email => ValidationRules::none().max_length(255),
        _ => ValidationRules::none().max_length(255),
    }
}

/// Whether a reference slot must be filled.
pub fn reference_required(slot: RefSlot) -> bool {
    matches!(
        slot,
        RefSlot::Region
            | RefSlot::Province
            | RefSlot::Municipality
            | RefSlot::Barangay
            | RefSlot::JobLevel
            | RefSlot::Schedule
            | RefSlot::Attainment
    )
}

pub fn date_required(field: DateField) -> bool {
    matches!(field, DateField::BirthDate | DateField::DateHired)
}

fn check_text(form: &EmployeeForm, field: TextField, errors: &mut ValidationErrors) {
    let raw = form.text(field);
    let value = match field {
        // Mask applies after the country code is stripped
        TextField::MobileNumber | TextField::EmergencyContactNumber => {
            let trimmed = raw.trim();
            match trimmed.strip_prefix("+63") {
                Some(rest) => rest.trim_start_matches([' ', '-']).to_string(),
                None => trimmed.to_string(),
            }
        }
        _ => raw.to_string(),
    };
    if let Err(message) = text_rules(field).validate_string(&value, field.label()) {
        errors.add(field.path(), message);
        return;
    }
    if field == TextField::Email && !raw.trim().is_empty() && !is_valid_email(raw) {
        errors.add(field.path(), "Email must be a valid email address");
    }
}

fn check_date(form: &EmployeeForm, field: DateField, today: NaiveDate, errors: &mut ValidationErrors) {
    match form.date(field) {
        None if date_required(field) => errors.add(field.path(), format!("{} is required", field.label())),
        None => {}
        Some(date) => match field {
            DateField::BirthDate => {
                if date > today {
                    errors.add(field.path(), "Birth Date cannot be in the future");
                } else if age_on(date, today) < MINIMUM_AGE {
                    errors.add(
                        field.path(),
                        format!("Employee must be at least {} years old", MINIMUM_AGE),
                    );
                }
            }
            DateField::DateHired => {
                if let Some(birth) = form.birth_date {
                    if date <= birth {
                        errors.add(field.path(), "Date Hired must be after the Birth Date");
                    }
                }
            }
        },
    }
}

fn check_reference(form: &EmployeeForm, slot: RefSlot, errors: &mut ValidationErrors) {
    match form.reference(slot) {
        RefField::Empty if reference_required(slot) => {
            errors.add(slot.path(), format!("{} is required", slot.label()))
        }
        RefField::Empty | RefField::Resolved(_) => {}
        // Bank is transformed to a bare id before validation
        RefField::Unresolved(_) if slot == RefSlot::Bank => {}
        RefField::Unresolved(_) => {
            errors.add(slot.path(), format!("{} must be selected from the list", slot.label()))
        }
    }
}

fn check_employment_types(form: &EmployeeForm, errors: &mut ValidationErrors) {
    if form.employment_types.is_empty() {
        errors.add("employment_types", "At least one employment type is required");
        return;
    }

    for (i, entry) in form.employment_types.iter().enumerate() {
        let key = |field: &str| format!("employment_types.{}.{}", i, field);
        let Some(label) = entry.label else {
            errors.add(key("employment_type_label"), "Employment Type is required");
            continue;
        };

        if label.uses_regularization_date() {
            if entry.regularization_date.is_none() {
                errors.add(
                    key(EmploymentDateField::Regularization.key()),
                    "Regularization Date is required for REGULAR employment",
                );
            }
            if entry.start_date.is_some() || entry.end_date.is_some() {
                errors.add(
                    key(EmploymentDateField::Start.key()),
                    "Start and End Dates do not apply to REGULAR employment",
                );
            }
            continue;
        }

        if entry.regularization_date.is_some() {
            errors.add(
                key(EmploymentDateField::Regularization.key()),
                format!("Regularization Date does not apply to {} employment", label.as_str()),
            );
        }
        if entry.start_date.is_none() {
            errors.add(
                key(EmploymentDateField::Start.key()),
                format!("Start Date is required for {} employment", label.as_str()),
            );
        }
        if label.requires_end_date() && entry.end_date.is_none() {
            errors.add(
                key(EmploymentDateField::End.key()),
                format!("End Date is required for {} employment", label.as_str()),
            );
        }
        if let (Some(start), Some(end)) = (entry.start_date, entry.end_date) {
            if end <= start {
                errors.add(key(EmploymentDateField::End.key()), "End Date must be after the Start Date");
            }
        }
    }
}

fn check_files(form: &EmployeeForm, uploads: &UploadConfig, errors: &mut ValidationErrors) {
    for (i, file) in form.files.iter().enumerate() {
        let key = |field: &str| format!("files.{}.{}", i, field);
        let has_content = !file.file_attachment.is_none();

        if has_content && file.file_type_id.is_none() {
            errors.add(key("file_type_id"), "File Type is required");
        }
        if file.file_description.chars().count() > 255 {
            errors.add(
                key("file_description"),
                "File Description must not exceed 255 characters",
            );
        }

        // Stored markers and empty slots pass; only fresh uploads are inspected
        if let FileValue::Upload(upload) = &file.file_attachment {
            let allowed = upload
                .extension()
                .map(|ext| uploads.allowed_extensions.iter().any(|a| a.eq_ignore_ascii_case(&ext)))
                .unwrap_or(false);
            if !allowed {
                errors.add(
                    key("file_attachment"),
                    format!("File must be one of: {}", uploads.allowed_extensions.join(", ")),
                );
            } else if upload.size > uploads.max_file_size_bytes {
                errors.add(
                    key("file_attachment"),
                    format!(
                        "File must not exceed {} MB",
                        uploads.max_file_size_bytes / (1024 * 1024)
                    ),
                );
            }
        }
    }
}

fn check_account(form: &EmployeeForm, errors: &mut ValidationErrors) {
    if !form.bank.is_empty() && form.account_number.trim().is_empty() {
        errors.add(
            TextField::AccountNumber.path(),
            "Account Number is required when a bank is selected",
        );
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Validate the keys owned by `step` against the full form snapshot.
pub fn validate_step(
    form: &EmployeeForm,
    step: FormStep,
    today: NaiveDate,
    uploads: &UploadConfig,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    for field in TextField::ALL.iter().filter(|f| f.step() == step) {
        check_text(form, *field, &mut errors);
    }
    for field in DateField::ALL.iter().filter(|f| f.step() == step) {
        check_date(form, *field, today, &mut errors);
    }
    for slot in RefSlot::ALL.iter().filter(|s| s.step() == step) {
        check_reference(form, *slot, &mut errors);
    }

    match step {
        FormStep::EmploymentType => check_employment_types(form, &mut errors),
        FormStep::Account => check_account(form, &mut errors),
        FormStep::Files => check_files(form, uploads, &mut errors),
        _ => {}
    }

    errors
}

/// Validate the whole form, collecting every error.
pub fn validate_all(form: &EmployeeForm, today: NaiveDate, uploads: &UploadConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for step in FormStep::ALL {
        errors.extend(validate_step(form, step, today, uploads));
    }
    errors
}

/// True if the label makes `field` required for an entry.
pub fn employment_date_required(label: EmploymentLabel, field: EmploymentDateField) -> bool {
    match field {
        EmploymentDateField::Start => label.uses_start_date(),
        EmploymentDateField::End => label.requires_end_date(),
        EmploymentDateField::Regularization => label.uses_regularization_date(),
    }
}
