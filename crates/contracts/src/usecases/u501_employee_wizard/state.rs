//! Wizard state machine.
//!
//! All transitions go through [`WizardState::dispatch`], which mutates the
//! state and returns the effects the caller has to run (fetches, submissions,
//! timers). Results of async work come back as actions tagged with the session
//! token they were started under; results from an older session are dropped.

use super::errors::SubmissionError;
use super::events::{FieldEdit, RecordSource, SubmitTarget, WizardAction, WizardEffect};
use crate::domain::a001_employee::{
    apply_employment_rules, blank_form, to_form_defaults, to_wire_payload, validate_all,
    validate_step, EmployeeForm, EmploymentDateField, EmploymentTypeEntry, FileAttachment,
    FormMode, FormStep, PlaceholderSeq, RefSlot, TextField, ValidationErrors, WireValue,
};
use crate::domain::common::{RefField, ReferenceEntity, ReferenceKind};
use crate::shared::config::{UploadConfig, WizardConfig};
use crate::shared::formatters;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Closed,
    /// Waiting for the record to arrive
    Loading,
    /// Computing defaults from a record already in hand
    Initializing,
    Editing,
    Submitting,
    Success,
    /// Last submission or load failed; the form stays open and editable
    Error,
}

#[derive(Debug, Clone)]
pub struct WizardState {
    phase: WizardPhase,
    step: FormStep,
    mode: FormMode,
    opened_as: FormMode,
    source: RecordSource,
    form: EmployeeForm,
    /// Form as loaded, restored by "Cancel Edit"
    pristine: EmployeeForm,
    errors: ValidationErrors,
    failure: Option<SubmissionError>,
    load_error: Option<String>,
    last_target: Option<SubmitTarget>,
    token: u64,
    initialized: bool,
    ids: PlaceholderSeq,
    wizard: WizardConfig,
    uploads: UploadConfig,
}

impl WizardState {
    pub fn new(wizard: WizardConfig, uploads: UploadConfig) -> Self {
        Self {
            phase: WizardPhase::Closed,
            step: FormStep::FIRST,
            mode: FormMode::Create,
            opened_as: FormMode::Create,
            source: RecordSource::New,
            form: EmployeeForm::default(),
            pristine: EmployeeForm::default(),
            errors: ValidationErrors::new(),
            failure: None,
            load_error: None,
            last_target: None,
            token: 0,
            initialized: false,
            ids: PlaceholderSeq::new("0"),
            wizard,
            uploads,
        }
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn opened_as(&self) -> FormMode {
        self.opened_as
    }

    pub fn source(&self) -> RecordSource {
        self.source
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn failure(&self) -> Option<&SubmissionError> {
        self.failure.as_ref()
    }

    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_open(&self) -> bool {
        self.phase != WizardPhase::Closed
    }

    /// Submitting, and the short success window before close.
    pub fn is_locked(&self) -> bool {
        matches!(self.phase, WizardPhase::Submitting | WizardPhase::Success)
    }

    pub fn is_read_only(&self) -> bool {
        self.mode.is_read_only()
            || self.is_locked()
            || matches!(
                self.phase,
                WizardPhase::Closed | WizardPhase::Loading | WizardPhase::Initializing
            )
    }

    /// "Cancel Edit" returns to view mode only for sessions opened in view.
    pub fn can_cancel_edit(&self) -> bool {
        self.mode == FormMode::Edit && self.opened_as == FormMode::View
    }

    /// The record never arrived; there is no form to show.
    pub fn load_failed(&self) -> bool {
        self.load_error.is_some()
    }

    /// Text of the result banner, if one should show.
    pub fn banner(&self) -> Option<String> {
        if let Some(message) = &self.load_error {
            return Some(message.clone());
        }
        if let Some(failure) = &self.failure {
            return Some(failure.user_message());
        }
        if !self.errors.is_empty() {
            return Some(self.errors.summary());
        }
        None
    }

    pub fn success_message(&self) -> Option<&'static str> {
        if self.phase != WizardPhase::Success {
            return None;
        }
        Some(match self.last_target {
            Some(SubmitTarget::CreateEmployee) => "Employee registered successfully.",
            _ => "Changes saved successfully.",
        })
    }

    /// Lookup lists needed to resolve the form's unresolved references,
    /// keyed by kind and parent id.
    pub fn pending_lookups(&self) -> Vec<(ReferenceKind, Option<i64>)> {
        let mut out: Vec<(ReferenceKind, Option<i64>)> = Vec::new();
        for slot in RefSlot::ALL {
            if !matches!(self.form.reference(slot), RefField::Unresolved(_)) {
                continue;
            }
            let parent = match slot.parent() {
                Some(parent) => match self.form.reference(parent).id() {
                    Some(id) => Some(id),
                    None => continue,
                },
                None => None,
            };
            let key = (slot.kind(), parent);
            if !out.contains(&key) {
                out.push(key);
            }
        }
        out
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    pub fn dispatch(&mut self, action: WizardAction) -> Vec<WizardEffect> {
        match action {
            WizardAction::Open {
                mode,
                source,
                record,
                seed,
            } => self.open(mode, source, record, seed),
            WizardAction::RecordLoaded { token, record } => {
                if token == self.token && self.phase == WizardPhase::Loading {
                    self.phase = WizardPhase::Initializing;
                    self.initialize(Some(&record));
                }
                Vec::new()
            }
            WizardAction::LoadFailed { token, message } => {
                if token == self.token && self.phase == WizardPhase::Loading {
                    self.phase = WizardPhase::Error;
                    self.load_error = Some(message);
                }
                Vec::new()
            }
            WizardAction::Next { today } => {
                self.next(today);
                Vec::new()
            }
            WizardAction::Back => {
                if self.can_navigate() {
                    if let Some(prev) = self.step.prev() {
                        self.step = prev;
                    }
                }
                Vec::new()
            }
            WizardAction::GoTo(step) => {
                if self.can_navigate() && (self.mode.is_read_only() || step < self.step) {
                    self.step = step;
                }
                Vec::new()
            }
            WizardAction::Edit(edit) => {
                if !self.is_read_only() && self.initialized {
                    self.apply_edit(edit);
                }
                Vec::new()
            }
            WizardAction::ReferencesLoaded {
                kind,
                parent,
                entries,
            } => {
                self.resolve_references(kind, parent, &entries);
                Vec::new()
            }
            WizardAction::EnterEditMode => {
                if self.mode == FormMode::View && self.is_interactive() {
                    self.mode = FormMode::Edit;
                }
                Vec::new()
            }
            WizardAction::CancelEdit => {
                if self.is_locked() {
                    return Vec::new();
                }
                if self.can_cancel_edit() {
                    self.form = self.pristine.clone();
                    self.mode = FormMode::View;
                    self.errors = ValidationErrors::new();
                    self.failure = None;
                    self.phase = WizardPhase::Editing;
                } else {
                    self.reset();
                }
                Vec::new()
            }
            WizardAction::Submit { today } => self.submit(today),
            WizardAction::SubmitSucceeded { token } => {
                if token != self.token || self.phase != WizardPhase::Submitting {
                    return Vec::new();
                }
                self.phase = WizardPhase::Success;
                self.failure = None;
                self.errors = ValidationErrors::new();
                vec![
                    WizardEffect::RunRefetch,
                    WizardEffect::NotifySaved,
                    WizardEffect::ScheduleClose {
                        token,
                        delay_ms: self.wizard.success_close_delay_ms,
                    },
                ]
            }
            WizardAction::SubmitFailed { token, error } => {
                if token == self.token && self.phase == WizardPhase::Submitting {
                    self.phase = WizardPhase::Error;
                    if let Some(fields) = error.field_errors() {
                        self.errors = fields.clone();
                    }
                    self.failure = Some(error);
                }
                Vec::new()
            }
            WizardAction::CloseAfterSuccess { token } => {
                if token == self.token && self.phase == WizardPhase::Success {
                    self.reset();
                }
                Vec::new()
            }
            WizardAction::Close => {
                if !self.is_locked() {
                    self.reset();
                }
                Vec::new()
            }
        }
    }

    fn open(
        &mut self,
        mode: FormMode,
        source: RecordSource,
        record: Option<Value>,
        seed: String,
    ) -> Vec<WizardEffect> {
        if self.is_locked() {
            return Vec::new();
        }
        self.reset();
        self.mode = mode;
        self.opened_as = mode;
        self.source = source;
        self.ids = PlaceholderSeq::new(seed);

        match (record, source.fetch_path()) {
            (Some(record), _) => {
                self.phase = WizardPhase::Initializing;
                self.initialize(Some(&record));
                Vec::new()
            }
            (None, Some(_)) if mode != FormMode::Create => {
                self.phase = WizardPhase::Loading;
                vec![WizardEffect::FetchRecord {
                    token: self.token,
                    source,
                }]
            }
            (None, _) => {
                self.phase = WizardPhase::Initializing;
                self.initialize(None);
                Vec::new()
            }
        }
    }

    /// Compute defaults once per session and land on the first step.
    fn initialize(&mut self, record: Option<&Value>) {
        if self.initialized {
            return;
        }
        let mut form = match record {
            Some(record) => to_form_defaults(record, self.mode, &mut self.ids),
            None => blank_form(&mut self.ids),
        };
        if form.employment_types.is_empty() && self.mode != FormMode::View {
            form.employment_types
                .push(EmploymentTypeEntry::new(self.ids.next_id()));
        }
        self.form = form;
        self.pristine = self.form.clone();
        self.initialized = true;
        self.step = FormStep::FIRST;
        self.phase = WizardPhase::Editing;
    }

    fn reset(&mut self) {
        let (wizard, uploads) = (self.wizard, self.uploads.clone());
        let token = self.token + 1;
        *self = Self::new(wizard, uploads);
        self.token = token;
    }

    fn is_interactive(&self) -> bool {
        matches!(self.phase, WizardPhase::Editing | WizardPhase::Error) && self.initialized
    }

    fn can_navigate(&self) -> bool {
        self.is_interactive()
    }

    fn next(&mut self, today: chrono::NaiveDate) {
        if !self.can_navigate() {
            return;
        }
        let Some(next) = self.step.next() else {
            return;
        };
        if !self.mode.is_read_only() {
            let errors = validate_step(&self.form, self.step, today, &self.uploads);
            self.errors.clear_step(self.step);
            if !errors.is_empty() {
                self.errors.extend(errors);
                return;
            }
        }
        self.failure = None;
        self.load_error = None;
        if self.phase == WizardPhase::Error {
            self.phase = WizardPhase::Editing;
        }
        self.step = next;
    }

    fn submit(&mut self, today: chrono::NaiveDate) -> Vec<WizardEffect> {
        if !self.is_interactive() || self.mode.is_read_only() || !self.step.is_last() {
            return Vec::new();
        }

        let errors = validate_all(&self.form, today, &self.uploads);
        if !errors.is_empty() {
            self.errors = errors.clone();
            self.failure = Some(SubmissionError::Validation(errors));
            self.phase = WizardPhase::Error;
            return Vec::new();
        }

        let target = match (self.mode, self.source) {
            (FormMode::Create, _) => SubmitTarget::CreateEmployee,
            (_, RecordSource::Employee(id)) => SubmitTarget::UpdateEmployee(id),
            (_, RecordSource::Submission(id)) => SubmitTarget::UpdateSubmission(id),
            (_, RecordSource::New) => {
                self.failure = Some(SubmissionError::MissingIdentifier);
                self.phase = WizardPhase::Error;
                return Vec::new();
            }
        };

        let mut payload = to_wire_payload(&self.form);
        if matches!(target, SubmitTarget::UpdateEmployee(_)) {
            payload.push("_method", WireValue::Text("PATCH".into()));
        }

        self.errors = ValidationErrors::new();
        self.failure = None;
        self.last_target = Some(target);
        self.phase = WizardPhase::Submitting;
        vec![WizardEffect::Submit {
            token: self.token,
            target,
            payload,
        }]
    }

    fn apply_edit(&mut self, edit: FieldEdit) {
        if self.phase == WizardPhase::Error {
            self.phase = WizardPhase::Editing;
            self.failure = None;
        }
        let probation = self.wizard.probation_months;

        match edit {
            FieldEdit::Text(field, value) => {
                *self.form.text_mut(field) = format_on_entry(field, &value);
                self.errors.remove(field.path());
            }
            FieldEdit::Date(field, value) => {
                *self.form.date_mut(field) = value;
                self.errors.remove(field.path());
            }
            FieldEdit::Reference(slot, value) => {
                let changed = self.form.reference(slot).id() != value.id();
                *self.form.reference_mut(slot) = value;
                self.errors.remove(slot.path());
                if changed {
                    for child in slot.descendants() {
                        *self.form.reference_mut(*child) = RefField::Empty;
                    }
                }
            }
            FieldEdit::EmploymentLabel { index, label } => {
                let Some(entry) = self.form.employment_types.get_mut(index) else {
                    return;
                };
                if entry.label != label {
                    entry.label = label;
                    apply_employment_rules(&mut self.form.employment_types, probation);
                }
                self.errors.remove_prefix(&format!("employment_types.{}", index));
            }
            FieldEdit::EmploymentDate {
                index,
                field,
                value,
            } => {
                let Some(entry) = self.form.employment_types.get_mut(index) else {
                    return;
                };
                let slot = match field {
                    EmploymentDateField::Start => &mut entry.start_date,
                    EmploymentDateField::End => &mut entry.end_date,
                    EmploymentDateField::Regularization => &mut entry.regularization_date,
                };
                if *slot != value {
                    *slot = value;
                    if field == EmploymentDateField::Start {
                        apply_employment_rules(&mut self.form.employment_types, probation);
                    }
                }
                self.errors
                    .remove(&format!("employment_types.{}.{}", index, field.key()));
            }
            FieldEdit::AddEmploymentType => {
                self.form
                    .employment_types
                    .push(EmploymentTypeEntry::new(self.ids.next_id()));
                self.errors.remove("employment_types");
            }
            FieldEdit::RemoveEmploymentType(index) => {
                if index < self.form.employment_types.len() && self.form.employment_types.len() > 1 {
                    self.form.employment_types.remove(index);
                    self.errors.remove_prefix("employment_types");
                }
            }
            FieldEdit::AddFile => self.form.files.push(FileAttachment::default()),
            FieldEdit::RemoveFile(index) => {
                if index < self.form.files.len() {
                    self.form.files.remove(index);
                    self.errors.remove_prefix("files");
                }
            }
            FieldEdit::FileType {
                index,
                file_type_id,
            } => {
                if let Some(file) = self.form.files.get_mut(index) {
                    file.file_type_id = file_type_id;
                    self.errors.remove(&format!("files.{}.file_type_id", index));
                }
            }
            FieldEdit::FileDescription { index, description } => {
                if let Some(file) = self.form.files.get_mut(index) {
                    file.file_description = description;
                    self.errors.remove(&format!("files.{}.file_description", index));
                }
            }
            FieldEdit::FileContent { index, value } => {
                if let Some(file) = self.form.files.get_mut(index) {
                    file.file_attachment = value;
                    self.errors.remove(&format!("files.{}.file_attachment", index));
                }
            }
        }
    }

    /// Resolve every unresolved field of `kind` whose parent matches.
    fn resolve_references(
        &mut self,
        kind: ReferenceKind,
        parent: Option<i64>,
        entries: &[ReferenceEntity],
    ) {
        if !self.initialized {
            return;
        }
        for slot in RefSlot::ALL.into_iter().filter(|s| s.kind() == kind) {
            let current_parent = slot.parent().and_then(|p| self.form.reference(p).id());
            if slot.parent().is_some() && current_parent != parent {
                continue;
            }
            if self.form.reference_mut(slot).resolve_against(entries) {
                let resolved = self.form.reference(slot).clone();
                // Keep the snapshot aligned so cancel-edit does not undo resolution
                if self.pristine.reference(slot).id() == resolved.id() {
                    *self.pristine.reference_mut(slot) = resolved;
                }
            }
        }
    }
}

/// Canonical formatting applied while typing.
fn format_on_entry(field: TextField, value: &str) -> String {
    match field {
        TextField::SssNumber => formatters::format_sss(value),
        TextField::PhilhealthNumber => formatters::format_philhealth(value),
        TextField::PagibigNumber => formatters::format_pagibig(value),
        TextField::TinNumber => formatters::format_tin(value),
        TextField::MobileNumber | TextField::EmergencyContactNumber => formatters::format_mobile(value),
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_employee::{EmployeeId, EmploymentLabel};
    use crate::shared::config::AppConfig;
    use chrono::NaiveDate;
    use serde_json::json;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2024, 3, 15)
    }

    fn state() -> WizardState {
        let config = AppConfig::default();
        WizardState::new(config.wizard, config.uploads)
    }

    fn open(state: &mut WizardState, mode: FormMode, source: RecordSource, record: Option<Value>) -> Vec<WizardEffect> {
        state.dispatch(WizardAction::Open {
            mode,
            source,
            record,
            seed: "s1".into(),
        })
    }

    fn edit(state: &mut WizardState, edit: FieldEdit) {
        state.dispatch(WizardAction::Edit(edit));
    }

    fn text(state: &mut WizardState, field: TextField, value: &str) {
        edit(state, FieldEdit::Text(field, value.into()));
    }

    fn pick(state: &mut WizardState, slot: RefSlot, id: i64) {
        edit(
            state,
            FieldEdit::Reference(slot, ReferenceEntity::new(id, format!("{:?} {}", slot, id)).into()),
        );
    }

    fn next(state: &mut WizardState) {
        state.dispatch(WizardAction::Next { today: today() });
    }

    /// Fill every required field of the current step and advance.
    fn fill_and_advance(state: &mut WizardState) {
        match state.step() {
            FormStep::General => {
                text(state, TextField::FirstName, "Juan");
                text(state, TextField::LastName, "Dela Cruz");
                text(state, TextField::Gender, "Male");
                text(state, TextField::CivilStatus, "Single");
                edit(state, FieldEdit::Date(crate::domain::a001_employee::DateField::BirthDate, Some(d(1995, 6, 1))));
            }
            FormStep::Address => {
                pick(state, RefSlot::Region, 13);
                pick(state, RefSlot::Province, 1339);
                pick(state, RefSlot::Municipality, 133901);
                pick(state, RefSlot::Barangay, 1339010001);
            }
            FormStep::Position => {
                text(state, TextField::PositionTitle, "Accountant");
                pick(state, RefSlot::JobLevel, 2);
                pick(state, RefSlot::Schedule, 1);
                edit(state, FieldEdit::Date(crate::domain::a001_employee::DateField::DateHired, Some(today())));
            }
            FormStep::EmploymentType => {
                edit(
                    state,
                    FieldEdit::EmploymentLabel {
                        index: 0,
                        label: Some(EmploymentLabel::Probationary),
                    },
                );
                edit(
                    state,
                    FieldEdit::EmploymentDate {
                        index: 0,
                        field: EmploymentDateField::End,
                        value: None,
                    },
                );
                edit(
                    state,
                    FieldEdit::EmploymentDate {
                        index: 0,
                        field: EmploymentDateField::Start,
                        value: Some(today()),
                    },
                );
            }
            FormStep::Attainment => {
                pick(state, RefSlot::Attainment, 5);
                text(state, TextField::SchoolName, "PUP");
            }
            FormStep::Contact => text(state, TextField::MobileNumber, "+639171234567"),
            FormStep::Account | FormStep::Files | FormStep::Review => {}
        }
        next(state);
    }

    fn walk_to_review(state: &mut WizardState) {
        for _ in FormStep::ALL {
            if state.step().is_last() {
                break;
            }
            let before = state.step();
            fill_and_advance(state);
            assert_ne!(state.step(), before, "stuck on {:?}: {:?}", before, state.banner());
        }
        assert_eq!(state.step(), FormStep::Review);
    }

    #[test]
    fn test_create_flow_submits_probationary_entry() {
        let mut state = state();
        assert!(open(&mut state, FormMode::Create, RecordSource::New, None).is_empty());
        assert_eq!(state.phase(), WizardPhase::Editing);

        walk_to_review(&mut state);
        assert_eq!(state.form().mobile_number, "917-123-4567");
        assert_eq!(state.form().employment_types[0].end_date, Some(d(2024, 9, 15)));

        let effects = state.dispatch(WizardAction::Submit { today: today() });
        assert_eq!(state.phase(), WizardPhase::Submitting);
        assert!(state.is_locked());
        let [WizardEffect::Submit { target, payload, token }] = effects.as_slice() else {
            panic!("expected a single submit effect, got {:?}", effects);
        };
        assert_eq!(*target, SubmitTarget::CreateEmployee);
        assert!(!payload.contains_key("employment_types[0][regularization_date]"));
        assert!(!payload.contains_key("_method"));
        assert_eq!(
            payload.get("employment_types[0][employment_start_date]"),
            Some(&WireValue::Text("2024-03-15".into()))
        );

        // Refetch strictly before the caller is notified, then the delayed close
        let effects = state.dispatch(WizardAction::SubmitSucceeded { token: *token });
        assert_eq!(
            effects,
            vec![
                WizardEffect::RunRefetch,
                WizardEffect::NotifySaved,
                WizardEffect::ScheduleClose {
                    token: *token,
                    delay_ms: 1200
                },
            ]
        );
        assert_eq!(state.success_message(), Some("Employee registered successfully."));
        state.dispatch(WizardAction::Close);
        assert_eq!(state.phase(), WizardPhase::Success, "close is blocked during the success window");

        state.dispatch(WizardAction::CloseAfterSuccess { token: *token });
        assert_eq!(state.phase(), WizardPhase::Closed);
        assert_eq!(state.form(), &EmployeeForm::default());
    }

    #[test]
    fn test_phone_numbers_typed_key_by_key() {
        let mut state = state();
        open(&mut state, FormMode::Create, RecordSource::New, None);

        for field in [TextField::MobileNumber, TextField::EmergencyContactNumber] {
            for key in "+639171234567".chars() {
                let typed = format!("{}{}", state.form().text(field), key);
                text(&mut state, field, &typed);
            }
            assert_eq!(state.form().text(field), "917-123-4567", "{:?}", field);
        }
    }

    #[test]
    fn test_next_is_gated_and_back_is_not() {
        let mut state = state();
        open(&mut state, FormMode::Create, RecordSource::New, None);
        next(&mut state);
        assert_eq!(state.step(), FormStep::General);
        assert!(state
            .banner()
            .unwrap_or_default()
            .starts_with("General Info: First Name is required"));

        fill_and_advance(&mut state);
        assert_eq!(state.step(), FormStep::Address);
        assert!(state.banner().is_none());

        state.dispatch(WizardAction::Back);
        assert_eq!(state.step(), FormStep::General);
    }

    fn employee_record() -> Value {
        json!({
            "id": 77,
            "general_info": {"first_name": "Maria", "last_name": "Reyes", "birth_date": "1990-02-10"},
            "address": {"region_id": 13, "province": {"id": 1339, "name": "Metro Manila"}},
            "employment_types": [
                {"id": 5, "employment_type_label": "PROBATIONARY",
                 "employment_start_date": "2023-01-02", "employment_end_date": "2023-07-02"}
            ]
        })
    }

    #[test]
    fn test_edit_regular_conversion_blocks_until_regularization_date() {
        let mut state = state();
        let effects = open(
            &mut state,
            FormMode::Edit,
            RecordSource::Employee(EmployeeId(77)),
            None,
        );
        let token = state.token();
        assert_eq!(
            effects,
            vec![WizardEffect::FetchRecord {
                token,
                source: RecordSource::Employee(EmployeeId(77))
            }]
        );
        assert_eq!(state.phase(), WizardPhase::Loading);
        state.dispatch(WizardAction::RecordLoaded {
            token,
            record: employee_record(),
        });
        assert_eq!(state.phase(), WizardPhase::Editing);

        edit(
            &mut state,
            FieldEdit::EmploymentLabel {
                index: 0,
                label: Some(EmploymentLabel::Regular),
            },
        );
        let entry = &state.form().employment_types[0];
        assert_eq!(entry.start_date, None);
        assert_eq!(entry.end_date, None);

        state.dispatch(WizardAction::GoTo(FormStep::Review));
        assert_eq!(state.step(), FormStep::General, "forward jumps need view mode");
        let errors = validate_step(state.form(), FormStep::EmploymentType, today(), &state.uploads);
        assert_eq!(
            errors.get("employment_types.0.regularization_date"),
            Some("Regularization Date is required for REGULAR employment")
        );
    }

    #[test]
    fn test_submit_validates_everything_and_update_uses_patch_override() {
        let mut state = state();
        open(
            &mut state,
            FormMode::Edit,
            RecordSource::Employee(EmployeeId(77)),
            Some(employee_record()),
        );
        walk_to_review(&mut state);
        edit(
            &mut state,
            FieldEdit::EmploymentLabel {
                index: 0,
                label: Some(EmploymentLabel::Regular),
            },
        );
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        assert!(effects.is_empty());
        assert_eq!(state.phase(), WizardPhase::Error);
        assert!(state.errors().get("employment_types.0.regularization_date").is_some());

        edit(
            &mut state,
            FieldEdit::EmploymentDate {
                index: 0,
                field: EmploymentDateField::Regularization,
                value: Some(d(2023, 7, 3)),
            },
        );
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        let [WizardEffect::Submit { target, payload, .. }] = effects.as_slice() else {
            panic!("expected submit, got {:?}", effects);
        };
        assert_eq!(*target, SubmitTarget::UpdateEmployee(EmployeeId(77)));
        assert_eq!(payload.get("_method"), Some(&WireValue::Text("PATCH".into())));
        assert_eq!(payload.get("employment_types[0][id]"), Some(&WireValue::Text("5".into())));
        assert!(!payload.contains_key("employment_types[0][employment_start_date]"));
    }

    #[test]
    fn test_backend_field_error_lands_on_field() {
        let mut state = state();
        open(&mut state, FormMode::Create, RecordSource::New, None);
        walk_to_review(&mut state);
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        let Some(WizardEffect::Submit { token, .. }) = effects.first() else {
            panic!("expected submit");
        };

        let error = SubmissionError::classify(422, r#"{"errors":{"sss_number":["format invalid"]}}"#);
        state.dispatch(WizardAction::SubmitFailed { token: *token, error });
        assert_eq!(state.phase(), WizardPhase::Error);
        assert_eq!(state.errors().get("sss_number"), Some("format invalid"));
        assert_eq!(state.errors().len(), 1);
        assert_eq!(state.banner().as_deref(), Some("Account: format invalid"));
        assert!(!state.is_read_only(), "the form stays editable after a failure");
    }

    #[test]
    fn test_network_failure_keeps_wizard_open() {
        let mut state = state();
        open(&mut state, FormMode::Create, RecordSource::New, None);
        walk_to_review(&mut state);
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        let Some(WizardEffect::Submit { token, .. }) = effects.first() else {
            panic!("expected submit");
        };
        state.dispatch(WizardAction::SubmitFailed {
            token: *token,
            error: SubmissionError::classify(503, ""),
        });
        assert!(state.is_open());
        assert_eq!(state.form().first_name, "Juan");
        assert!(state.failure().map(SubmissionError::is_retryable).unwrap_or(false));

        // A retry goes through again without re-entering anything
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_stale_record_is_ignored() {
        let mut state = state();
        open(&mut state, FormMode::View, RecordSource::Employee(EmployeeId(1)), None);
        let stale = state.token();
        state.dispatch(WizardAction::Close);
        open(&mut state, FormMode::View, RecordSource::Employee(EmployeeId(2)), None);

        state.dispatch(WizardAction::RecordLoaded {
            token: stale,
            record: employee_record(),
        });
        assert_eq!(state.phase(), WizardPhase::Loading);
        assert_eq!(state.form().first_name, "");

        state.dispatch(WizardAction::Close);
        state.dispatch(WizardAction::RecordLoaded {
            token: stale + 1,
            record: employee_record(),
        });
        assert_eq!(state.phase(), WizardPhase::Closed);
    }

    #[test]
    fn test_view_mode_navigation_is_ungated_and_read_only() {
        let mut state = state();
        open(
            &mut state,
            FormMode::View,
            RecordSource::Employee(EmployeeId(77)),
            Some(employee_record()),
        );
        for _ in 0..8 {
            next(&mut state);
        }
        assert_eq!(state.step(), FormStep::Review);
        assert!(state.errors().is_empty());
        state.dispatch(WizardAction::GoTo(FormStep::Address));
        assert_eq!(state.step(), FormStep::Address);

        text(&mut state, TextField::FirstName, "Changed");
        assert_eq!(state.form().first_name, "Maria");
        assert!(state.dispatch(WizardAction::Submit { today: today() }).is_empty());
    }

    #[test]
    fn test_cancel_edit_restores_snapshot_only_when_opened_in_view() {
        let mut state = state();
        open(
            &mut state,
            FormMode::View,
            RecordSource::Employee(EmployeeId(77)),
            Some(employee_record()),
        );
        state.dispatch(WizardAction::EnterEditMode);
        assert_eq!(state.mode(), FormMode::Edit);
        text(&mut state, TextField::FirstName, "Changed");
        state.dispatch(WizardAction::CancelEdit);
        assert_eq!(state.mode(), FormMode::View);
        assert_eq!(state.form().first_name, "Maria");

        open(
            &mut state,
            FormMode::Edit,
            RecordSource::Employee(EmployeeId(77)),
            Some(employee_record()),
        );
        state.dispatch(WizardAction::CancelEdit);
        assert!(!state.is_open());
    }

    #[test]
    fn test_address_cascade_and_reference_resolution() {
        let mut state = state();
        open(
            &mut state,
            FormMode::Edit,
            RecordSource::Employee(EmployeeId(77)),
            Some(employee_record()),
        );
        assert_eq!(state.form().region, RefField::Unresolved(13));
        assert!(state.form().province.is_resolved());
        assert_eq!(state.pending_lookups(), vec![(ReferenceKind::Region, None)]);

        state.dispatch(WizardAction::ReferencesLoaded {
            kind: ReferenceKind::Region,
            parent: None,
            entries: vec![ReferenceEntity::new(13, "NCR"), ReferenceEntity::new(4, "CALABARZON")],
        });
        assert_eq!(state.form().region.display_name(), "NCR");

        pick(&mut state, RefSlot::Region, 4);
        assert!(state.form().province.is_empty());
        assert!(state.form().barangay.is_empty());
    }

    #[test]
    fn test_update_without_identifier_fails_before_network() {
        let mut state = state();
        open(&mut state, FormMode::Edit, RecordSource::New, Some(employee_record()));
        walk_to_review(&mut state);
        let effects = state.dispatch(WizardAction::Submit { today: today() });
        assert!(effects.is_empty());
        assert_eq!(state.failure(), Some(&SubmissionError::MissingIdentifier));
    }
}
