use super::file_store::{use_file_store, FileStore};
use super::model;
use crate::domain::a003_reference_data::{use_reference_data, ReferenceDataService};
use crate::shared::config::app_config;
use crate::shared::date_utils::today;
use contracts::domain::a001_employee::{FileValue, FormMode, FormStep};
use contracts::domain::common::ReferenceKind;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_employee_wizard::{
    EmployeeWizard, FieldEdit, RecordSource, WizardAction, WizardEffect, WizardPhase, WizardState,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;

/// Callbacks supplied by whoever opens the wizard.
#[derive(Clone, Default)]
pub struct WizardHooks {
    /// Run before `on_saved` so the opener sees fresh data once the wizard closes
    pub refetch: Vec<Callback<()>>,
    pub on_saved: Option<Callback<()>>,
}

/// ViewModel for the employee wizard.
///
/// Owns a [`WizardState`] in a signal, forwards UI commands to its reducer and
/// performs the effects the reducer returns.
#[derive(Clone, Copy)]
pub struct EmployeeWizardVm {
    pub state: RwSignal<WizardState>,
    // Memoised views of `state`; components re-render only when these change
    pub is_open: Memo<bool>,
    pub phase: Memo<WizardPhase>,
    pub step: Memo<FormStep>,
    pub mode: Memo<FormMode>,
    pub read_only: Memo<bool>,
    pub locked: Memo<bool>,
    hooks: StoredValue<WizardHooks>,
    /// Lookup lists already handed to the reducer, per session token
    delivered: StoredValue<HashSet<(u64, ReferenceKind, Option<i64>)>>,
    files: FileStore,
    references: ReferenceDataService,
}

impl EmployeeWizardVm {
    pub fn new() -> Self {
        let config = app_config();
        let state = RwSignal::new(WizardState::new(config.wizard, config.uploads.clone()));
        let vm = Self {
            state,
            is_open: Memo::new(move |_| state.with(WizardState::is_open)),
            phase: Memo::new(move |_| state.with(WizardState::phase)),
            step: Memo::new(move |_| state.with(WizardState::step)),
            mode: Memo::new(move |_| state.with(WizardState::mode)),
            read_only: Memo::new(move |_| state.with(WizardState::is_read_only)),
            locked: Memo::new(move |_| state.with(WizardState::is_locked)),
            hooks: StoredValue::new(WizardHooks::default()),
            delivered: StoredValue::new(HashSet::new()),
            files: use_file_store(),
            references: use_reference_data(),
        };
        vm.watch_references();
        vm
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn open(&self, mode: FormMode, source: RecordSource, record: Option<Value>, hooks: WizardHooks) {
        log::info!("[{}] open {:?} {:?}", EmployeeWizard::full_name(), mode, source);
        self.hooks.set_value(hooks);
        self.delivered.update_value(|d| d.clear());
        let seed = Uuid::new_v4().simple().to_string();
        self.dispatch(WizardAction::Open {
            mode,
            source,
            record,
            seed,
        });
    }

    pub fn next(&self) {
        self.dispatch(WizardAction::Next { today: today() });
    }

    pub fn back(&self) {
        self.dispatch(WizardAction::Back);
    }

    pub fn go_to(&self, step: FormStep) {
        self.dispatch(WizardAction::GoTo(step));
    }

    pub fn edit(&self, edit: FieldEdit) {
        self.dispatch(WizardAction::Edit(edit));
    }

    /// Keep a picked browser file and put it into file row `index`.
    pub fn attach_file(&self, index: usize, file: web_sys::File) {
        let uploaded = self.files.insert(file);
        self.edit(FieldEdit::FileContent {
            index,
            value: FileValue::Upload(uploaded),
        });
    }

    pub fn submit(&self) {
        self.dispatch(WizardAction::Submit { today: today() });
    }

    pub fn enter_edit_mode(&self) {
        self.dispatch(WizardAction::EnterEditMode);
    }

    pub fn cancel_edit(&self) {
        self.dispatch(WizardAction::CancelEdit);
    }

    pub fn close(&self) {
        log::info!("[{}] close", EmployeeWizard::full_name());
        self.dispatch(WizardAction::Close);
    }

    /// Feed one action to the reducer and run what it asks for.
    ///
    /// Results that arrive after the owning component is gone find a
    /// disposed signal and are dropped.
    pub fn dispatch(&self, action: WizardAction) {
        let Some((token, step_before)) = self.state.try_with_untracked(|s| (s.token(), s.step()))
        else {
            return;
        };
        if let Some(result_token) = result_token(&action) {
            if result_token != token {
                log::debug!("Ignoring result from wizard session {} (now {})", result_token, token);
            }
        }
        let is_next = matches!(action, WizardAction::Next { .. });

        let Some(effects) = self.state.try_update(|s| s.dispatch(action)) else {
            return;
        };

        self.state.with_untracked(|s| {
            if is_next && s.step() == step_before && !s.mode().is_read_only() {
                log::debug!(
                    "Step '{}' blocked by {} validation error(s)",
                    step_before.title(),
                    s.errors().for_step(step_before).count()
                );
            }
            if !s.is_open() {
                self.files.clear();
            }
        });

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: WizardEffect) {
        let vm = *self;
        match effect {
            WizardEffect::FetchRecord { token, source } => {
                spawn_local(async move {
                    match model::fetch_record(source).await {
                        Ok(record) => vm.dispatch(WizardAction::RecordLoaded { token, record }),
                        Err(e) => {
                            log::warn!("Loading {:?} failed: {}", source, e);
                            vm.dispatch(WizardAction::LoadFailed {
                                token,
                                message: format!("Could not load the record. {}", e),
                            });
                        }
                    }
                });
            }
            WizardEffect::Submit {
                token,
                target,
                payload,
            } => {
                let files = self.files;
                log::info!("Submitting employee form to {}", target.path());
                spawn_local(async move {
                    match model::submit(target, &payload, files).await {
                        Ok(_) => vm.dispatch(WizardAction::SubmitSucceeded { token }),
                        Err(e) => {
                            log::warn!("Submission to {} failed: {}", target.path(), e);
                            vm.dispatch(WizardAction::SubmitFailed {
                                token,
                                error: e.into(),
                            });
                        }
                    }
                });
            }
            WizardEffect::RunRefetch => {
                let refetch = self
                    .hooks
                    .try_with_value(|h| h.refetch.clone())
                    .unwrap_or_default();
                for callback in refetch {
                    callback.run(());
                }
            }
            WizardEffect::NotifySaved => {
                if let Some(callback) = self.hooks.try_with_value(|h| h.on_saved).flatten() {
                    callback.run(());
                }
            }
            WizardEffect::ScheduleClose { token, delay_ms } => {
                spawn_local(async move {
                    TimeoutFuture::new(delay_ms).await;
                    vm.dispatch(WizardAction::CloseAfterSuccess { token });
                });
            }
        }
    }

    /// Resolve reference ids once their lookup list is cached.
    fn watch_references(&self) {
        let vm = *self;
        Effect::new(move || {
            let (token, lookups) = vm.state.with(|s| (s.token(), s.pending_lookups()));
            for (kind, parent) in lookups {
                vm.references.ensure(kind, parent);
                let Some(entries) = vm.references.ready(kind, parent) else {
                    continue;
                };
                let key = (token, kind, parent);
                if vm.delivered.with_value(|d| d.contains(&key)) {
                    continue;
                }
                vm.delivered.update_value(|d| {
                    d.insert(key);
                });
                vm.dispatch(WizardAction::ReferencesLoaded {
                    kind,
                    parent,
                    entries,
                });
            }
        });
    }

    // ------------------------------------------------------------------
    // Derived state for the views
    // ------------------------------------------------------------------

    /// Inline message for a form key (dotted path).
    pub fn error_for(&self, key: impl Into<String>) -> Signal<Option<String>> {
        let state = self.state;
        let key = key.into();
        Memo::new(move |_| state.with(|s| s.errors().get(&key).map(str::to_string))).into()
    }

    pub fn title(&self) -> Memo<String> {
        let state = self.state;
        Memo::new(move |_| {
            state.with(|s| {
                let name = s.form().full_name();
                match s.mode() {
                    FormMode::Create => "New Employee".to_string(),
                    FormMode::Edit if name.is_empty() => "Edit Employee".to_string(),
                    FormMode::Edit => format!("Edit: {}", name),
                    FormMode::View if name.is_empty() => "Employee".to_string(),
                    FormMode::View => name,
                }
            })
        })
    }
}

/// Session token carried by an async result, if the action is one.
fn result_token(action: &WizardAction) -> Option<u64> {
    match action {
        WizardAction::RecordLoaded { token, .. }
        | WizardAction::LoadFailed { token, .. }
        | WizardAction::SubmitSucceeded { token }
        | WizardAction::SubmitFailed { token, .. }
        | WizardAction::CloseAfterSuccess { token } => Some(*token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_result_token() {
        assert_eq!(result_token(&WizardAction::SubmitSucceeded { token: 4 }), Some(4));
        assert_eq!(
            result_token(&WizardAction::RecordLoaded {
                token: 2,
                record: json!({})
            }),
            Some(2)
        );
        assert_eq!(result_token(&WizardAction::Back), None);
    }
}
