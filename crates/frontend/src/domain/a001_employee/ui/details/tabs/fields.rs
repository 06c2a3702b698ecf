//! Inputs bound to one form field each: value from the wizard state,
//! edits dispatched back as `FieldEdit`s.

use super::super::view_model::EmployeeWizardVm;
use crate::domain::a003_reference_data::use_reference_data;
use crate::shared::components::ui::{Input, Select};
use crate::shared::date_utils::{from_input_value, to_input_value};
use contracts::domain::a001_employee::schema::{date_required, reference_required, text_rules};
use contracts::domain::a001_employee::{DateField, RefSlot, TextField};
use contracts::domain::common::RefField;
use contracts::usecases::u501_employee_wizard::FieldEdit;
use leptos::prelude::*;

#[component]
pub fn TextInput(
    vm: EmployeeWizardVm,
    field: TextField,
    #[prop(optional)] input_type: Option<&'static str>,
    #[prop(optional)] placeholder: Option<&'static str>,
) -> impl IntoView {
    let state = vm.state;
    let rules = text_rules(field);

    view! {
        <Input
            label=field.label()
            value=Memo::new(move |_| state.with(|s| s.form().text(field).to_string()))
            on_input=Callback::new(move |value| vm.edit(FieldEdit::Text(field, value)))
            error=vm.error_for(field.path())
            disabled=vm.read_only
            required=rules.is_required()
            input_type=input_type.unwrap_or("text").to_string()
            placeholder=placeholder.or(rules.mask).unwrap_or_default().to_string()
            maxlength=rules.max_length.map(|m| m as u32)
        />
    }
}

/// Free-text field restricted to a fixed list of choices.
#[component]
pub fn ChoiceSelect(vm: EmployeeWizardVm, field: TextField, choices: &'static [&'static str]) -> impl IntoView {
    let state = vm.state;
    let options: Vec<(String, String)> = choices
        .iter()
        .map(|c| (c.to_string(), c.to_string()))
        .collect();

    view! {
        <Select
            label=field.label()
            value=Memo::new(move |_| state.with(|s| s.form().text(field).to_string()))
            on_change=Callback::new(move |value| vm.edit(FieldEdit::Text(field, value)))
            options=Signal::stored(options)
            error=vm.error_for(field.path())
            disabled=vm.read_only
            required=text_rules(field).is_required()
        />
    }
}

#[component]
pub fn DateInput(vm: EmployeeWizardVm, field: DateField) -> impl IntoView {
    let state = vm.state;

    view! {
        <Input
            label=field.label()
            input_type="date".to_string()
            value=Memo::new(move |_| state.with(|s| to_input_value(s.form().date(field))))
            on_input=Callback::new(move |value: String| {
                vm.edit(FieldEdit::Date(field, from_input_value(&value)))
            })
            error=vm.error_for(field.path())
            disabled=vm.read_only
            required=date_required(field)
        />
    }
}

/// Dropdown over a cached lookup list.
///
/// Address-chain slots list the children of the selected parent and stay
/// disabled until the parent is chosen.
#[component]
pub fn ReferenceSelect(vm: EmployeeWizardVm, slot: RefSlot) -> impl IntoView {
    let state = vm.state;
    let references = use_reference_data();
    let kind = slot.kind();

    let parent_id = Memo::new(move |_| {
        slot.parent()
            .and_then(|parent| state.with(|s| s.form().reference(parent).id()))
    });
    let waiting_for_parent = move || slot.parent().is_some() && parent_id.get().is_none();
    let read_only = vm.read_only;

    Effect::new(move || {
        let parent = parent_id.get();
        references.ensure(kind, parent);
    });

    let options = Memo::new(move |_| {
        let mut options: Vec<(String, String)> = references
            .ready(kind, parent_id.get())
            .unwrap_or_default()
            .into_iter()
            .map(|e| (e.id.to_string(), e.name))
            .collect();
        // Keep an unresolved stored id selectable until its list arrives
        if let RefField::Unresolved(id) = state.with(|s| s.form().reference(slot).clone()) {
            if !options.iter().any(|(value, _)| *value == id.to_string()) {
                options.push((id.to_string(), format!("#{}", id)));
            }
        }
        options
    });

    let on_change = Callback::new(move |value: String| {
        let selected = value.parse::<i64>().ok().and_then(|id| {
            references
                .ready(kind, parent_id.get_untracked())
                .and_then(|entries| entries.into_iter().find(|e| e.id == id))
                .map(RefField::Resolved)
                .or(Some(RefField::Unresolved(id)))
        });
        vm.edit(FieldEdit::Reference(slot, selected.unwrap_or(RefField::Empty)));
    });

    view! {
        <Select
            label=slot.label()
            value=Memo::new(move |_| {
                state.with(|s| s.form().reference(slot).id().map(|id| id.to_string()).unwrap_or_default())
            })
            on_change=on_change
            options=options
            error=vm.error_for(slot.path())
            disabled=Signal::derive(move || read_only.get() || waiting_for_parent())
            required=reference_required(slot)
            loading=Signal::derive(move || references.is_loading(kind, parent_id.get()))
        />
    }
}
