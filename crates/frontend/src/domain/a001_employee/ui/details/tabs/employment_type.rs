use super::super::view_model::EmployeeWizardVm;
use crate::shared::components::ui::{Input, Select};
use crate::shared::date_utils::{from_input_value, to_input_value};
use crate::shared::icons::icon;
use contracts::domain::a001_employee::schema::employment_date_required;
use contracts::domain::a001_employee::{EmploymentDateField, EmploymentLabel, EmploymentTypeEntry};
use contracts::usecases::u501_employee_wizard::FieldEdit;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn EmploymentTypeTab(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    // Rows are keyed by position and entry id so removals re-index the rows after them
    let rows = Memo::new(move |_| {
        state.with(|s| {
            s.form()
                .employment_types
                .iter()
                .enumerate()
                .map(|(i, e)| (i, e.id.as_key()))
                .collect::<Vec<_>>()
        })
    });
    let list_error = vm.error_for("employment_types");

    view! {
        <div class="employment-types">
            <For
                each=move || rows.get()
                key=|row| row.clone()
                children=move |(index, _)| view! { <EmploymentEntryRow vm=vm index=index /> }
            />
            <Show when=move || rows.with(|r| r.is_empty())>
                <div class="form__empty">"No employment type added yet."</div>
            </Show>
            {move || list_error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            <Show when=move || !vm.read_only.get()>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| vm.edit(FieldEdit::AddEmploymentType)
                >
                    {icon("plus")}
                    " Add Employment Type"
                </Button>
            </Show>
        </div>
    }
}

#[component]
fn EmploymentEntryRow(vm: EmployeeWizardVm, index: usize) -> impl IntoView {
    let state = vm.state;
    let entry = Memo::new(move |_| {
        state.with(|s| s.form().employment_types.get(index).cloned())
    });
    let label = Memo::new(move |_| entry.with(|e| e.as_ref().and_then(|e| e.label)));

    let label_options: Vec<(String, String)> = EmploymentLabel::ALL
        .iter()
        .map(|l| (l.as_str().to_string(), l.as_str().to_string()))
        .collect();

    // Re-rendered on label change only; the required marker depends on the label
    let date_input = move |field: EmploymentDateField| {
        move || {
            label.get().filter(|l| uses_date(*l, field)).map(|l| {
                view! {
                    <Input
                        label=field.label()
                        input_type="date".to_string()
                        value=Memo::new(move |_| {
                            entry.with(|e| to_input_value(e.as_ref().and_then(|e| entry_date(e, field))))
                        })
                        on_input=Callback::new(move |value: String| {
                            vm.edit(FieldEdit::EmploymentDate {
                                index,
                                field,
                                value: from_input_value(&value),
                            })
                        })
                        error=vm.error_for(format!("employment_types.{}.{}", index, field.key()))
                        disabled=vm.read_only
                        required=employment_date_required(l, field)
                    />
                }
            })
        }
    };

    view! {
        <div class="employment-types__row">
            <div class="form-grid">
                <Select
                    label="Employment Type"
                    value=Memo::new(move |_| {
                        label.get().map(|l| l.as_str().to_string()).unwrap_or_default()
                    })
                    on_change=Callback::new(move |value: String| {
                        vm.edit(FieldEdit::EmploymentLabel {
                            index,
                            label: EmploymentLabel::parse(&value),
                        })
                    })
                    options=Signal::stored(label_options)
                    error=vm.error_for(format!("employment_types.{}.employment_type_label", index))
                    disabled=vm.read_only
                    required=true
                />
                {date_input(EmploymentDateField::Start)}
                {date_input(EmploymentDateField::End)}
                {date_input(EmploymentDateField::Regularization)}
            </div>
            <Show when=move || !vm.read_only.get()>
                <button
                    class="button button--ghost employment-types__remove"
                    title="Remove"
                    on:click=move |_| vm.edit(FieldEdit::RemoveEmploymentType(index))
                >
                    {icon("trash")}
                </button>
            </Show>
        </div>
    }
}

fn uses_date(label: EmploymentLabel, field: EmploymentDateField) -> bool {
    match field {
        EmploymentDateField::Start => label.uses_start_date(),
        EmploymentDateField::End => label.uses_end_date(),
        EmploymentDateField::Regularization => label.uses_regularization_date(),
    }
}

fn entry_date(entry: &EmploymentTypeEntry, field: EmploymentDateField) -> Option<chrono::NaiveDate> {
    match field {
        EmploymentDateField::Start => entry.start_date,
        EmploymentDateField::End => entry.end_date,
        EmploymentDateField::Regularization => entry.regularization_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_shows_only_regularization_date() {
        let regular = EmploymentLabel::Regular;
        assert!(uses_date(regular, EmploymentDateField::Regularization));
        assert!(!uses_date(regular, EmploymentDateField::Start));
        assert!(!uses_date(regular, EmploymentDateField::End));

        let probation = EmploymentLabel::Probationary;
        assert!(uses_date(probation, EmploymentDateField::End));
        assert!(!employment_date_required(probation, EmploymentDateField::End));
    }
}
