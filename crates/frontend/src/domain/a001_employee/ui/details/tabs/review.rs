use super::super::view_model::EmployeeWizardVm;
use crate::domain::a003_reference_data::use_reference_data;
use crate::shared::date_utils::format_optional;
use contracts::domain::a001_employee::{DateField, EmployeeForm, FormStep, RefSlot, TextField};
use contracts::domain::common::{ReferenceEntity, ReferenceKind};
use leptos::prelude::*;

type Section = (FormStep, Vec<(String, String)>);

/// Read-only summary of every step, in wizard order.
pub fn review_sections(form: &EmployeeForm, file_types: &[ReferenceEntity]) -> Vec<Section> {
    let mut sections: Vec<Section> = FormStep::ALL
        .iter()
        .filter(|step| !step.is_last())
        .map(|step| (*step, Vec::new()))
        .collect();
    let mut push = |step: FormStep, label: String, value: String| {
        if let Some((_, rows)) = sections.iter_mut().find(|(s, _)| *s == step) {
            rows.push((label, value));
        }
    };

    for field in TextField::ALL {
        push(field.step(), field.label().to_string(), form.text(field).to_string());
    }
    for field in DateField::ALL {
        push(field.step(), field.label().to_string(), format_optional(form.date(field)));
    }
    for slot in RefSlot::ALL {
        push(slot.step(), slot.label().to_string(), form.reference(slot).display_name());
    }

    for (i, entry) in form.employment_types.iter().enumerate() {
        let label = entry.label.map(|l| l.as_str()).unwrap_or("Not set");
        let dates = match entry.label {
            Some(l) if l.uses_regularization_date() => {
                format!("regularized {}", format_optional(entry.regularization_date))
            }
            _ => format!(
                "{} to {}",
                format_optional(entry.start_date),
                format_optional(entry.end_date)
            ),
        };
        push(
            FormStep::EmploymentType,
            format!("Employment Type {}", i + 1),
            format!("{}, {}", label, dates),
        );
    }

    for (i, file) in form.files.iter().enumerate() {
        let file_type = file
            .file_type_id
            .map(|id| {
                file_types
                    .iter()
                    .find(|t| t.id == id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .unwrap_or_default();
        let name = file.file_attachment.display_name();
        let value = [file_type.as_str(), name.as_str(), file.file_description.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ");
        push(FormStep::Files, format!("File {}", i + 1), value);
    }

    sections
}

#[component]
pub fn ReviewTab(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    let references = use_reference_data();
    Effect::new(move || references.ensure(ReferenceKind::FileType, None));

    let sections = move || {
        let file_types = references.ready(ReferenceKind::FileType, None).unwrap_or_default();
        state.with(|s| review_sections(s.form(), &file_types))
    };

    view! {
        <div class="review">
            {move || {
                sections()
                    .into_iter()
                    .map(|(step, rows)| {
                        let error_count = state.with(|s| s.errors().for_step(step).count());
                        view! {
                            <section class="review__section">
                                <div class="review__header">
                                    <h4 class="review__title">{step.title()}</h4>
                                    {(error_count > 0).then(|| view! {
                                        <span class="review__errors">
                                            {format!("{} issue(s)", error_count)}
                                        </span>
                                    })}
                                    <button class="button button--link" on:click=move |_| vm.go_to(step)>
                                        "Show"
                                    </button>
                                </div>
                                <dl class="review__list">
                                    {rows
                                        .into_iter()
                                        .map(|(label, value)| {
                                            let value = if value.trim().is_empty() { "—".to_string() } else { value };
                                            view! {
                                                <dt>{label}</dt>
                                                <dd>{value}</dd>
                                            }
                                        })
                                        .collect_view()}
                                </dl>
                            </section>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_employee::{
        EmploymentLabel, EmploymentTypeEntry, EntryId, FileAttachment, FileValue,
    };
    use contracts::domain::common::RefField;

    #[test]
    fn test_review_sections_cover_all_steps_but_review() {
        let sections = review_sections(&EmployeeForm::default(), &[]);
        assert_eq!(sections.len(), FormStep::ALL.len() - 1);
        assert!(sections.iter().all(|(step, _)| *step != FormStep::Review));
    }

    #[test]
    fn test_review_values() {
        let form = EmployeeForm {
            first_name: "Ana".into(),
            region: RefField::Unresolved(7),
            employment_types: vec![EmploymentTypeEntry {
                label: Some(EmploymentLabel::Regular),
                ..EmploymentTypeEntry::new(EntryId::Server(3))
            }],
            files: vec![FileAttachment {
                file_type_id: Some(2),
                file_description: "Signed contract".into(),
                file_attachment: FileValue::Stored {
                    marker: "uploads/contract.pdf".into(),
                },
                ..FileAttachment::default()
            }],
            ..EmployeeForm::default()
        };
        let sections = review_sections(&form, &[ReferenceEntity::new(2, "Contract")]);
        let rows = |step: FormStep| {
            sections
                .iter()
                .find(|(s, _)| *s == step)
                .map(|(_, rows)| rows.clone())
                .unwrap()
        };

        assert!(rows(FormStep::General).contains(&("First Name".into(), "Ana".into())));
        assert!(rows(FormStep::Address).contains(&("Region".into(), "#7".into())));
        assert_eq!(rows(FormStep::EmploymentType)[0].1, "REGULAR, regularized —");
        assert_eq!(rows(FormStep::Files)[0].1, "Contract · contract.pdf · Signed contract");
    }
}
