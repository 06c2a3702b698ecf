use super::super::view_model::EmployeeWizardVm;
use crate::domain::a003_reference_data::use_reference_data;
use crate::shared::components::ui::{Input, Select};
use crate::shared::config::app_config;
use crate::shared::icons::icon;
use contracts::domain::common::ReferenceKind;
use contracts::usecases::u501_employee_wizard::FieldEdit;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn FilesTab(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    let count = Memo::new(move |_| state.with(|s| s.form().files.len()));
    let uploads = &app_config().uploads;
    let hint = format!(
        "Allowed: {}. Max {} MB per file.",
        uploads.allowed_extensions.join(", "),
        uploads.max_file_size_bytes / (1024 * 1024)
    );

    view! {
        <div class="files">
            <div class="files__hint">{hint}</div>
            // Row data is read by index, so rows can be keyed by position
            <For
                each=move || 0..count.get()
                key=|index| *index
                children=move |index| view! { <FileRow vm=vm index=index /> }
            />
            <Show when=move || count.get() == 0>
                <div class="form__empty">"No files attached."</div>
            </Show>
            <Show when=move || !vm.read_only.get()>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| vm.edit(FieldEdit::AddFile)>
                    {icon("paperclip")}
                    " Add File"
                </Button>
            </Show>
        </div>
    }
}

#[component]
fn FileRow(vm: EmployeeWizardVm, index: usize) -> impl IntoView {
    let state = vm.state;
    let references = use_reference_data();
    let row = Memo::new(move |_| {
        state.with(|s| s.form().files.get(index).cloned().unwrap_or_default())
    });
    let key = move |field: &str| format!("files.{}.{}", index, field);
    let attachment_error = vm.error_for(key("file_attachment"));
    let accept = accept_attribute(&app_config().uploads.allowed_extensions);

    Effect::new(move || references.ensure(ReferenceKind::FileType, None));
    let file_types = Memo::new(move |_| {
        references
            .ready(ReferenceKind::FileType, None)
            .unwrap_or_default()
            .into_iter()
            .map(|e| (e.id.to_string(), e.name))
            .collect::<Vec<_>>()
    });

    let on_pick = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|list| list.item(0)) {
            vm.attach_file(index, file);
        }
        // Allow picking the same file again after a removal
        input.set_value("");
    };

    view! {
        <div class="files__row">
            <div class="form-grid">
                <Select
                    label="File Type"
                    value=Memo::new(move |_| {
                        row.with(|r| r.file_type_id.map(|id| id.to_string()).unwrap_or_default())
                    })
                    on_change=Callback::new(move |value: String| {
                        vm.edit(FieldEdit::FileType {
                            index,
                            file_type_id: value.parse().ok(),
                        })
                    })
                    options=file_types
                    error=vm.error_for(key("file_type_id"))
                    disabled=vm.read_only
                    loading=Signal::derive(move || references.is_loading(ReferenceKind::FileType, None))
                />
                <Input
                    label="Description"
                    value=Memo::new(move |_| row.with(|r| r.file_description.clone()))
                    on_input=Callback::new(move |description: String| {
                        vm.edit(FieldEdit::FileDescription { index, description })
                    })
                    error=vm.error_for(key("file_description"))
                    disabled=vm.read_only
                    maxlength=255u32
                />
                <div class="form__group">
                    <label class="form__label">"File"</label>
                    <div class="files__picker">
                        <span class="files__name">
                            {move || {
                                let name = row.with(|r| r.file_attachment.display_name());
                                if name.is_empty() { "No file chosen".to_string() } else { name }
                            }}
                        </span>
                        <Show when=move || !vm.read_only.get()>
                            <input
                                type="file"
                                class="files__input"
                                accept=accept.clone()
                                on:change=on_pick
                            />
                        </Show>
                    </div>
                    {move || attachment_error.get().map(|e| view! { <div class="form__error">{e}</div> })}
                </div>
            </div>
            <Show when=move || !vm.read_only.get()>
                <button
                    class="button button--ghost files__remove"
                    title="Remove"
                    on:click=move |_| vm.edit(FieldEdit::RemoveFile(index))
                >
                    {icon("trash")}
                </button>
            </Show>
        </div>
    }
}

/// `accept` attribute for the file picker: `.pdf,.jpg,...`
fn accept_attribute(extensions: &[String]) -> String {
    extensions
        .iter()
        .map(|ext| format!(".{}", ext.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_attribute() {
        let extensions = vec!["pdf".to_string(), ".png".to_string()];
        assert_eq!(accept_attribute(&extensions), ".pdf,.png");
        assert_eq!(accept_attribute(&[]), "");
    }
}
