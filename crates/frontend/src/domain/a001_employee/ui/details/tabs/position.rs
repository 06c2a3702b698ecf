use super::super::view_model::EmployeeWizardVm;
use super::fields::{DateInput, ReferenceSelect, ReferenceSelectProps, TextInput};
use contracts::domain::a001_employee::{DateField, RefSlot, TextField};
use leptos::prelude::*;

#[component]
pub fn PositionTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            <TextInput vm=vm field=TextField::EmployeeNumber />
            <TextInput vm=vm field=TextField::PositionTitle />
            <TextInput vm=vm field=TextField::Department />
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::JobLevel).build())}
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::Schedule).build())}
            <DateInput vm=vm field=DateField::DateHired />
        </div>
    }
}
