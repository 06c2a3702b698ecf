use super::super::view_model::EmployeeWizardVm;
use super::fields::{ReferenceSelect, ReferenceSelectProps, TextInput};
use contracts::domain::a001_employee::{RefSlot, TextField};
use leptos::prelude::*;

#[component]
pub fn AttainmentTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::Attainment).build())}
            <TextInput vm=vm field=TextField::SchoolName />
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::Program).build())}
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::Degree).build())}
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::HonorTitle).build())}
            <TextInput vm=vm field=TextField::YearGraduated placeholder="YYYY" />
        </div>
    }
}
