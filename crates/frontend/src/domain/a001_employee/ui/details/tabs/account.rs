//! Account tab - payroll bank account and government ids

use super::super::view_model::EmployeeWizardVm;
use super::fields::{ReferenceSelect, ReferenceSelectProps, TextInput};
use contracts::domain::a001_employee::{RefSlot, TextField};
use leptos::prelude::*;

#[component]
pub fn AccountTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(RefSlot::Bank).build())}
            <TextInput vm=vm field=TextField::AccountNumber />
        </div>
        <h4 class="form-section__title">"Government IDs"</h4>
        <div class="form-grid">
            <TextInput vm=vm field=TextField::SssNumber />
            <TextInput vm=vm field=TextField::PhilhealthNumber />
            <TextInput vm=vm field=TextField::PagibigNumber />
            <TextInput vm=vm field=TextField::TinNumber />
        </div>
    }
}
