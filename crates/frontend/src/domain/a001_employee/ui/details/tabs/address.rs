use super::super::view_model::EmployeeWizardVm;
use super::fields::{ReferenceSelect, ReferenceSelectProps, TextInput};
use contracts::domain::a001_employee::{RefSlot, TextField};
use leptos::prelude::*;

/// Address tab. Picking a region (or any level) clears the levels below it.
#[component]
pub fn AddressTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            {RefSlot::ADDRESS_CHAIN
                .into_iter()
                .map(|slot| view! { {ReferenceSelect(ReferenceSelectProps::builder().vm(vm).slot(slot).build())} })
                .collect_view()}
            <TextInput vm=vm field=TextField::Street />
            <TextInput vm=vm field=TextField::ZipCode />
        </div>
    }
}
