use super::super::view_model::EmployeeWizardVm;
use super::fields::TextInput;
use contracts::domain::a001_employee::TextField;
use leptos::prelude::*;

#[component]
pub fn ContactTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            <TextInput vm=vm field=TextField::Email input_type="email" />
            <TextInput vm=vm field=TextField::MobileNumber input_type="tel" />
            <TextInput vm=vm field=TextField::TelephoneNumber input_type="tel" />
        </div>
        <h4 class="form-section__title">"Emergency Contact"</h4>
        <div class="form-grid">
            <TextInput vm=vm field=TextField::EmergencyContactName />
            <TextInput vm=vm field=TextField::EmergencyContactRelationship />
            <TextInput vm=vm field=TextField::EmergencyContactNumber input_type="tel" />
        </div>
    }
}
