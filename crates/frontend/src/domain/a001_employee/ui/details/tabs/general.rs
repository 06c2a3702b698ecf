//! General tab - name, birth and personal details

use super::super::view_model::EmployeeWizardVm;
use super::fields::{ChoiceSelect, DateInput, TextInput};
use contracts::domain::a001_employee::{DateField, TextField};
use leptos::prelude::*;

const GENDERS: &[&str] = &["Male", "Female"];
const CIVIL_STATUSES: &[&str] = &["Single", "Married", "Widowed", "Separated", "Divorced"];
const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

#[component]
pub fn GeneralTab(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <div class="form-grid">
            <TextInput vm=vm field=TextField::FirstName />
            <TextInput vm=vm field=TextField::MiddleName />
            <TextInput vm=vm field=TextField::LastName />
            <TextInput vm=vm field=TextField::Suffix placeholder="Jr., Sr., III" />
            <DateInput vm=vm field=DateField::BirthDate />
            <TextInput vm=vm field=TextField::BirthPlace />
            <ChoiceSelect vm=vm field=TextField::Gender choices=GENDERS />
            <ChoiceSelect vm=vm field=TextField::CivilStatus choices=CIVIL_STATUSES />
            <TextInput vm=vm field=TextField::Nationality />
            <TextInput vm=vm field=TextField::Religion />
            <ChoiceSelect vm=vm field=TextField::BloodType choices=BLOOD_TYPES />
        </div>
    }
}
