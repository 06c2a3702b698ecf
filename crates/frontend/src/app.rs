use crate::domain::a001_employee::ui::details::FileStore;
use crate::domain::a002_employee_registration::ui::list::EmployeeRegistrationList;
use crate::domain::a003_reference_data::ReferenceDataService;
use crate::shared::config::app_config;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = app_config();
    log::info!(
        "Employee registration UI started (api port {}, prefix {})",
        config.api.port,
        config.api.prefix
    );

    // Lookup lists shared by every open form
    provide_context(ReferenceDataService::new());

    // Browser files picked in the wizard, keyed for the multipart encoder
    provide_context(FileStore::new());

    view! {
        <main class="app">
            <EmployeeRegistrationList />
        </main>
    }
}
