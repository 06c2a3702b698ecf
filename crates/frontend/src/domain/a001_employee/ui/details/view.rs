use super::tabs::{
    AccountTab, AddressTab, AttainmentTab, ContactTab, EmploymentTypeTab, FilesTab, GeneralTab,
    PositionTab, ReviewTab,
};
use super::view_model::EmployeeWizardVm;
use crate::shared::components::ui::Badge;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a001_employee::{FormMode, FormStep};
use contracts::usecases::u501_employee_wizard::WizardPhase;
use leptos::prelude::*;
use thaw::*;

/// Nine-step employee wizard, shown while a session is open.
#[component]
pub fn EmployeeWizard(vm: EmployeeWizardVm) -> impl IntoView {
    view! {
        <Show when=move || vm.is_open.get()>
            <ModalFrame
                on_close=Callback::new(move |_| vm.close())
                close_blocked=vm.locked
                modal_class="wizard".to_string()
            >
                <WizardHeader vm=vm />
                <WizardStepper vm=vm />
                <WizardBanner vm=vm />
                <WizardBody vm=vm />
                <WizardFooter vm=vm />
            </ModalFrame>
        </Show>
    }
}

#[component]
fn WizardHeader(vm: EmployeeWizardVm) -> impl IntoView {
    let title = vm.title();

    view! {
        <div class="wizard__header">
            <div class="wizard__title">
                {icon("user-plus")}
                <h3>{move || title.get()}</h3>
                {move || {
                    let (variant, text) = match vm.mode.get() {
                        FormMode::Create => ("primary", "New"),
                        FormMode::Edit => ("warning", "Editing"),
                        FormMode::View => ("neutral", "View"),
                    };
                    view! { <Badge variant=variant.to_string()>{text}</Badge> }
                }}
            </div>
            <span class="wizard__progress">
                {move || {
                    let step = vm.step.get();
                    format!("Step {} of {}: {}", step.index() + 1, FormStep::ALL.len(), step.title())
                }}
            </span>
            <button
                class="button button--ghost wizard__close"
                title="Close"
                disabled=move || vm.locked.get()
                on:click=move |_| vm.close()
            >
                {icon("x")}
            </button>
        </div>
    }
}

#[component]
fn WizardStepper(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;

    view! {
        <ol class="wizard__steps">
            {FormStep::ALL
                .into_iter()
                .map(|step| {
                    let has_errors = Memo::new(move |_| {
                        state.with(|s| s.errors().for_step(step).next().is_some())
                    });
                    let class = move || {
                        let current = vm.step.get();
                        let mut class = String::from("wizard__step");
                        if step == current {
                            class.push_str(" wizard__step--active");
                        } else if step < current {
                            class.push_str(" wizard__step--done");
                        }
                        if has_errors.get() {
                            class.push_str(" wizard__step--invalid");
                        }
                        class
                    };
                    // Forward jumps only in view mode; the reducer enforces the same rule
                    let reachable = move || vm.read_only.get() || step < vm.step.get();
                    view! {
                        <li class=class>
                            <button
                                class="wizard__step-button"
                                disabled=move || !reachable() || vm.locked.get()
                                on:click=move |_| vm.go_to(step)
                            >
                                <span class="wizard__step-index">{step.index() + 1}</span>
                                <span class="wizard__step-title">{step.title()}</span>
                            </button>
                        </li>
                    }
                })
                .collect_view()}
        </ol>
    }
}

#[component]
fn WizardBanner(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    let success = Memo::new(move |_| state.with(|s| s.success_message()));
    let banner = Memo::new(move |_| state.with(|s| s.banner()));

    view! {
        {move || {
            if let Some(message) = success.get() {
                Some(view! {
                    <div class="wizard__banner wizard__banner--success">
                        {icon("check")}
                        {message}
                    </div>
                }.into_any())
            } else {
                banner.get().map(|message| view! {
                    <div class="wizard__banner wizard__banner--error">{message}</div>
                }.into_any())
            }
        }}
    }
}

#[component]
fn WizardBody(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    let load_failed = Memo::new(move |_| state.with(|s| s.load_failed()));
    let loading = Memo::new(move |_| {
        matches!(vm.phase.get(), WizardPhase::Loading | WizardPhase::Initializing)
    });

    view! {
        <div class="wizard__body">
            {move || {
                if loading.get() {
                    view! {
                        <div class="wizard__loading">
                            <Spinner />
                            <span>"Loading record..."</span>
                        </div>
                    }
                    .into_any()
                } else if load_failed.get() {
                    view! {
                        <div class="wizard__load-failed">
                            <p>"The record could not be loaded."</p>
                            <Button on_click=move |_| vm.close()>"Close"</Button>
                        </div>
                    }
                    .into_any()
                } else {
                    view! { <StepContent vm=vm /> }.into_any()
                }
            }}
        </div>
    }
}

#[component]
fn StepContent(vm: EmployeeWizardVm) -> impl IntoView {
    move || match vm.step.get() {
        FormStep::General => view! { <GeneralTab vm=vm /> }.into_any(),
        FormStep::Address => view! { <AddressTab vm=vm /> }.into_any(),
        FormStep::Position => view! { <PositionTab vm=vm /> }.into_any(),
        FormStep::EmploymentType => view! { <EmploymentTypeTab vm=vm /> }.into_any(),
        FormStep::Attainment => view! { <AttainmentTab vm=vm /> }.into_any(),
        FormStep::Account => view! { <AccountTab vm=vm /> }.into_any(),
        FormStep::Contact => view! { <ContactTab vm=vm /> }.into_any(),
        FormStep::Files => view! { <FilesTab vm=vm /> }.into_any(),
        FormStep::Review => view! { <ReviewTab vm=vm /> }.into_any(),
    }
}

#[component]
fn WizardFooter(vm: EmployeeWizardVm) -> impl IntoView {
    let state = vm.state;
    let can_cancel_edit = Memo::new(move |_| state.with(|s| s.can_cancel_edit()));
    let submitting = Memo::new(move |_| vm.phase.get() == WizardPhase::Submitting);
    let is_view = move || vm.mode.get() == FormMode::View;
    let is_first = move || vm.step.get() == FormStep::FIRST;
    let is_last = move || vm.step.get().is_last();
    let busy = move || vm.locked.get() || !matches!(vm.phase.get(), WizardPhase::Editing | WizardPhase::Error);

    let submit_label = move || match vm.mode.get() {
        FormMode::Create => "Register Employee",
        _ => "Save Changes",
    };

    view! {
        <div class="wizard__footer">
            <div class="wizard__footer-left">
                <Show when=is_view>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(busy)
                        on_click=move |_| vm.enter_edit_mode()
                    >
                        {icon("edit")}
                        " Edit"
                    </Button>
                </Show>
                <Show when=move || can_cancel_edit.get()>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        disabled=Signal::derive(busy)
                        on_click=move |_| vm.cancel_edit()
                    >
                        "Cancel Edit"
                    </Button>
                </Show>
            </div>
            <div class="wizard__footer-right">
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || vm.locked.get())
                    on_click=move |_| vm.close()
                >
                    "Close"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || is_first() || busy())
                    on_click=move |_| vm.back()
                >
                    {icon("chevron-left")}
                    " Back"
                </Button>
                <Show
                    when=move || is_last() && !is_view()
                    fallback=move || view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || is_last() || busy())
                            on_click=move |_| vm.next()
                        >
                            "Next "
                            {icon("chevron-right")}
                        </Button>
                    }
                >
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(busy)
                        on_click=move |_| vm.submit()
                    >
                        {icon("send")}
                        {move || if submitting.get() { " Saving...".to_string() } else { format!(" {}", submit_label()) }}
                    </Button>
                </Show>
            </div>
        </div>
    }
}
