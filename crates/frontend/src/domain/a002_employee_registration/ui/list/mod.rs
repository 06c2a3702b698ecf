pub mod model;
pub mod state;

use self::model::RowAction;
use self::state::create_state;
use crate::domain::a001_employee::ui::details::{EmployeeWizard, EmployeeWizardVm, WizardHooks};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::ui::{Badge, StatusBadge};
use crate::shared::config::app_config;
use crate::shared::date_utils::format_optional;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use contracts::domain::a001_employee::FormMode;
use contracts::domain::a002_employee_registration::{
    RegistrationBucket, RegistrationRow, SubmissionId,
};
use contracts::usecases::u501_employee_wizard::{RecordSource, SubmissionError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Registrations of the current user, one tab per approval bucket.
#[component]
pub fn EmployeeRegistrationList() -> impl IntoView {
    let vm = EmployeeWizardVm::new();
    let active = RwSignal::new(RegistrationBucket::ForApproval);
    // Bumped after any change that may move rows between buckets
    let refresh = RwSignal::new(0u32);

    let open_new = move |_: leptos::ev::MouseEvent| {
        vm.open(
            FormMode::Create,
            RecordSource::New,
            None,
            WizardHooks {
                refetch: vec![Callback::new(move |_| refresh.update(|n| *n += 1))],
                on_saved: Some(Callback::new(move |_| active.set(RegistrationBucket::ForApproval))),
            },
        );
    };

    view! {
        <div class="page registrations">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("users")}
                    <h1 class="page__title">"Employee Registrations"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh.update(|n| *n += 1)
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=open_new>
                        {icon("plus")}
                        " New Employee"
                    </Button>
                </div>
            </div>

            <div class="tabs">
                {RegistrationBucket::ALL
                    .into_iter()
                    .map(|bucket| {
                        view! {
                            <button
                                class=move || {
                                    if active.get() == bucket { "tabs__item tabs__item--active" } else { "tabs__item" }
                                }
                                on:click=move |_| active.set(bucket)
                            >
                                {bucket.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {RegistrationBucket::ALL
                .into_iter()
                .map(|bucket| {
                    view! {
                        <RegistrationBucketList
                            bucket=bucket
                            active=Signal::derive(move || active.get() == bucket)
                            refresh=refresh
                            vm=vm
                        />
                    }
                })
                .collect_view()}

            <EmployeeWizard vm=vm />
        </div>
    }
}

/// One bucket's paginated table. Fetches when first shown and again after
/// every refresh while shown.
#[component]
fn RegistrationBucketList(
    bucket: RegistrationBucket,
    #[prop(into)] active: Signal<bool>,
    refresh: RwSignal<u32>,
    vm: EmployeeWizardVm,
) -> impl IntoView {
    let config = &app_config().list;
    let state = create_state(config.default_page_size);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let busy_row = RwSignal::new(None::<SubmissionId>);
    // Only the latest request may write its rows
    let request_seq = StoredValue::new(0u64);

    let load = move || {
        let Some(query) = state.try_with_untracked(|s| s.query(bucket)) else {
            return;
        };
        request_seq.update_value(|n| *n += 1);
        let request = request_seq.get_value();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = model::fetch_page(&query).await;
            if request_seq.try_with_value(|n| *n) != Some(request) {
                log::debug!("Dropping superseded '{}' list response", bucket.title());
                return;
            }
            match result {
                Ok(page) => {
                    log::info!(
                        "Loaded '{}' page {}: {} of {} rows",
                        bucket.title(),
                        page.current_page,
                        page.rows.len(),
                        page.total
                    );
                    state.try_update(|s| s.apply_page(page));
                }
                Err(e) => {
                    log::warn!("Loading '{}' registrations failed: {}", bucket.title(), e);
                    set_error.try_set(Some(format!("Failed to load registrations. {}", e)));
                }
            }
            set_loading.try_set(false);
        });
    };

    Effect::new(move |prev: Option<u32>| {
        let version = refresh.get();
        let shown = active.get();
        let stale = prev != Some(version) || !state.with_untracked(|s| s.is_loaded);
        if shown && stale {
            load();
        } else if stale {
            // Refetched next time the tab is shown
            state.update_untracked(|s| s.is_loaded = false);
        }
        version
    });

    let go_to_page = move |page: usize| {
        state.update(|s| s.page = page);
        load();
    };

    let change_page_size = move |size: usize| {
        state.update(|s| {
            s.page_size = size;
            s.page = 0;
        });
        load();
    };

    let on_search = Callback::new(move |query: String| {
        state.update(|s| {
            s.search_query = query;
            s.page = 0;
        });
        load();
    });

    let on_dates = Callback::new(move |(from, to): (String, String)| {
        state.update(|s| {
            s.date_from = from;
            s.date_to = to;
            s.page = 0;
        });
        load();
    });

    let open_row = move |id: SubmissionId| {
        vm.open(
            FormMode::View,
            RecordSource::Submission(id),
            None,
            WizardHooks {
                refetch: vec![Callback::new(move |_| refresh.update(|n| *n += 1))],
                on_saved: None,
            },
        );
    };

    let run_action = move |action: RowAction, id: SubmissionId| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(action.confirm_text()).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        busy_row.set(Some(id));
        spawn_local(async move {
            let result = model::run_action(action, id).await;
            busy_row.try_set(None);
            match result {
                Ok(()) => {
                    log::info!("Registration {} {:?} done", id, action);
                    refresh.try_update(|n| *n += 1);
                }
                Err(e) => {
                    log::warn!("Registration {} {:?} failed: {}", id, action, e);
                    set_error.try_set(Some(SubmissionError::from(e).user_message()));
                }
            }
        });
    };

    view! {
        <div class="registrations__bucket" style:display=move || if active.get() { "block" } else { "none" }>
            <div class="filter-panel">
                <Flex gap=FlexGap::Medium align=FlexAlign::End>
                    <div style="flex: 1; max-width: 320px;">
                        <SearchInput
                            value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                            on_change=on_search
                            debounce_ms=config.search_debounce_ms
                            placeholder="Name or position..."
                        />
                    </div>
                    <DateRangePicker
                        date_from=Signal::derive(move || state.with(|s| s.date_from.clone()))
                        date_to=Signal::derive(move || state.with(|s| s.date_to.clone()))
                        on_change=on_dates
                        label="Submitted".to_string()
                    />
                    <Badge variant="primary".to_string()>
                        {move || state.with(|s| s.total_count.to_string())}
                    </Badge>
                </Flex>
                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.page))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages))
                    total_count=Signal::derive(move || state.with(|s| s.total_count))
                    page_size=Signal::derive(move || state.with(|s| s.page_size))
                    on_page_change=Callback::new(go_to_page)
                    on_page_size_change=Callback::new(change_page_size)
                    page_size_options=config.page_size_options.clone()
                    disabled=loading
                />
            </div>

            {move || error.get().map(|err| view! { <div class="alert alert--error">{err}</div> })}

            <div class="table-wrapper">
                <Table attr:style="width: 100%; min-width: 760px;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Employee"</TableHeaderCell>
                            <TableHeaderCell>"Position"</TableHeaderCell>
                            <TableHeaderCell>"Submitted"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>"Remarks"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || state.with(|s| s.rows.clone())
                            key=|row| (row.id, row.approval_status)
                            children=move |row: RegistrationRow| {
                                let id = row.id;
                                let status = row.approval_status;
                                let row_busy = move || busy_row.get() == Some(id);
                                view! {
                                    <TableRow on:click=move |_| open_row(id) attr:style="cursor: pointer;">
                                        <TableCell>
                                            <TableCellLayout truncate=true>{row.employee_name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{row.position_title.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>{format_optional(row.submitted_at)}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <StatusBadge status=status />
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {row.remarks.clone().unwrap_or_else(|| "—".to_string())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <div class="table__actions">
                                                <Show when=move || status.can_resubmit()>
                                                    <button
                                                        class="button button--ghost"
                                                        title="Resubmit"
                                                        disabled=row_busy
                                                        on:click=move |ev| {
                                                            ev.stop_propagation();
                                                            run_action(RowAction::Resubmit, id);
                                                        }
                                                    >
                                                        {icon("send")}
                                                    </button>
                                                </Show>
                                                <button
                                                    class="button button--ghost"
                                                    title="Cancel registration"
                                                    disabled=move || !status.can_cancel() || row_busy()
                                                    on:click=move |ev| {
                                                        ev.stop_propagation();
                                                        run_action(RowAction::Cancel, id);
                                                    }
                                                >
                                                    {icon("ban")}
                                                </button>
                                            </div>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || !loading.get() && state.with(|s| s.is_loaded && s.rows.is_empty())>
                    <div class="table__empty">"No registrations found."</div>
                </Show>
                <Show when=move || loading.get()>
                    <div class="table__loading"><Spinner /></div>
                </Show>
            </div>
        </div>
    }
}
