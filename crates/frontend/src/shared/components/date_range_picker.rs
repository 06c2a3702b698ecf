use crate::shared::date_utils::today;
use chrono::{Datelike, Months, NaiveDate};
use leptos::prelude::*;
use thaw::*;

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date.with_day(1).unwrap_or(date);
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (start, end)
}

/// Submission-date filter: two native date inputs plus quick ranges.
///
/// Values travel as `yyyy-mm-dd`; an empty string means "unbounded".
#[component]
pub fn DateRangePicker(
    #[prop(into)]
    date_from: Signal<String>,

    #[prop(into)]
    date_to: Signal<String>,

    /// Receives (from, to)
    on_change: Callback<(String, String)>,

    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let on_from_change = move |new_from: String| {
        on_change.run((new_from, date_to.get_untracked()));
    };

    let on_to_change = move |new_to: String| {
        on_change.run((date_from.get_untracked(), new_to));
    };

    let on_current_month = move |_| {
        let (start, end) = month_bounds(today());
        on_change.run((
            start.format("%Y-%m-%d").to_string(),
            end.format("%Y-%m-%d").to_string(),
        ));
    };

    let on_clear = move |_| on_change.run((String::new(), String::new()));

    view! {
        <div class="date-range-picker">
            {label.map(|l| view! { <Label>{l}</Label> })}
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || date_from.get()
                    on:change=move |ev| on_from_change(event_target_value(&ev))
                />
                <span>"–"</span>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=move || date_to.get()
                    on:change=move |ev| on_to_change(event_target_value(&ev))
                />
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_current_month>
                    "This month"
                </Button>
                <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_clear>
                    "Any date"
                </Button>
            </Flex>
        </div>
    }
}
