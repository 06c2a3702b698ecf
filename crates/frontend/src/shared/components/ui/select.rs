use leptos::prelude::*;

/// Labelled select with an empty placeholder option and an inline error line
#[component]
pub fn Select(
    #[prop(into)]
    label: String,
    /// Current value; empty selects the placeholder
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    /// Options: Vec of (value, label) tuples
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    #[prop(optional, into)]
    error: Signal<Option<String>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    #[prop(optional)]
    required: bool,
    /// Shown while options are still loading
    #[prop(optional, into)]
    loading: Signal<bool>,
) -> impl IntoView {
    let has_error = move || error.with(|e| e.is_some());

    view! {
        <div class="form__group">
            <label class="form__label">
                {label}
                {required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            <select
                class=move || if has_error() { "form__select form__select--invalid" } else { "form__select" }
                disabled=move || disabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
                prop:value=move || value.get()
            >
                <option value="" selected=move || value.with(|v| v.is_empty())>
                    {move || if loading.get() { "Loading..." } else { "Select..." }}
                </option>
                <For
                    each=move || options.get()
                    key=|(val, _)| val.clone()
                    children=move |(val, label)| {
                        let val_clone = val.clone();
                        let is_selected = move || value.with(|v| *v == val_clone);
                        view! {
                            <option value=val selected=is_selected>
                                {label}
                            </option>
                        }
                    }
                />
            </select>
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
        </div>
    }
}
