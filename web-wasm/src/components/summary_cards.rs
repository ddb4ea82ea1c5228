use bfp_admin_common::SummaryCount;
use leptos::prelude::*;

/// Aggregate counts over the unfiltered collection. Clicking a card makes it
/// the active quick filter.
#[component]
pub fn SummaryCards(
    counts: Signal<Vec<SummaryCount>>,
    active: Signal<String>,
    on_select: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="summary-cards">
            {move || {
                let active = active.get();
                counts
                    .get()
                    .into_iter()
                    .map(|card| {
                        let is_active = active.eq_ignore_ascii_case(card.key);
                        view! {
                            <button
                                class="summary-card"
                                class:active=is_active
                                on:click=move |_| on_select.run(card.key.to_string())
                            >
                                <span class="summary-label">{card.label}</span>
                                <span class="summary-count">{card.count}</span>
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
