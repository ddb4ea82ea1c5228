use bfp_admin_common::{PageButton, PageControls};
use leptos::prelude::*;

#[component]
pub fn Pagination(controls: Signal<PageControls>, on_page: Callback<usize>) -> impl IntoView {
    view! {
        <div class="pagination">
            <span class="page-info">
                {move || {
                    let c = controls.get();
                    format!("{}-{} of {}", c.first_row, c.last_row, c.total_rows)
                }}
            </span>
            <button
                class="btn btn-small"
                disabled=move || controls.get().prev_disabled
                on:click=move |_| on_page.run(controls.get_untracked().page.saturating_sub(1))
            >
                "‹ Prev"
            </button>
            {move || {
                let c = controls.get();
                let disabled = c.buttons_disabled();
                c.buttons
                    .iter()
                    .map(|button| match *button {
                        PageButton::Page(n) => {
                            view! {
                                <button
                                    class="btn btn-small page-btn"
                                    class:active={n == c.page}
                                    disabled=disabled
                                    on:click=move |_| on_page.run(n)
                                >
                                    {n}
                                </button>
                            }
                                .into_any()
                        }
                        PageButton::Ellipsis => view! { <span class="ellipsis">"…"</span> }.into_any(),
                    })
                    .collect_view()
            }}
            <button
                class="btn btn-small"
                disabled=move || controls.get().next_disabled
                on:click=move |_| on_page.run(controls.get_untracked().page + 1)
            >
                "Next ›"
            </button>
        </div>
    }
}
