use crate::store::prefs::PrefsContext;
use bfp_admin_common::RecordKind;
use leptos::prelude::*;

/// Initials shown when the sidebar is collapsed
fn short_label(kind: RecordKind) -> String {
    kind.label()
        .split_whitespace()
        .filter(|w| w.chars().next().is_some_and(char::is_alphabetic))
        .filter_map(|w| w.chars().next())
        .take(2)
        .collect()
}

#[component]
pub fn Sidebar(active: ReadSignal<RecordKind>, on_select: Callback<RecordKind>) -> impl IntoView {
    let prefs = PrefsContext::current();
    let collapsed = move || prefs.prefs.get().sidebar_collapsed;

    view! {
        <nav class="sidebar" class:collapsed=collapsed>
            <ul>
                {RecordKind::ALL
                    .iter()
                    .copied()
                    .map(|kind| {
                        view! {
                            <li>
                                <button
                                    class="nav-item"
                                    class:active=move || active.get() == kind
                                    title={kind.label()}
                                    on:click=move |_| on_select.run(kind)
                                >
                                    {move || if collapsed() { short_label(kind) } else { kind.label().to_string() }}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label() {
        assert_eq!(short_label(RecordKind::Personnel), "P");
        assert_eq!(short_label(RecordKind::Award), "AC");
        assert_eq!(short_label(RecordKind::LeaveBalance), "LC");
    }
}
