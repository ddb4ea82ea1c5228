//! Header bar

use crate::store::prefs::PrefsContext;
use bfp_admin_common::prefs::Theme;
use leptos::prelude::*;

#[component]
pub fn Header(on_toggle_settings: Callback<()>) -> impl IntoView {
    let prefs = PrefsContext::current();

    view! {
        <header class="header">
            <button class="btn btn-icon" title="Toggle sidebar" on:click=move |_| prefs.toggle_sidebar()>
                "☰"
            </button>
            <h1>"BFP Villanueva - Personnel Administration"</h1>
            <div class="header-actions">
                <button class="btn btn-secondary btn-small" on:click=move |_| prefs.toggle_theme()>
                    {move || match prefs.prefs.get().theme {
                        Theme::Light => "Dark mode",
                        Theme::Dark => "Light mode",
                    }}
                </button>
                <button class="btn btn-secondary btn-small" on:click=move |_| on_toggle_settings.run(())>
                    "Settings"
                </button>
            </div>
        </header>
    }
}
