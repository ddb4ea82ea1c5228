//! Main application component

use crate::api::backend::BackendSettings;
use crate::api::source::DataSource;
use crate::components::{
    header::Header,
    record_list::screen,
    settings_panel::SettingsPanel,
    sidebar::Sidebar,
};
use crate::store::prefs::PrefsContext;
use bfp_admin_common::RecordKind;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // UI preferences, read once here and shared through context
    let prefs = PrefsContext::init();
    provide_context(prefs);

    let settings = RwSignal::new(BackendSettings::load());
    let (kind, set_kind) = signal(RecordKind::Personnel);
    let (offline, set_offline) = signal(false);
    let (show_settings, set_show_settings) = signal(!settings.get_untracked().is_configured());

    Effect::new(move |_| {
        let theme = prefs.prefs.get().theme;
        if let Some(root) = document().document_element() {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                gloo::console::warn!(e);
            }
        }
    });

    let source = Signal::derive(move || DataSource::for_kind(kind.get(), &settings.get(), offline.get()));

    let on_select = Callback::new(move |next: RecordKind| {
        set_offline.set(false);
        set_kind.set(next);
    });

    view! {
        <div class="app" class:sidebar-collapsed=move || prefs.prefs.get().sidebar_collapsed>
            <Header on_toggle_settings=Callback::new(move |_: ()| set_show_settings.update(|s| *s = !*s)) />

            <div class="layout">
                <Sidebar active=kind on_select=on_select />

                <main class="content">
                    <Show when=move || show_settings.get()>
                        <SettingsPanel settings=settings />
                    </Show>

                    <div class="screen-header">
                        <h2>{move || kind.get().label()}</h2>
                        <Show when=move || kind.get().local_store().is_some()>
                            <label class="offline-toggle">
                                <input
                                    type="checkbox"
                                    prop:checked=move || offline.get()
                                    on:change=move |ev| set_offline.set(event_target_checked(&ev))
                                />
                                "Use local store"
                            </label>
                        </Show>
                    </div>

                    {move || screen(kind.get(), source)}
                </main>
            </div>
        </div>
    }
}
