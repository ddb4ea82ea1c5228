//! Backend settings panel

use crate::api::backend::BackendSettings;
use leptos::prelude::*;

#[component]
pub fn SettingsPanel(settings: RwSignal<BackendSettings>) -> impl IntoView {
    let (url, set_url) = signal(settings.get_untracked().url);
    let (key, set_key) = signal(settings.get_untracked().key);
    let (status, set_status) = signal(String::new());

    let on_save = move |_| {
        let next = BackendSettings { url: url.get_untracked(), key: key.get_untracked() };
        match next.save() {
            Ok(()) => {
                settings.set(next);
                set_status.set("Saved".to_string());
            }
            Err(e) => set_status.set(e),
        }
    };

    let on_clear = move |_| {
        BackendSettings::clear();
        set_url.set(String::new());
        set_key.set(String::new());
        settings.set(BackendSettings::default());
        set_status.set("Cleared".to_string());
    };

    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="backend-url">"Backend URL"</label>
                    <input
                        type="url"
                        id="backend-url"
                        placeholder="https://<project>.supabase.co"
                        prop:value=move || url.get()
                        on:input=move |ev| {
                            set_url.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="backend-key">"API key"</label>
                    <input
                        type="password"
                        id="backend-key"
                        placeholder="anon key"
                        prop:value=move || key.get()
                        on:input=move |ev| {
                            set_key.set(event_target_value(&ev));
                        }
                    />
                    <div class="api-actions">
                        <button class="btn btn-primary btn-small" on:click=on_save>
                            "Save"
                        </button>
                        <button class="btn btn-tertiary btn-small" on:click=on_clear>
                            "Clear"
                        </button>
                    </div>
                    <div class="api-key-status">
                        {move || status.get()}
                    </div>
                </div>
            </div>
        </div>
    }
}
