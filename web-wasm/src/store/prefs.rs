//! Browser storage for UI preferences

use bfp_admin_common::prefs::{KeyValueStore, PrefsStore, UiPrefs};
use gloo::storage::{LocalStorage, SessionStorage, Storage};
use leptos::prelude::*;

/// sessionStorage or localStorage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKv {
    Session,
    Local,
}

impl KeyValueStore for BrowserKv {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserKv::Session => SessionStorage::get(key).ok(),
            BrowserKv::Local => LocalStorage::get(key).ok(),
        }
    }

    fn set(&self, key: &str, value: &str) {
        let result = match self {
            BrowserKv::Session => SessionStorage::set(key, value),
            BrowserKv::Local => LocalStorage::set(key, value),
        };
        if let Err(e) = result {
            gloo::console::warn!(format!("preference {} not saved: {}", key, e));
        }
    }

    fn remove(&self, key: &str) {
        match self {
            BrowserKv::Session => SessionStorage::delete(key),
            BrowserKv::Local => LocalStorage::delete(key),
        }
    }
}

fn prefs_store() -> PrefsStore<BrowserKv, BrowserKv> {
    PrefsStore::new(BrowserKv::Session, BrowserKv::Local)
}

/// Sidebar and theme state shared through context
#[derive(Debug, Clone, Copy)]
pub struct PrefsContext {
    pub prefs: RwSignal<UiPrefs>,
}

impl PrefsContext {
    pub fn init() -> Self {
        Self {
            prefs: RwSignal::new(prefs_store().load()),
        }
    }

    /// The provided context, or a fresh one read from storage.
    pub fn current() -> Self {
        use_context::<PrefsContext>().unwrap_or_else(Self::init)
    }

    pub fn toggle_sidebar(&self) {
        let collapsed = prefs_store().toggle_sidebar();
        self.prefs.update(|p| p.sidebar_collapsed = collapsed);
    }

    pub fn toggle_theme(&self) {
        let theme = prefs_store().toggle_theme();
        self.prefs.update(|p| p.theme = theme);
    }
}
