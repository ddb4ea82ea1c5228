//! UI preferences
//!
//! Sidebar state lives in per-session storage, the theme in per-device
//! storage. Both go through `KeyValueStore` so the browser storages and a
//! plain map are interchangeable.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const SIDEBAR_KEY: &str = "bfp.sidebar_collapsed";
pub const THEME_KEY: &str = "bfp.theme";

/// String key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

/// Snapshot of the preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiPrefs {
    pub sidebar_collapsed: bool,
    pub theme: Theme,
}

/// Reads and toggles preferences, writing through to storage.
pub struct PrefsStore<S: KeyValueStore, L: KeyValueStore> {
    session: S,
    local: L,
}

impl<S: KeyValueStore, L: KeyValueStore> PrefsStore<S, L> {
    pub fn new(session: S, local: L) -> Self {
        Self { session, local }
    }

    /// Unreadable stored values fall back to defaults.
    pub fn load(&self) -> UiPrefs {
        UiPrefs {
            sidebar_collapsed: self.session.get(SIDEBAR_KEY).as_deref() == Some("true"),
            theme: self
                .local
                .get(THEME_KEY)
                .and_then(|t| t.parse().ok())
                .unwrap_or_default(),
        }
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.session.set(SIDEBAR_KEY, if collapsed { "true" } else { "false" });
    }

    pub fn toggle_sidebar(&self) -> bool {
        let next = !self.load().sidebar_collapsed;
        self.set_sidebar_collapsed(next);
        next
    }

    pub fn set_theme(&self, theme: Theme) {
        self.local.set(THEME_KEY, theme.as_str());
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.load().theme.toggled();
        self.set_theme(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> PrefsStore<MemoryKv, MemoryKv> {
        PrefsStore::new(MemoryKv::default(), MemoryKv::default())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(store().load(), UiPrefs { sidebar_collapsed: false, theme: Theme::Light });
    }

    #[test]
    fn test_toggles_persist() {
        let prefs = store();
        assert!(prefs.toggle_sidebar());
        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(prefs.load(), UiPrefs { sidebar_collapsed: true, theme: Theme::Dark });
        assert!(!prefs.toggle_sidebar());
        assert_eq!(prefs.toggle_theme(), Theme::Light);
    }

    #[test]
    fn test_theme_and_sidebar_use_separate_storages() {
        let prefs = store();
        prefs.set_theme(Theme::Dark);
        prefs.set_sidebar_collapsed(true);
        assert_eq!(prefs.local.get(THEME_KEY).as_deref(), Some("dark"));
        assert!(prefs.local.get(SIDEBAR_KEY).is_none());
        assert_eq!(prefs.session.get(SIDEBAR_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_garbage_theme_falls_back() {
        let prefs = store();
        prefs.local.set(THEME_KEY, "sepia");
        assert_eq!(prefs.load().theme, Theme::Light);
        assert_eq!("DARK".parse::<Theme>(), Ok(Theme::Dark));
    }
}
