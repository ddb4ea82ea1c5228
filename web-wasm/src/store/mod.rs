//! Browser storage

pub mod local;
pub mod prefs;
