use crate::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const URL_ENV: &str = "BFP_BACKEND_URL";
pub const KEY_ENV: &str = "BFP_BACKEND_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Backend Service base URL, e.g. https://<project>.supabase.co
    pub backend_url: Option<String>,
    /// Anon / service key sent as `apikey` and bearer token
    pub api_key: Option<String>,
    /// Folder holding the local store file; current folder when unset
    pub local_store_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Missing file means defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| AdminError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("bfp-admin").join("config.json"))
    }

    /// Base URL without trailing slash. The environment wins over the file.
    pub fn get_backend_url(&self) -> Result<String> {
        let url = std::env::var(URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.backend_url.clone())
            .ok_or(AdminError::MissingBackendUrl)?;
        Ok(url.trim().trim_end_matches('/').to_string())
    }

    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(KEY_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }

    pub fn local_store_dir(&self) -> PathBuf {
        self.local_store_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bfp-admin").join("config.json");
        let config = Config {
            backend_url: Some("https://example.supabase.co/".into()),
            api_key: Some("anon".into()),
            local_store_dir: None,
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"api_key":"k"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert!(config.backend_url.is_none());
        assert_eq!(config.local_store_dir(), PathBuf::from("."));
    }
}
