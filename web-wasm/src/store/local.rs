//! localStorage-backed local store
//!
//! The whole store is one JSON document under a single key, rewritten after
//! every mutation. An unreadable document loads as empty.

use bfp_admin_common::local_store::LocalStore;
use bfp_admin_common::{Error, MemoryStore, Result};
use gloo::storage::{LocalStorage, Storage};
use serde_json::Value;

const STORAGE_KEY: &str = "bfp.local_store";

#[derive(Debug, Default)]
pub struct BrowserStore {
    store: MemoryStore,
}

impl BrowserStore {
    pub fn open() -> Self {
        Self {
            store: LocalStorage::get(STORAGE_KEY).unwrap_or_default(),
        }
    }

    fn persist(&self) -> Result<()> {
        LocalStorage::set(STORAGE_KEY, &self.store).map_err(|e| Error::Config(format!("local storage: {}", e)))
    }
}

impl LocalStore for BrowserStore {
    fn get_all(&self, store: &str) -> Result<Vec<Value>> {
        self.store.get_all(store)
    }

    fn get(&self, store: &str, id: &str) -> Result<Option<Value>> {
        self.store.get(store, id)
    }

    fn insert(&mut self, store: &str, value: Value) -> Result<String> {
        let id = self.store.insert(store, value)?;
        self.persist()?;
        Ok(id)
    }

    fn update(&mut self, store: &str, id: &str, value: Value) -> Result<()> {
        self.store.update(store, id, value)?;
        self.persist()
    }

    fn delete(&mut self, store: &str, id: &str) -> Result<bool> {
        let removed = self.store.delete(store, id)?;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }
}
