//! File-backed local store
//!
//! The embedded store lives in one JSON file in the configured folder. Every
//! mutation is written through. A missing, unreadable or older-version file
//! loads as an empty store.

use crate::error::Result;
use bfp_admin_common::local_store::LocalStore;
use bfp_admin_common::MemoryStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

pub const STORE_FILE_NAME: &str = ".bfp-local-store.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    store: MemoryStore,
}

impl StoreFile {
    const CURRENT_VERSION: u32 = 1;
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    store: MemoryStore,
}

impl FileStore {
    pub fn store_path(folder: &Path) -> PathBuf {
        folder.join(STORE_FILE_NAME)
    }

    pub fn open(folder: &Path) -> Self {
        let path = Self::store_path(folder);
        let store = Self::read(&path).unwrap_or_default();
        Self { path, store }
    }

    fn read(path: &Path) -> Option<MemoryStore> {
        if !path.exists() {
            return None;
        }
        let file = File::open(path).ok()?;
        match serde_json::from_reader::<_, StoreFile>(BufReader::new(file)) {
            Ok(file) if file.version == StoreFile::CURRENT_VERSION => Some(file.store),
            Ok(file) => {
                tracing::warn!(found = file.version, "local store version mismatch, starting empty");
                None
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "local store unreadable, starting empty");
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        let contents = StoreFile { version: StoreFile::CURRENT_VERSION, store: self.store.clone() };
        serde_json::to_writer_pretty(BufWriter::new(file), &contents)?;
        Ok(())
    }

    /// Remove the file. `false` when there was none.
    pub fn clear(folder: &Path) -> Result<bool> {
        let path = Self::store_path(folder);
        if path.exists() {
            std::fs::remove_file(path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn persist(&self) -> bfp_admin_common::Result<()> {
        self.save().map_err(|e| match e {
            crate::error::AdminError::Io(io) => bfp_admin_common::Error::Io(io),
            other => bfp_admin_common::Error::Config(other.to_string()),
        })
    }
}

impl LocalStore for FileStore {
    fn get_all(&self, store: &str) -> bfp_admin_common::Result<Vec<Value>> {
        self.store.get_all(store)
    }

    fn get(&self, store: &str, id: &str) -> bfp_admin_common::Result<Option<Value>> {
        self.store.get(store, id)
    }

    fn insert(&mut self, store: &str, value: Value) -> bfp_admin_common::Result<String> {
        let id = self.store.insert(store, value)?;
        self.persist()?;
        Ok(id)
    }

    fn update(&mut self, store: &str, id: &str, value: Value) -> bfp_admin_common::Result<()> {
        self.store.update(store, id, value)?;
        self.persist()
    }

    fn delete(&mut self, store: &str, id: &str) -> bfp_admin_common::Result<bool> {
        let removed = self.store.delete(store, id)?;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }
}
