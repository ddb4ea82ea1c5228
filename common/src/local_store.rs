//! Local embedded store
//!
//! Named stores of JSON objects keyed by an `id` field. `MemoryStore` is the
//! shared implementation; the CLI persists it to a file and the web crate to
//! localStorage.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const LEAVE_STORE: &str = "leave_requests";
pub const PERSONNEL_DOCUMENTS_STORE: &str = "personnel_documents";
pub const TRAINING_STORE: &str = "training_records";
pub const PLACEMENTS_STORE: &str = "placements";

pub const STORES: [&str; 4] = [LEAVE_STORE, PERSONNEL_DOCUMENTS_STORE, TRAINING_STORE, PLACEMENTS_STORE];

pub fn is_known_store(name: &str) -> bool {
    STORES.contains(&name)
}

pub trait LocalStore {
    fn get_all(&self, store: &str) -> Result<Vec<Value>>;
    fn get(&self, store: &str, id: &str) -> Result<Option<Value>>;
    /// Insert an object, assigning an id when it has none. Returns the id.
    fn insert(&mut self, store: &str, value: Value) -> Result<String>;
    /// Replace an existing object; the stored id is kept.
    fn update(&mut self, store: &str, id: &str, value: Value) -> Result<()>;
    /// `false` when nothing had that id.
    fn delete(&mut self, store: &str, id: &str) -> Result<bool>;
}

/// Id of a stored object, numeric ids rendered as text
pub fn value_id(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn check_store(store: &str) -> Result<()> {
    if is_known_store(store) {
        Ok(())
    } else {
        Err(Error::Config(format!("unknown local store: {}", store)))
    }
}

fn into_object(value: Value) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(Error::Validation(format!("local store values must be objects, got {}", other))),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    stores: BTreeMap<String, Vec<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, store: &str) -> usize {
        self.stores.get(store).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.stores.values().all(Vec::is_empty)
    }

    fn position(&self, store: &str, id: &str) -> Option<usize> {
        self.stores
            .get(store)?
            .iter()
            .position(|v| value_id(v).as_deref() == Some(id))
    }

    fn fresh_id(&mut self, store: &str) -> String {
        loop {
            self.next_id += 1;
            let id = self.next_id.to_string();
            if self.position(store, &id).is_none() {
                return id;
            }
        }
    }
}

impl LocalStore for MemoryStore {
    fn get_all(&self, store: &str) -> Result<Vec<Value>> {
        check_store(store)?;
        Ok(self.stores.get(store).cloned().unwrap_or_default())
    }

    fn get(&self, store: &str, id: &str) -> Result<Option<Value>> {
        check_store(store)?;
        Ok(self
            .position(store, id)
            .and_then(|i| self.stores.get(store).map(|rows| rows[i].clone())))
    }

    fn insert(&mut self, store: &str, value: Value) -> Result<String> {
        check_store(store)?;
        let mut object = into_object(value)?;
        let id = match value_id(&Value::Object(object.clone())) {
            Some(id) => {
                if self.position(store, &id).is_some() {
                    return Err(Error::Validation(format!("{} already has id {}", store, id)));
                }
                id
            }
            None => {
                let id = self.fresh_id(store);
                object.insert("id".to_string(), Value::String(id.clone()));
                id
            }
        };
        self.stores.entry(store.to_string()).or_default().push(Value::Object(object));
        Ok(id)
    }

    fn update(&mut self, store: &str, id: &str, value: Value) -> Result<()> {
        check_store(store)?;
        let mut object = into_object(value)?;
        let index = self
            .position(store, id)
            .ok_or_else(|| Error::Validation(format!("{} has no record {}", store, id)))?;
        object.insert("id".to_string(), Value::String(id.to_string()));
        if let Some(rows) = self.stores.get_mut(store) {
            rows[index] = Value::Object(object);
        }
        Ok(())
    }

    fn delete(&mut self, store: &str, id: &str) -> Result<bool> {
        check_store(store)?;
        match self.position(store, id) {
            Some(index) => {
                if let Some(rows) = self.stores.get_mut(store) {
                    rows.remove(index);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_assigns_id() {
        let mut store = MemoryStore::new();
        let a = store.insert(LEAVE_STORE, json!({"leave_type": "Sick"})).unwrap();
        let b = store.insert(LEAVE_STORE, json!({"leave_type": "Vacation"})).unwrap();
        assert_ne!(a, b);
        let row = store.get(LEAVE_STORE, &a).unwrap().unwrap();
        assert_eq!(row["leave_type"], "Sick");
        assert_eq!(row["id"], a.as_str());
    }

    #[test]
    fn test_insert_keeps_given_id_and_rejects_duplicate() {
        let mut store = MemoryStore::new();
        assert_eq!(store.insert(PLACEMENTS_STORE, json!({"id": 7})).unwrap(), "7");
        assert!(store.insert(PLACEMENTS_STORE, json!({"id": "7"})).is_err());
        // next generated id skips the taken one
        store.next_id = 6;
        assert_eq!(store.insert(PLACEMENTS_STORE, json!({})).unwrap(), "8");
    }

    #[test]
    fn test_update_and_delete() {
        let mut store = MemoryStore::new();
        let id = store.insert(TRAINING_STORE, json!({"training_title": "BFRC"})).unwrap();
        store.update(TRAINING_STORE, &id, json!({"training_title": "Arson Investigation"})).unwrap();
        assert_eq!(store.get_all(TRAINING_STORE).unwrap()[0]["training_title"], "Arson Investigation");
        assert!(store.update(TRAINING_STORE, "missing", json!({})).is_err());
        assert!(store.delete(TRAINING_STORE, &id).unwrap());
        assert!(!store.delete(TRAINING_STORE, &id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_store_and_non_object() {
        let mut store = MemoryStore::new();
        assert!(store.get_all("photos").is_err());
        assert!(store.insert(LEAVE_STORE, json!([1, 2])).is_err());
    }

    #[test]
    fn test_stores_are_independent() {
        let mut store = MemoryStore::new();
        store.insert(LEAVE_STORE, json!({"a": 1})).unwrap();
        assert_eq!(store.len(LEAVE_STORE), 1);
        assert!(store.get_all(PERSONNEL_DOCUMENTS_STORE).unwrap().is_empty());
    }
}
