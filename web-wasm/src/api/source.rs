//! Where a list screen reads and writes
//!
//! Screens with a local store can switch to it and work without the
//! Backend Service. The local path uses the table name as the store name.

use super::backend::{BackendSettings, RestClient};
use crate::store::local::BrowserStore;
use bfp_admin_common::local_store::LocalStore;
use bfp_admin_common::{BackendError, Query, RecordKind};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Remote(RestClient),
    Local,
    Unconfigured,
}

fn local_error(err: bfp_admin_common::Error) -> BackendError {
    BackendError::new("local", err.to_string())
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// `eq`, `order` and `limit` over local rows
fn apply_query(mut rows: Vec<Value>, query: &Query) -> Vec<Value> {
    rows.retain(|row| query.eq.iter().all(|(col, v)| text(row.get(col.as_str())) == *v));
    if let Some((column, desc)) = &query.order {
        rows.sort_by(|a, b| {
            let ord = text(a.get(column.as_str())).cmp(&text(b.get(column.as_str())));
            if *desc { ord.reverse() } else { ord }
        });
    }
    if let Some(n) = query.limit {
        rows.truncate(n);
    }
    rows
}

impl DataSource {
    pub fn for_kind(kind: RecordKind, settings: &BackendSettings, offline: bool) -> Self {
        if offline && kind.local_store().is_some() {
            DataSource::Local
        } else if settings.is_configured() {
            DataSource::Remote(RestClient::new(settings))
        } else {
            DataSource::Unconfigured
        }
    }

    fn unconfigured() -> BackendError {
        BackendError::new("config", "Backend URL is not set. Open Settings to configure it.")
    }

    pub async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>, BackendError> {
        match self {
            DataSource::Remote(client) => client.select(table, query).await,
            DataSource::Local => {
                let rows = BrowserStore::open().get_all(table).map_err(local_error)?;
                Ok(apply_query(rows, query))
            }
            DataSource::Unconfigured => Err(Self::unconfigured()),
        }
    }

    pub async fn insert(&self, table: &str, row: Value) -> Result<Value, BackendError> {
        match self {
            DataSource::Remote(client) => client.insert(table, &row).await,
            DataSource::Local => {
                let mut store = BrowserStore::open();
                let id = store.insert(table, row).map_err(local_error)?;
                Ok(store.get(table, &id).map_err(local_error)?.unwrap_or(Value::Null))
            }
            DataSource::Unconfigured => Err(Self::unconfigured()),
        }
    }

    /// Patch one row. `Ok(false)` when no row has the id.
    pub async fn update(&self, table: &str, id: &str, patch: Value) -> Result<bool, BackendError> {
        match self {
            DataSource::Remote(client) => Ok(!client.update(table, id, &patch).await?.is_empty()),
            DataSource::Local => {
                let mut store = BrowserStore::open();
                let Some(Value::Object(mut merged)) = store.get(table, id).map_err(local_error)? else {
                    return Ok(false);
                };
                if let Value::Object(changes) = patch {
                    merged.extend(changes.into_iter().filter(|(k, _)| k != "id"));
                }
                store.update(table, id, Value::Object(merged)).map_err(local_error)?;
                Ok(true)
            }
            DataSource::Unconfigured => Err(Self::unconfigured()),
        }
    }

    pub async fn delete(&self, table: &str, id: &str) -> Result<bool, BackendError> {
        match self {
            DataSource::Remote(client) => Ok(!client.delete(table, id).await?.is_empty()),
            DataSource::Local => BrowserStore::open().delete(table, id).map_err(local_error),
            DataSource::Unconfigured => Err(Self::unconfigured()),
        }
    }
}

/// Turn a "no row matched" result into an error.
pub fn require_row(found: bool, table: &str, id: &str) -> Result<(), BackendError> {
    if found {
        Ok(())
    } else {
        Err(BackendError::new("not_found", format!("no {} row with id {}", table, id)))
    }
}
