use super::{Backend, BackendResult};
use async_trait::async_trait;
use bfp_admin_common::local_store::value_id;
use bfp_admin_common::{BackendError, Query};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tables {
    rows: BTreeMap<String, Vec<Value>>,
    next_id: u64,
    /// (table, column) pairs with a unique constraint
    unique: Vec<(String, String)>,
    fail_next: Option<BackendError>,
    /// Tables whose updates always fail
    read_only: BTreeMap<String, BackendError>,
}

/// In-memory Backend Service
///
/// Mirrors the PostgREST behaviour list sessions rely on: `eq` filters,
/// ordering, limits, `personnel(...)` joins, generated ids, unique
/// constraints (23505) and the `personnel_id` foreign key (23503).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        let backend = Self::default();
        backend.lock().unique.push(("personnel".into(), "badge_number".into()));
        backend
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add rows as they would already exist on the server.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.lock();
        for mut row in rows {
            if value_id(&row).is_none() {
                tables.next_id += 1;
                let id = tables.next_id;
                if let Value::Object(map) = &mut row {
                    map.insert("id".into(), Value::from(id));
                }
            }
            tables.rows.entry(table.to_string()).or_default().push(row);
        }
    }

    /// Current rows of a table, unjoined
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().rows.get(table).cloned().unwrap_or_default()
    }

    /// Make the next request fail with `err`.
    pub fn fail_next(&self, err: BackendError) {
        self.lock().fail_next = Some(err);
    }

    /// Make every update of `table` fail with `err`.
    pub fn deny_updates(&self, table: &str, err: BackendError) {
        self.lock().read_only.insert(table.to_string(), err);
    }

    fn check_failure(tables: &mut Tables) -> BackendResult<()> {
        match tables.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.and_then(Value::as_f64), b.and_then(Value::as_f64)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => text(a).cmp(&text(b)),
    }
}

fn object(row: Value) -> BackendResult<Map<String, Value>> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(BackendError::new("PGRST102", format!("expected a JSON object, got {}", other))),
    }
}

impl Tables {
    fn table(&self, name: &str) -> &[Value] {
        self.rows.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    fn check_unique(&self, table: &str, row: &Map<String, Value>, own_id: Option<&str>) -> BackendResult<()> {
        for (t, column) in self.unique.iter().filter(|(t, _)| t == table) {
            let value = text(row.get(column));
            if value.is_empty() {
                continue;
            }
            let clash = self.table(t).iter().any(|other| {
                text(other.get(column)) == value && value_id(other).as_deref() != own_id
            });
            if clash {
                let mut err = BackendError::new(
                    "23505",
                    format!("duplicate key value violates unique constraint \"{}_{}_key\"", table, column),
                );
                err.details = Some(format!("Key ({})=({}) already exists.", column, value));
                return Err(err);
            }
        }
        Ok(())
    }

    fn check_personnel_ref(&self, table: &str, row: &Map<String, Value>) -> BackendResult<()> {
        let reference = text(row.get("personnel_id"));
        if table == "personnel" || reference.is_empty() {
            return Ok(());
        }
        let exists = self
            .table("personnel")
            .iter()
            .any(|p| value_id(p).as_deref() == Some(reference.as_str()));
        if exists {
            Ok(())
        } else {
            Err(BackendError::new(
                "23503",
                format!(
                    "insert or update on table \"{}\" violates foreign key constraint \"{}_personnel_id_fkey\"",
                    table, table
                ),
            ))
        }
    }

    fn join(&self, mut row: Value, query: &Query) -> Value {
        for (table, columns) in query.joins() {
            let key = text(row.get(format!("{}_id", table).as_str()));
            let joined = self
                .table(&table)
                .iter()
                .find(|r| !key.is_empty() && value_id(r).as_deref() == Some(key.as_str()))
                .map(|r| {
                    let picked: Map<String, Value> = columns
                        .iter()
                        .map(|c| (c.clone(), r.get(c).cloned().unwrap_or(Value::Null)))
                        .collect();
                    Value::Object(picked)
                })
                .unwrap_or(Value::Null);
            if let Value::Object(map) = &mut row {
                map.insert(table, joined);
            }
        }
        row
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn select(&self, table: &str, query: &Query) -> BackendResult<Vec<Value>> {
        let mut tables = self.lock();
        Self::check_failure(&mut tables)?;

        let mut rows: Vec<Value> = tables
            .table(table)
            .iter()
            .filter(|row| query.eq.iter().all(|(col, v)| text(row.get(col.as_str())) == *v))
            .cloned()
            .collect();
        if let Some((column, desc)) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(column.as_str()), b.get(column.as_str()));
                if *desc { ord.reverse() } else { ord }
            });
        }
        if let Some(n) = query.limit {
            rows.truncate(n);
        }
        Ok(rows.into_iter().map(|row| tables.join(row, query)).collect())
    }

    async fn insert(&self, table: &str, row: Value) -> BackendResult<Value> {
        let mut tables = self.lock();
        Self::check_failure(&mut tables)?;

        let mut row = object(row)?;
        tables.check_unique(table, &row, None)?;
        tables.check_personnel_ref(table, &row)?;
        if value_id(&Value::Object(row.clone())).is_none() {
            tables.next_id += 1;
            row.insert("id".into(), Value::from(tables.next_id));
        }
        let row = Value::Object(row);
        tables.rows.entry(table.to_string()).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: &str, id: &str, patch: Value) -> BackendResult<Vec<Value>> {
        let mut tables = self.lock();
        Self::check_failure(&mut tables)?;
        if let Some(err) = tables.read_only.get(table) {
            return Err(err.clone());
        }

        let patch = object(patch)?;
        let Some(index) = tables.table(table).iter().position(|r| value_id(r).as_deref() == Some(id)) else {
            return Ok(Vec::new());
        };
        let mut merged = object(tables.table(table)[index].clone())?;
        for (key, value) in patch {
            if key != "id" {
                merged.insert(key, value);
            }
        }
        tables.check_unique(table, &merged, Some(id))?;
        tables.check_personnel_ref(table, &merged)?;

        let merged = Value::Object(merged);
        if let Some(rows) = tables.rows.get_mut(table) {
            rows[index] = merged.clone();
        }
        Ok(vec![merged])
    }

    async fn delete(&self, table: &str, id: &str) -> BackendResult<Vec<Value>> {
        let mut tables = self.lock();
        Self::check_failure(&mut tables)?;

        let referenced = table == "personnel"
            && tables
                .rows
                .iter()
                .filter(|(name, _)| name.as_str() != "personnel")
                .flat_map(|(_, rows)| rows.iter())
                .any(|r| text(r.get("personnel_id")) == id);
        if referenced {
            return Err(BackendError::new(
                "23503",
                format!("update or delete on table \"personnel\" violates a foreign key constraint (id {})", id),
            ));
        }

        let Some(rows) = tables.rows.get_mut(table) else {
            return Ok(Vec::new());
        };
        let (removed, kept): (Vec<Value>, Vec<Value>) =
            rows.drain(..).partition(|r| value_id(r).as_deref() == Some(id));
        *rows = kept;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend() -> MemoryBackend {
        let b = MemoryBackend::new();
        b.seed("personnel", vec![json!({"id": 1, "first_name": "Ana", "last_name": "Cruz", "badge_number": "F-001"})]);
        b
    }

    #[tokio::test]
    async fn test_select_joins_personnel() {
        let b = backend();
        b.seed("leave_requests", vec![json!({"personnel_id": 1}), json!({"personnel_id": 99})]);
        let rows = b.select("leave_requests", &Query::for_kind(bfp_admin_common::RecordKind::Leave)).await.unwrap();
        assert_eq!(rows[0]["personnel"]["first_name"], "Ana");
        assert!(rows[1]["personnel"].is_null());
    }

    #[tokio::test]
    async fn test_eq_order_limit() {
        let b = backend();
        b.seed("awards", vec![
            json!({"award_name": "b", "personnel_id": 1}),
            json!({"award_name": "a", "personnel_id": 1}),
            json!({"award_name": "c", "personnel_id": 2}),
        ]);
        let q = Query { order: Some(("award_name".into(), false)), ..Query::new() }.eq("personnel_id", "1");
        let rows = b.select("awards", &q).await.unwrap();
        let names: Vec<&str> = rows.iter().filter_map(|r| r["award_name"].as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(b.select("awards", &Query::new().limit(1)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unique_and_foreign_key() {
        let b = backend();
        let err = b.insert("personnel", json!({"badge_number": "F-001"})).await.unwrap_err();
        assert_eq!(err.code, "23505");
        let err = b.insert("awards", json!({"personnel_id": 42})).await.unwrap_err();
        assert_eq!(err.code, "23503");
        let err = b.delete("personnel", "1").await;
        assert!(err.is_ok());
    }

    #[tokio::test]
    async fn test_update_merges_and_delete_removes() {
        let b = backend();
        let row = b.insert("equipment", json!({"name": "Hose", "status": "Operational"})).await.unwrap();
        let id = value_id(&row).unwrap();
        let updated = b.update("equipment", &id, json!({"status": "Damaged"})).await.unwrap();
        assert_eq!(updated[0]["name"], "Hose");
        assert_eq!(updated[0]["status"], "Damaged");
        assert!(b.update("equipment", "404", json!({})).await.unwrap().is_empty());
        assert_eq!(b.delete("equipment", &id).await.unwrap().len(), 1);
        assert!(b.rows("equipment").is_empty());
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot() {
        let b = backend();
        b.fail_next(BackendError::new("42501", "permission denied"));
        assert!(b.select("personnel", &Query::new()).await.is_err());
        assert!(b.select("personnel", &Query::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_deny_updates_only_touches_one_table() {
        let b = backend();
        b.deny_updates("leave_balances", BackendError::new("42501", "permission denied"));
        b.seed("leave_balances", vec![json!({"id": 7, "personnel_id": 1, "vacation_balance": 5.0})]);
        assert!(b.update("leave_balances", "7", json!({"vacation_balance": 1.0})).await.is_err());
        assert_eq!(b.rows("leave_balances")[0]["vacation_balance"], json!(5.0));
        assert_eq!(b.update("personnel", "1", json!({"rank": "FO2"})).await.unwrap().len(), 1);
    }
}
