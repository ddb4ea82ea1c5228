//! Command handlers
//!
//! Each handler is generic over the record type; `main` picks the type from
//! the `RecordKind` argument.

use crate::backend::Backend;
use crate::error::{AdminError, Result};
use crate::export::export_excel;
use crate::import::{import_rows, read_sheet};
use crate::local_store::FileStore;
use crate::render::render_screen;
use crate::session::ListSession;
use bfp_admin_common::local_store::LocalStore;
use bfp_admin_common::validation::validate_form;
use bfp_admin_common::{FetchOutcome, FilterState, LeaveRequest, ListRecord, MutationOutcome};
use dialoguer::Confirm;
use serde_json::{Map, Value};
use std::path::Path;

/// Read a JSON object from a file.
pub fn read_object(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Err(AdminError::NotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&content)? {
        Value::Object(map) => Ok(map),
        _ => Err(AdminError::Config(format!("{} must contain a JSON object", path.display()))),
    }
}

/// Validate raw form values, then decode them into a record.
pub fn parse_form<R: ListRecord>(values: Map<String, Value>) -> Result<R> {
    validate_form(R::KIND, &values)?;
    Ok(serde_json::from_value(Value::Object(values))?)
}

/// Lay `changes` over the stored row, so fields the file omits keep their values.
pub fn merge_form<R: ListRecord>(existing: &R, changes: Map<String, Value>) -> Result<Map<String, Value>> {
    let mut merged = match serde_json::to_value(existing)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merged.extend(changes);
    Ok(merged)
}

fn report(outcome: &MutationOutcome, done: &str) -> Result<()> {
    match outcome {
        MutationOutcome::Refetch => {
            println!("✔ {}", done);
            Ok(())
        }
        MutationOutcome::Failed(message) => {
            eprintln!("✖ {}", message);
            Ok(())
        }
    }
}

pub struct ListArgs<'a> {
    pub search: &'a str,
    pub card: &'a str,
    pub filters: &'a [(String, String)],
    pub page: usize,
    pub export: Option<&'a Path>,
}

pub async fn list<R: ListRecord, B: Backend + ?Sized>(backend: &B, args: ListArgs<'_>) -> Result<()> {
    let mut session = ListSession::<R, B>::new(backend);
    if let FetchOutcome::Failed(err) = session.load().await {
        eprintln!("(could not load {}: {})", R::KIND.label().to_lowercase(), err.user_message());
    }

    let mut filter = FilterState {
        search: args.search.to_string(),
        card: args.card.to_string(),
        ..Default::default()
    };
    for (field, value) in args.filters {
        filter.dropdowns.insert(field.clone(), value.clone());
    }
    let list = session.list_mut();
    list.set_filter(filter);
    list.set_page(args.page);

    println!("{}", render_screen(list));

    if let Some(path) = args.export {
        let rows = list.filtered();
        export_excel(&rows, path)?;
        println!("\n✔ {} rows written to {}", rows.len(), path.display());
    }
    Ok(())
}

pub async fn create<R: ListRecord, B: Backend + ?Sized>(backend: &B, json: &Path) -> Result<()> {
    let record: R = parse_form(read_object(json)?)?;
    let mut session = ListSession::<R, B>::new(backend);
    session.load().await;
    let outcome = session.create(record).await?;
    report(&outcome, &format!("{} created", R::KIND.label()))
}

pub async fn update<R: ListRecord, B: Backend + ?Sized>(backend: &B, id: &str, json: &Path) -> Result<()> {
    let changes = read_object(json)?;
    let mut session = ListSession::<R, B>::new(backend);
    session.load().await;
    let existing = session
        .list()
        .find(id)
        .ok_or_else(|| AdminError::NotFound(format!("{} {}", R::KIND.label(), id)))?;
    let record: R = parse_form(merge_form(existing, changes)?)?;
    let outcome = session.update(id, record).await?;
    report(&outcome, &format!("{} {} updated", R::KIND.label(), id))
}

pub async fn delete<R: ListRecord, B: Backend + ?Sized>(backend: &B, id: &str, yes: bool) -> Result<()> {
    let mut session = ListSession::<R, B>::new(backend);
    session.load().await;
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} {}?", R::KIND.label(), id))
            .default(false)
            .interact()
            .map_err(|e| AdminError::Io(std::io::Error::other(e.to_string())))?;
        if !confirmed {
            return Err(AdminError::Cancelled);
        }
    }
    let outcome = session.delete(id).await?;
    report(&outcome, &format!("{} {} deleted", R::KIND.label(), id))
}

pub async fn set_status<R: ListRecord, B: Backend + ?Sized>(backend: &B, id: &str, status: &str) -> Result<()> {
    let mut session = ListSession::<R, B>::new(backend);
    session.load().await;
    let outcome = session.set_status(id, status).await?;
    report(&outcome, &format!("{} {} set to {}", R::KIND.label(), id, status))
}

pub async fn review_leave<B: Backend + ?Sized>(backend: &B, id: &str, approve: bool) -> Result<()> {
    let mut session = ListSession::<LeaveRequest, B>::new(backend);
    session.load().await;
    let outcome = if approve {
        session.approve(id).await?
    } else {
        session.reject(id).await?
    };
    let verb = if approve { "approved" } else { "rejected" };
    report(&outcome, &format!("leave request {} {}", id, verb))
}

pub async fn import<R: ListRecord, B: Backend + ?Sized>(backend: &B, file: &Path, dry_run: bool) -> Result<()> {
    println!("📥 Importing {} from {}", R::KIND.label(), file.display());
    let rows = read_sheet(file)?;
    println!("- {} data rows", rows.len());

    let result = import_rows::<R, B>(backend, rows, dry_run).await?;
    for (line, reason) in &result.invalid {
        println!("  line {}: {}", line, reason);
    }
    for (line, message) in &result.failed {
        println!("  line {}: rejected by server: {}", line, message);
    }
    if dry_run {
        println!("✔ {} valid, {} invalid (dry run, nothing sent)", result.valid, result.invalid.len());
    } else {
        println!(
            "✔ {} inserted, {} invalid, {} failed",
            result.inserted,
            result.invalid.len(),
            result.failed.len()
        );
    }
    Ok(())
}

// =============================================
// local store
// =============================================

pub fn local_list(store: &FileStore, name: &str) -> Result<()> {
    let rows = store.get_all(name)?;
    println!("{}", serde_json::to_string_pretty(&rows)?);
    println!("({} objects in {})", rows.len(), name);
    Ok(())
}

pub fn local_get(store: &FileStore, name: &str, id: &str) -> Result<()> {
    let row = store
        .get(name, id)?
        .ok_or_else(|| AdminError::NotFound(format!("{} {}", name, id)))?;
    println!("{}", serde_json::to_string_pretty(&row)?);
    Ok(())
}

pub fn local_put(store: &mut FileStore, name: &str, json: &Path, id: Option<&str>) -> Result<()> {
    let value = Value::Object(read_object(json)?);
    match id {
        Some(id) => {
            store.update(name, id, value)?;
            println!("✔ {} {} updated", name, id);
        }
        None => {
            let id = store.insert(name, value)?;
            println!("✔ {} {} inserted", name, id);
        }
    }
    Ok(())
}

pub fn local_delete(store: &mut FileStore, name: &str, id: &str) -> Result<()> {
    if store.delete(name, id)? {
        println!("✔ {} {} deleted", name, id);
        Ok(())
    } else {
        Err(AdminError::NotFound(format!("{} {}", name, id)))
    }
}
