//! List sessions
//!
//! A `ListSession` is one list screen driven from the terminal: it owns the
//! screen's `RecordList` state and runs the fetch/mutate lifecycle against a
//! `Backend`. Every successful mutation is followed by a full refetch.

use crate::backend::Backend;
use crate::error::{AdminError, Result};
use bfp_admin_common::credentials;
use bfp_admin_common::leave::{plan_approval, BalanceField};
use bfp_admin_common::query::{decode_rows, mutation_body};
use bfp_admin_common::status::ApprovalStatus;
use bfp_admin_common::validation::{check_unique, validate_form};
use bfp_admin_common::{
    BackendError, FetchOutcome, LeaveBalance, LeaveRequest, ListRecord, MutationOutcome, Query, RecordKind,
    RecordList,
};
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::{json, Value};

pub struct ListSession<'a, R: ListRecord, B: Backend + ?Sized> {
    backend: &'a B,
    list: RecordList<R>,
}

impl<'a, R: ListRecord, B: Backend + ?Sized> ListSession<'a, R, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend, list: RecordList::new() }
    }

    pub fn list(&self) -> &RecordList<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut RecordList<R> {
        &mut self.list
    }

    fn kind(&self) -> RecordKind {
        R::KIND
    }

    /// Fetch the whole collection. Failures are logged and leave the list empty.
    pub async fn load(&mut self) -> FetchOutcome {
        self.list.begin_fetch();
        let result = self
            .backend
            .select(self.kind().table(), &Query::for_kind(self.kind()))
            .await
            .and_then(decode_rows::<R>);
        let outcome = self.list.finish_fetch(result);
        match &outcome {
            FetchOutcome::Loaded(n) => tracing::info!(kind = %self.kind(), rows = n, "fetched"),
            FetchOutcome::Failed(err) => tracing::error!(kind = %self.kind(), error = %err, "fetch failed"),
        }
        outcome
    }

    /// Client-side checks that block a submission. `editing` is the id of the
    /// row being replaced, excluded from the uniqueness check.
    pub fn validate(&self, record: &R, editing: Option<&str>) -> Result<()> {
        match serde_json::to_value(record)? {
            Value::Object(values) => validate_form(self.kind(), &values)?,
            other => {
                return Err(bfp_admin_common::Error::Validation(format!("expected an object, got {}", other)).into())
            }
        }
        let others: Vec<R> = self
            .list
            .records()
            .iter()
            .filter(|r| editing.is_none() || r.id() != editing)
            .cloned()
            .collect();
        check_unique(record, &others)?;
        Ok(())
    }

    /// Report a mutation result and refetch on success.
    async fn complete(&mut self, result: std::result::Result<(), BackendError>) -> MutationOutcome {
        let outcome = self.list.finish_mutation(result);
        match &outcome {
            MutationOutcome::Refetch => {
                self.load().await;
            }
            MutationOutcome::Failed(message) => {
                tracing::warn!(kind = %self.kind(), "mutation failed: {}", message);
            }
        }
        outcome
    }

    fn require_id(&self, id: &str) -> Result<()> {
        if self.list.find(id).is_none() {
            return Err(AdminError::NotFound(format!("{} {}", self.kind().label(), id)));
        }
        Ok(())
    }

    pub async fn create(&mut self, mut record: R) -> Result<MutationOutcome> {
        record.seal_secrets(&fresh_salt()?)?;
        self.validate(&record, None)?;
        self.list.open_create(record.clone());
        let body = mutation_body(&record)?;
        let result = self.backend.insert(self.kind().table(), body).await.map(|_| ());
        Ok(self.complete(result).await)
    }

    pub async fn update(&mut self, id: &str, mut record: R) -> Result<MutationOutcome> {
        self.require_id(id)?;
        self.list.open_edit(id);
        record.seal_secrets(&fresh_salt()?)?;
        self.validate(&record, Some(id))?;
        let body = mutation_body(&record)?;
        let result = self.patch(id, body).await;
        Ok(self.complete(result).await)
    }

    pub async fn delete(&mut self, id: &str) -> Result<MutationOutcome> {
        self.require_id(id)?;
        let result = self.backend.delete(self.kind().table(), id).await.map(|_| ());
        Ok(self.complete(result).await)
    }

    /// Set any allowed status; there is no transition order.
    pub async fn set_status(&mut self, id: &str, status: &str) -> Result<MutationOutcome> {
        self.require_id(id)?;
        let allowed = self.kind().status_values();
        let label = allowed
            .iter()
            .find(|label| bfp_admin_common::status::status_key(label) == bfp_admin_common::status::status_key(status))
            .ok_or_else(|| {
                bfp_admin_common::Error::Validation(format!(
                    "status must be one of: {}",
                    allowed.join(", ")
                ))
            })?;
        let result = self.patch(id, json!({ "status": label })).await;
        Ok(self.complete(result).await)
    }

    async fn patch(&self, id: &str, body: Value) -> std::result::Result<(), BackendError> {
        let rows = self.backend.update(self.kind().table(), id, body).await?;
        if rows.is_empty() {
            return Err(BackendError::new("not_found", format!("no {} row with id {}", self.kind().table(), id)));
        }
        Ok(())
    }
}

// =============================================
// Leave approval
// =============================================

impl<'a, B: Backend + ?Sized> ListSession<'a, LeaveRequest, B> {
    async fn fetch_balance(&self, personnel_id: &str) -> std::result::Result<Option<LeaveBalance>, BackendError> {
        let query = Query::new().eq("personnel_id", personnel_id).limit(1);
        let rows = self.backend.select(RecordKind::LeaveBalance.table(), &query).await?;
        Ok(decode_rows::<LeaveBalance>(rows)?.into_iter().next())
    }

    /// Approve a pending request and charge its employee's matching balance.
    ///
    /// The balance is written first. If the status write then fails the
    /// balance is restored, so a failed approval leaves both rows as they were.
    pub async fn approve(&mut self, id: &str) -> Result<MutationOutcome> {
        let request = self
            .list
            .find(id)
            .cloned()
            .ok_or_else(|| AdminError::NotFound(format!("leave request {}", id)))?;

        let balance = match self.fetch_balance(&request.personnel_id).await {
            Ok(b) => b,
            Err(err) => return Ok(self.complete(Err(err)).await),
        };
        let plan = plan_approval(&request, balance.as_ref())?;

        if let Some(updated) = plan.balance.as_ref() {
            if let Err(err) = self.persist_balance(&request, updated).await {
                return Ok(self.complete(Err(err)).await);
            }
        }

        let result = self.patch(&plan.request_id, json!({ "status": plan.status.label() })).await;
        if result.is_err() {
            if let (Some(_), Some(original)) = (plan.balance.as_ref(), balance.as_ref()) {
                if let Err(err) = self.persist_balance(&request, original).await {
                    tracing::error!(
                        personnel_id = %request.personnel_id,
                        error = %err,
                        "could not restore leave balance"
                    );
                }
            }
        }
        Ok(self.complete(result).await)
    }

    async fn persist_balance(
        &self,
        request: &LeaveRequest,
        updated: &LeaveBalance,
    ) -> std::result::Result<(), BackendError> {
        let Some(field) = BalanceField::for_leave_type(&request.leave_type) else {
            return Ok(());
        };
        let Some(balance_id) = updated.id.as_deref() else {
            return Err(BackendError::new("not_found", "leave balance row has no id"));
        };
        let mut patch = serde_json::Map::new();
        patch.insert(field.column().to_string(), json!(field.get(updated)));
        let rows = self
            .backend
            .update(RecordKind::LeaveBalance.table(), balance_id, Value::Object(patch))
            .await?;
        if rows.is_empty() {
            return Err(BackendError::new("not_found", format!("no leave balance row {}", balance_id)));
        }
        tracing::info!(
            personnel_id = %request.personnel_id,
            column = field.column(),
            remaining = field.get(updated),
            "leave balance written"
        );
        Ok(())
    }

    pub async fn reject(&mut self, id: &str) -> Result<MutationOutcome> {
        self.set_status(id, ApprovalStatus::Rejected.label()).await
    }
}

// =============================================
// Recruitment credentials
// =============================================

/// Fresh random salt from the OS generator
pub fn fresh_salt() -> Result<String> {
    let mut bytes = [0u8; credentials::SALT_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| AdminError::Config(format!("random source unavailable: {}", e)))?;
    Ok(credentials::encode_salt(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_salt_is_random_hex() {
        let a = fresh_salt().unwrap();
        let b = fresh_salt().unwrap();
        assert_eq!(a.len(), credentials::SALT_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
