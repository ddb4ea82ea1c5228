//! Leave review
//!
//! Approval charges the one balance column matching the leave type, on the
//! requester's own balance row, and then sets the request to Approved.

use super::source::{require_row, DataSource};
use bfp_admin_common::leave::{plan_approval, BalanceField};
use bfp_admin_common::query::decode_rows;
use bfp_admin_common::status::ApprovalStatus;
use bfp_admin_common::{BackendError, LeaveBalance, LeaveRequest, Query, RecordKind};
use serde_json::{json, Map, Value};

async fn patch(source: &DataSource, kind: RecordKind, id: &str, body: Value) -> Result<(), BackendError> {
    let found = source.update(kind.table(), id, body).await?;
    require_row(found, kind.table(), id)
}

async fn fetch_balance(source: &DataSource, personnel_id: &str) -> Result<Option<LeaveBalance>, BackendError> {
    let query = Query::new().eq("personnel_id", personnel_id).limit(1);
    let rows = source.select(RecordKind::LeaveBalance.table(), &query).await?;
    Ok(decode_rows::<LeaveBalance>(rows)?.into_iter().next())
}

async fn write_balance(source: &DataSource, field: BalanceField, balance: &LeaveBalance) -> Result<(), BackendError> {
    let balance_id = balance
        .id
        .as_deref()
        .ok_or_else(|| BackendError::new("not_found", "leave balance row has no id"))?;
    let mut body = Map::new();
    body.insert(field.column().to_string(), json!(field.get(balance)));
    patch(source, RecordKind::LeaveBalance, balance_id, Value::Object(body)).await
}

/// Charge the balance, then set the status. A failed status write puts the
/// old balance back.
pub async fn approve(source: &DataSource, request: &LeaveRequest) -> Result<(), BackendError> {
    let balance = fetch_balance(source, &request.personnel_id).await?;
    let plan = plan_approval(request, balance.as_ref())
        .map_err(|e| BackendError::new("validation", e.to_string()))?;
    let field = BalanceField::for_leave_type(&request.leave_type);

    if let (Some(updated), Some(field)) = (plan.balance.as_ref(), field) {
        write_balance(source, field, updated).await?;
    }

    let result = patch(source, RecordKind::Leave, &plan.request_id, json!({ "status": plan.status.label() })).await;
    if let (Err(_), Some(_), Some(original), Some(field)) = (&result, plan.balance.as_ref(), balance.as_ref(), field) {
        if let Err(e) = write_balance(source, field, original).await {
            gloo::console::error!(format!("could not restore leave balance: {}", e));
        }
    }
    result
}

pub async fn reject(source: &DataSource, id: &str) -> Result<(), BackendError> {
    patch(source, RecordKind::Leave, id, json!({ "status": ApprovalStatus::Rejected.label() })).await
}
