//! Leave day counting and balance deduction

use crate::error::{Error, Result};
use crate::status::ApprovalStatus;
use crate::types::{LeaveBalance, LeaveRequest};
use chrono::NaiveDate;

/// Inclusive day span. `end < start` is rejected.
pub fn leave_days(start: NaiveDate, end: NaiveDate) -> Result<i64> {
    if end < start {
        return Err(Error::Validation(format!(
            "end date {} is before start date {}",
            end, start
        )));
    }
    Ok((end - start).num_days() + 1)
}

/// Balance column charged for a leave type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceField {
    Vacation,
    Sick,
    Emergency,
    Special,
}

impl BalanceField {
    /// `None` for leave types that draw on no balance (maternity, study ...).
    pub fn for_leave_type(leave_type: &str) -> Option<Self> {
        let t = leave_type.trim().to_lowercase();
        if t.starts_with("vacation") {
            Some(BalanceField::Vacation)
        } else if t.starts_with("sick") {
            Some(BalanceField::Sick)
        } else if t.starts_with("emergency") {
            Some(BalanceField::Emergency)
        } else if t.starts_with("special") {
            Some(BalanceField::Special)
        } else {
            None
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            BalanceField::Vacation => "vacation_balance",
            BalanceField::Sick => "sick_balance",
            BalanceField::Emergency => "emergency_balance",
            BalanceField::Special => "special_balance",
        }
    }

    fn slot<'a>(&self, balance: &'a mut LeaveBalance) -> &'a mut f64 {
        match self {
            BalanceField::Vacation => &mut balance.vacation_balance,
            BalanceField::Sick => &mut balance.sick_balance,
            BalanceField::Emergency => &mut balance.emergency_balance,
            BalanceField::Special => &mut balance.special_balance,
        }
    }

    pub fn get(&self, balance: &LeaveBalance) -> f64 {
        match self {
            BalanceField::Vacation => balance.vacation_balance,
            BalanceField::Sick => balance.sick_balance,
            BalanceField::Emergency => balance.emergency_balance,
            BalanceField::Special => balance.special_balance,
        }
    }
}

/// `max(0, current - days)` on one field. Returns the new value.
pub fn deduct(balance: &mut LeaveBalance, field: BalanceField, days: i64) -> f64 {
    let slot = field.slot(balance);
    *slot = (*slot - days as f64).max(0.0);
    *slot
}

/// What approving a request changes
#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalPlan {
    pub request_id: String,
    pub status: ApprovalStatus,
    /// Updated balance row to persist, when the leave type has one
    pub balance: Option<LeaveBalance>,
}

/// Plan the approval of `request` against its employee's balance row.
///
/// The balance must belong to the request's employee. Only pending
/// requests can be approved.
pub fn plan_approval(request: &LeaveRequest, balance: Option<&LeaveBalance>) -> Result<ApprovalPlan> {
    let request_id = request
        .id
        .clone()
        .ok_or_else(|| Error::Validation("leave request has no id".to_string()))?;
    if request.status != ApprovalStatus::Pending {
        return Err(Error::Validation(format!(
            "leave request {} is already {}",
            request_id,
            request.status.label()
        )));
    }
    if let Some(b) = balance {
        if b.personnel_id != request.personnel_id {
            return Err(Error::Validation(format!(
                "balance row belongs to {}, not {}",
                b.personnel_id, request.personnel_id
            )));
        }
    }

    let updated = match (BalanceField::for_leave_type(&request.leave_type), balance) {
        (Some(field), Some(b)) => {
            let mut b = b.clone();
            deduct(&mut b, field, request.days());
            Some(b)
        }
        (Some(_), None) => {
            return Err(Error::Validation(format!(
                "no leave balance for personnel {}",
                request.personnel_id
            )))
        }
        (None, _) => None,
    };

    Ok(ApprovalPlan {
        request_id,
        status: ApprovalStatus::Approved,
        balance: updated,
    })
}
