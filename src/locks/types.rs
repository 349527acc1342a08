//! Safety Lock core types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::LockError;
use super::state::LockStatus;
use crate::core_types::{Currency, UserId};

/// Lock ID - ULID-based unique identifier
///
/// Using ULID provides:
/// - Monotonic, sortable IDs
/// - No coordination needed
/// - 128-bit with good entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockId(ulid::Ulid);

impl LockId {
    /// Generate a new unique LockId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the inner ULID value
    pub fn inner(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for LockId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LockId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Guardian decision on a pending unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockDecision {
    Approve,
    Reject,
}

/// Parameters for creating a new lock. The guardian arrives already
/// resolved to a UserId; username resolution is the gateway's job.
#[derive(Debug, Clone)]
pub struct CreateLockParams {
    pub guardian: UserId,
    pub amount: Decimal,
    pub currency: Currency,
    pub purpose: String,
    pub due_date: NaiveDate,
}

/// A single locked-funds record.
///
/// Everything except `status` is immutable after creation; `amount` only
/// ever leaves via a full release. Released locks are kept as history -
/// there is no delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundLock {
    pub id: LockId,
    pub owner: UserId,
    pub guardian: UserId,
    pub amount: Decimal,
    pub currency: Currency,
    pub purpose: String,
    pub due_date: NaiveDate,
    pub status: LockStatus,
    pub created_at: DateTime<Utc>,
}

impl FundLock {
    pub fn new(owner: UserId, params: CreateLockParams) -> Self {
        Self {
            id: LockId::new(),
            owner,
            guardian: params.guardian,
            amount: params.amount,
            currency: params.currency,
            purpose: params.purpose,
            due_date: params.due_date,
            status: LockStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// The ONLY way to change a lock's status. Enforces the closed
    /// transition table; identity/maturity guards live in the engine.
    pub fn set_status(&mut self, to: LockStatus) -> Result<(), LockError> {
        if !self.status.can_transition(to) {
            return Err(LockError::InvalidTransition { from: self.status });
        }
        self.status = to;
        Ok(())
    }
}

impl fmt::Display for FundLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lock[{}] owner={} guardian={} {} {} due={} status={}",
            self.id, self.owner, self.guardian, self.amount, self.currency, self.due_date, self.status
        )
    }
}
