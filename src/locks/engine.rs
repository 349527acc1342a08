//! Lock Engine - orchestrates registry, guardian gate, maturity check,
//! and the wallet ledger.
//!
//! # Atomicity
//!
//! Every transition that moves money holds the lock record's entry guard
//! across the status check, the ledger move, and the status write. Two
//! racing `release` calls on the same lock serialize on that guard: the
//! loser re-reads status as `released` and fails with an invalid-transition
//! error, so the ledger is credited exactly once.
//!
//! Lock ordering is always registry entry -> ledger entry, so the two
//! shard locks cannot deadlock against each other.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::LockError;
use super::guardian;
use super::maturity;
use super::registry::LockRegistry;
use super::state::LockStatus;
use super::types::{CreateLockParams, FundLock, LockId, UnlockDecision};
use crate::core_types::UserId;
use crate::wallet::Ledger;

pub struct LockEngine {
    registry: LockRegistry,
    ledger: Arc<Ledger>,
}

impl LockEngine {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            registry: LockRegistry::new(),
            ledger,
        }
    }

    // ============================================================
    // PUBLIC OPERATIONS
    // ============================================================

    /// Create a lock: validate, move amount available -> locked, persist.
    ///
    /// The ledger move happens first; if it fails (insufficient funds)
    /// nothing is persisted, so creation and debit are one atomic unit.
    pub fn create_lock(
        &self,
        owner: UserId,
        params: CreateLockParams,
    ) -> Result<FundLock, LockError> {
        self.create_lock_at(owner, params, Utc::now())
    }

    /// Clock-injected variant of [`create_lock`](Self::create_lock).
    pub fn create_lock_at(
        &self,
        owner: UserId,
        params: CreateLockParams,
        now: DateTime<Utc>,
    ) -> Result<FundLock, LockError> {
        if params.amount <= rust_decimal::Decimal::ZERO {
            return Err(LockError::Validation(
                "amount must be positive".to_string(),
            ));
        }
        if params.guardian == owner {
            return Err(LockError::Validation(
                "guardian cannot be the lock owner".to_string(),
            ));
        }
        if params.due_date < now.date_naive() {
            return Err(LockError::Validation(
                "due date cannot be in the past".to_string(),
            ));
        }

        self.ledger
            .lock_funds(owner, params.currency, params.amount)?;

        let lock = FundLock::new(owner, params);
        tracing::info!(lock = %lock, "safety lock created");
        self.registry.insert(lock.clone());
        Ok(lock)
    }

    /// Owner asks for early unlock. No balance effect.
    pub fn request_unlock(&self, id: LockId, requester: UserId) -> Result<FundLock, LockError> {
        let mut lock = self.registry.get_mut(id)?;
        if requester != lock.owner {
            return Err(LockError::Unauthorized);
        }
        // Also rejects a re-issue while a request is pending: the status
        // is already unlock_requested and the table refuses the repeat.
        lock.set_status(LockStatus::UnlockRequested)?;
        tracing::info!(lock_id = %id, owner = requester, "early unlock requested");
        Ok(lock.clone())
    }

    /// Guardian approves or rejects a pending unlock request. Routed
    /// through the authorization gate; no balance effect either way.
    pub fn decide_unlock(
        &self,
        id: LockId,
        caller: UserId,
        decision: UnlockDecision,
    ) -> Result<FundLock, LockError> {
        let mut lock = self.registry.get_mut(id)?;
        guardian::authorize_decision(&lock, caller)?;

        let next = match decision {
            UnlockDecision::Approve => LockStatus::Available,
            UnlockDecision::Reject => LockStatus::Active,
        };
        lock.set_status(next)?;
        tracing::info!(lock_id = %id, guardian = caller, ?decision, "unlock decision recorded");
        Ok(lock.clone())
    }

    /// Release the lock: credit the amount back to the owner.
    ///
    /// Allowed if the guardian approved (`available`), or if the lock is
    /// still `active` and its due date has passed.
    pub fn release(&self, id: LockId, requester: UserId) -> Result<FundLock, LockError> {
        self.release_at(id, requester, Utc::now())
    }

    /// Clock-injected variant of [`release`](Self::release).
    pub fn release_at(
        &self,
        id: LockId,
        requester: UserId,
        now: DateTime<Utc>,
    ) -> Result<FundLock, LockError> {
        let mut lock = self.registry.get_mut(id)?;
        if requester != lock.owner {
            return Err(LockError::Unauthorized);
        }

        match lock.status {
            LockStatus::Available => {}
            LockStatus::Active if maturity::is_matured(&lock, now) => {}
            // Active before maturity, or a request still pending: the
            // funds stay locked.
            LockStatus::Active | LockStatus::UnlockRequested => {
                return Err(LockError::LockedFunds);
            }
            LockStatus::Released => {
                return Err(LockError::InvalidTransition { from: lock.status });
            }
        }

        // Entry guard is still held: credit then flip status, as one unit.
        self.ledger
            .release_funds(lock.owner, lock.currency, lock.amount)?;
        lock.set_status(LockStatus::Released)?;
        tracing::info!(lock_id = %id, owner = requester, "safety lock released");
        Ok(lock.clone())
    }

    // ============================================================
    // QUERIES
    // ============================================================

    pub fn get(&self, id: LockId) -> Result<FundLock, LockError> {
        self.registry.get(id)
    }

    /// All of the owner's locks regardless of status, insertion order.
    pub fn locks_for_owner(&self, owner: UserId) -> Vec<FundLock> {
        self.registry.list_by_owner(owner)
    }

    /// Locks waiting on this guardian's approval.
    pub fn guardian_requests(&self, guardian: UserId) -> Vec<FundLock> {
        self.registry.list_guardian_requests(guardian)
    }
}
