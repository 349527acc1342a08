//! Guardian Authorization Gate
//!
//! The single choke point for unlock decisions. Early release only becomes
//! possible through this gate, which is exactly what stops an owner from
//! self-approving their own early withdrawal.

use super::error::LockError;
use super::state::LockStatus;
use super::types::FundLock;
use crate::core_types::UserId;

/// Verify that `caller` may decide the pending unlock request on `lock`.
///
/// Identity is checked before status: a non-guardian gets `Unauthorized`
/// regardless of what state the lock is in.
pub fn authorize_decision(lock: &FundLock, caller: UserId) -> Result<(), LockError> {
    if caller != lock.guardian {
        return Err(LockError::Unauthorized);
    }
    if lock.status != LockStatus::UnlockRequested {
        return Err(LockError::InvalidTransition { from: lock.status });
    }
    Ok(())
}
