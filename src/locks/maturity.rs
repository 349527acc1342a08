//! Maturity Evaluator
//!
//! Pure check, no stored state. Maturity is evaluated lazily at the point
//! of use (every release call), so there is no background sweep to miss.

use chrono::{DateTime, Utc};

use super::types::FundLock;

/// A lock is matured once the wall clock reaches its due date.
#[inline]
pub fn is_matured(lock: &FundLock, now: DateTime<Utc>) -> bool {
    now.date_naive() >= lock.due_date
}
