//! ENFORCED BALANCE TYPE - Used by the wallet Ledger
//!
//! This is the SINGLE source of truth for balance arithmetic.
//! ALL balance mutations MUST go through these methods.
//!
//! # Enforcement Strategy:
//! 1. Fields are PRIVATE - no direct access
//! 2. All mutations return Result - errors are explicit
//! 3. Version auto-increments - audit trail
//! 4. checked_add/sub - overflow protection

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::WalletError;

/// Balance for a single (user, currency) pair.
///
/// # Invariants (ENFORCED by private fields):
/// - `available` and `locked` are never negative
/// - `available + locked` = total balance; total only changes on
///   credit/debit, never on lock/release
/// - Version increments on every mutation
///
/// # Usage:
/// ```ignore
/// let mut balance = Balance::default();
/// balance.credit(dec(10_000))?;   // available = 10000
/// balance.lock(dec(5_000))?;      // available = 5000, locked = 5000
/// balance.release(dec(5_000))?;   // available = 10000, locked = 0
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Balance {
    available: Decimal, // PRIVATE - ONLY modified through credit/debit/lock/release
    locked: Decimal,    // PRIVATE - ONLY modified through lock/release
    version: u64,       // PRIVATE - incremented on every mutation
}

impl Balance {
    // ============================================================
    // READ-ONLY GETTERS (safe to expose)
    // ============================================================

    /// Spendable balance (read-only)
    #[inline(always)]
    pub const fn available(&self) -> Decimal {
        self.available
    }

    /// Balance held by safety locks (read-only)
    #[inline(always)]
    pub const fn locked(&self) -> Decimal {
        self.locked
    }

    /// Total balance (available + locked)
    #[inline(always)]
    pub fn total(&self) -> Decimal {
        self.available + self.locked
    }

    /// Mutation counter (read-only)
    #[inline(always)]
    pub const fn version(&self) -> u64 {
        self.version
    }

    // ============================================================
    // VALIDATED MUTATIONS (ENFORCED operations)
    // ============================================================

    /// Credit funds to the available column.
    pub fn credit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        check_positive(amount)?;
        self.available = self
            .available
            .checked_add(amount)
            .ok_or(WalletError::Overflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Debit funds from the available column.
    ///
    /// # Errors
    /// `InsufficientFunds` if available < amount; locked funds are not
    /// spendable and are never touched here.
    pub fn debit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        check_positive(amount)?;
        if self.available < amount {
            return Err(WalletError::InsufficientFunds);
        }
        self.available = self
            .available
            .checked_sub(amount)
            .ok_or(WalletError::Overflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Move funds from available to locked (lock creation).
    pub fn lock(&mut self, amount: Decimal) -> Result<(), WalletError> {
        check_positive(amount)?;
        if self.available < amount {
            return Err(WalletError::InsufficientFunds);
        }
        self.available = self
            .available
            .checked_sub(amount)
            .ok_or(WalletError::Overflow)?;
        self.locked = self
            .locked
            .checked_add(amount)
            .ok_or(WalletError::Overflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }

    /// Move funds from locked back to available (lock release).
    ///
    /// The locked column can only shrink by amounts previously locked, so
    /// underflow here indicates ledger/registry divergence.
    pub fn release(&mut self, amount: Decimal) -> Result<(), WalletError> {
        check_positive(amount)?;
        if self.locked < amount {
            return Err(WalletError::InsufficientLocked);
        }
        self.locked = self
            .locked
            .checked_sub(amount)
            .ok_or(WalletError::Overflow)?;
        self.available = self
            .available
            .checked_add(amount)
            .ok_or(WalletError::Overflow)?;
        self.version = self.version.wrapping_add(1);
        Ok(())
    }
}

#[inline]
fn check_positive(amount: Decimal) -> Result<(), WalletError> {
    if amount <= Decimal::ZERO {
        return Err(WalletError::AmountNotPositive);
    }
    Ok(())
}

// ============================================================
// TESTS - Prove enforcement works
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_credit() {
        let mut bal = Balance::default();
        assert_eq!(bal.available(), Decimal::ZERO);

        bal.credit(dec(100)).unwrap();
        assert_eq!(bal.available(), dec(100));
        assert_eq!(bal.version(), 1);

        bal.credit(dec(50)).unwrap();
        assert_eq!(bal.available(), dec(150));
        assert_eq!(bal.version(), 2);
    }

    #[test]
    fn test_debit_insufficient() {
        let mut bal = Balance::default();
        bal.credit(dec(50)).unwrap();

        assert_eq!(bal.debit(dec(100)), Err(WalletError::InsufficientFunds));
        assert_eq!(bal.available(), dec(50)); // Unchanged
    }

    #[test]
    fn test_lock_release() {
        let mut bal = Balance::default();
        bal.credit(dec(100)).unwrap();

        bal.lock(dec(60)).unwrap();
        assert_eq!(bal.available(), dec(40));
        assert_eq!(bal.locked(), dec(60));
        assert_eq!(bal.total(), dec(100)); // Total unchanged

        bal.release(dec(60)).unwrap();
        assert_eq!(bal.available(), dec(100));
        assert_eq!(bal.locked(), Decimal::ZERO);
    }

    #[test]
    fn test_locked_funds_not_spendable() {
        let mut bal = Balance::default();
        bal.credit(dec(100)).unwrap();
        bal.lock(dec(80)).unwrap();

        assert_eq!(bal.debit(dec(50)), Err(WalletError::InsufficientFunds));
        bal.debit(dec(20)).unwrap();
        assert_eq!(bal.available(), Decimal::ZERO);
        assert_eq!(bal.locked(), dec(80));
    }

    #[test]
    fn test_release_more_than_locked() {
        let mut bal = Balance::default();
        bal.credit(dec(100)).unwrap();
        bal.lock(dec(30)).unwrap();

        assert_eq!(bal.release(dec(40)), Err(WalletError::InsufficientLocked));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        let mut bal = Balance::default();
        assert_eq!(bal.credit(Decimal::ZERO), Err(WalletError::AmountNotPositive));
        assert_eq!(bal.credit(dec(-5)), Err(WalletError::AmountNotPositive));
        assert_eq!(bal.debit(dec(-5)), Err(WalletError::AmountNotPositive));
        assert_eq!(bal.lock(Decimal::ZERO), Err(WalletError::AmountNotPositive));
    }

    #[test]
    fn test_version_increments() {
        let mut bal = Balance::default();
        bal.credit(dec(100)).unwrap();
        bal.lock(dec(50)).unwrap();
        bal.release(dec(50)).unwrap();
        bal.debit(dec(10)).unwrap();
        assert_eq!(bal.version(), 4);
    }
}
