//! Wallet Ledger - the single consistency boundary for user balances.
//!
//! Locks, bills, savings, and the transaction log all move money through
//! this service; nothing else mutates a balance. Each (user, currency)
//! entry is guarded by its DashMap shard lock, so every credit/debit/
//! lock/release is one atomic read-modify-write.

pub mod balance;

pub use balance::Balance;

use dashmap::DashMap;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core_types::{Currency, UserId};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Insufficient locked funds")]
    InsufficientLocked,

    #[error("Invalid amount: must be positive")]
    AmountNotPositive,

    #[error("Balance arithmetic overflow")]
    Overflow,
}

/// Per-currency balance view returned to callers.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct BalanceView {
    pub currency: Currency,
    pub available: Decimal,
    pub locked: Decimal,
}

/// In-process ledger of user balances.
///
/// Writes take the entry guard for exactly one (user, currency) key;
/// concurrent operations on the same key serialize, operations on
/// different keys do not contend.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: DashMap<(UserId, Currency), Balance>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` to the user's available balance.
    pub fn credit(
        &self,
        user: UserId,
        currency: Currency,
        amount: Decimal,
    ) -> Result<Balance, WalletError> {
        let mut entry = self.accounts.entry((user, currency)).or_default();
        entry.credit(amount)?;
        tracing::debug!(user, %currency, %amount, "ledger credit");
        Ok(*entry)
    }

    /// Debit `amount` from the user's available balance.
    pub fn debit(
        &self,
        user: UserId,
        currency: Currency,
        amount: Decimal,
    ) -> Result<Balance, WalletError> {
        let mut entry = self.accounts.entry((user, currency)).or_default();
        entry.debit(amount)?;
        tracing::debug!(user, %currency, %amount, "ledger debit");
        Ok(*entry)
    }

    /// Move `amount` from available to locked (safety-lock creation).
    pub fn lock_funds(
        &self,
        user: UserId,
        currency: Currency,
        amount: Decimal,
    ) -> Result<Balance, WalletError> {
        let mut entry = self.accounts.entry((user, currency)).or_default();
        entry.lock(amount)?;
        tracing::debug!(user, %currency, %amount, "ledger lock");
        Ok(*entry)
    }

    /// Move `amount` from locked back to available (safety-lock release).
    pub fn release_funds(
        &self,
        user: UserId,
        currency: Currency,
        amount: Decimal,
    ) -> Result<Balance, WalletError> {
        let mut entry = self.accounts.entry((user, currency)).or_default();
        entry.release(amount)?;
        tracing::debug!(user, %currency, %amount, "ledger release");
        Ok(*entry)
    }

    /// Snapshot of a single balance. Missing entries read as zero.
    pub fn balance(&self, user: UserId, currency: Currency) -> Balance {
        self.accounts
            .get(&(user, currency))
            .map(|b| *b)
            .unwrap_or_default()
    }

    /// Snapshot of all of a user's balances, one view per currency.
    pub fn balances(&self, user: UserId) -> Vec<BalanceView> {
        [Currency::Ngn, Currency::Usd]
            .into_iter()
            .map(|ccy| {
                let bal = self.balance(user, ccy);
                BalanceView {
                    currency: ccy,
                    available: bal.available(),
                    locked: bal.locked(),
                }
            })
            .collect()
    }

    /// Total held by locks for a (user, currency) pair - the audit column
    /// the lock registry must agree with.
    pub fn locked_total(&self, user: UserId, currency: Currency) -> Decimal {
        self.balance(user, currency).locked()
    }
}
