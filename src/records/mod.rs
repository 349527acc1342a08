//! Record stores: transaction log, bills, savings plans.
//!
//! These are plain per-user record stores; the only rule they all follow
//! is that every balance effect goes through the wallet [`Ledger`], never
//! around it.
//!
//! [`Ledger`]: crate::wallet::Ledger

pub mod bills;
pub mod savings;
pub mod transactions;

pub use bills::{Bill, BillStore, NewBill};
pub use savings::{Frequency, NewSavingsPlan, SavingsPlan, SavingsStore};
pub use transactions::{NewTransaction, Transaction, TransactionKind, TransactionStore};

use thiserror::Error;

use crate::wallet::WalletError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Record not found")]
    NotFound,

    #[error("Caller does not own this record")]
    Unauthorized,

    #[error("Invalid record: {0}")]
    Validation(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}
