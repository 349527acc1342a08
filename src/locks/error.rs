use thiserror::Error;

use super::state::LockStatus;
use crate::wallet::WalletError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockError {
    #[error("Invalid lock request: {0}")]
    Validation(String),

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Lock not found")]
    NotFound,

    #[error("Caller is not permitted to perform this action")]
    Unauthorized,

    #[error("Action not allowed while lock is {from}")]
    InvalidTransition { from: LockStatus },

    #[error("Funds are still locked: not matured and no guardian approval")]
    LockedFunds,
}

impl From<WalletError> for LockError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InsufficientFunds => LockError::InsufficientFunds,
            // Lock amounts are validated positive before the ledger is
            // touched; anything else is ledger/registry divergence.
            other => LockError::Validation(other.to_string()),
        }
    }
}
