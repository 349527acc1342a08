//! LINSFAIR - Personal finance wallet backend
//!
//! Balances, a transaction log, bills, savings plans, and the Safety Lock
//! engine: guardian-protected time locks on funds.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (UserId, Currency)
//! - [`wallet`] - The balance ledger, the single consistency boundary for money
//! - [`locks`] - Safety Lock engine (registry, state machine, guardian gate, maturity)
//! - [`records`] - Transaction / bill / savings record stores
//! - [`user_auth`] - User directory, argon2 password auth, JWT issuance
//! - [`gateway`] - axum HTTP surface
//! - [`config`] - YAML configuration per environment
//! - [`logging`] - tracing setup (rolling file + stdout)

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod gateway;
pub mod locks;
pub mod logging;
pub mod records;
pub mod user_auth;
pub mod wallet;

// Convenient re-exports at crate root
pub use core_types::{Currency, UserId};
pub use locks::{
    CreateLockParams, FundLock, LockEngine, LockError, LockId, LockStatus, UnlockDecision,
};
pub use records::{Bill, BillStore, SavingsPlan, SavingsStore, Transaction, TransactionStore};
pub use user_auth::UserAuthService;
pub use wallet::{Balance, BalanceView, Ledger, WalletError};
