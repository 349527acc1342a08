//! Safety Lock engine
//!
//! Lets a user move money out of spendable balance under a time lock with
//! a designated guardian. Release happens at maturity, or earlier with the
//! guardian's approval. Submodules:
//!
//! - [`state`] - the closed status transition table
//! - [`registry`] - the lock record store and indexes
//! - [`guardian`] - the authorization gate for unlock decisions
//! - [`maturity`] - lazy due-date evaluation
//! - [`engine`] - the composition root wiring the above to the ledger

pub mod engine;
pub mod error;
pub mod guardian;
pub mod maturity;
pub mod registry;
pub mod state;
pub mod types;

pub use engine::LockEngine;
pub use error::LockError;
pub use registry::LockRegistry;
pub use state::LockStatus;
pub use types::{CreateLockParams, FundLock, LockId, UnlockDecision};
