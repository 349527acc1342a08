use std::sync::Arc;

use crate::locks::LockEngine;
use crate::records::{BillStore, SavingsStore, TransactionStore};
use crate::user_auth::UserAuthService;
use crate::wallet::Ledger;

/// Gateway application state (shared).
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub locks: Arc<LockEngine>,
    pub user_auth: Arc<UserAuthService>,
    pub transactions: Arc<TransactionStore>,
    pub bills: Arc<BillStore>,
    pub savings: Arc<SavingsStore>,
}

impl AppState {
    /// Wire the full service graph around one shared ledger.
    pub fn new(jwt_secret: String, token_ttl_hours: i64) -> Self {
        let ledger = Arc::new(Ledger::new());
        Self {
            locks: Arc::new(LockEngine::new(Arc::clone(&ledger))),
            user_auth: Arc::new(UserAuthService::new(jwt_secret, token_ttl_hours)),
            transactions: Arc::new(TransactionStore::new(Arc::clone(&ledger))),
            bills: Arc::new(BillStore::new(Arc::clone(&ledger))),
            savings: Arc::new(SavingsStore::new(Arc::clone(&ledger))),
            ledger,
        }
    }
}
