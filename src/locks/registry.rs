//! Lock Registry - owns the set of FundLock records.
//!
//! Indexes are append-only: locks are never deleted, a released lock just
//! sits in its terminal state as history. Mutation happens through the
//! record's entry guard so a status check, the ledger move, and the status
//! write land as one atomic unit (see the engine).

use dashmap::DashMap;
use dashmap::mapref::one::RefMut;
use std::sync::RwLock;

use super::error::LockError;
use super::state::LockStatus;
use super::types::{FundLock, LockId};
use crate::core_types::UserId;

#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<LockId, FundLock>,
    /// Insertion-ordered lock ids per owner
    by_owner: RwLock<Vec<(UserId, LockId)>>,
    /// Insertion-ordered lock ids per guardian
    by_guardian: RwLock<Vec<(UserId, LockId)>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a freshly created lock and index it.
    pub(crate) fn insert(&self, lock: FundLock) {
        let id = lock.id;
        let owner = lock.owner;
        let guardian = lock.guardian;
        self.locks.insert(id, lock);
        self.by_owner
            .write()
            .expect("owner index poisoned")
            .push((owner, id));
        self.by_guardian
            .write()
            .expect("guardian index poisoned")
            .push((guardian, id));
    }

    /// Snapshot of a single lock.
    pub fn get(&self, id: LockId) -> Result<FundLock, LockError> {
        self.locks
            .get(&id)
            .map(|l| l.clone())
            .ok_or(LockError::NotFound)
    }

    /// Entry guard for atomic read-modify-write. The guard holds the
    /// record's shard lock until dropped; a concurrent operation on the
    /// same lock blocks here and then sees the updated status.
    pub(crate) fn get_mut(&self, id: LockId) -> Result<RefMut<'_, LockId, FundLock>, LockError> {
        self.locks.get_mut(&id).ok_or(LockError::NotFound)
    }

    /// All of an owner's locks regardless of status, insertion order.
    pub fn list_by_owner(&self, owner: UserId) -> Vec<FundLock> {
        let index = self.by_owner.read().expect("owner index poisoned");
        index
            .iter()
            .filter(|(o, _)| *o == owner)
            .filter_map(|(_, id)| self.locks.get(id).map(|l| l.clone()))
            .collect()
    }

    /// Locks awaiting this guardian's decision, across all owners.
    pub fn list_guardian_requests(&self, guardian: UserId) -> Vec<FundLock> {
        let index = self.by_guardian.read().expect("guardian index poisoned");
        index
            .iter()
            .filter(|(g, _)| *g == guardian)
            .filter_map(|(_, id)| self.locks.get(id).map(|l| l.clone()))
            .filter(|lock| lock.status == LockStatus::UnlockRequested)
            .collect()
    }
}
