//! Transaction log: income and expense entries.
//!
//! Creating an entry moves money; deleting one reverses the move. Only the
//! free-text description is editable afterwards, so amounts in the log
//! always agree with what the ledger saw.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::RecordError;
use crate::core_types::{Currency, UserId};
use crate::wallet::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    pub id: Ulid,
    pub owner: UserId,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
}

pub struct TransactionStore {
    ledger: Arc<Ledger>,
    items: DashMap<Ulid, Transaction>,
    order: RwLock<Vec<(UserId, Ulid)>>,
}

impl TransactionStore {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            items: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Record a transaction and apply its balance effect.
    pub fn create(&self, owner: UserId, req: NewTransaction) -> Result<Transaction, RecordError> {
        if req.amount <= Decimal::ZERO {
            return Err(RecordError::Validation(
                "amount must be positive".to_string(),
            ));
        }

        match req.kind {
            TransactionKind::Income => self.ledger.credit(owner, req.currency, req.amount)?,
            TransactionKind::Expense => self.ledger.debit(owner, req.currency, req.amount)?,
        };

        let txn = Transaction {
            id: Ulid::new(),
            owner,
            kind: req.kind,
            amount: req.amount,
            currency: req.currency,
            description: req.description,
            created_at: Utc::now(),
        };
        self.items.insert(txn.id, txn.clone());
        self.order
            .write()
            .expect("transaction index poisoned")
            .push((owner, txn.id));
        Ok(txn)
    }

    /// The owner's transactions, insertion order.
    pub fn list(&self, owner: UserId) -> Vec<Transaction> {
        let order = self.order.read().expect("transaction index poisoned");
        order
            .iter()
            .filter(|(o, _)| *o == owner)
            .filter_map(|(_, id)| self.items.get(id).map(|t| t.clone()))
            .collect()
    }

    /// Update the description. Amounts are immutable once recorded.
    pub fn update_description(
        &self,
        id: Ulid,
        owner: UserId,
        description: String,
    ) -> Result<Transaction, RecordError> {
        let mut txn = self.items.get_mut(&id).ok_or(RecordError::NotFound)?;
        if txn.owner != owner {
            return Err(RecordError::Unauthorized);
        }
        txn.description = description;
        Ok(txn.clone())
    }

    /// Delete a transaction, reversing its balance effect. Deleting an
    /// income entry fails if the money has already been spent.
    ///
    /// The record is taken out of the map first, so a racing second
    /// delete sees NotFound instead of reversing the balance twice; on a
    /// failed reversal the record is put back untouched.
    pub fn delete(&self, id: Ulid, owner: UserId) -> Result<(), RecordError> {
        let (_, txn) = self.items.remove(&id).ok_or(RecordError::NotFound)?;
        if txn.owner != owner {
            self.items.insert(id, txn);
            return Err(RecordError::Unauthorized);
        }

        let reversal = match txn.kind {
            TransactionKind::Income => self.ledger.debit(owner, txn.currency, txn.amount),
            TransactionKind::Expense => self.ledger.credit(owner, txn.currency, txn.amount),
        };
        if let Err(err) = reversal {
            self.items.insert(id, txn);
            return Err(err.into());
        }

        self.order
            .write()
            .expect("transaction index poisoned")
            .retain(|(_, tid)| *tid != id);
        Ok(())
    }
}
