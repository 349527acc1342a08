//! Bill tracking. Paying a bill debits the wallet and marks it paid.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::RecordError;
use crate::core_types::{Currency, UserId};
use crate::wallet::Ledger;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    pub id: Ulid,
    pub owner: UserId,
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub due_date: NaiveDate,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBill {
    pub title: String,
    pub category: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub due_date: NaiveDate,
}

pub struct BillStore {
    ledger: Arc<Ledger>,
    items: DashMap<Ulid, Bill>,
    order: RwLock<Vec<(UserId, Ulid)>>,
}

impl BillStore {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            items: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    /// Track a bill. No balance effect until it is paid.
    pub fn create(&self, owner: UserId, req: NewBill) -> Result<Bill, RecordError> {
        if req.amount <= Decimal::ZERO {
            return Err(RecordError::Validation(
                "amount must be positive".to_string(),
            ));
        }

        let bill = Bill {
            id: Ulid::new(),
            owner,
            title: req.title,
            category: req.category,
            amount: req.amount,
            currency: req.currency,
            due_date: req.due_date,
            paid: false,
            created_at: Utc::now(),
        };
        self.items.insert(bill.id, bill.clone());
        self.order
            .write()
            .expect("bill index poisoned")
            .push((owner, bill.id));
        Ok(bill)
    }

    /// The owner's bills, insertion order.
    pub fn list(&self, owner: UserId) -> Vec<Bill> {
        let order = self.order.read().expect("bill index poisoned");
        order
            .iter()
            .filter(|(o, _)| *o == owner)
            .filter_map(|(_, id)| self.items.get(id).map(|b| b.clone()))
            .collect()
    }

    /// Pay a bill: debit the wallet and mark it paid, atomically under
    /// the bill's entry guard. A second pay call fails, and a failed
    /// debit leaves the bill unpaid.
    pub fn pay(&self, id: Ulid, owner: UserId) -> Result<Bill, RecordError> {
        let mut bill = self.items.get_mut(&id).ok_or(RecordError::NotFound)?;
        if bill.owner != owner {
            return Err(RecordError::Unauthorized);
        }
        if bill.paid {
            return Err(RecordError::Validation("bill already paid".to_string()));
        }

        self.ledger.debit(owner, bill.currency, bill.amount)?;
        bill.paid = true;
        Ok(bill.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    fn new_bill(amount: i64) -> NewBill {
        NewBill {
            title: "Electricity".to_string(),
            category: "utilities".to_string(),
            amount: dec(amount),
            currency: Currency::Ngn,
            due_date: NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        }
    }

    #[test]
    fn test_pay_debits_once() {
        let ledger = Arc::new(Ledger::new());
        ledger.credit(1, Currency::Ngn, dec(1000)).unwrap();
        let store = BillStore::new(Arc::clone(&ledger));

        let bill = store.create(1, new_bill(400)).unwrap();
        let paid = store.pay(bill.id, 1).unwrap();
        assert!(paid.paid);
        assert_eq!(ledger.balance(1, Currency::Ngn).available(), dec(600));

        // Second pay fails and no second debit happens
        assert!(matches!(
            store.pay(bill.id, 1),
            Err(RecordError::Validation(_))
        ));
        assert_eq!(ledger.balance(1, Currency::Ngn).available(), dec(600));
    }

    #[test]
    fn test_pay_with_insufficient_funds_leaves_bill_unpaid() {
        let ledger = Arc::new(Ledger::new());
        ledger.credit(1, Currency::Ngn, dec(100)).unwrap();
        let store = BillStore::new(Arc::clone(&ledger));

        let bill = store.create(1, new_bill(400)).unwrap();
        assert!(matches!(
            store.pay(bill.id, 1),
            Err(RecordError::Wallet(_))
        ));
        assert!(!store.list(1)[0].paid);
    }

    #[test]
    fn test_only_owner_pays() {
        let ledger = Arc::new(Ledger::new());
        let store = BillStore::new(Arc::clone(&ledger));
        let bill = store.create(1, new_bill(400)).unwrap();
        assert_eq!(store.pay(bill.id, 2), Err(RecordError::Unauthorized));
    }
}
