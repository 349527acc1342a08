//! Recurring savings plans. Each contribution debits the wallet, grows
//! the plan's saved total, and advances the next contribution date by the
//! plan's frequency.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use super::RecordError;
use crate::core_types::{Currency, UserId};
use crate::wallet::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Next contribution date after `from`.
    pub fn advance(&self, from: NaiveDate) -> NaiveDate {
        match self {
            Frequency::Daily => from + Days::new(1),
            Frequency::Weekly => from + Days::new(7),
            Frequency::Monthly => from + Months::new(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsPlan {
    pub id: Ulid,
    pub owner: UserId,
    pub title: String,
    pub target_amount: Decimal,
    pub amount_per_contribution: Decimal,
    pub currency: Currency,
    pub frequency: Frequency,
    pub saved_amount: Decimal,
    pub next_contribution_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SavingsPlan {
    pub fn target_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSavingsPlan {
    pub title: String,
    pub target_amount: Decimal,
    pub amount_per_contribution: Decimal,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    pub frequency: Frequency,
    pub next_contribution_date: NaiveDate,
}

fn default_currency() -> Currency {
    Currency::Ngn
}

pub struct SavingsStore {
    ledger: Arc<Ledger>,
    items: DashMap<Ulid, SavingsPlan>,
    order: RwLock<Vec<(UserId, Ulid)>>,
}

impl SavingsStore {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            items: DashMap::new(),
            order: RwLock::new(Vec::new()),
        }
    }

    pub fn create(&self, owner: UserId, req: NewSavingsPlan) -> Result<SavingsPlan, RecordError> {
        if req.target_amount <= Decimal::ZERO || req.amount_per_contribution <= Decimal::ZERO {
            return Err(RecordError::Validation(
                "amounts must be positive".to_string(),
            ));
        }

        let plan = SavingsPlan {
            id: Ulid::new(),
            owner,
            title: req.title,
            target_amount: req.target_amount,
            amount_per_contribution: req.amount_per_contribution,
            currency: req.currency,
            frequency: req.frequency,
            saved_amount: Decimal::ZERO,
            next_contribution_date: req.next_contribution_date,
            created_at: Utc::now(),
        };
        self.items.insert(plan.id, plan.clone());
        self.order
            .write()
            .expect("savings index poisoned")
            .push((owner, plan.id));
        Ok(plan)
    }

    /// The owner's plans, insertion order.
    pub fn list(&self, owner: UserId) -> Vec<SavingsPlan> {
        let order = self.order.read().expect("savings index poisoned");
        order
            .iter()
            .filter(|(o, _)| *o == owner)
            .filter_map(|(_, id)| self.items.get(id).map(|p| p.clone()))
            .collect()
    }

    /// Make one contribution: debit the wallet, grow the saved total,
    /// advance the schedule. Held under the plan's entry guard so a failed
    /// debit changes nothing.
    pub fn contribute(&self, id: Ulid, owner: UserId) -> Result<SavingsPlan, RecordError> {
        let mut plan = self.items.get_mut(&id).ok_or(RecordError::NotFound)?;
        if plan.owner != owner {
            return Err(RecordError::Unauthorized);
        }
        if plan.target_reached() {
            return Err(RecordError::Validation(
                "savings target already reached".to_string(),
            ));
        }

        self.ledger
            .debit(owner, plan.currency, plan.amount_per_contribution)?;
        let contribution = plan.amount_per_contribution;
        plan.saved_amount += contribution;
        plan.next_contribution_date = plan.frequency.advance(plan.next_contribution_date);
        Ok(plan.clone())
    }
}
