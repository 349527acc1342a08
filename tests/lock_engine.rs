//! End-to-end Safety Lock scenarios, driven straight against the engine.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use linsfair::core_types::{Currency, UserId};
use linsfair::locks::{CreateLockParams, LockEngine, LockError, LockStatus, UnlockDecision};
use linsfair::wallet::Ledger;

const OWNER: UserId = 1;
const GUARDIAN: UserId = 2;

fn dec(v: i64) -> Decimal {
    Decimal::from(v)
}

fn at(date: &str) -> DateTime<Utc> {
    format!("{date}T12:00:00Z").parse().unwrap()
}

fn due(date: &str) -> NaiveDate {
    date.parse().unwrap()
}

fn setup(balance: i64, currency: Currency) -> (Arc<LockEngine>, Arc<Ledger>) {
    let ledger = Arc::new(Ledger::new());
    ledger.credit(OWNER, currency, dec(balance)).unwrap();
    (Arc::new(LockEngine::new(Arc::clone(&ledger))), ledger)
}

fn params(amount: i64, currency: Currency, due_date: &str) -> CreateLockParams {
    CreateLockParams {
        guardian: GUARDIAN,
        amount: dec(amount),
        currency,
        purpose: "Emergency fund".to_string(),
        due_date: due(due_date),
    }
}

/// Balance 10000 NGN, lock 5000 due tomorrow. Request early unlock, the
/// guardian rejects, a premature release fails, and after the due date
/// passes the release restores the full balance.
#[test]
fn reject_then_mature_scenario() {
    let (engine, ledger) = setup(10_000, Currency::Ngn);

    let lock = engine
        .create_lock_at(OWNER, params(5_000, Currency::Ngn, "2026-06-02"), at("2026-06-01"))
        .unwrap();
    assert_eq!(lock.status, LockStatus::Active);
    assert_eq!(ledger.balance(OWNER, Currency::Ngn).available(), dec(5_000));

    let requested = engine.request_unlock(lock.id, OWNER).unwrap();
    assert_eq!(requested.status, LockStatus::UnlockRequested);

    let rejected = engine
        .decide_unlock(lock.id, GUARDIAN, UnlockDecision::Reject)
        .unwrap();
    assert_eq!(rejected.status, LockStatus::Active);

    assert_eq!(
        engine.release_at(lock.id, OWNER, at("2026-06-01")),
        Err(LockError::LockedFunds)
    );

    let released = engine.release_at(lock.id, OWNER, at("2026-06-02")).unwrap();
    assert_eq!(released.status, LockStatus::Released);
    assert_eq!(ledger.balance(OWNER, Currency::Ngn).available(), dec(10_000));
}

/// 2000 USD locked far in the future; guardian approval makes it
/// releasable immediately, no maturity needed.
#[test]
fn guardian_approved_early_release() {
    let (engine, ledger) = setup(2_000, Currency::Usd);

    let lock = engine
        .create_lock_at(OWNER, params(2_000, Currency::Usd, "2030-01-01"), at("2026-06-01"))
        .unwrap();
    engine.request_unlock(lock.id, OWNER).unwrap();
    let approved = engine
        .decide_unlock(lock.id, GUARDIAN, UnlockDecision::Approve)
        .unwrap();
    assert_eq!(approved.status, LockStatus::Available);

    let released = engine.release_at(lock.id, OWNER, at("2026-06-02")).unwrap();
    assert_eq!(released.status, LockStatus::Released);
    assert_eq!(ledger.balance(OWNER, Currency::Usd).available(), dec(2_000));
}

/// Full NGN round trip is net zero: create debits 5000, the approved
/// release credits exactly 5000 back.
#[test]
fn round_trip_is_net_zero() {
    let (engine, ledger) = setup(10_000, Currency::Ngn);
    let lock = engine
        .create_lock_at(OWNER, params(5_000, Currency::Ngn, "2027-01-01"), at("2026-06-01"))
        .unwrap();

    engine.request_unlock(lock.id, OWNER).unwrap();
    engine
        .decide_unlock(lock.id, GUARDIAN, UnlockDecision::Approve)
        .unwrap();
    engine.release_at(lock.id, OWNER, at("2026-06-01")).unwrap();

    let bal = ledger.balance(OWNER, Currency::Ngn);
    assert_eq!(bal.available(), dec(10_000));
    assert_eq!(bal.locked(), Decimal::ZERO);
}

/// The ledger's locked column always equals the sum of amounts over the
/// owner's non-released locks.
#[test]
fn locked_total_matches_registry() {
    let (engine, ledger) = setup(10_000, Currency::Ngn);

    let a = engine
        .create_lock_at(OWNER, params(3_000, Currency::Ngn, "2026-07-01"), at("2026-06-01"))
        .unwrap();
    let b = engine
        .create_lock_at(OWNER, params(2_000, Currency::Ngn, "2026-08-01"), at("2026-06-01"))
        .unwrap();

    let non_released_total = |engine: &LockEngine| -> Decimal {
        engine
            .locks_for_owner(OWNER)
            .iter()
            .filter(|l| l.status != LockStatus::Released)
            .map(|l| l.amount)
            .sum()
    };

    assert_eq!(ledger.locked_total(OWNER, Currency::Ngn), dec(5_000));
    assert_eq!(non_released_total(&engine), dec(5_000));

    engine.request_unlock(a.id, OWNER).unwrap();
    assert_eq!(ledger.locked_total(OWNER, Currency::Ngn), non_released_total(&engine));

    engine.release_at(b.id, OWNER, at("2026-08-01")).unwrap();
    assert_eq!(ledger.locked_total(OWNER, Currency::Ngn), dec(3_000));
    assert_eq!(non_released_total(&engine), dec(3_000));
}

/// Guardian-only: no identity other than the stored guardian may decide,
/// whatever the lock's status.
#[test]
fn decisions_are_guardian_only() {
    let (engine, _) = setup(10_000, Currency::Ngn);
    let lock = engine
        .create_lock_at(OWNER, params(5_000, Currency::Ngn, "2027-01-01"), at("2026-06-01"))
        .unwrap();

    for stranger in [OWNER, 99] {
        assert_eq!(
            engine.decide_unlock(lock.id, stranger, UnlockDecision::Approve),
            Err(LockError::Unauthorized)
        );
    }

    engine.request_unlock(lock.id, OWNER).unwrap();
    for stranger in [OWNER, 99] {
        assert_eq!(
            engine.decide_unlock(lock.id, stranger, UnlockDecision::Approve),
            Err(LockError::Unauthorized)
        );
    }
}

/// Two simultaneous releases of the same available lock: exactly one
/// succeeds, the other sees the terminal status, and the ledger is
/// credited exactly once.
#[test]
fn concurrent_release_credits_once() {
    let (engine, ledger) = setup(10_000, Currency::Ngn);
    let lock = engine
        .create_lock_at(OWNER, params(5_000, Currency::Ngn, "2027-01-01"), at("2026-06-01"))
        .unwrap();
    engine.request_unlock(lock.id, OWNER).unwrap();
    engine
        .decide_unlock(lock.id, GUARDIAN, UnlockDecision::Approve)
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let engine = Arc::clone(&engine);
        let id = lock.id;
        handles.push(std::thread::spawn(move || {
            engine.release_at(id, OWNER, at("2026-06-02"))
        }));
    }

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(LockError::InvalidTransition {
            from: LockStatus::Released
        })
    )));

    assert_eq!(ledger.balance(OWNER, Currency::Ngn).available(), dec(10_000));
}

/// Unknown lock ids surface as NotFound from every operation.
#[test]
fn unknown_lock_is_not_found() {
    let (engine, _) = setup(1_000, Currency::Ngn);
    let ghost = linsfair::locks::LockId::new();

    assert_eq!(engine.get(ghost), Err(LockError::NotFound));
    assert_eq!(engine.request_unlock(ghost, OWNER), Err(LockError::NotFound));
    assert_eq!(
        engine.decide_unlock(ghost, GUARDIAN, UnlockDecision::Approve),
        Err(LockError::NotFound)
    );
    assert_eq!(
        engine.release_at(ghost, OWNER, at("2026-06-01")),
        Err(LockError::NotFound)
    );
}
