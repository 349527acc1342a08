//! Gateway wire types: the response envelope, error codes, and request /
//! response DTOs. DTO field names are camelCase to match the web client.

use axum::Json;
use axum::http::StatusCode;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{Currency, UserId};
use crate::locks::{FundLock, LockError, LockStatus, UnlockDecision};
use crate::records::RecordError;
use crate::wallet::{BalanceView, WalletError};

/// Uniform JSON envelope for all gateway responses.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    pub code: i32,
    /// Response message
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_BALANCE: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource / state errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;
    pub const INVALID_TRANSITION: i32 = 4002;
    pub const FUNDS_LOCKED: i32 = 4003;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Error half of every handler's Result.
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn api_error(status: StatusCode, code: i32, msg: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::<()>::error(code, msg)))
}

/// Map a lock-engine error to an HTTP status + error code, surfacing the
/// message verbatim for the client to display.
pub fn lock_error(err: LockError) -> ApiError {
    let (status, code) = match &err {
        LockError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        LockError::InsufficientFunds => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        LockError::NotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        LockError::Unauthorized => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        LockError::InvalidTransition { .. } => {
            (StatusCode::CONFLICT, error_codes::INVALID_TRANSITION)
        }
        LockError::LockedFunds => (StatusCode::CONFLICT, error_codes::FUNDS_LOCKED),
    };
    api_error(status, code, err.to_string())
}

pub fn record_error(err: RecordError) -> ApiError {
    let (status, code) = match &err {
        RecordError::NotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
        RecordError::Unauthorized => (StatusCode::FORBIDDEN, error_codes::FORBIDDEN),
        RecordError::Validation(_) => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
        RecordError::Wallet(WalletError::InsufficientFunds) => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        RecordError::Wallet(_) => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
    };
    api_error(status, code, err.to_string())
}

pub fn wallet_error(err: WalletError) -> ApiError {
    let (status, code) = match err {
        WalletError::InsufficientFunds => {
            (StatusCode::BAD_REQUEST, error_codes::INSUFFICIENT_BALANCE)
        }
        _ => (StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER),
    };
    api_error(status, code, err.to_string())
}

// ============================================================
// Lock DTOs
// ============================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLockRequest {
    pub amount: Decimal,
    pub currency: Currency,
    pub purpose: String,
    pub due_date: NaiveDate,
    pub guardian_username: String,
}

#[derive(Debug, Deserialize)]
pub struct DecisionRequest {
    pub decision: UnlockDecision,
}

/// Lock record as rendered to the client, with usernames resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockView {
    pub id: String,
    pub owner_username: String,
    pub guardian_username: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub purpose: String,
    pub due_date: NaiveDate,
    pub status: LockStatus,
    pub created_at: DateTime<Utc>,
}

impl LockView {
    pub fn from_lock(
        lock: &FundLock,
        resolve: impl Fn(UserId) -> Option<String>,
    ) -> Self {
        let name = |id: UserId| resolve(id).unwrap_or_else(|| id.to_string());
        Self {
            id: lock.id.to_string(),
            owner_username: name(lock.owner),
            guardian_username: name(lock.guardian),
            amount: lock.amount,
            currency: lock.currency,
            purpose: lock.purpose.clone(),
            due_date: lock.due_date,
            status: lock.status,
            created_at: lock.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseLockResponse {
    pub lock: LockView,
    pub balances: Vec<BalanceView>,
}

// ============================================================
// Wallet / record DTOs
// ============================================================

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub currency: Currency,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::locks::CreateLockParams;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::success(json!({ "ok": true }));
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "code": 0, "msg": "ok", "data": { "ok": true } })
        );
    }

    #[test]
    fn test_error_envelope_omits_data_key() {
        let resp = ApiResponse::<()>::error(error_codes::NOT_FOUND, "no such lock");
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "code": 4001, "msg": "no such lock" })
        );
    }

    #[test]
    fn test_decision_request_parses_lowercase_wire_values() {
        let req: DecisionRequest = serde_json::from_value(json!({ "decision": "approve" })).unwrap();
        assert_eq!(req.decision, UnlockDecision::Approve);
        let req: DecisionRequest = serde_json::from_value(json!({ "decision": "reject" })).unwrap();
        assert_eq!(req.decision, UnlockDecision::Reject);
    }

    #[test]
    fn test_lock_view_renders_camel_case_wire_fields() {
        let mut lock = FundLock::new(
            1,
            CreateLockParams {
                guardian: 2,
                amount: Decimal::from(5_000),
                currency: Currency::Ngn,
                purpose: "Rent".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
            },
        );
        lock.set_status(LockStatus::UnlockRequested).unwrap();

        let view = LockView::from_lock(&lock, |id| match id {
            1 => Some("tolu".to_string()),
            2 => Some("ada".to_string()),
            _ => None,
        });
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value["ownerUsername"], json!("tolu"));
        assert_eq!(value["guardianUsername"], json!("ada"));
        assert_eq!(value["status"], json!("unlock_requested"));
        assert_eq!(value["dueDate"], json!("2026-06-15"));
        assert_eq!(value["currency"], json!("NGN"));
        assert_eq!(value["id"], json!(lock.id.to_string()));
    }

    #[test]
    fn test_lock_view_falls_back_to_numeric_id_for_unknown_users() {
        let lock = FundLock::new(
            7,
            CreateLockParams {
                guardian: 8,
                amount: Decimal::from(100),
                currency: Currency::Usd,
                purpose: "Travel".to_string(),
                due_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
            },
        );
        let view = LockView::from_lock(&lock, |_| None);
        assert_eq!(view.owner_username, "7");
        assert_eq!(view.guardian_username, "8");
    }

    #[test]
    fn test_lock_error_http_mapping() {
        let (status, Json(body)) = lock_error(LockError::LockedFunds);
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.code, error_codes::FUNDS_LOCKED);

        let (status, Json(body)) = lock_error(LockError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, error_codes::NOT_FOUND);

        let (status, Json(body)) = lock_error(LockError::Unauthorized);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code, error_codes::FORBIDDEN);
    }
}
