//! Safety Lock routes. All of them require an authenticated caller; the
//! engine enforces who may do what on each lock.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::caller;
use crate::gateway::state::AppState;
use crate::gateway::types::{
    ApiError, ApiResponse, CreateLockRequest, DecisionRequest, LockView, ReleaseLockResponse,
    api_error, error_codes, lock_error,
};
use crate::locks::{CreateLockParams, FundLock, LockId};
use crate::user_auth::Claims;

fn parse_lock_id(raw: &str) -> Result<LockId, ApiError> {
    raw.parse().map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Invalid lock id",
        )
    })
}

fn view(state: &AppState, lock: &FundLock) -> LockView {
    LockView::from_lock(lock, |id| state.user_auth.username_of(id))
}

/// Lock funds under a guardian and a due date
///
/// POST /api/v1/locks
pub async fn create_lock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateLockRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LockView>>), ApiError> {
    let owner = caller(&claims)?;
    let guardian = state
        .user_auth
        .resolve_username(&req.guardian_username)
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                error_codes::INVALID_PARAMETER,
                "Guardian username not found",
            )
        })?;

    let lock = state
        .locks
        .create_lock(
            owner,
            CreateLockParams {
                guardian,
                amount: req.amount,
                currency: req.currency,
                purpose: req.purpose,
                due_date: req.due_date,
            },
        )
        .map_err(lock_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(view(&state, &lock))),
    ))
}

/// The caller's locks, all statuses, insertion order
///
/// GET /api/v1/locks
pub async fn list_locks(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<LockView>>>, ApiError> {
    let owner = caller(&claims)?;
    let locks = state
        .locks
        .locks_for_owner(owner)
        .iter()
        .map(|l| view(&state, l))
        .collect();
    Ok(Json(ApiResponse::success(locks)))
}

/// Unlock requests waiting on the caller as guardian
///
/// GET /api/v1/locks/requests
pub async fn list_guardian_requests(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<LockView>>>, ApiError> {
    let guardian = caller(&claims)?;
    let locks = state
        .locks
        .guardian_requests(guardian)
        .iter()
        .map(|l| view(&state, l))
        .collect();
    Ok(Json(ApiResponse::success(locks)))
}

/// Ask the guardian for an early unlock
///
/// POST /api/v1/locks/{id}/request-unlock
pub async fn request_unlock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LockView>>, ApiError> {
    let owner = caller(&claims)?;
    let id = parse_lock_id(&id)?;
    let lock = state.locks.request_unlock(id, owner).map_err(lock_error)?;
    Ok(Json(ApiResponse::success(view(&state, &lock))))
}

/// Approve or reject a pending unlock request (guardian only)
///
/// POST /api/v1/locks/{id}/decision
pub async fn decide_unlock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<ApiResponse<LockView>>, ApiError> {
    let guardian = caller(&claims)?;
    let id = parse_lock_id(&id)?;
    let lock = state
        .locks
        .decide_unlock(id, guardian, req.decision)
        .map_err(lock_error)?;
    Ok(Json(ApiResponse::success(view(&state, &lock))))
}

/// Release a matured or guardian-approved lock
///
/// POST /api/v1/locks/{id}/release
pub async fn release_lock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReleaseLockResponse>>, ApiError> {
    let owner = caller(&claims)?;
    let id = parse_lock_id(&id)?;
    let lock = state.locks.release(id, owner).map_err(lock_error)?;
    Ok(Json(ApiResponse::success(ReleaseLockResponse {
        lock: view(&state, &lock),
        balances: state.ledger.balances(owner),
    })))
}
