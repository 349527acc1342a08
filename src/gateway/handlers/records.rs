//! Transaction / bill / savings routes - thin wrappers over the stores.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use ulid::Ulid;

use super::caller;
use crate::gateway::state::AppState;
use crate::gateway::types::{
    ApiError, ApiResponse, UpdateTransactionRequest, api_error, error_codes, record_error,
};
use crate::records::{Bill, NewBill, NewSavingsPlan, NewTransaction, SavingsPlan, Transaction};
use crate::user_auth::Claims;

fn parse_record_id(raw: &str) -> Result<Ulid, ApiError> {
    raw.parse().map_err(|_| {
        api_error(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Invalid record id",
        )
    })
}

// ============================================================
// Transactions
// ============================================================

/// GET /api/v1/transactions
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<Transaction>>>, ApiError> {
    let user = caller(&claims)?;
    Ok(Json(ApiResponse::success(state.transactions.list(user))))
}

/// POST /api/v1/transactions
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<ApiResponse<Transaction>>), ApiError> {
    let user = caller(&claims)?;
    let txn = state
        .transactions
        .create(user, req)
        .map_err(record_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(txn))))
}

/// PUT /api/v1/transactions/{id}
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<Transaction>>, ApiError> {
    let user = caller(&claims)?;
    let id = parse_record_id(&id)?;
    let txn = state
        .transactions
        .update_description(id, user, req.description)
        .map_err(record_error)?;
    Ok(Json(ApiResponse::success(txn)))
}

/// DELETE /api/v1/transactions/{id}
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let user = caller(&claims)?;
    let id = parse_record_id(&id)?;
    state.transactions.delete(id, user).map_err(record_error)?;
    Ok(Json(ApiResponse::success(())))
}

// ============================================================
// Bills
// ============================================================

/// GET /api/v1/bills
pub async fn list_bills(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<Bill>>>, ApiError> {
    let user = caller(&claims)?;
    Ok(Json(ApiResponse::success(state.bills.list(user))))
}

/// POST /api/v1/bills
pub async fn create_bill(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewBill>,
) -> Result<(StatusCode, Json<ApiResponse<Bill>>), ApiError> {
    let user = caller(&claims)?;
    let bill = state.bills.create(user, req).map_err(record_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(bill))))
}

/// POST /api/v1/bills/{id}/pay
pub async fn pay_bill(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Bill>>, ApiError> {
    let user = caller(&claims)?;
    let id = parse_record_id(&id)?;
    let bill = state.bills.pay(id, user).map_err(record_error)?;
    Ok(Json(ApiResponse::success(bill)))
}

// ============================================================
// Savings plans
// ============================================================

/// GET /api/v1/savings
pub async fn list_savings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<SavingsPlan>>>, ApiError> {
    let user = caller(&claims)?;
    Ok(Json(ApiResponse::success(state.savings.list(user))))
}

/// POST /api/v1/savings
pub async fn create_savings_plan(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<NewSavingsPlan>,
) -> Result<(StatusCode, Json<ApiResponse<SavingsPlan>>), ApiError> {
    let user = caller(&claims)?;
    let plan = state.savings.create(user, req).map_err(record_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(plan))))
}

/// POST /api/v1/savings/{id}/contribute
pub async fn contribute_to_savings(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SavingsPlan>>, ApiError> {
    let user = caller(&claims)?;
    let id = parse_record_id(&id)?;
    let plan = state.savings.contribute(id, user).map_err(record_error)?;
    Ok(Json(ApiResponse::success(plan)))
}
