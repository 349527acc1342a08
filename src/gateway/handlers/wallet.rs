use axum::{Extension, Json, extract::State};
use std::sync::Arc;

use super::caller;
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, DepositRequest, wallet_error};
use crate::user_auth::Claims;
use crate::wallet::BalanceView;

/// Current balances per currency
///
/// GET /api/v1/wallet
pub async fn get_balances(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<BalanceView>>>, ApiError> {
    let user = caller(&claims)?;
    Ok(Json(ApiResponse::success(state.ledger.balances(user))))
}

/// Top up the available balance (demo funding path)
///
/// POST /api/v1/wallet/deposit
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<DepositRequest>,
) -> Result<Json<ApiResponse<Vec<BalanceView>>>, ApiError> {
    let user = caller(&claims)?;
    state
        .ledger
        .credit(user, req.currency, req.amount)
        .map_err(wallet_error)?;
    Ok(Json(ApiResponse::success(state.ledger.balances(user))))
}
