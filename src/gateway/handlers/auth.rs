use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, api_error, error_codes};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

/// Register a new user
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<u64>>), ApiError> {
    if req.username.is_empty() || req.password.len() < 8 {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            "Invalid username or password (min 8 chars)",
        ));
    }

    match state.user_auth.register(req) {
        Ok(user_id) => Ok((StatusCode::CREATED, Json(ApiResponse::success(user_id)))),
        Err(e) => {
            let err_msg = e.to_string();
            if err_msg.contains("already exists") {
                tracing::warn!("Registration attempt for existing user: {}", err_msg);
                Err(api_error(
                    StatusCode::CONFLICT,
                    error_codes::INVALID_PARAMETER,
                    "Username already exists",
                ))
            } else {
                tracing::error!("Registration failed: {:?}", e);
                Err(api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Registration failed",
                ))
            }
        }
    }
}

/// Login user
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    match state.user_auth.login(req) {
        Ok(resp) => Ok(Json(ApiResponse::success(resp))),
        Err(e) => {
            tracing::warn!("Login failed: {:?}", e);
            Err(api_error(
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "Invalid username or password",
            ))
        }
    }
}
