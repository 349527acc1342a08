pub mod auth;
pub mod locks;
pub mod records;
pub mod wallet;

use axum::http::StatusCode;

use super::types::{ApiError, api_error, error_codes};
use crate::core_types::UserId;
use crate::user_auth::Claims;

/// Authenticated caller identity, parsed from the claims the JWT
/// middleware injected.
pub(crate) fn caller(claims: &Claims) -> Result<UserId, ApiError> {
    claims.user_id().ok_or_else(|| {
        api_error(
            StatusCode::UNAUTHORIZED,
            error_codes::AUTH_FAILED,
            "Invalid token subject",
        )
    })
}
