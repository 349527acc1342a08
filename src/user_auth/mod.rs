//! User directory, password auth, and JWT verification.

pub mod middleware;
pub mod service;

pub use middleware::jwt_auth_middleware;
pub use service::{AuthResponse, Claims, LoginRequest, RegisterRequest, UserAuthService};
