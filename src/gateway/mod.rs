//! HTTP gateway: route table, shared state, and wire types.

pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::user_auth::jwt_auth_middleware;
use state::AppState;

/// Build the full route table. Everything except register/login sits
/// behind the JWT middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    let public = Router::new()
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login));

    let protected = Router::new()
        // Wallet
        .route("/api/v1/wallet", get(handlers::wallet::get_balances))
        .route("/api/v1/wallet/deposit", post(handlers::wallet::deposit))
        // Safety locks
        .route(
            "/api/v1/locks",
            post(handlers::locks::create_lock).get(handlers::locks::list_locks),
        )
        .route(
            "/api/v1/locks/requests",
            get(handlers::locks::list_guardian_requests),
        )
        .route(
            "/api/v1/locks/{id}/request-unlock",
            post(handlers::locks::request_unlock),
        )
        .route(
            "/api/v1/locks/{id}/decision",
            post(handlers::locks::decide_unlock),
        )
        .route(
            "/api/v1/locks/{id}/release",
            post(handlers::locks::release_lock),
        )
        // Transaction log
        .route(
            "/api/v1/transactions",
            get(handlers::records::list_transactions)
                .post(handlers::records::create_transaction),
        )
        .route(
            "/api/v1/transactions/{id}",
            put(handlers::records::update_transaction)
                .delete(handlers::records::delete_transaction),
        )
        // Bills
        .route(
            "/api/v1/bills",
            get(handlers::records::list_bills).post(handlers::records::create_bill),
        )
        .route("/api/v1/bills/{id}/pay", post(handlers::records::pay_bill))
        // Savings plans
        .route(
            "/api/v1/savings",
            get(handlers::records::list_savings)
                .post(handlers::records::create_savings_plan),
        )
        .route(
            "/api/v1/savings/{id}/contribute",
            post(handlers::records::contribute_to_savings),
        )
        .route_layer(from_fn_with_state(
            Arc::clone(&state),
            jwt_auth_middleware,
        ));

    public.merge(protected).with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn start_gateway(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Gateway listening on {}", addr);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
