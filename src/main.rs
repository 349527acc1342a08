//! LINSFAIR wallet backend entry point.
//!
//! Loads `config/{env}.yaml`, wires the service graph around one shared
//! ledger, and serves the gateway until stopped.

use std::sync::Arc;

use linsfair::config::AppConfig;
use linsfair::gateway::{self, state::AppState};
use linsfair::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);

    tracing::info!(
        env = %env,
        build = env!("GIT_HASH"),
        "Starting LINSFAIR wallet backend"
    );

    let state = Arc::new(AppState::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_ttl_hours,
    ));

    gateway::start_gateway(&config.gateway, state).await
}
