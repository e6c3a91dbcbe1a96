use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // A missing MONGODB_URI stops the process here
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(url = %config.mongodb.redacted_url(), "MongoDB configured");

    // The connection is established lazily by the first caller
    let state = AppState::new(config);

    api::init_indexes(&state).await?;

    let api_routes = api::routes(&state);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes)?;

    let app = router.merge(health_router(state.config.app));

    info!("Starting DevEvent API with graceful shutdown (30s timeout)");

    let connection = state.connection.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            if connection.is_connected().await {
                if let Ok(client) = connection.client().await {
                    client.shutdown().await;
                }
            }
            connection.reset().await;
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("DevEvent API shutdown complete");
    Ok(())
}
