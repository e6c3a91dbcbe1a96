//! Events API routes

use axum::Router;
use database::common::retry;
use domain_events::{EventService, MongoEventRepository, handlers};
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.connection.clone());
    handlers::router(EventService::new(repository))
}

/// Create the unique slug index and listing indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoEventRepository::new(state.connection.clone());
    retry(|| repository.init_indexes())
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
