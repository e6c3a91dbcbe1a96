//! API routes module
//!
//! This module defines all HTTP API routes for the DevEvent API.

pub mod bookings;
pub mod events;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/events", events::router(state))
        .nest("/bookings", bookings::router(state))
        .merge(health::router(state.clone()))
}

/// Ensure collection indexes exist, retrying while MongoDB comes up.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    events::init_indexes(state).await?;
    bookings::init_indexes(state).await?;
    Ok(())
}
