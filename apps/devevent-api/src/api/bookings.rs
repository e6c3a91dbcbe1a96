//! Bookings API routes
//!
//! Bookings check the `events` collection for the referenced event, so the
//! service gets its own event repository over the shared connection.

use axum::Router;
use database::common::retry;
use domain_bookings::{BookingService, MongoBookingRepository, handlers};
use domain_events::MongoEventRepository;
use tracing::info;

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoBookingRepository::new(state.connection.clone());
    let events = MongoEventRepository::new(state.connection.clone());
    handlers::router(BookingService::new(repository, events))
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    let repository = MongoBookingRepository::new(state.connection.clone());
    retry(|| repository.init_indexes())
        .await
        .map_err(|e| eyre::eyre!("Failed to create booking indexes: {}", e))?;
    info!("Booking collection indexes created");
    Ok(())
}
