use async_trait::async_trait;
use uuid::Uuid;

use crate::error::BookingResult;
use crate::models::{Booking, BookingFilter};

/// Repository trait for Booking persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a validated booking
    async fn create(&self, booking: Booking) -> BookingResult<Booking>;

    async fn get_by_id(&self, id: Uuid) -> BookingResult<Option<Booking>>;

    /// List bookings, newest first
    async fn list(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>>;

    /// Count bookings, optionally for a single event
    async fn count(&self, event_id: Option<Uuid>) -> BookingResult<u64>;
}

/// Answers whether a referenced event exists at the moment of asking
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventLookup: Send + Sync {
    async fn event_exists(&self, event_id: Uuid) -> BookingResult<bool>;
}
