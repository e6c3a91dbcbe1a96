//! Booking Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BookingError, BookingResult};
use crate::models::{Booking, BookingFilter, CreateBooking};
use crate::repository::{BookingRepository, EventLookup};
use crate::validation::validate_booking;

/// Booking service providing business logic operations
///
/// A booking is inserted only after it validates and its event is found.
/// The existence check and the insert are not atomic: an event deleted in
/// between still leaves the booking in place.
pub struct BookingService<R: BookingRepository, E: EventLookup> {
    repository: Arc<R>,
    events: Arc<E>,
}

impl<R: BookingRepository, E: EventLookup> BookingService<R, E> {
    pub fn new(repository: R, events: E) -> Self {
        Self {
            repository: Arc::new(repository),
            events: Arc::new(events),
        }
    }

    /// Create a new booking
    #[instrument(skip(self, input), fields(event_id = ?input.event_id))]
    pub async fn create_booking(&self, input: CreateBooking) -> BookingResult<Booking> {
        input
            .validate()
            .map_err(|_| BookingError::validation("email", "Email is too long"))?;

        let event_id = input
            .event_id
            .ok_or_else(|| BookingError::validation("eventId", "Event ID is required"))?;

        let booking = Booking::new(event_id, &input.email);
        validate_booking(&booking)?;

        if !self.events.event_exists(event_id).await? {
            tracing::info!(%event_id, "Rejected booking for missing event");
            return Err(BookingError::EventNotFound(event_id));
        }

        self.repository.create(booking).await
    }

    /// Get a booking by ID
    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: Uuid) -> BookingResult<Booking> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(BookingError::NotFound(id))
    }

    /// List bookings, optionally for one event
    #[instrument(skip(self))]
    pub async fn list_bookings(&self, filter: BookingFilter) -> BookingResult<Vec<Booking>> {
        self.repository.list(filter).await
    }

    #[instrument(skip(self))]
    pub async fn count_bookings(&self, event_id: Option<Uuid>) -> BookingResult<u64> {
        self.repository.count(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockBookingRepository, MockEventLookup};
    use mockall::predicate::eq;

    fn input(event_id: Uuid, email: &str) -> CreateBooking {
        CreateBooking {
            event_id: Some(event_id),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_booking_checks_event_then_inserts() {
        let event_id = Uuid::now_v7();

        let mut events = MockEventLookup::new();
        events
            .expect_event_exists()
            .with(eq(event_id))
            .times(1)
            .returning(|_| Ok(true));

        let mut repo = MockBookingRepository::new();
        repo.expect_create()
            .withf(move |b| b.event_id == event_id && b.email == "ada@example.com")
            .times(1)
            .returning(|b| Ok(b));

        let service = BookingService::new(repo, events);
        let booking = service
            .create_booking(input(event_id, " Ada@Example.com "))
            .await
            .unwrap();

        assert_eq!(booking.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_valid_booking_for_missing_event_is_rejected() {
        let event_id = Uuid::now_v7();

        let mut events = MockEventLookup::new();
        events.expect_event_exists().returning(|_| Ok(false));

        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let service = BookingService::new(repo, events);
        let result = service
            .create_booking(input(event_id, "ada@example.com"))
            .await;

        assert!(matches!(result, Err(BookingError::EventNotFound(id)) if id == event_id));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Cannot create booking for non-existent event"
        );
    }

    #[tokio::test]
    async fn test_invalid_email_fails_before_lookup() {
        let mut events = MockEventLookup::new();
        events.expect_event_exists().never();
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let service = BookingService::new(repo, events);

        let result = service.create_booking(input(Uuid::now_v7(), "   ")).await;
        assert!(
            matches!(result, Err(BookingError::Validation { ref message, .. }) if message == "Email is required")
        );

        let result = service
            .create_booking(input(Uuid::now_v7(), "not-an-email"))
            .await;
        assert!(
            matches!(result, Err(BookingError::Validation { ref message, .. }) if message == "Email must be a valid address")
        );
    }

    #[tokio::test]
    async fn test_missing_event_id_is_a_validation_error() {
        let service = BookingService::new(MockBookingRepository::new(), MockEventLookup::new());

        let result = service
            .create_booking(CreateBooking {
                event_id: None,
                email: "ada@example.com".into(),
            })
            .await;

        assert!(
            matches!(result, Err(BookingError::Validation { ref field, .. }) if field == "eventId")
        );
    }

    #[tokio::test]
    async fn test_overlong_email_is_rejected() {
        let service = BookingService::new(MockBookingRepository::new(), MockEventLookup::new());
        let email = format!("{}@example.com", "a".repeat(260));

        let result = service.create_booking(input(Uuid::now_v7(), &email)).await;

        assert!(
            matches!(result, Err(BookingError::Validation { ref message, .. }) if message == "Email is too long")
        );
    }

    #[tokio::test]
    async fn test_lookup_connection_failure_propagates() {
        let mut events = MockEventLookup::new();
        events
            .expect_event_exists()
            .returning(|_| Err(BookingError::Connection("server selection timeout".into())));
        let mut repo = MockBookingRepository::new();
        repo.expect_create().never();

        let service = BookingService::new(repo, events);
        let result = service
            .create_booking(input(Uuid::now_v7(), "ada@example.com"))
            .await;

        assert!(matches!(result, Err(BookingError::Connection(_))));
    }

    #[tokio::test]
    async fn test_get_booking_not_found() {
        let mut repo = MockBookingRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = BookingService::new(repo, MockEventLookup::new());
        let id = Uuid::now_v7();

        assert!(matches!(
            service.get_booking(id).await,
            Err(BookingError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_count_bookings_for_event() {
        let event_id = Uuid::now_v7();
        let mut repo = MockBookingRepository::new();
        repo.expect_count()
            .with(eq(Some(event_id)))
            .returning(|_| Ok(3));

        let service = BookingService::new(repo, MockEventLookup::new());

        assert_eq!(service.count_bookings(Some(event_id)).await.unwrap(), 3);
    }
}
