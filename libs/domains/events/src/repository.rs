use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EventResult;
use crate::models::{Event, EventFilter};

/// Repository trait for Event persistence
///
/// Implementations store events exactly as given; normalization has already
/// run in the service. `create` and `replace` must reject a slug that another
/// event already holds with `EventError::DuplicateSlug`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Insert a new event
    async fn create(&self, event: Event) -> EventResult<Event>;

    async fn get_by_id(&self, id: Uuid) -> EventResult<Option<Event>>;

    async fn get_by_slug(&self, slug: &str) -> EventResult<Option<Event>>;

    /// List events matching a filter, newest first
    async fn list(&self, filter: EventFilter) -> EventResult<Vec<Event>>;

    /// Replace a stored event with `event`; returns false if it no longer exists
    async fn replace(&self, event: Event) -> EventResult<bool>;

    /// Delete an event by ID; returns false if nothing was deleted
    async fn delete(&self, id: Uuid) -> EventResult<bool>;

    async fn exists(&self, id: Uuid) -> EventResult<bool>;

    async fn count(&self, filter: EventFilter) -> EventResult<u64>;
}
