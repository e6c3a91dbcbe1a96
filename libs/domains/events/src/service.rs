//! Event Service - Business logic layer

use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{EventError, EventResult};
use crate::models::{CreateEvent, Event, EventFilter, EventMode, UpdateEvent};
use crate::repository::EventRepository;
use crate::validation::prepare_event;

/// Event service providing business logic operations
///
/// Every write goes through [`prepare_event`] before it reaches the
/// repository, so a rejected write never leaves a partial document.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Shared handle to the underlying repository
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    /// Create a new event
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_event(&self, input: CreateEvent) -> EventResult<Event> {
        check_limits(&input)?;
        // Field rules report before mode does
        let mode = parse_mode(input.mode.as_deref());

        let mut event = Event::new(input, mode.as_ref().copied().unwrap_or(EventMode::Online));
        prepare_event(&mut event, true)?;
        event.mode = mode?;

        self.repository.create(event).await
    }

    /// Get an event by ID
    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> EventResult<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))
    }

    /// Get an event by its slug
    #[instrument(skip(self))]
    pub async fn get_event_by_slug(&self, slug: &str) -> EventResult<Event> {
        self.repository
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| EventError::SlugNotFound(slug.to_string()))
    }

    /// List events with optional filters
    #[instrument(skip(self))]
    pub async fn list_events(&self, filter: EventFilter) -> EventResult<Vec<Event>> {
        self.repository.list(filter).await
    }

    /// Update an existing event
    ///
    /// The slug follows the title: it is re-derived only when the update
    /// changes the title.
    #[instrument(skip(self, input))]
    pub async fn update_event(&self, id: Uuid, input: UpdateEvent) -> EventResult<Event> {
        check_limits(&input)?;
        let mode = input.mode.as_deref().map(|raw| parse_mode(Some(raw)));

        let mut event = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(EventError::NotFound(id))?;

        let title_modified = event.apply_update(input);
        prepare_event(&mut event, title_modified)?;
        if let Some(mode) = mode.transpose()? {
            event.mode = mode;
        }

        if !self.repository.replace(event.clone()).await? {
            return Err(EventError::NotFound(id));
        }
        Ok(event)
    }

    /// Delete an event
    ///
    /// Bookings that reference the event are left in place.
    #[instrument(skip(self))]
    pub async fn delete_event(&self, id: Uuid) -> EventResult<()> {
        if !self.repository.delete(id).await? {
            return Err(EventError::NotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn event_exists(&self, id: Uuid) -> EventResult<bool> {
        self.repository.exists(id).await
    }

    /// Count events matching a filter
    #[instrument(skip(self))]
    pub async fn count_events(&self, filter: EventFilter) -> EventResult<u64> {
        self.repository.count(filter).await
    }
}

fn parse_mode(raw: Option<&str>) -> EventResult<EventMode> {
    let raw = raw.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(EventError::validation("mode", "Mode is required"));
    }
    EventMode::from_str(raw).map_err(|_| {
        EventError::validation("mode", "Mode must be one of online, offline, hybrid")
    })
}

/// Length guards declared on the DTOs. Reports the alphabetically first
/// offending field.
fn check_limits<T: Validate>(input: &T) -> EventResult<()> {
    input.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .min()
            .map(|name| name.to_string())
            .unwrap_or_default();
        EventError::validation(field.clone(), format!("{} is too long", field))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockEventRepository;
    use mockall::predicate::eq;

    fn create_input(title: &str) -> CreateEvent {
        CreateEvent {
            title: title.into(),
            description: "A conference for systems programmers".into(),
            overview: "Two days of talks".into(),
            image: "/images/event1.png".into(),
            venue: "Convention Center".into(),
            location: "Seattle, WA".into(),
            date: "2026-09-08T16:00:00Z".into(),
            time: "9:30".into(),
            mode: Some("offline".into()),
            audience: "Rust developers".into(),
            agenda: vec!["Opening keynote".into()],
            organizer: "Rust Foundation".into(),
            tags: vec!["rust".into()],
        }
    }

    fn stored_event(title: &str) -> Event {
        let mut event = Event::new(create_input(title), EventMode::Offline);
        prepare_event(&mut event, true).unwrap();
        event
    }

    #[tokio::test]
    async fn test_create_event_normalizes_before_insert() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_create()
            .withf(|event| {
                event.slug == "rustconf-2026"
                    && event.date == "2026-09-08"
                    && event.time == "09:30"
                    && event.mode == EventMode::Offline
            })
            .times(1)
            .returning(|event| Ok(event));

        let service = EventService::new(mock_repo);
        let event = service.create_event(create_input("RustConf 2026")).await.unwrap();

        assert_eq!(event.slug, "rustconf-2026");
    }

    #[tokio::test]
    async fn test_create_event_rejects_blank_field_without_writing() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let mut input = create_input("RustConf 2026");
        input.organizer = "   ".into();

        let service = EventService::new(mock_repo);
        let err = service.create_event(input).await.unwrap_err();

        match err {
            EventError::Validation { field, message } => {
                assert_eq!(field, "organizer");
                assert_eq!(message, "Organizer is required");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_event_requires_mode() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let service = EventService::new(mock_repo);

        let mut input = create_input("RustConf 2026");
        input.mode = None;
        let err = service.create_event(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Mode is required");

        let mut input = create_input("RustConf 2026");
        input.mode = Some("virtual".into());
        let err = service.create_event(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Mode must be one of online, offline, hybrid");
    }

    #[tokio::test]
    async fn test_create_event_rejects_invalid_time() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let mut input = create_input("RustConf 2026");
        input.time = "9:5".into();

        let service = EventService::new(mock_repo);
        let err = service.create_event(input).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid event time");
    }

    #[tokio::test]
    async fn test_second_event_with_same_slug_conflicts() {
        let mut mock_repo = MockEventRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|event| Ok(event));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|event| Err(EventError::DuplicateSlug(event.slug)));

        let service = EventService::new(mock_repo);
        let first = service.create_event(create_input("RustConf 2026")).await.unwrap();
        let second = service
            .create_event(create_input("rustconf   2026!!"))
            .await
            .unwrap_err();

        assert_eq!(first.slug, "rustconf-2026");
        assert!(matches!(second, EventError::DuplicateSlug(ref slug) if slug == "rustconf-2026"));
    }

    #[tokio::test]
    async fn test_get_event_not_found() {
        let mut mock_repo = MockEventRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = EventService::new(mock_repo);
        let err = service.get_event(id).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_get_event_by_slug() {
        let mut mock_repo = MockEventRepository::new();
        let event = stored_event("RustConf 2026");
        let expected = event.clone();
        mock_repo
            .expect_get_by_slug()
            .withf(|slug| slug == "rustconf-2026")
            .returning(move |_| Ok(Some(event.clone())));

        let service = EventService::new(mock_repo);
        let found = service.get_event_by_slug("rustconf-2026").await.unwrap();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_update_keeps_slug_when_title_unchanged() {
        let mut mock_repo = MockEventRepository::new();
        let mut event = stored_event("RustConf 2026");
        event.slug = "rustconf".into();
        let id = event.id;

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo
            .expect_replace()
            .withf(|event| event.slug == "rustconf" && event.venue == "Hall B")
            .returning(|_| Ok(true));

        let service = EventService::new(mock_repo);
        let updated = service
            .update_event(
                id,
                UpdateEvent {
                    title: Some("RustConf 2026".into()),
                    venue: Some("Hall B".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "rustconf");
    }

    #[tokio::test]
    async fn test_update_rederives_slug_when_title_changes() {
        let mut mock_repo = MockEventRepository::new();
        let event = stored_event("RustConf 2026");
        let id = event.id;

        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo
            .expect_replace()
            .withf(|event| event.slug == "rustconf-europe-2026" && event.mode == EventMode::Hybrid)
            .returning(|_| Ok(true));

        let service = EventService::new(mock_repo);
        let updated = service
            .update_event(
                id,
                UpdateEvent {
                    title: Some("RustConf Europe 2026".into()),
                    mode: Some("hybrid".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.slug, "rustconf-europe-2026");
    }

    #[tokio::test]
    async fn test_update_revalidates_existing_fields() {
        let mut mock_repo = MockEventRepository::new();
        let event = stored_event("RustConf 2026");
        let id = event.id;

        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(event.clone())));
        mock_repo.expect_replace().never();

        let service = EventService::new(mock_repo);
        let err = service
            .update_event(
                id,
                UpdateEvent {
                    tags: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Tags must contain at least one non-empty item");
    }

    #[tokio::test]
    async fn test_delete_missing_event() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = EventService::new(mock_repo);
        let err = service.delete_event(Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, EventError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(EventError::Connection("server selection timeout".into())));

        let service = EventService::new(mock_repo);
        let err = service.list_events(EventFilter::default()).await.unwrap_err();
        assert!(matches!(err, EventError::Connection(_)));
    }

    #[tokio::test]
    async fn test_long_title_is_accepted_and_slug_capped() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().times(1).returning(|event| Ok(event));

        let service = EventService::new(mock_repo);
        let title = "Rust ".repeat(100);
        let event = service.create_event(create_input(&title)).await.unwrap();

        assert_eq!(event.title, title.trim());
        assert_eq!(event.slug.len(), crate::validation::MAX_SLUG_LEN);
    }

    #[tokio::test]
    async fn test_overlong_image_rejected() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let mut input = create_input("RustConf 2026");
        input.image = format!("/images/{}.png", "x".repeat(2100));

        let service = EventService::new(mock_repo);
        let err = service.create_event(input).await.unwrap_err();

        assert!(matches!(err, EventError::Validation { ref field, .. } if field == "image"));
    }

    #[tokio::test]
    async fn test_blank_title_reported_before_missing_mode() {
        let mut mock_repo = MockEventRepository::new();
        mock_repo.expect_create().never();

        let mut input = create_input("   ");
        input.mode = None;

        let service = EventService::new(mock_repo);
        let err = service.create_event(input).await.unwrap_err();

        assert!(matches!(err, EventError::Validation { ref field, .. } if field == "title"));
        assert_eq!(err.to_string(), "Title is required");
    }
}
