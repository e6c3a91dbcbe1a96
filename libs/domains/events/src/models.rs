use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// How attendees take part in an event
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventMode {
    Online,
    Offline,
    Hybrid,
}

/// Event entity - represents an event stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub title: String,
    /// URL-safe identifier derived from the title; unique across events
    pub slug: String,
    pub description: String,
    pub overview: String,
    /// Image URL or path
    pub image: String,
    pub venue: String,
    pub location: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    /// 24-hour time, `HH:MM`
    pub time: String,
    pub mode: EventMode,
    pub audience: String,
    pub agenda: Vec<String>,
    pub organizer: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new event
///
/// Required fields default to empty so a missing field is reported by name
/// instead of as a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    #[validate(length(max = 2048))]
    pub image: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub location: String,
    /// Any common date format; stored as `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// `H:MM`, `HH:MM` or `HH:MM:SS`; stored as `HH:MM`
    #[serde(default)]
    pub time: String,
    /// One of `online`, `offline`, `hybrid`
    #[schema(example = "hybrid")]
    pub mode: Option<String>,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub agenda: Vec<String>,
    #[serde(default)]
    pub organizer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating an existing event; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub overview: Option<String>,
    #[validate(length(max = 2048))]
    pub image: Option<String>,
    pub venue: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub mode: Option<String>,
    pub audience: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Query filters for listing events
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
pub struct EventFilter {
    /// Filter by attendance mode
    pub mode: Option<EventMode>,
    /// Events carrying this tag
    pub tag: Option<String>,
    /// Case-insensitive search in title and description
    pub search: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

impl Event {
    /// Build an unsaved event from a create request.
    ///
    /// `slug`, `date` and `time` hold raw input until
    /// [`prepare_event`](crate::validation::prepare_event) runs.
    pub fn new(input: CreateEvent, mode: EventMode) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            slug: String::new(),
            description: input.description,
            overview: input.overview,
            image: input.image,
            venue: input.venue,
            location: input.location,
            date: input.date,
            time: input.time,
            mode,
            audience: input.audience,
            agenda: input.agenda,
            organizer: input.organizer,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from an UpdateEvent DTO.
    ///
    /// Returns whether the title changed, which decides slug re-derivation.
    /// `mode` is resolved by the caller.
    pub fn apply_update(&mut self, update: UpdateEvent) -> bool {
        let mut title_modified = false;

        if let Some(title) = update.title {
            title_modified = title.trim() != self.title;
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(overview) = update.overview {
            self.overview = overview;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(venue) = update.venue {
            self.venue = venue;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(time) = update.time {
            self.time = time;
        }
        if let Some(audience) = update.audience {
            self.audience = audience;
        }
        if let Some(agenda) = update.agenda {
            self.agenda = agenda;
        }
        if let Some(organizer) = update.organizer {
            self.organizer = organizer;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }

        self.updated_at = Utc::now();
        title_modified
    }
}
