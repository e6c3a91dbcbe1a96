use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Booking entity - one attendee's reservation for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// The booked event
    pub event_id: Uuid,
    /// Lowercased, trimmed attendee address
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new booking
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub event_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(max = 254))]
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Query filters for listing and counting bookings
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    /// Only bookings for this event
    pub event_id: Option<Uuid>,
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

impl Booking {
    /// Build an unsaved booking. The email is coerced to its stored form
    /// (trimmed, lowercase) before any validation sees it.
    pub fn new(event_id: Uuid, email: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            event_id,
            email: email.trim().to_lowercase(),
            created_at: now,
            updated_at: now,
        }
    }
}
