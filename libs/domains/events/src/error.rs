use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;
use uuid::Uuid;

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

#[derive(Debug, Error)]
pub enum EventError {
    /// A single validation rule failed; `message` is client-facing.
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Event not found: {0}")]
    NotFound(Uuid),

    #[error("Event not found: {0}")]
    SlugNotFound(String),

    #[error("An event with slug '{0}' already exists")]
    DuplicateSlug(String),

    /// The database could not be reached.
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EventError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Map a failed insert/replace, turning a unique-index violation on
    /// `slug` into [`EventError::DuplicateSlug`].
    pub fn from_write(err: mongodb::error::Error, slug: &str) -> Self {
        if is_duplicate_key(&err) {
            EventError::DuplicateSlug(slug.to_string())
        } else {
            err.into()
        }
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation { field, message } => AppError::validation(field, message),
            EventError::NotFound(id) => AppError::NotFound(format!("Event {} not found", id)),
            EventError::SlugNotFound(slug) => {
                AppError::NotFound(format!("Event with slug '{}' not found", slug))
            }
            err @ EventError::DuplicateSlug(_) => AppError::Conflict(err.to_string()),
            EventError::Connection(msg) => {
                AppError::ServiceUnavailable(format!("Database connection failed: {}", msg))
            }
            EventError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                EventError::Connection(err.to_string())
            }
            _ => EventError::Database(err.to_string()),
        }
    }
}

impl From<DatabaseError> for EventError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unavailable() {
            EventError::Connection(err.to_string())
        } else {
            EventError::Database(err.to_string())
        }
    }
}
