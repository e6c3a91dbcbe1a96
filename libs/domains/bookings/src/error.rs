use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use database::DatabaseError;
use domain_events::EventError;
use mongodb::error::ErrorKind;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BookingError {
    /// A single validation rule failed; `message` is client-facing.
    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    /// The booking references an event that does not exist.
    #[error("Cannot create booking for non-existent event")]
    EventNotFound(Uuid),

    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type BookingResult<T> = Result<T, BookingError>;

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BookingError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Convert BookingError to AppError for standardized error responses
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Validation { field, message } => AppError::validation(field, message),
            BookingError::NotFound(id) => AppError::NotFound(format!("Booking {} not found", id)),
            err @ BookingError::EventNotFound(_) => AppError::UnprocessableEntity(err.to_string()),
            BookingError::Connection(msg) => {
                AppError::ServiceUnavailable(format!("Database connection failed: {}", msg))
            }
            BookingError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for BookingError {
    fn from(err: mongodb::error::Error) -> Self {
        match err.kind.as_ref() {
            ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                BookingError::Connection(err.to_string())
            }
            _ => BookingError::Database(err.to_string()),
        }
    }
}

impl From<DatabaseError> for BookingError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unavailable() {
            BookingError::Connection(err.to_string())
        } else {
            BookingError::Database(err.to_string())
        }
    }
}

/// Failures of the event lookup keep their connection/database split.
impl From<EventError> for BookingError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Connection(msg) => BookingError::Connection(msg),
            other => BookingError::Database(other.to_string()),
        }
    }
}
