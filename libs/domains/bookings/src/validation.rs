//! Booking validation run before every insert.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{BookingError, BookingResult};
use crate::models::Booking;

/// Permissive syntactic check: something@something.something, no spaces.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check a candidate booking. Expects the email already coerced by
/// [`Booking::new`].
pub fn validate_booking(booking: &Booking) -> BookingResult<()> {
    if booking.email.trim().is_empty() {
        return Err(BookingError::validation("email", "Email is required"));
    }
    if !EMAIL_REGEX.is_match(&booking.email) {
        return Err(BookingError::validation(
            "email",
            "Email must be a valid address",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn booking(email: &str) -> Booking {
        Booking::new(Uuid::now_v7(), email)
    }

    fn message(result: BookingResult<()>) -> String {
        match result {
            Err(BookingError::Validation { message, .. }) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_plain_address() {
        assert!(validate_booking(&booking("ada@example.com")).is_ok());
    }

    #[test]
    fn test_accepts_after_coercion() {
        let b = booking("  Ada.Lovelace@Example.ORG\t");
        assert_eq!(b.email, "ada.lovelace@example.org");
        assert!(validate_booking(&b).is_ok());
    }

    #[test]
    fn test_blank_email_is_required() {
        assert_eq!(message(validate_booking(&booking(""))), "Email is required");
        assert_eq!(message(validate_booking(&booking("   "))), "Email is required");
    }

    #[test]
    fn test_malformed_emails_are_rejected() {
        for email in [
            "ada",
            "ada@example",
            "@example.com",
            "ada@.com.",
            "a da@example.com",
            "ada@@example.com",
        ] {
            assert_eq!(
                message(validate_booking(&booking(email))),
                "Email must be a valid address",
                "{email}"
            );
        }
    }

    #[test]
    fn test_error_names_the_email_field() {
        let err = validate_booking(&booking("nope")).unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref field, .. } if field == "email"));
    }
}
