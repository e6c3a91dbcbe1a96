//! Write-time normalization for events.
//!
//! [`prepare_event`] runs before every insert and replace. It either leaves
//! the event in canonical form (trimmed fields, derived slug, `YYYY-MM-DD`
//! date, `HH:MM` time) or reports the first rule that failed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{EventError, EventResult};
use crate::models::Event;

/// Longest slug that will be stored.
pub const MAX_SLUG_LEN: usize = 96;

static SLUG_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

static TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::[0-9]{2})?$").unwrap());

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%d %B %Y"];

/// Derive a URL-safe slug from a title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, strips leading and trailing `-`, and keeps at most
/// [`MAX_SLUG_LEN`] characters.
///
/// ```
/// use domain_events::validation::derive_slug;
///
/// assert_eq!(derive_slug("Google I/O 2026!"), "google-i-o-2026");
/// ```
pub fn derive_slug(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let dashed = SLUG_SEPARATORS.replace_all(&lowered, "-");
    let slug = dashed.trim_matches('-');

    // The slug is ASCII at this point, so byte and char offsets agree.
    slug[..slug.len().min(MAX_SLUG_LEN)].to_string()
}

/// Canonicalize a date to `YYYY-MM-DD`.
///
/// Zoned inputs are converted to UTC before the calendar date is taken;
/// inputs without an offset are read as UTC.
pub fn normalize_date(input: &str) -> EventResult<String> {
    let input = input.trim();
    parse_date(input)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| EventError::validation("date", "Invalid event date"))
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        })
}

/// Canonicalize a time to zero-padded 24-hour `HH:MM`.
///
/// Accepts `H:MM`, `HH:MM` and `HH:MM:SS`; seconds are dropped. Minutes
/// must be two digits.
pub fn normalize_time(input: &str) -> EventResult<String> {
    let invalid = || EventError::validation("time", "Invalid event time");

    let captures = TIME_PATTERN.captures(input.trim()).ok_or_else(invalid)?;
    let hours: u32 = captures[1].parse().map_err(|_| invalid())?;
    let minutes: u32 = captures[2].parse().map_err(|_| invalid())?;

    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }

    Ok(format!("{:02}:{:02}", hours, minutes))
}

/// Validate and normalize an event in place before it is written.
///
/// `title_modified` is true on create and when an update changed the title;
/// the slug is re-derived then, or whenever the stored slug is empty.
pub fn prepare_event(event: &mut Event, title_modified: bool) -> EventResult<()> {
    trim_fields(event);

    let required = [
        ("title", "Title", &event.title),
        ("description", "Description", &event.description),
        ("overview", "Overview", &event.overview),
        ("image", "Image", &event.image),
        ("venue", "Venue", &event.venue),
        ("location", "Location", &event.location),
        ("audience", "Audience", &event.audience),
        ("organizer", "Organizer", &event.organizer),
    ];
    for (field, label, value) in required {
        if value.is_empty() {
            return Err(EventError::validation(field, format!("{} is required", label)));
        }
    }

    if !is_filled_list(&event.agenda) {
        return Err(EventError::validation(
            "agenda",
            "Agenda must contain at least one non-empty item",
        ));
    }
    if !is_filled_list(&event.tags) {
        return Err(EventError::validation(
            "tags",
            "Tags must contain at least one non-empty item",
        ));
    }

    if title_modified || event.slug.is_empty() {
        event.slug = derive_slug(&event.title);
    }

    event.date = normalize_date(&event.date)?;
    event.time = normalize_time(&event.time)?;

    Ok(())
}

fn is_filled_list(items: &[String]) -> bool {
    !items.is_empty() && items.iter().all(|item| !item.is_empty())
}

fn trim_fields(event: &mut Event) {
    for field in [
        &mut event.title,
        &mut event.slug,
        &mut event.description,
        &mut event.overview,
        &mut event.image,
        &mut event.venue,
        &mut event.location,
        &mut event.date,
        &mut event.time,
        &mut event.audience,
        &mut event.organizer,
    ] {
        trim_in_place(field);
    }
    event.agenda.iter_mut().for_each(trim_in_place);
    event.tags.iter_mut().for_each(trim_in_place);
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
