//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to create a trip.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTripRequest {
    #[validate(length(min = 4, message = "Destination must be at least 4 characters"))]
    pub destination: String,

    #[validate(custom(function = "validate_date_input"))]
    pub starts_at: DateInput,

    #[validate(custom(function = "validate_date_input"))]
    pub ends_at: DateInput,

    pub owner_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub owner_email: String,
}

/// Response returned after a trip is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTripResponse {
    #[serde(rename = "tripId")]
    pub trip_id: String,
}

/// A timestamp as clients send it: epoch milliseconds or a date string.
///
/// Strings without an offset are read as UTC, not as server-local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(f64),
    Text(String),
}

/// Largest distance from the epoch, in milliseconds, a JavaScript `Date` can hold.
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

const NAIVE_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

impl DateInput {
    /// Coerce into a UTC timestamp. Strings without an offset are read as UTC.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            DateInput::Millis(millis) => millis_to_datetime(*millis),
            DateInput::Text(text) => parse_date_text(text.trim()),
        }
    }
}

/// Fractions of a millisecond are truncated toward zero.
fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }

    let millis = millis.trunc();
    if millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }

    DateTime::from_timestamp_millis(millis as i64)
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn validate_date_input(value: &DateInput) -> Result<(), ValidationError> {
    if value.to_datetime().is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("invalid_date");
    error.message = Some("Invalid date".into());
    Err(error)
}
