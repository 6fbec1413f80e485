use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::Event;

/// Maximum length of an event name, in characters.
pub const MAX_NAME_LEN: usize = 100;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("name too long: {0} characters (max 100)")]
    NameTooLong(usize),

    #[error("Invalid duration {0}: must be a positive number of minutes")]
    InvalidDuration(i64),

    #[error("Invalid start_datetime: {0}")]
    InvalidStartDatetime(String),
}

/// Validator for event fields.
pub struct Validator;

impl Validator {
    pub fn validate_name(name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let len = name.chars().count();
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong(len));
        }
        Ok(())
    }

    pub fn validate_duration(duration: i64) -> Result<(), ValidationError> {
        if duration <= 0 {
            return Err(ValidationError::InvalidDuration(duration));
        }
        Ok(())
    }

    /// Parse an ISO-8601 local datetime. Seconds and fractional seconds are
    /// optional; `T` or a space may separate date and time.
    pub fn parse_start_datetime(value: &str) -> Result<NaiveDateTime, ValidationError> {
        let value = value.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .ok_or_else(|| ValidationError::InvalidStartDatetime(value.to_string()))
    }

    /// Validate a complete event. Recurrence days are taken as given.
    pub fn validate_event(event: &Event) -> Result<(), ValidationError> {
        Self::validate_name(&event.name)?;
        Self::validate_duration(event.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_valid_name() {
        assert!(Validator::validate_name("Standup").is_ok());
        assert!(Validator::validate_name(&"a".repeat(100)).is_ok());
        // Counted in characters, not bytes.
        assert!(Validator::validate_name(&"ø".repeat(100)).is_ok());
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(Validator::validate_name(""), Err(ValidationError::EmptyName));
        assert_eq!(Validator::validate_name("   "), Err(ValidationError::EmptyName));
        assert_eq!(
            Validator::validate_name(&"a".repeat(101)),
            Err(ValidationError::NameTooLong(101))
        );
    }

    #[test]
    fn test_duration() {
        assert!(Validator::validate_duration(1).is_ok());
        assert!(Validator::validate_duration(24 * 60).is_ok());
        assert_eq!(
            Validator::validate_duration(0),
            Err(ValidationError::InvalidDuration(0))
        );
        assert!(Validator::validate_duration(-30).is_err());
    }

    #[test]
    fn test_parse_start_datetime() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        assert_eq!(
            Validator::parse_start_datetime("2024-06-03T10:00:00"),
            Ok(expected)
        );
        assert_eq!(
            Validator::parse_start_datetime("2024-06-03T10:00"),
            Ok(expected)
        );
        assert_eq!(
            Validator::parse_start_datetime("2024-06-03 10:00:00"),
            Ok(expected)
        );

        let fractional = Validator::parse_start_datetime("2024-06-03T10:00:00.250").unwrap();
        assert_eq!(fractional.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_start_datetime_rejects_garbage() {
        assert!(Validator::parse_start_datetime("not a date").is_err());
        assert!(Validator::parse_start_datetime("2024-06-03").is_err());
        assert!(Validator::parse_start_datetime("2024-13-03T10:00:00").is_err());
    }
}
