//! Timestamp parsing
//!
//! Exports from the ticketing system use UK day-first dates, sometimes with a
//! time. ISO dates are accepted as well.

use chrono::{NaiveDate, NaiveDateTime};

use crate::ParseError;

const DATETIME_FORMATS: [&str; 6] = [
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y"];

/// Parse a day-first or ISO timestamp. Dates without a time mean midnight.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, ParseError> {
    let input = input.trim();

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .ok_or_else(|| ParseError::InvalidValue(format!("invalid date '{}'", input)));
        }
    }

    Err(ParseError::InvalidValue(format!("unrecognised date '{}'", input)))
}
