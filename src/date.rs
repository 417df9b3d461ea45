//! Calendar-date helpers.
//!
//! The feed is keyed by `YYYY-MM-DD` strings, and the same string is sent as
//! both ends of the requested range. "Today" is always the local date, not
//! the UTC one.

use chrono::{Local, NaiveDate};

use crate::error::{FeedError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats `date` as `YYYY-MM-DD`, zero-padding month and day.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's local calendar date in feed-key form.
pub fn today_local() -> String {
    format_date(Local::now().date_naive())
}

/// Parses a user-supplied `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`FeedError::InvalidDate`] if `input` is not a real calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| FeedError::InvalidDate {
        input: input.to_string(),
    })
}
