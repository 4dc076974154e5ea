//! Common utilities and helper functions
//!
//! This module provides the date-flag validator and query-string encoding
//! shared by the API client.

pub mod error;

use chrono::NaiveDate;

use crate::error::{Error, Result};

/// Date layout accepted by `--start` and `--end`
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Validate an optional `yyyy-mm-dd` date flag
///
/// An empty string means "no filter" and is always accepted. Anything else
/// must be a real calendar date with a four-digit year and zero-padded month
/// and day.
///
/// # Errors
///
/// Returns [`Error::InvalidDateFormat`] naming the rejected value.
pub fn check_date_format(date: &str) -> Result<()> {
    if date.is_empty() {
        return Ok(());
    }

    // chrono alone accepts unpadded fields and signed years
    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if shaped && NaiveDate::parse_from_str(date, DATE_LAYOUT).is_ok() {
        Ok(())
    } else {
        Err(Error::InvalidDateFormat(date.to_string()))
    }
}

/// Percent-encode a whole JSON document as a query string
///
/// The API expects the filter object as a single query-string value, not as
/// individual parameters.
pub fn escape_query(json: &str) -> String {
    url::form_urlencoded::byte_serialize(json.as_bytes()).collect()
}
