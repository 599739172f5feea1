//! Date filters for transaction queries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{Error, Result};

/// A date bound as supplied by the caller: a calendar date, or its
/// `YYYY-MM-DD` text form to be checked later.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use wdmmg::models::DateInput;
///
/// let a: DateInput = "2024-01-31".into();
/// let b: DateInput = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().into();
/// assert_eq!(a.resolve().unwrap(), b.resolve().unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// An already-typed calendar date
    Date(NaiveDate),
    /// A `YYYY-MM-DD` string
    Text(String),
}

impl DateInput {
    /// Parse into a calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the text is not a valid
    /// `YYYY-MM-DD` date.
    pub fn resolve(&self) -> Result<NaiveDate> {
        match self {
            DateInput::Date(date) => Ok(*date),
            DateInput::Text(text) => {
                let invalid = || {
                    Error::Validation(format!(
                        "Invalid date format: '{}'. Expected YYYY-MM-DD",
                        text
                    ))
                };
                let trimmed = text.trim();
                if !is_iso_date_shape(trimmed) {
                    return Err(invalid());
                }
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())
            }
        }
    }
}

/// Zero-padded `DDDD-DD-DD`; chrono alone also accepts `2024-1-5`.
fn is_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

impl From<NaiveDate> for DateInput {
    fn from(date: NaiveDate) -> Self {
        DateInput::Date(date)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Text(s)
    }
}

/// An inclusive date range; either end may be open.
///
/// Serializes to the `start_date` / `end_date` query parameters, omitting
/// open ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First day included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a bound does not parse or if the
    /// start falls after the end.
    pub fn new(start: Option<DateInput>, end: Option<DateInput>) -> Result<Self> {
        let start_date = start.as_ref().map(DateInput::resolve).transpose()?;
        let end_date = end.as_ref().map(DateInput::resolve).transpose()?;

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(Error::Validation(format!(
                    "start_date {} is after end_date {}",
                    start, end
                )));
            }
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// A range with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns `true` if neither end is set.
    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    /// Returns `true` if `date` lies inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }
}
