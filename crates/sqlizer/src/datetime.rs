//! `YYYY-MM-DD HH:MM:SS` formatting for DATETIME columns.

use crate::error::{SqlizerError, SqlizerResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// `strftime` pattern of a MySQL DATETIME literal.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// A value that denotes a point in (wall-clock) time.
pub trait DateLike {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime>;
}

impl DateLike for NaiveDateTime {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        Ok(*self)
    }
}

impl DateLike for NaiveDate {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
            .ok_or_else(|| SqlizerError::DateTime(format!("no midnight on {self}")))
    }
}

/// Zoned values keep their own offset's wall-clock time.
impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        Ok(self.naive_local())
    }
}

/// RFC 3339, `YYYY-MM-DD HH:MM:SS[.fff]`, `YYYY-MM-DDTHH:MM:SS[.fff]` or `YYYY-MM-DD`.
impl DateLike for str {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        let s = self.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.naive_local());
        }
        if let Some(dt) = NAIVE_INPUT_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        {
            return Ok(dt);
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.to_naive_datetime();
        }
        Err(SqlizerError::DateTime(format!(
            "unrecognised datetime: {self:?}"
        )))
    }
}

impl DateLike for String {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        self.as_str().to_naive_datetime()
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn to_naive_datetime(&self) -> SqlizerResult<NaiveDateTime> {
        (**self).to_naive_datetime()
    }
}

/// Format a date-like value as `YYYY-MM-DD HH:MM:SS`.
///
/// ```
/// assert_eq!(
///     sqlizer::format_datetime("2024-03-05T10:20:30.5+08:00")?,
///     "2024-03-05 10:20:30"
/// );
/// # Ok::<(), sqlizer::SqlizerError>(())
/// ```
pub fn format_datetime<D: DateLike + ?Sized>(date: &D) -> SqlizerResult<String> {
    Ok(date.to_naive_datetime()?.format(DATETIME_FORMAT).to_string())
}
