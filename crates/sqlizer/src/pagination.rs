//! Page/size → LIMIT conversion and count-result extraction.

use crate::clause::{COUNT_COLUMN, LimitPair};
use crate::error::{SqlizerError, SqlizerResult};
use serde_json::{Map, Value};

/// A result row as returned by a database driver: column name → value.
pub type Row = Map<String, Value>;

/// Default page when the input is missing, unparseable or zero.
pub const DEFAULT_PAGE: i64 = 1;
/// Default page size when the input is missing, unparseable or zero.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Parse the integer prefix of a string the way lenient form/query parsers do:
/// leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit. `"12abc"` → 12, `"abc"` → `None`.
pub(crate) fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let n: i64 = digits[..end].parse().ok()?;
    Some(if negative { -n } else { n })
}

/// Integer view of a JSON value: integers, truncated floats and integer-prefixed strings.
pub(crate) fn int_from_json(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

/// Anything a page number or page size can arrive as (integers, query-string text, JSON).
pub trait PageArg {
    /// The parsed integer, or `None` if the input is not a number.
    fn page_value(&self) -> Option<i64>;
}

macro_rules! impl_page_arg_int {
    ($($t:ty),*) => {
        $(
            impl PageArg for $t {
                fn page_value(&self) -> Option<i64> {
                    i64::try_from(*self).ok()
                }
            }
        )*
    };
}

impl_page_arg_int!(i32, i64, u32, u64, usize);

impl PageArg for str {
    fn page_value(&self) -> Option<i64> {
        parse_int_prefix(self)
    }
}

impl PageArg for String {
    fn page_value(&self) -> Option<i64> {
        parse_int_prefix(self)
    }
}

impl PageArg for Value {
    fn page_value(&self) -> Option<i64> {
        int_from_json(self)
    }
}

impl<T: PageArg> PageArg for Option<T> {
    fn page_value(&self) -> Option<i64> {
        self.as_ref().and_then(PageArg::page_value)
    }
}

impl<T: PageArg + ?Sized> PageArg for &T {
    fn page_value(&self) -> Option<i64> {
        (**self).page_value()
    }
}

/// Convert a 1-based page and a page size into a `[skip, limit]` pair.
///
/// Missing, unparseable or zero inputs fall back to page 1 and size 10.
/// Negative pages and sizes are rejected.
///
/// ```
/// use sqlizer::pagination_to_limit;
///
/// assert_eq!(pagination_to_limit(3, 5)?.to_array(), [10, 5]);
/// assert_eq!(pagination_to_limit("2", "abc")?.to_array(), [10, 10]);
/// # Ok::<(), sqlizer::SqlizerError>(())
/// ```
pub fn pagination_to_limit(page: impl PageArg, size: impl PageArg) -> SqlizerResult<LimitPair> {
    let page = page.page_value().filter(|&p| p != 0).unwrap_or(DEFAULT_PAGE);
    let size = size
        .page_value()
        .filter(|&s| s != 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    if page < 0 {
        return Err(SqlizerError::config(format!(
            "page must be a positive integer but got: {page}"
        )));
    }
    if size < 0 {
        return Err(SqlizerError::config(format!(
            "page size must be a positive integer but got: {size}"
        )));
    }

    let skip = (page - 1)
        .checked_mul(size)
        .ok_or_else(|| SqlizerError::config(format!("page {page} of size {size} overflows")))?;
    Ok(LimitPair::new(skip, size))
}

/// Read the `COUNT(0)` value from the first row of a count query result.
///
/// An empty result set counts as 0.
pub fn extract_count(rows: &[Row]) -> SqlizerResult<i64> {
    let Some(first) = rows.first() else {
        return Ok(0);
    };
    let value = first
        .get(COUNT_COLUMN)
        .ok_or_else(|| SqlizerError::decode(COUNT_COLUMN, "column missing from count result"))?;
    int_from_json(value).ok_or_else(|| {
        SqlizerError::decode(COUNT_COLUMN, format!("expected an integer, got {value}"))
    })
}
