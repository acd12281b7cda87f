//! snake_case ⇄ camelCase key conversion for result rows and payloads.
//!
//! Conversion is applied to object keys level by level, down to a configurable
//! depth. Values are never renamed, only the keys that lead to them.
//!
//! ```
//! use serde_json::json;
//! use sqlizer::to_camel;
//!
//! let row = json!({"user_id": 1, "profile_data": {"avatar_url": "x"}});
//! assert_eq!(to_camel(row.clone(), 1), json!({"userId": 1, "profileData": {"avatar_url": "x"}}));
//! assert_eq!(to_camel(row, 2), json!({"userId": 1, "profileData": {"avatarUrl": "x"}}));
//! ```

use crate::pagination::Row;
use regex::{Captures, Regex};
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// Depth used when callers have no preference: only top-level keys are renamed.
pub const DEFAULT_DEPTH: usize = 1;

/// Target key style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Camel,
    Snake,
}

impl KeyCase {
    pub fn apply(self, key: &str) -> String {
        match self {
            KeyCase::Camel => camelize(key),
            KeyCase::Snake => snakelize(key),
        }
    }
}

/// `user_id` / `user-id` / `user id` → `userId`.
///
/// Every run of `-`, `_` or whitespace is removed and the character after it
/// upper-cased; the first character of the result is lower-cased.
pub fn camelize(key: &str) -> String {
    static SEPARATOR_RUN: OnceLock<Regex> = OnceLock::new();
    let re = SEPARATOR_RUN
        .get_or_init(|| Regex::new(r"[-_\s]+(.)?").expect("invalid built-in separator regex"));

    let joined = re.replace_all(key, |caps: &Captures| {
        caps.get(1)
            .map(|m| m.as_str().to_uppercase())
            .unwrap_or_default()
    });

    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `userId` → `user_id`.
///
/// An `_` is inserted before every ASCII upper-case letter except a leading one,
/// then the whole key is lower-cased.
pub fn snakelize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i > 0 && ch.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(ch);
    }
    out.to_lowercase()
}

/// Rename keys of `data` to `case`, descending `depth` levels.
///
/// A top-level string is converted itself; other non-object values and arrays
/// are returned unchanged.
pub fn convert_keys(data: Value, case: KeyCase, depth: usize) -> Value {
    match data {
        Value::String(s) => Value::String(case.apply(&s)),
        other => process_keys(other, case, depth),
    }
}

fn process_keys(value: Value, case: KeyCase, depth: usize) -> Value {
    match value {
        Value::Object(map) if depth > 0 => Value::Object(rename_map(map, case, depth)),
        other => other,
    }
}

fn rename_map(map: Map<String, Value>, case: KeyCase, depth: usize) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (case.apply(&key), process_keys(value, case, depth - 1)))
        .collect()
}

/// snake_case → camelCase. See [`convert_keys`].
pub fn to_camel(data: Value, depth: usize) -> Value {
    convert_keys(data, KeyCase::Camel, depth)
}

/// camelCase → snake_case. See [`convert_keys`].
pub fn to_snake(data: Value, depth: usize) -> Value {
    convert_keys(data, KeyCase::Snake, depth)
}

/// Camelize the keys of every row in a result set.
pub fn rows_to_camel(rows: Vec<Row>, depth: usize) -> Vec<Row> {
    if depth == 0 {
        return rows;
    }
    rows.into_iter()
        .map(|row| rename_map(row, KeyCase::Camel, depth))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camelize_keys() {
        assert_eq!(camelize("a_b"), "aB");
        assert_eq!(camelize("f_gh"), "fGh");
        assert_eq!(camelize("user-id"), "userId");
        assert_eq!(camelize("user  name"), "userName");
        assert_eq!(camelize("a__b"), "aB");
        assert_eq!(camelize("UserName"), "userName");
        assert_eq!(camelize("trailing_"), "trailing");
        assert_eq!(camelize(""), "");
    }

    #[test]
    fn snakelize_keys() {
        assert_eq!(snakelize("aB"), "a_b");
        assert_eq!(snakelize("fGh"), "f_gh");
        assert_eq!(snakelize("userId"), "user_id");
        assert_eq!(snakelize("UserId"), "user_id");
        assert_eq!(snakelize("plain"), "plain");
        assert_eq!(snakelize("HTTPCode"), "h_t_t_p_code");
    }

    #[test]
    fn to_camel_depth_one() {
        let snake = json!({"a_b": "x", "c": 1, "d_e": {"f_gh": 2}});
        assert_eq!(
            to_camel(snake, DEFAULT_DEPTH),
            json!({"aB": "x", "c": 1, "dE": {"f_gh": 2}})
        );
    }

    #[test]
    fn to_camel_depth_two() {
        let snake = json!({"a_b": "x", "c": 1, "d_e": {"f_gh": 2}});
        assert_eq!(
            to_camel(snake, 2),
            json!({"aB": "x", "c": 1, "dE": {"fGh": 2}})
        );
    }

    #[test]
    fn to_snake_depths() {
        let camel = json!({"aB": "test", "c": 1, "dE": {"fGh": 2}});
        assert_eq!(
            to_snake(camel.clone(), 1),
            json!({"a_b": "test", "c": 1, "d_e": {"fGh": 2}})
        );
        assert_eq!(
            to_snake(camel, 2),
            json!({"a_b": "test", "c": 1, "d_e": {"f_gh": 2}})
        );
    }

    #[test]
    fn depth_zero_is_identity() {
        let data = json!({"a_b": 1});
        assert_eq!(to_camel(data.clone(), 0), data);
    }

    #[test]
    fn scalars() {
        assert_eq!(to_camel(json!("user_name"), 1), json!("userName"));
        assert_eq!(to_snake(json!("userName"), 1), json!("user_name"));
        assert_eq!(to_camel(json!(42), 1), json!(42));
        assert_eq!(to_camel(Value::Null, 1), Value::Null);
    }

    #[test]
    fn arrays_untouched() {
        let data = json!([{"a_b": 1}]);
        assert_eq!(to_camel(data.clone(), 3), data);
    }

    #[test]
    fn preserves_insertion_order() {
        let camel = to_camel(json!({"z_z": 1, "a_a": 2, "m_m": 3}), 1);
        let keys: Vec<&String> = camel.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zZ", "aA", "mM"]);
    }

    #[test]
    fn round_trip() {
        let data = json!({"user_id": 1, "created_at": {"time_zone": "UTC"}});
        assert_eq!(to_camel(to_snake(to_camel(data.clone(), 2), 2), 2), to_camel(data, 2));
        let camel = json!({"userId": 1, "createdAt": {"timeZone": "UTC"}});
        assert_eq!(to_camel(to_snake(camel.clone(), 2), 2), camel);
    }

    #[test]
    fn rows() {
        let mut row = Row::new();
        row.insert("user_id".into(), json!(7));
        let rows = rows_to_camel(vec![row], DEFAULT_DEPTH);
        assert_eq!(rows[0].get("userId"), Some(&json!(7)));
    }
}
