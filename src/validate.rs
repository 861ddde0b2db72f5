//! Input validation for writes and reads
//!
//! Pure, total predicates with no dependency on store state. Any violation
//! maps to the fixed `InvalidWrite`/`InvalidRead` message, so callers cannot
//! distinguish which rule failed.

use crate::core::temporal::Timestamp;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Accepted key shape: non-empty, alphanumeric and underscore only
static KEY_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

fn key_is_valid(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}

/// Accepted payloads are strings and JSON structures. Bare numbers,
/// booleans, and null are rejected.
fn value_is_valid(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Object(_) | Value::Array(_))
}

/// Validate a proposed write
pub fn validate_write(key: &str, value: &Value) -> Result<()> {
    if key_is_valid(key) && value_is_valid(value) {
        Ok(())
    } else {
        Err(Error::InvalidWrite)
    }
}

/// Validate a proposed read, parsing the optional timestamp
///
/// A present timestamp must parse as a positive integer in epoch
/// milliseconds. Absence is always valid and means "most recent revision".
pub fn validate_read(key: &str, timestamp: Option<&str>) -> Result<Option<Timestamp>> {
    if !key_is_valid(key) {
        return Err(Error::InvalidRead);
    }

    match timestamp {
        None => Ok(None),
        Some(raw) => {
            let millis: i64 = raw.trim().parse().map_err(|_| Error::InvalidRead)?;
            if millis > 0 {
                Ok(Some(Timestamp::from_millis(millis)))
            } else {
                Err(Error::InvalidRead)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_write_accepts_string_and_json_values() {
        assert!(validate_write("a_bc", &json!("some_value")).is_ok());
        assert!(validate_write("abc123", &json!({"inner_key": "def"})).is_ok());
        assert!(validate_write("ABC", &json!(["a", 1, {"b": true}])).is_ok());
    }

    #[test]
    fn test_write_rejects_bad_keys() {
        for key in ["", "ab-", "ab.", "ab@", "a b", "naïve", "ab/c"] {
            assert!(matches!(
                validate_write(key, &json!("v")),
                Err(Error::InvalidWrite)
            ));
        }
    }

    #[test]
    fn test_write_rejects_bare_primitives() {
        for value in [json!(123), json!(1.5), json!(true), json!(false), json!(null)] {
            assert!(matches!(
                validate_write("abc", &value),
                Err(Error::InvalidWrite)
            ));
        }
    }

    #[test]
    fn test_read_accepts_missing_timestamp() {
        assert_eq!(validate_read("abc", None).unwrap(), None);
    }

    #[test]
    fn test_read_parses_positive_timestamp() {
        let ts = validate_read("abc", Some("1500")).unwrap();
        assert_eq!(ts, Some(Timestamp::from_millis(1_500)));
    }

    #[test]
    fn test_read_rejects_bad_timestamps() {
        for raw in ["0", "-5", "abc", "1.5", "", "12a"] {
            assert!(matches!(
                validate_read("abc", Some(raw)),
                Err(Error::InvalidRead)
            ));
        }
    }

    #[test]
    fn test_read_rejects_bad_keys() {
        assert!(matches!(
            validate_read("ab@", None),
            Err(Error::InvalidRead)
        ));
        assert!(matches!(
            validate_read("", Some("1000")),
            Err(Error::InvalidRead)
        ));
    }

    proptest! {
        #[test]
        fn prop_accepts_all_well_formed_keys(key in "[A-Za-z0-9_]{1,64}") {
            prop_assert!(validate_write(&key, &json!("v")).is_ok());
            prop_assert!(validate_read(&key, None).is_ok());
        }

        #[test]
        fn prop_rejects_keys_with_foreign_chars(
            prefix in "[A-Za-z0-9_]{0,8}",
            bad in "[^A-Za-z0-9_]",
            suffix in "[A-Za-z0-9_]{0,8}",
        ) {
            let key = format!("{prefix}{bad}{suffix}");
            prop_assert!(validate_write(&key, &json!("v")).is_err());
        }

        #[test]
        fn prop_accepts_all_positive_timestamps(millis in 1i64..=i64::MAX) {
            let parsed = validate_read("abc", Some(&millis.to_string())).unwrap();
            prop_assert_eq!(parsed, Some(Timestamp::from_millis(millis)));
        }
    }
}
