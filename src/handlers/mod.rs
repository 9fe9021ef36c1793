//! Route handlers plus the raw-body field helpers they share.
//!
//! Bodies are taken as raw JSON values and field-checked by hand so every
//! rejection comes back as a `{message}` JSON body rather than a plain-text
//! extractor error.

pub mod podcast;
pub mod review;
pub mod user;

use serde_json::Value;

/// Returns the field as a &str if present and a JSON string.
fn str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get(key).and_then(Value::as_str)
}

/// Returns the field only if present and non-empty, mirroring the
/// `if (!field)` truthiness checks of the original API clients rely on.
fn required_str_field<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    str_field(body, key).filter(|s| !s.is_empty())
}

/// JavaScript-style truthiness for a JSON value. The review endpoint's
/// required-check runs on this, which is why a rating of 0 is rejected
/// (known quirk, kept deliberately pending product clarification).
fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerces a JSON number or numeric string to an integer rating.
/// Non-numeric and fractional values are rejected.
fn coerce_rating(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(i);
            }
            n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Some(i);
            }
            s.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_javascript() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!(3)));
        assert!(truthy(&json!([])));
    }

    #[test]
    fn rating_coercion() {
        assert_eq!(coerce_rating(&json!(3)), Some(3));
        assert_eq!(coerce_rating(&json!("3")), Some(3));
        assert_eq!(coerce_rating(&json!(" 4 ")), Some(4));
        assert_eq!(coerce_rating(&json!(3.0)), Some(3));
        assert_eq!(coerce_rating(&json!(3.5)), None);
        assert_eq!(coerce_rating(&json!("abc")), None);
        assert_eq!(coerce_rating(&json!(null)), None);
    }

    #[test]
    fn required_str_field_rejects_empty_and_non_string() {
        let body = json!({"a": "", "b": 7, "c": "ok"});
        assert_eq!(required_str_field(&body, "a"), None);
        assert_eq!(required_str_field(&body, "b"), None);
        assert_eq!(required_str_field(&body, "c"), Some("ok"));
        assert_eq!(required_str_field(&body, "missing"), None);
    }
}
