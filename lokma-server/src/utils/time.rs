//! Time coercion helpers for wire-format normalization
//!
//! Historical records carry date-like fields as RFC 3339 strings, epoch
//! millis, or extended-JSON `{"$date": ...}` wrappers depending on which
//! client wrote them. The canonical wire format is an ISO-8601 string.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::Value;

/// Render a UTC datetime in the canonical wire format
pub fn to_wire(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Convert a value that exposes a datetime conversion; `None` otherwise
fn convert(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| to_wire(dt.with_timezone(&Utc))),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(to_wire),
        Value::Object(map) => map.get("$date").and_then(convert),
        _ => None,
    }
}

/// Coerce a date-like field into ISO-8601 string form
///
/// Values exposing a conversion (RFC 3339 strings, epoch millis, `$date`
/// wrappers) convert; other strings pass through unchanged; anything else
/// defaults to `now`.
pub fn coerce_rfc3339(value: Option<&Value>, now: DateTime<Utc>) -> String {
    match value {
        Some(v) => convert(v).unwrap_or_else(|| match v {
            Value::String(s) => s.clone(),
            _ => to_wire(now),
        }),
        None => to_wire(now),
    }
}

/// Optional variant of [`coerce_rfc3339`]
///
/// Absent or null stays absent; an unrecognized scalar string passes
/// through unchanged; never defaults to the current time.
pub fn coerce_rfc3339_opt(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(convert(&Value::String(s.clone())).unwrap_or_else(|| s.clone())),
        Some(v) => convert(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_rfc3339_string_normalized() {
        let value = json!("2023-06-15T08:30:00+03:00");
        assert_eq!(
            coerce_rfc3339(Some(&value), now()),
            "2023-06-15T05:30:00.000Z"
        );
    }

    #[test]
    fn test_epoch_millis_converted() {
        // 2023-06-15T05:30:00Z
        let value = json!(1686807000000i64);
        assert_eq!(
            coerce_rfc3339(Some(&value), now()),
            "2023-06-15T05:30:00.000Z"
        );
    }

    #[test]
    fn test_extended_json_date_converted() {
        let value = json!({"$date": 1686807000000i64});
        assert_eq!(
            coerce_rfc3339(Some(&value), now()),
            "2023-06-15T05:30:00.000Z"
        );

        let value = json!({"$date": "2023-06-15T05:30:00Z"});
        assert_eq!(
            coerce_rfc3339(Some(&value), now()),
            "2023-06-15T05:30:00.000Z"
        );
    }

    #[test]
    fn test_unparseable_string_passes_through() {
        let value = json!("yesterday afternoon");
        assert_eq!(coerce_rfc3339(Some(&value), now()), "yesterday afternoon");
    }

    #[test]
    fn test_missing_defaults_to_now() {
        assert_eq!(coerce_rfc3339(None, now()), "2025-03-01T12:00:00.000Z");
        assert_eq!(
            coerce_rfc3339(Some(&Value::Null), now()),
            "2025-03-01T12:00:00.000Z"
        );
    }

    #[test]
    fn test_coercion_is_stable() {
        // Canonical output parses back to the exact same string
        let first = coerce_rfc3339(Some(&json!("2023-06-15T08:30:00+03:00")), now());
        let second = coerce_rfc3339(Some(&Value::String(first.clone())), now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_optional_variant_never_defaults() {
        assert_eq!(coerce_rfc3339_opt(None), None);
        assert_eq!(coerce_rfc3339_opt(Some(&Value::Null)), None);
        assert_eq!(
            coerce_rfc3339_opt(Some(&json!("2023-06-15T05:30:00Z"))),
            Some("2023-06-15T05:30:00.000Z".to_string())
        );
        assert_eq!(
            coerce_rfc3339_opt(Some(&json!("13:45"))),
            Some("13:45".to_string())
        );
        assert_eq!(coerce_rfc3339_opt(Some(&json!(true))), None);
    }
}
