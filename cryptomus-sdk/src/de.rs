//! Lenient serde helpers for API payloads.
//!
//! The service is loose about empty values: a missing amount may arrive as `null`,
//! `""`, or not at all, and numbers may be quoted or not. These helpers normalize
//! all of those.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer, de::Error as _};
use serde_json::Value;
use tracing::warn;

/// Wire format for request timestamps.
pub(crate) const REQUEST_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `null` becomes `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` and `""` become `None`.
pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

/// Decimal from a JSON string or number; `null` and `""` become `None`.
pub(crate) fn decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(D::Error::custom(format!("expected decimal, got {other}")));
        }
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid decimal '{text}': {e}")))
}

/// Integer from a JSON number or numeric string; `null` and `""` become `None`.
pub(crate) fn int_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected integer, got {n}"))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid integer '{s}': {e}"))),
        Some(other) => Err(D::Error::custom(format!("expected integer, got {other}"))),
    }
}

/// Timestamp in RFC 3339, `YYYY-MM-DD HH:MM:SS±HH:MM` or `YYYY-MM-DD HH:MM:SS` (read as
/// UTC); `null` and `""` become `None`.
///
/// A value in any other shape is logged and dropped, so one odd timestamp does not fail
/// the whole response.
pub(crate) fn datetime_opt<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => {
            warn!(value = %other, "ignoring non-string timestamp");
            return Ok(None);
        }
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match parse_datetime(text) {
        Ok(dt) => Ok(Some(dt)),
        Err(e) => {
            warn!(value = text, error = %e, "ignoring unparseable timestamp");
            Ok(None)
        }
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%:z"))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(s, REQUEST_DATETIME_FORMAT)
                .map(|naive| naive.and_utc().fixed_offset())
        })
}

/// Reads a request timestamp written as `YYYY-MM-DD HH:MM:SS`; `null` and `""` become
/// `None`.
pub(crate) fn request_datetime_from_str<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDateTime::parse_from_str(s.trim(), REQUEST_DATETIME_FORMAT)
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid request timestamp '{s}': {e}"))),
    }
}

/// Serializes a request timestamp as `YYYY-MM-DD HH:MM:SS`.
#[allow(clippy::ref_option, reason = "signature required by serde(serialize_with)")]
pub(crate) fn request_datetime_opt<S>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.collect_str(&dt.format(REQUEST_DATETIME_FORMAT)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Amounts {
        #[serde(default, deserialize_with = "decimal_opt")]
        amount: Option<Decimal>,
        #[serde(default, deserialize_with = "int_opt")]
        count: Option<i64>,
        #[serde(default, deserialize_with = "datetime_opt")]
        at: Option<DateTime<FixedOffset>>,
    }

    fn amounts(value: Value) -> Amounts {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_decimal_from_string_and_number() {
        assert_eq!(amounts(json!({"amount": "15.50"})).amount, Some(Decimal::new(1550, 2)));
        assert_eq!(amounts(json!({"amount": 15})).amount, Some(Decimal::new(15, 0)));
        assert_eq!(amounts(json!({"amount": 0.1})).amount, Some(Decimal::new(1, 1)));
        assert_eq!(amounts(json!({"amount": "1e-8"})).amount, Some(Decimal::new(1, 8)));
    }

    #[test]
    fn test_decimal_empty_values() {
        assert_eq!(amounts(json!({})).amount, None);
        assert_eq!(amounts(json!({"amount": null})).amount, None);
        assert_eq!(amounts(json!({"amount": ""})).amount, None);
        assert_eq!(amounts(json!({"amount": "  "})).amount, None);
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(serde_json::from_value::<Amounts>(json!({"amount": "abc"})).is_err());
        assert!(serde_json::from_value::<Amounts>(json!({"amount": [1]})).is_err());
    }

    #[test]
    fn test_int_opt() {
        assert_eq!(amounts(json!({"count": 1_700_000_000})).count, Some(1_700_000_000));
        assert_eq!(amounts(json!({"count": "42"})).count, Some(42));
        assert_eq!(amounts(json!({"count": ""})).count, None);
        assert!(serde_json::from_value::<Amounts>(json!({"count": 1.5})).is_err());
    }

    #[test]
    fn test_datetime_formats() {
        let rfc = amounts(json!({"at": "2023-06-22T14:37:57+03:00"})).at.unwrap();
        let spaced = amounts(json!({"at": "2023-06-22 14:37:57+03:00"})).at.unwrap();
        assert_eq!(rfc, spaced);
        assert_eq!(rfc.offset().local_minus_utc(), 3 * 3600);

        assert!(amounts(json!({"at": ""})).at.is_none());
        assert!(amounts(json!({"at": null})).at.is_none());
    }

    #[test]
    fn test_datetime_without_offset_is_utc() {
        let at = amounts(json!({"at": "2023-07-11 20:23:52"})).at.unwrap();
        assert_eq!(at.offset().local_minus_utc(), 0);
        assert_eq!(at.to_rfc3339(), "2023-07-11T20:23:52+00:00");
    }

    #[test]
    fn test_datetime_unparseable_becomes_none() {
        assert!(amounts(json!({"at": "yesterday"})).at.is_none());
        assert!(amounts(json!({"at": 1_689_106_432})).at.is_none());
        assert_eq!(amounts(json!({"at": "yesterday", "amount": "1"})).amount, Some(Decimal::ONE));
    }

    #[test]
    fn test_request_datetime_serialization() {
        #[derive(Serialize)]
        struct Range {
            #[serde(serialize_with = "request_datetime_opt")]
            date_from: Option<NaiveDateTime>,
        }

        let date_from =
            NaiveDateTime::parse_from_str("2024-03-01 08:05:09", REQUEST_DATETIME_FORMAT).ok();
        let json = serde_json::to_string(&Range { date_from }).unwrap();
        assert_eq!(json, r#"{"date_from":"2024-03-01 08:05:09"}"#);
    }

    #[test]
    fn test_request_datetime_parsing() {
        #[derive(Deserialize)]
        struct Range {
            #[serde(default, deserialize_with = "request_datetime_from_str")]
            date_from: Option<NaiveDateTime>,
        }

        let range: Range =
            serde_json::from_value(json!({"date_from": "2024-03-01 08:05:09"})).unwrap();
        assert_eq!(
            range.date_from,
            NaiveDateTime::parse_from_str("2024-03-01 08:05:09", REQUEST_DATETIME_FORMAT).ok()
        );
        let empty: Range = serde_json::from_value(json!({"date_from": ""})).unwrap();
        assert!(empty.date_from.is_none());
        assert!(serde_json::from_value::<Range>(json!({"date_from": "2024-03-01"})).is_err());
    }
}
