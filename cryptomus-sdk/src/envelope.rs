//! Response envelope shared by every operation.
//!
//! Every API answer, successful or not, is a JSON object of the form
//!
//! ```json
//! {
//!   "state": 0,
//!   "code": 0,
//!   "message": "",
//!   "error": "",
//!   "errors": { "amount": ["The amount field is required."] },
//!   "result": { ... }
//! }
//! ```
//!
//! Any subset of the fields may be present. [`ApiResponse`] preserves whatever arrives;
//! [`ApiResponse::into_outcome`] gives a tagged view for callers that want one.
//!
//! # Examples
//!
//! ```
//! use cryptomus_sdk::envelope::{ApiOutcome, ApiResponse};
//!
//! let ok: ApiResponse<serde_json::Value> =
//!     serde_json::from_str(r#"{"state":0,"result":{"uuid":"abc"}}"#)?;
//! assert!(ok.is_success());
//!
//! let err: ApiResponse<serde_json::Value> =
//!     serde_json::from_str(r#"{"state":1,"message":"Not found"}"#)?;
//! match err.into_outcome() {
//!     ApiOutcome::Failure { failure, .. } => assert_eq!(failure.message, "Not found"),
//!     ApiOutcome::Success(_) => unreachable!(),
//! }
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    de::{empty_as_none, null_as_default},
    error::{CryptomusError, Result},
};

/// Decoded response envelope.
///
/// Decoding never fails because of missing envelope fields: absent numbers default to
/// `0`, absent strings to `""`, absent `errors` to an empty map and absent or `null`
/// `result` to `None`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct ApiResponse<T> {
    /// `0` on success, non-zero on failure.
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: i64,

    /// Application status code, if the service sent one.
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: i64,

    /// Human-readable message, usually set on failure.
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,

    /// Short error description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,

    /// Per-field validation messages.
    #[serde(default)]
    pub errors: FieldErrors,

    /// Operation-specific payload.
    #[serde(default)]
    pub result: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns `true` when the envelope carries no failure signal.
    ///
    /// Failure signals are a non-zero `state`, a non-empty `error`, any field errors,
    /// or a `message` without a `result`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == 0
            && self.error.is_empty()
            && self.errors.is_empty()
            && (self.result.is_some() || self.message.is_empty())
    }

    /// Returns the failure description when the envelope is not a success.
    #[must_use]
    pub fn failure(&self) -> Option<ApiFailure> {
        (!self.is_success()).then(|| self.to_failure())
    }

    /// Splits the envelope into a tagged outcome.
    ///
    /// An envelope that is a success but has no `result` becomes a
    /// [`ApiOutcome::Failure`] with no result, so callers never have to invent a value.
    /// An ambiguous envelope (failure signals alongside a `result`) keeps the result
    /// in the failure variant.
    #[must_use]
    pub fn into_outcome(self) -> ApiOutcome<T> {
        let failure = self.to_failure();
        match (self.is_success(), self.result) {
            (true, Some(result)) => ApiOutcome::Success(result),
            (_, result) => ApiOutcome::Failure { failure, result },
        }
    }

    /// Converts the envelope into a plain `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::Api`] when the envelope is not a success or carries no
    /// result.
    pub fn into_result(self) -> Result<T> {
        match self.into_outcome() {
            ApiOutcome::Success(result) => Ok(result),
            ApiOutcome::Failure { failure, .. } => Err(CryptomusError::Api(failure)),
        }
    }

    fn to_failure(&self) -> ApiFailure {
        ApiFailure {
            state: self.state,
            code: self.code,
            message: self.message.clone(),
            error: self.error.clone(),
            errors: self.errors.clone(),
        }
    }
}

/// Tagged view of an [`ApiResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The service accepted the request and returned a result.
    Success(T),
    /// The service rejected the request, or returned nothing usable.
    Failure {
        /// Error fields from the envelope.
        failure: ApiFailure,
        /// Result that arrived alongside the error fields, if any.
        result: Option<T>,
    },
}

/// Error fields of a failed envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiFailure {
    /// Envelope `state`.
    pub state: i64,
    /// Envelope `code`.
    pub code: i64,
    /// Envelope `message`.
    pub message: String,
    /// Envelope `error`.
    pub error: String,
    /// Envelope `errors`.
    pub errors: FieldErrors,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = [&self.message, &self.error].into_iter().find(|s| !s.is_empty());
        match text {
            Some(text) => write!(f, "{text} (state {})", self.state)?,
            None => write!(f, "state {} without result", self.state)?,
        }
        for (field, messages) in self.errors.iter() {
            write!(f, "; {field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

/// Per-field validation messages, keyed by request field name.
///
/// The service sends an object when there are validation errors and an empty array
/// (or nothing) when there are none; both decode here. Messages not tied to a field
/// are stored under the empty key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Returns `true` if there are no field errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages for one field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterates over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Messages {
            Many(Vec<String>),
            One(String),
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Fields(BTreeMap<String, Messages>),
            Loose(Vec<String>),
        }

        let map = match Option::<Raw>::deserialize(deserializer)? {
            None => BTreeMap::new(),
            Some(Raw::Fields(fields)) => fields
                .into_iter()
                .map(|(field, messages)| {
                    let messages = match messages {
                        Messages::Many(list) => list,
                        Messages::One(one) => vec![one],
                    };
                    (field, messages)
                })
                .collect(),
            Some(Raw::Loose(list)) if list.is_empty() => BTreeMap::new(),
            Some(Raw::Loose(list)) => BTreeMap::from([(String::new(), list)]),
        };
        Ok(Self(map))
    }
}

/// Cursor-based pagination block returned by list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of items on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    /// Whether more than one page exists.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_pages: bool,
    /// Opaque token for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub next_cursor: Option<String>,
    /// Opaque token for the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub previous_cursor: Option<String>,
    /// Page size.
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_page: u64,
}

impl Pagination {
    /// Cursor to pass to the next list call, if there is a next page.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref()
    }

    /// Cursor to pass to fetch the previous page.
    #[must_use]
    pub fn previous_cursor(&self) -> Option<&str> {
        self.previous_cursor.as_deref()
    }
}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>", serialize = "T: Serialize"))]
pub struct Page<T> {
    /// Items on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<T>,
    /// Pagination cursors.
    #[serde(default, deserialize_with = "null_as_default")]
    pub paginate: Pagination,
}

impl<T> Page<T> {
    /// Cursor for the next page, if any.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.paginate.next_cursor()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Uuid {
        uuid: String,
    }

    fn decode<T: for<'de> Deserialize<'de>>(raw: &str) -> ApiResponse<T> {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_success_envelope() {
        let envelope: ApiResponse<Uuid> = decode(r#"{"state":0,"result":{"uuid":"abc"}}"#);
        assert!(envelope.is_success());
        assert!(envelope.errors.is_empty());
        assert_eq!(envelope.result, Some(Uuid { uuid: "abc".to_owned() }));
        assert_eq!(envelope.into_result().unwrap().uuid, "abc");
    }

    #[test]
    fn test_failure_envelope() {
        let envelope: ApiResponse<Uuid> = decode(r#"{"state":1,"message":"Not found"}"#);
        assert!(!envelope.is_success());
        assert_eq!(envelope.message, "Not found");
        assert!(envelope.result.is_none());

        let err = envelope.into_result().unwrap_err();
        assert_eq!(err.api_failure().map(|f| f.state), Some(1));
    }

    #[test]
    fn test_empty_object_defaults() {
        let envelope: ApiResponse<Value> = decode("{}");
        assert_eq!(envelope.state, 0);
        assert_eq!(envelope.code, 0);
        assert!(envelope.message.is_empty());
        assert!(envelope.error.is_empty());
        assert!(envelope.errors.is_empty());
        assert!(envelope.result.is_none());
        assert!(envelope.is_success());
        assert!(matches!(envelope.into_outcome(), ApiOutcome::Failure { result: None, .. }));
    }

    #[test]
    fn test_unknown_fields_and_nulls_ignored() {
        let envelope: ApiResponse<Value> = decode(
            r#"{"state":null,"message":null,"error":null,"errors":null,"result":null,"extra":1}"#,
        );
        assert_eq!(envelope.state, 0);
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_field_errors_object() {
        let envelope: ApiResponse<Value> = decode(
            r#"{"state":1,"errors":{"amount":["The amount field is required."],"currency":"Bad"}}"#,
        );
        assert!(!envelope.is_success());
        assert_eq!(envelope.errors.len(), 2);
        assert_eq!(
            envelope.errors.get("amount"),
            Some(&["The amount field is required.".to_owned()][..])
        );
        assert_eq!(envelope.errors.get("currency"), Some(&["Bad".to_owned()][..]));
    }

    #[test]
    fn test_field_errors_empty_array() {
        let envelope: ApiResponse<Value> = decode(r#"{"state":0,"errors":[],"result":[]}"#);
        assert!(envelope.errors.is_empty());
        assert!(envelope.is_success());
        assert_eq!(envelope.result, Some(json!([])));
    }

    #[test]
    fn test_field_errors_loose_list() {
        let envelope: ApiResponse<Value> = decode(r#"{"state":1,"errors":["whole request"]}"#);
        assert_eq!(envelope.errors.get(""), Some(&["whole request".to_owned()][..]));
    }

    #[test]
    fn test_ambiguous_envelope_keeps_result() {
        let envelope: ApiResponse<Uuid> =
            decode(r#"{"state":0,"error":"partial","result":{"uuid":"abc"}}"#);
        assert!(!envelope.is_success());
        match envelope.into_outcome() {
            ApiOutcome::Failure { failure, result } => {
                assert_eq!(failure.error, "partial");
                assert_eq!(result, Some(Uuid { uuid: "abc".to_owned() }));
            }
            ApiOutcome::Success(_) => panic!("error field must not be ignored"),
        }
    }

    #[test]
    fn test_message_with_result_is_success() {
        let envelope: ApiResponse<Uuid> =
            decode(r#"{"state":0,"message":"ok","result":{"uuid":"abc"}}"#);
        assert!(envelope.is_success());
    }

    #[test]
    fn test_failure_display() {
        let envelope: ApiResponse<Value> = decode(
            r#"{"state":1,"message":"Validation error","errors":{"amount":["too small"]}}"#,
        );
        let failure = envelope.failure().unwrap();
        assert_eq!(failure.to_string(), "Validation error (state 1); amount: too small");
    }

    #[test]
    fn test_pagination_camel_case() {
        let page: Page<Uuid> = serde_json::from_value(json!({
            "items": [{"uuid": "a"}, {"uuid": "b"}],
            "paginate": {
                "count": 2,
                "hasPages": true,
                "nextCursor": "eyJpZCI6MTB9",
                "previousCursor": null,
                "perPage": 2
            }
        }))
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert!(page.paginate.has_pages);
        assert_eq!(page.next_cursor(), Some("eyJpZCI6MTB9"));
        assert_eq!(page.paginate.previous_cursor(), None);
        assert_eq!(page.paginate.per_page, 2);
    }

    #[test]
    fn test_pagination_empty_cursor_is_none() {
        let pagination: Pagination =
            serde_json::from_value(json!({"count": 0, "hasPages": false, "nextCursor": ""}))
                .unwrap();
        assert_eq!(pagination.next_cursor(), None);
    }

    #[test]
    fn test_pagination_omits_absent_cursors() {
        let pagination = Pagination { count: 1, per_page: 15, ..Default::default() };
        assert_eq!(
            serde_json::to_value(&pagination).unwrap(),
            json!({"count": 1, "hasPages": false, "perPage": 15})
        );

        let pagination =
            Pagination { next_cursor: Some("eyJpZCI6MTJ9".to_owned()), ..Default::default() };
        let value = serde_json::to_value(&pagination).unwrap();
        assert_eq!(value["nextCursor"], "eyJpZCI6MTJ9");
        assert!(value.get("previousCursor").is_none());
    }

    #[test]
    fn test_page_null_items() {
        let page: Page<Uuid> = serde_json::from_value(json!({"items": null})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.paginate, Pagination::default());
    }
}
