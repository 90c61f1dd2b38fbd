//! Request signing.
//!
//! Every authenticated request carries a `sign` header computed as
//!
//! ```text
//! md5( base64(json(payload)) + secret_key )
//! ```
//!
//! rendered as 32 lowercase hex characters. When there is no payload (absent, JSON
//! `null`, or the empty string) only the secret key is hashed.
//!
//! # Examples
//!
//! ```
//! use cryptomus_sdk::sign::sign;
//! use serde_json::json;
//!
//! let with_payload = sign("secret", Some(&json!({"uuid": "abc"})))?;
//! let without = sign::<()>("secret", None)?;
//!
//! assert_eq!(with_payload.len(), 32);
//! assert_ne!(with_payload, without);
//! # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
//! ```

use base64::Engine as _;
use md5::{Digest, Md5};
use serde::Serialize;

use crate::{error::Result, json};

/// Computes the signature for an optional structured payload.
///
/// The payload is serialized exactly once with the same encoder the client uses for
/// request bodies.
///
/// # Errors
///
/// Returns [`CryptomusError::Serialization`](crate::error::CryptomusError::Serialization)
/// if the payload cannot be serialized. No fallback signature is produced.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::sign::sign;
///
/// // An empty string payload signs the same as no payload at all.
/// assert_eq!(sign("key", Some(""))?, sign::<str>("key", None)?);
/// # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
/// ```
pub fn sign<T: Serialize + ?Sized>(secret_key: &str, payload: Option<&T>) -> Result<String> {
    let body = payload.map(json::encode).transpose()?;
    Ok(sign_body(secret_key, body.as_deref()))
}

/// Computes the signature over already-serialized JSON bytes.
///
/// This is what the client uses on the wire: the body is encoded once and the same
/// bytes are both signed and sent.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::sign::sign_body;
///
/// assert_eq!(sign_body("", None), "d41d8cd98f00b204e9800998ecf8427e");
/// ```
#[must_use]
pub fn sign_body(secret_key: &str, body: Option<&[u8]>) -> String {
    let mut hasher = Md5::new();
    if let Some(body) = body.filter(|b| !is_blank(b)) {
        hasher.update(base64::engine::general_purpose::STANDARD.encode(body));
    }
    hasher.update(secret_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Payloads that serialize to nothing meaningful are signed as if absent.
fn is_blank(body: &[u8]) -> bool {
    matches!(body, b"" | b"null" | b"\"\"")
}
