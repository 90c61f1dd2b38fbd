//! JSON encoding shared by the signer and the invoker.
//!
//! A single generic encoder guarantees the bytes that are signed are the bytes that
//! are transmitted.

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    envelope::ApiResponse,
    error::{CryptomusError, Result},
};

/// Serializes a payload into compact JSON bytes.
///
/// # Errors
///
/// Returns [`CryptomusError::Serialization`] if the value cannot be represented as JSON.
pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(CryptomusError::Serialization)
}

/// Decodes a response body into an envelope, whatever the HTTP status was.
///
/// # Errors
///
/// Returns [`CryptomusError::Decode`] if the body is not a JSON object of the
/// expected shape.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &[u8],
) -> Result<ApiResponse<T>> {
    serde_json::from_slice(body).map_err(|source| CryptomusError::Decode { status, source })
}
