//! Error types for the Cryptomus client.
//!
//! All errors implement the standard [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Transport errors** ([`CryptomusError::Http`], [`CryptomusError::Cancelled`],
//!   [`CryptomusError::Decode`]): the call did not complete, no envelope is available
//! - **Local errors** ([`CryptomusError::Serialization`], [`CryptomusError::MissingSecretKey`],
//!   [`CryptomusError::InvalidUrl`], [`CryptomusError::InvalidConfig`]): nothing was sent
//! - **Application errors** ([`CryptomusError::Api`]): the service answered with an error
//!   envelope and the caller asked for it to be turned into an `Err`
//!
//! Application errors are normally returned inside `Ok(ApiResponse)`, so a service-side
//! rejection is never confused with a network failure. Use
//! [`ApiResponse::into_result`](crate::envelope::ApiResponse::into_result) to opt in to
//! the [`CryptomusError::Api`] variant.
//!
//! # Examples
//!
//! ```
//! use cryptomus_sdk::error::{CryptomusError, Result};
//!
//! fn check_host(host: &str) -> Result<()> {
//!     if !host.starts_with("https://") {
//!         return Err(CryptomusError::InvalidUrl(format!("host must use https: {host}")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_host("http://api.cryptomus.com").is_err());
//! ```

use thiserror::Error;

use crate::{endpoint::KeyScope, envelope::ApiFailure};

/// Result type alias for client operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, CryptomusError>;

/// Errors that can occur while talking to the Cryptomus API.
///
/// # Error Recovery
///
/// - **Transient errors** ([`Http`](Self::Http)): retry at the caller's discretion; the
///   client never retries on its own
/// - **Cancellation** ([`Cancelled`](Self::Cancelled)): the caller's token fired
/// - **Configuration errors** ([`MissingSecretKey`](Self::MissingSecretKey),
///   [`InvalidConfig`](Self::InvalidConfig), [`InvalidUrl`](Self::InvalidUrl)): fix the
///   client setup
/// - **Application errors** ([`Api`](Self::Api)): inspect the message and field errors
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CryptomusError {
    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]. Common causes include:
    /// - Request timeout (default: 5 seconds)
    /// - Connection refused or DNS resolution failure
    /// - TLS handshake errors
    /// - Failure while reading the response body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The call was cancelled through its cancellation token.
    ///
    /// Returned without sending anything when the token is already cancelled, or as
    /// soon as the token fires while the request is in flight.
    #[error("request cancelled")]
    Cancelled,

    /// Response body could not be decoded into a response envelope.
    ///
    /// Carries the HTTP status so that, for example, an HTML error page from a proxy
    /// can be told apart from a malformed API answer.
    #[error("failed to decode response (HTTP {status}): {source}")]
    Decode {
        /// HTTP status code of the undecodable response.
        status: u16,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Request payload could not be serialized to JSON.
    ///
    /// Nothing is sent when this error is returned.
    #[error("failed to serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The operation needs a secret key for a scope the client was built without.
    ///
    /// Payment operations need the payment key and payout operations need the payout
    /// key. Nothing is sent when this error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use cryptomus_sdk::{endpoint::KeyScope, error::CryptomusError};
    ///
    /// let err = CryptomusError::MissingSecretKey(KeyScope::Payout);
    /// assert!(err.to_string().contains("payout"));
    /// ```
    #[error("no {0} key configured for this client")]
    MissingSecretKey(KeyScope),

    /// Host URL or resolved endpoint URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration could not be parsed or failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The service answered with an error envelope.
    ///
    /// Only produced by
    /// [`ApiResponse::into_result`](crate::envelope::ApiResponse::into_result).
    #[error("API error: {0}")]
    Api(ApiFailure),
}

impl CryptomusError {
    /// Returns `true` when the call did not complete at the transport level.
    ///
    /// Transport failures are network errors, cancellation, and undecodable bodies.
    /// Configuration, serialization, and application errors return `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cryptomus_sdk::error::CryptomusError;
    ///
    /// assert!(CryptomusError::Cancelled.is_transport());
    /// assert!(!CryptomusError::InvalidConfig("bad".to_owned()).is_transport());
    /// ```
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Cancelled | Self::Decode { .. })
    }

    /// Returns `true` if the underlying HTTP error was a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Http(e) if e.is_timeout())
    }

    /// Returns the application failure when this is an [`Api`](Self::Api) error.
    #[must_use]
    pub const fn api_failure(&self) -> Option<&ApiFailure> {
        match self {
            Self::Api(failure) => Some(failure),
            _ => None,
        }
    }
}
