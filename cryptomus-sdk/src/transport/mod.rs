//! Transport abstraction layer.
//!
//! The client builds a fully signed [`TransportRequest`] and hands it to a
//! [`Transport`], which only moves bytes. Signing, envelope decoding, and
//! cancellation stay in the client, so every transport gets them for free.
//!
//! [`HttpTransport`] is the default implementation, backed by a pooled
//! [`reqwest::Client`]. Implement [`Transport`] yourself to route requests through
//! another HTTP stack or to stub the API in tests.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cryptomus_sdk::transport::{HttpTransport, Transport, TransportRequest};
//! use reqwest::Method;
//!
//! # async fn example() -> cryptomus_sdk::error::Result<()> {
//! let transport = HttpTransport::new()?;
//!
//! let request = TransportRequest::new(
//!     Method::GET,
//!     "https://api.cryptomus.com/v1/exchange-rate/ETH/list".parse().unwrap(),
//! );
//!
//! let response = transport.execute(request).await?;
//! println!("Status: {}", response.status);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;
use std::time::Duration;

use reqwest::Method;
use url::Url;

use crate::error::Result;

pub mod config;
pub mod http;

pub use config::{HttpConfig, HttpVersion};
pub use http::HttpTransport;

/// A fully prepared request.
///
/// Headers and body are final: the `sign` header was computed over exactly these
/// body bytes.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL including any query string.
    pub url: Url,
    /// Request headers.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
    /// Per-call timeout overriding the transport default.
    pub timeout: Option<Duration>,
}

impl TransportRequest {
    /// Creates a request with no headers, body, or timeout override.
    #[must_use]
    pub const fn new(method: Method, url: Url) -> Self {
        Self { method, url, headers: Vec::new(), body: None, timeout: None }
    }

    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response from transport operations.
///
/// Non-2xx statuses are not errors at this layer; the body is returned as-is.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
    /// Response headers.
    pub headers: Vec<(String, String)>,
}

impl TransportResponse {
    /// Returns the first header value with the given name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Moves a prepared request over the wire.
///
/// Implementations must return `Ok` for any response that arrived, whatever its
/// status, and `Err` only when no response was received.
pub trait Transport: Send + Sync {
    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be sent or the response body could not
    /// be read, including timeouts.
    fn execute(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;

    /// Returns the protocol name for logging.
    fn protocol_name(&self) -> &'static str;
}
