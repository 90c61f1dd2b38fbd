//! HTTP transport implementation.
//!
//! HTTP/1.1 and HTTP/2 transport using reqwest.

use reqwest::{Client, header::USER_AGENT};
use tracing::{debug, instrument};

use super::config::{HttpConfig, HttpVersion, default_user_agent};
use crate::{
    error::{CryptomusError, Result},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Value of the `X-SDK-Language` header.
pub const SDK_LANGUAGE: &str = "rust";

/// Validates header name and value for CRLF injection prevention.
fn validate_header(name: &str, value: &str) -> Result<()> {
    if name.contains(['\r', '\n', '\0']) {
        return Err(CryptomusError::InvalidConfig(format!(
            "invalid header name '{}': control characters not allowed",
            name.escape_debug()
        )));
    }
    if value.contains(['\r', '\n', '\0']) {
        return Err(CryptomusError::InvalidConfig(format!(
            "invalid value for header '{name}': control characters not allowed"
        )));
    }
    Ok(())
}

/// HTTP/1.1 and HTTP/2 transport using reqwest.
///
/// Supports connection pooling and keep-alive. Cloning is cheap and shares the pool.
/// Every request carries the configured `User-Agent` and `X-SDK-Language: rust`.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::transport::{HttpConfig, HttpTransport, Transport};
///
/// let config = HttpConfig { timeout_secs: 10, ..Default::default() };
/// let transport = HttpTransport::with_config(&config)?;
/// assert_eq!(transport.protocol_name(), "http");
/// # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    user_agent: String,
    http_version: HttpVersion,
}

impl HttpTransport {
    /// Creates a new HTTP transport with default settings.
    ///
    /// Default configuration:
    /// - Timeout: 5 seconds
    /// - Connect timeout: 5 seconds
    /// - Pool max idle per host: 10
    /// - HTTP version: Auto
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client (TLS backend) cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Creates HTTP transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] if the configuration is out of bounds,
    /// or [`CryptomusError::Http`] if client creation fails.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        builder = match config.http_version {
            HttpVersion::Http1 => builder.http1_only(),
            HttpVersion::Http2 => builder.http2_prior_knowledge(),
            HttpVersion::Auto => builder,
        };

        let client = builder.build().map_err(CryptomusError::Http)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            http_version: config.http_version,
        })
    }

    /// Wraps a preconfigured reqwest client.
    ///
    /// Timeouts, proxies, and TLS settings are whatever the client was built with.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client, user_agent: default_user_agent(), http_version: HttpVersion::Auto }
    }

    /// Replaces the `User-Agent` header value.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] if the value contains control
    /// characters.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Result<Self> {
        let user_agent = user_agent.into();
        validate_header(USER_AGENT.as_str(), &user_agent)?;
        self.user_agent = user_agent;
        Ok(self)
    }

    /// Returns the `User-Agent` header value.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = request.url.path())
    )]
    async fn execute_request(&self, request: TransportRequest) -> Result<TransportResponse> {
        for (name, value) in &request.headers {
            validate_header(name, value)?;
        }

        let mut builder = self
            .client
            .request(request.method, request.url)
            .header(USER_AGENT, &self.user_agent)
            .header("X-SDK-Language", SDK_LANGUAGE);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_owned()))
            .collect();

        let body = response.bytes().await.map_err(CryptomusError::Http)?.to_vec();

        debug!(status, bytes = body.len(), "response received");

        Ok(TransportResponse { status, body, headers })
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.execute_request(request).await
    }

    fn protocol_name(&self) -> &'static str {
        match self.http_version {
            HttpVersion::Http1 => "http/1.1",
            HttpVersion::Http2 => "http/2",
            HttpVersion::Auto => "http",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::Method;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, header, method, path},
    };

    use super::*;

    fn request(server: &MockServer, method: Method, route: &str) -> TransportRequest {
        TransportRequest::new(method, format!("{}{route}", server.uri()).parse().unwrap())
    }

    #[test]
    fn test_http_transport_new() {
        let transport = HttpTransport::new();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_http_transport_protocol_name() {
        let config_http1 = HttpConfig { http_version: HttpVersion::Http1, ..Default::default() };
        let transport_http1 = HttpTransport::with_config(&config_http1).unwrap();
        assert_eq!(transport_http1.protocol_name(), "http/1.1");

        let config_http2 = HttpConfig { http_version: HttpVersion::Http2, ..Default::default() };
        let transport_http2 = HttpTransport::with_config(&config_http2).unwrap();
        assert_eq!(transport_http2.protocol_name(), "http/2");

        let transport_auto = HttpTransport::new().unwrap();
        assert_eq!(transport_auto.protocol_name(), "http");
    }

    #[test]
    fn test_http_transport_rejects_invalid_config() {
        let config = HttpConfig { timeout_secs: 0, ..Default::default() };
        assert!(matches!(
            HttpTransport::with_config(&config),
            Err(CryptomusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_with_user_agent() {
        let transport = HttpTransport::from_client(Client::new());
        assert!(transport.user_agent().starts_with("cryptomus-sdk-rust/"));

        let transport = transport.with_user_agent("shop/1.0").unwrap();
        assert_eq!(transport.user_agent(), "shop/1.0");

        assert!(HttpTransport::new().unwrap().with_user_agent("a\r\nb").is_err());
    }

    #[test]
    fn test_validate_header() {
        assert!(validate_header("merchant", "8b03432e-385b-4670-8d06-064591096795").is_ok());
        assert!(validate_header("merchant", "abc\r\nsign: forged").is_err());
        assert!(validate_header("bad\nname", "value").is_err());
        assert!(validate_header("sign", "abc\0").is_err());
    }

    #[tokio::test]
    async fn test_sends_default_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment"))
            .and(header("X-SDK-Language", "rust"))
            .and(header("user-agent", "shop/1.0"))
            .and(header("merchant", "m-1"))
            .and(body_string(r#"{"amount":"10"}"#))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"state":0}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap().with_user_agent("shop/1.0").unwrap();
        let mut req = request(&server, Method::POST, "/v1/payment");
        req.headers.push(("merchant", "m-1".to_owned()));
        req.body = Some(br#"{"amount":"10"}"#.to_vec());

        let response = transport.execute(req).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"state":0}"#);
    }

    #[tokio::test]
    async fn test_error_status_is_not_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payment/info"))
            .respond_with(
                ResponseTemplate::new(422).set_body_string(r#"{"state":1,"message":"bad"}"#),
            )
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let response =
            transport.execute(request(&server, Method::POST, "/v1/payment/info")).await.unwrap();
        assert_eq!(response.status, 422);
        assert_eq!(response.body, br#"{"state":1,"message":"bad"}"#);
    }

    #[tokio::test]
    async fn test_per_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let mut req = request(&server, Method::GET, "/slow");
        req.timeout = Some(Duration::from_millis(100));

        let err = transport.execute(req).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_header_injection_rejected_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let transport = HttpTransport::new().unwrap();
        let mut req = request(&server, Method::POST, "/v1/payment");
        req.headers.push(("merchant", "m\r\nsign: x".to_owned()));

        let err = transport.execute(req).await.unwrap_err();
        assert!(matches!(err, CryptomusError::InvalidConfig(_)));
    }
}
