//! Client construction and the shared request pipeline.
//!
//! Every operation goes through [`CryptomusClient::invoke`]: the payload is encoded
//! once, the encoded bytes are signed with the key for the endpoint's scope, and the
//! response body is decoded into an [`ApiResponse`] whatever the HTTP status.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::{ClientConfig, SecretKey},
    context::CallContext,
    endpoint::{DEFAULT_HOST, Endpoint, EndpointResolver, KeyScope},
    envelope::ApiResponse,
    error::{CryptomusError, Result},
    json, sign,
    transport::{HttpConfig, HttpTransport, Transport, TransportRequest},
};

const CONTENT_TYPE_JSON: &str = "application/json";

/// Builder for [`CryptomusClient`].
///
/// Setters may be called in any order; a later call overrides an earlier one,
/// including values brought in by [`config`](Self::config).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use cryptomus_sdk::CryptomusClient;
///
/// let client = CryptomusClient::builder()
///     .merchant("8b03432e-385b-4670-8d06-064591096795")
///     .payment_key("payment-secret")
///     .payout_key("payout-secret")
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// assert_eq!(client.host().as_str(), "https://api.cryptomus.com/");
/// # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
/// ```
#[derive(Debug, Default)]
pub struct ClientBuilder {
    host: Option<String>,
    merchant: Option<String>,
    payment_key: Option<SecretKey>,
    payout_key: Option<SecretKey>,
    timeout: Option<Duration>,
    http: HttpConfig,
    http_client: Option<reqwest::Client>,
}

impl ClientBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a [`ClientConfig`].
    ///
    /// Host and HTTP settings are replaced. Merchant and keys are replaced only when
    /// the configuration provides them.
    #[must_use]
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.host = Some(config.host);
        if !config.merchant.is_empty() {
            self.merchant = Some(config.merchant);
        }
        if config.payment_key.is_some() {
            self.payment_key = config.payment_key;
        }
        if config.payout_key.is_some() {
            self.payout_key = config.payout_key;
        }
        self.http = config.http;
        self
    }

    /// API host, e.g. a sandbox or a forwarding proxy.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Merchant identifier sent in the `merchant` header.
    #[must_use]
    pub fn merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    /// Key for payment-scope operations.
    #[must_use]
    pub fn payment_key(mut self, key: impl Into<SecretKey>) -> Self {
        self.payment_key = Some(key.into());
        self
    }

    /// Key for payout-scope operations.
    #[must_use]
    pub fn payout_key(mut self, key: impl Into<SecretKey>) -> Self {
        self.payout_key = Some(key.into());
        self
    }

    /// Default per-call timeout. A [`CallContext`] timeout still takes precedence.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Connection timeout, rounded up to whole seconds.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
        self.http.connect_timeout_secs = secs.max(1);
        self
    }

    /// `User-Agent` header value.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.http.user_agent = user_agent.into();
        self
    }

    /// Replaces all HTTP transport settings.
    #[must_use]
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Uses a preconfigured reqwest client instead of building one.
    ///
    /// The client's own timeouts, proxy, and TLS settings apply; pool and timeout
    /// fields of the HTTP configuration are ignored.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds a client on the default HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidUrl`] for a bad host,
    /// [`CryptomusError::InvalidConfig`] for invalid settings, or
    /// [`CryptomusError::Http`] if the HTTP client cannot be created.
    pub fn build(mut self) -> Result<CryptomusClient<HttpTransport>> {
        let transport = match self.http_client.take() {
            Some(client) => {
                HttpTransport::from_client(client).with_user_agent(self.http.user_agent.clone())?
            }
            None => HttpTransport::with_config(&self.http)?,
        };
        self.build_with_transport(transport)
    }

    /// Builds a client on a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidUrl`] for a bad host or
    /// [`CryptomusError::InvalidConfig`] for an invalid merchant or empty key.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<CryptomusClient<T>> {
        let merchant = self.merchant.unwrap_or_default();
        if merchant.chars().any(char::is_control) {
            return Err(CryptomusError::InvalidConfig(
                "merchant must not contain control characters".to_owned(),
            ));
        }
        let keys = [(KeyScope::Payment, &self.payment_key), (KeyScope::Payout, &self.payout_key)];
        for (scope, key) in keys {
            if key.as_ref().is_some_and(SecretKey::is_empty) {
                return Err(CryptomusError::InvalidConfig(format!(
                    "{scope}_key must not be empty"
                )));
            }
        }

        let resolver = EndpointResolver::new(self.host.as_deref().unwrap_or(DEFAULT_HOST))?;

        Ok(CryptomusClient {
            merchant,
            payment_key: self.payment_key,
            payout_key: self.payout_key,
            timeout: self.timeout,
            resolver,
            transport,
        })
    }
}

/// Async client for the Cryptomus API.
///
/// Credentials are fixed at construction. The client holds no per-call state, so one
/// instance can serve concurrent calls; clone it (cheap with [`HttpTransport`]) to
/// share it across tasks.
///
/// Operations live in the [`api`](crate::api) modules and return
/// `Result<ApiResponse<T>>`: `Err` when the call did not complete, `Ok` with the
/// decoded envelope otherwise, including application errors.
#[derive(Debug, Clone)]
pub struct CryptomusClient<T = HttpTransport> {
    merchant: String,
    payment_key: Option<SecretKey>,
    payout_key: Option<SecretKey>,
    timeout: Option<Duration>,
    resolver: EndpointResolver,
    transport: T,
}

impl CryptomusClient<HttpTransport> {
    /// Starts building a client.
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Builds a client from a [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client cannot be
    /// created.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        ClientBuilder::new().config(config).build()
    }

    /// Builds a client from `CRYPTOMUS_*` environment variables.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }
}

impl<T: Transport> CryptomusClient<T> {
    /// Merchant identifier.
    #[must_use]
    pub fn merchant(&self) -> &str {
        &self.merchant
    }

    /// Host URL requests are sent to.
    #[must_use]
    pub const fn host(&self) -> &url::Url {
        self.resolver.host()
    }

    /// Underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn key_for(&self, scope: KeyScope) -> Result<Option<&SecretKey>> {
        let key = match scope {
            KeyScope::Unsigned => return Ok(None),
            KeyScope::Payment => self.payment_key.as_ref(),
            KeyScope::Payout => self.payout_key.as_ref(),
        };
        key.map(Some).ok_or(CryptomusError::MissingSecretKey(scope))
    }

    /// Sends a signed JSON payload to an endpoint.
    pub(crate) async fn call<P, R>(
        &self,
        ctx: &CallContext,
        endpoint: Endpoint,
        payload: &P,
    ) -> Result<ApiResponse<R>>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.invoke(ctx, endpoint, &[], Some(payload), None).await
    }

    /// Calls an endpoint that takes no payload.
    pub(crate) async fn call_empty<R>(
        &self,
        ctx: &CallContext,
        endpoint: Endpoint,
    ) -> Result<ApiResponse<R>>
    where
        R: DeserializeOwned,
    {
        self.invoke::<(), R>(ctx, endpoint, &[], None, None).await
    }

    /// Shared request pipeline.
    ///
    /// 1. Bail out with [`CryptomusError::Cancelled`] if the context is already cancelled.
    /// 2. Resolve the URL; append `cursor` to the query string when given. Only paginated
    ///    endpoints take a cursor.
    /// 3. Encode the payload once and sign those bytes with the scoped key.
    /// 4. Send, racing the cancellation token.
    /// 5. Decode the envelope regardless of HTTP status.
    #[instrument(
        skip_all,
        fields(
            endpoint = %endpoint,
            scope = %endpoint.scope(),
            protocol = self.transport.protocol_name(),
        )
    )]
    pub(crate) async fn invoke<P, R>(
        &self,
        ctx: &CallContext,
        endpoint: Endpoint,
        path_params: &[(&str, &str)],
        payload: Option<&P>,
        cursor: Option<&str>,
    ) -> Result<ApiResponse<R>>
    where
        P: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        if ctx.is_cancelled() {
            debug!("call cancelled before dispatch");
            return Err(CryptomusError::Cancelled);
        }

        let mut url = self.resolver.resolve_with(endpoint, path_params)?;
        if let Some(cursor) = cursor {
            if !endpoint.is_paginated() {
                return Err(CryptomusError::InvalidUrl(format!(
                    "{endpoint} does not accept a cursor"
                )));
            }
            url.query_pairs_mut().append_pair("cursor", cursor);
        }

        let body = payload.map(json::encode).transpose()?;

        let mut request = TransportRequest::new(endpoint.method(), url);
        request.headers.push(("Content-Type", CONTENT_TYPE_JSON.to_owned()));
        if let Some(key) = self.key_for(endpoint.scope())? {
            let signature = sign::sign_body(key.expose(), body.as_deref());
            request.headers.push(("merchant", self.merchant.clone()));
            request.headers.push(("sign", signature));
        }
        request.body = body;
        request.timeout = ctx.timeout().or(self.timeout);

        debug!(has_body = request.body.is_some(), has_cursor = cursor.is_some(), "dispatching");

        let response = match ctx.cancellation() {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("call cancelled in flight");
                    return Err(CryptomusError::Cancelled);
                }
                response = self.transport.execute(request) => response?,
            },
            None => self.transport.execute(request).await?,
        };

        let envelope: ApiResponse<R> = json::decode_envelope(response.status, &response.body)?;

        if envelope.is_success() {
            debug!(status = response.status, "call succeeded");
        } else {
            warn!(
                status = response.status,
                state = envelope.state,
                message = %envelope.message,
                error = %envelope.error,
                field_errors = envelope.errors.len(),
                "API returned an error envelope"
            );
        }

        Ok(envelope)
    }
}
