//! Endpoint registry and URL resolution.
//!
//! Every operation is described by an [`Endpoint`]: its HTTP method, its path
//! template, and which secret key (if any) signs it. [`EndpointResolver`] joins a
//! template onto the client's host.

use std::fmt;

use reqwest::Method;
use url::Url;

use crate::error::{CryptomusError, Result};

/// Production API host.
pub const DEFAULT_HOST: &str = "https://api.cryptomus.com";

/// Which secret key authenticates an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyScope {
    /// Signed with the payment key.
    Payment,
    /// Signed with the payout key.
    Payout,
    /// Public endpoint; no `merchant` or `sign` headers.
    Unsigned,
}

impl KeyScope {
    /// Lowercase label used in logs and error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Payout => "payout",
            Self::Unsigned => "unsigned",
        }
    }
}

impl fmt::Display for KeyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every remote operation the client can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Create an invoice.
    CreateInvoice,
    /// Create a static wallet.
    CreateStaticWallet,
    /// QR code for a static wallet.
    GenerateWalletQr,
    /// QR code for an invoice.
    GenerateInvoiceQr,
    /// Block a static wallet address.
    BlockStaticWallet,
    /// Refund funds held on a blocked address.
    RefundBlockedAddress,
    /// Invoice details.
    PaymentInfo,
    /// Refund an invoice.
    Refund,
    /// Resend an invoice webhook.
    ResendWebhook,
    /// Available payment services.
    PaymentServices,
    /// Invoice history.
    PaymentHistory,
    /// Test webhook for an invoice.
    TestPaymentWebhook,
    /// Test webhook for a payout.
    TestPayoutWebhook,
    /// Test webhook for a static wallet.
    TestWalletWebhook,
    /// Create a payout.
    CreatePayout,
    /// Payout details.
    PayoutInfo,
    /// Payout history.
    PayoutHistory,
    /// Available payout services.
    PayoutServices,
    /// Transfer from the business wallet to the personal wallet.
    TransferToPersonal,
    /// Transfer from the personal wallet to the business wallet.
    TransferToBusiness,
    /// Create a recurring payment.
    CreateRecurring,
    /// Recurring payment details.
    RecurringInfo,
    /// Recurring payment list.
    ListRecurring,
    /// Cancel a recurring payment.
    CancelRecurring,
    /// Exchange rates for one currency.
    ExchangeRateList,
    /// Discount list.
    ListDiscounts,
    /// Set a discount.
    SetDiscount,
    /// Merchant and user balances.
    Balance,
}

impl Endpoint {
    /// All endpoints, in registry order.
    pub const ALL: [Self; 28] = [
        Self::CreateInvoice,
        Self::CreateStaticWallet,
        Self::GenerateWalletQr,
        Self::GenerateInvoiceQr,
        Self::BlockStaticWallet,
        Self::RefundBlockedAddress,
        Self::PaymentInfo,
        Self::Refund,
        Self::ResendWebhook,
        Self::PaymentServices,
        Self::PaymentHistory,
        Self::TestPaymentWebhook,
        Self::TestPayoutWebhook,
        Self::TestWalletWebhook,
        Self::CreatePayout,
        Self::PayoutInfo,
        Self::PayoutHistory,
        Self::PayoutServices,
        Self::TransferToPersonal,
        Self::TransferToBusiness,
        Self::CreateRecurring,
        Self::RecurringInfo,
        Self::ListRecurring,
        Self::CancelRecurring,
        Self::ExchangeRateList,
        Self::ListDiscounts,
        Self::SetDiscount,
        Self::Balance,
    ];

    /// Path template relative to the host. Placeholders are written `{name}`.
    #[must_use]
    pub const fn path_template(&self) -> &'static str {
        match self {
            Self::CreateInvoice => "/v1/payment",
            Self::CreateStaticWallet => "/v1/wallet",
            Self::GenerateWalletQr => "/v1/wallet/qr",
            Self::GenerateInvoiceQr => "/v1/payment/qr",
            Self::BlockStaticWallet => "/v1/wallet/block-address",
            Self::RefundBlockedAddress => "/v1/wallet/blocked-address-refund",
            Self::PaymentInfo => "/v1/payment/info",
            Self::Refund => "/v1/payment/refund",
            Self::ResendWebhook => "/v1/payment/resend",
            Self::PaymentServices => "/v1/payment/services",
            Self::PaymentHistory => "/v1/payment/list",
            Self::TestPaymentWebhook => "/v1/test-webhook/payment",
            Self::TestPayoutWebhook => "/v1/test-webhook/payout",
            Self::TestWalletWebhook => "/v1/test-webhook/wallet",
            Self::CreatePayout => "/v1/payout",
            Self::PayoutInfo => "/v1/payout/info",
            Self::PayoutHistory => "/v1/payout/list",
            Self::PayoutServices => "/v1/payout/services",
            Self::TransferToPersonal => "/v1/transfer/to-personal",
            Self::TransferToBusiness => "/v1/transfer/to-business",
            Self::CreateRecurring => "/v1/recurrence/create",
            Self::RecurringInfo => "/v1/recurrence/info",
            Self::ListRecurring => "/v1/recurrence/list",
            Self::CancelRecurring => "/v1/recurrence/cancel",
            Self::ExchangeRateList => "/v1/exchange-rate/{currency}/list",
            Self::ListDiscounts => "/v1/payment/discount/list",
            Self::SetDiscount => "/v1/payment/discount/set",
            Self::Balance => "/v1/balance",
        }
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::ExchangeRateList => Method::GET,
            _ => Method::POST,
        }
    }

    /// Secret key that signs the request.
    #[must_use]
    pub const fn scope(&self) -> KeyScope {
        match self {
            Self::CreatePayout
            | Self::PayoutInfo
            | Self::PayoutHistory
            | Self::PayoutServices
            | Self::TransferToPersonal
            | Self::TransferToBusiness => KeyScope::Payout,
            Self::ExchangeRateList => KeyScope::Unsigned,
            _ => KeyScope::Payment,
        }
    }

    /// Whether the endpoint accepts a `cursor` query parameter.
    #[must_use]
    pub const fn is_paginated(&self) -> bool {
        matches!(self, Self::PaymentHistory | Self::PayoutHistory | Self::ListRecurring)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path_template())
    }
}

/// Resolves endpoint templates against a host.
///
/// The host may carry a path prefix (for example when the API sits behind a
/// forwarding proxy); endpoint paths are appended to it.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::endpoint::{Endpoint, EndpointResolver};
///
/// let resolver = EndpointResolver::new("https://api.cryptomus.com")?;
///
/// let url = resolver.resolve(Endpoint::CreateInvoice)?;
/// assert_eq!(url.as_str(), "https://api.cryptomus.com/v1/payment");
///
/// let url = resolver.resolve_with(Endpoint::ExchangeRateList, &[("currency", "ETH")])?;
/// assert_eq!(url.as_str(), "https://api.cryptomus.com/v1/exchange-rate/ETH/list");
/// # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    host: Url,
}

impl EndpointResolver {
    /// Creates a resolver for the given host.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidUrl`] if the host is not an absolute `http` or
    /// `https` URL, has no host name, or carries a query or fragment.
    pub fn new(host: &str) -> Result<Self> {
        let url = Url::parse(host)
            .map_err(|e| CryptomusError::InvalidUrl(format!("invalid host '{host}': {e}")))?;
        validate_host(&url)?;
        Ok(Self { host: url })
    }

    /// Host URL this resolver joins paths onto.
    #[must_use]
    pub const fn host(&self) -> &Url {
        &self.host
    }

    /// Resolves an endpoint without placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidUrl`] if the template has a placeholder.
    pub fn resolve(&self, endpoint: Endpoint) -> Result<Url> {
        self.resolve_with(endpoint, &[])
    }

    /// Resolves an endpoint, substituting `{name}` placeholders.
    ///
    /// Each value fills exactly one path segment and is percent-encoded, so a value
    /// containing `/` cannot change the route.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidUrl`] if a placeholder has no value or a value
    /// is empty.
    pub fn resolve_with(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Url> {
        let template = endpoint.path_template();
        let mut url = self.host.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                CryptomusError::InvalidUrl(format!("host cannot be a base: {}", self.host))
            })?;
            segments.pop_if_empty();

            for segment in template.trim_start_matches('/').split('/') {
                let value = match placeholder(segment) {
                    Some(name) => lookup(params, name).ok_or_else(|| {
                        CryptomusError::InvalidUrl(format!(
                            "missing value for '{{{name}}}' in {template}"
                        ))
                    })?,
                    None => segment,
                };
                segments.push(value);
            }
        }
        Ok(url)
    }
}

fn validate_host(url: &Url) -> Result<()> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(CryptomusError::InvalidUrl(format!(
            "host must use http or https, got: {}",
            url.scheme()
        )));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(CryptomusError::InvalidUrl(format!("host URL has no host name: {url}")));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(CryptomusError::InvalidUrl(format!(
            "host URL must not have a query or fragment: {url}"
        )));
    }
    Ok(())
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

fn lookup<'a>(params: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    params.iter().find(|(key, _)| *key == name).map(|(_, value)| *value).filter(|v| !v.is_empty())
}
