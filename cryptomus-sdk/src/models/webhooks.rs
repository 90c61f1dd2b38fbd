//! Test webhook requests.

use serde::{Deserialize, Serialize};

/// Asks the service to send a test webhook to `url_callback`.
///
/// `S` is [`PaymentStatus`](super::PaymentStatus) for payment and wallet
/// webhooks and [`PayoutStatus`](super::PayoutStatus) for payout webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestWebhookRequest<S> {
    /// Where the webhook is delivered.
    pub url_callback: String,
    /// Currency code.
    pub currency: String,
    /// Network code.
    pub network: String,
    /// Identifier of an existing invoice or payout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Merchant order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Status the test webhook reports.
    pub status: S,
}

impl<S> TestWebhookRequest<S> {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        url_callback: impl Into<String>,
        currency: impl Into<String>,
        network: impl Into<String>,
        status: S,
    ) -> Self {
        Self {
            url_callback: url_callback.into(),
            currency: currency.into(),
            network: network.into(),
            uuid: None,
            order_id: None,
            status,
        }
    }
}
