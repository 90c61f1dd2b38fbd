//! Resend and test webhooks.
//!
//! The payout test webhook is signed with the payout key; the rest use the
//! payment key.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    CryptomusClient,
    context::CallContext,
    endpoint::Endpoint,
    envelope::ApiResponse,
    error::Result,
    models::{Lookup, PaymentStatus, PayoutStatus, TestWebhookRequest},
    transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Asks the service to send the last webhook of an invoice again.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn resend_webhook(&self, lookup: &Lookup) -> Result<ApiResponse<Vec<Value>>> {
        self.resend_webhook_with_context(&CallContext::default(), lookup).await
    }

    /// [`resend_webhook`](Self::resend_webhook) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?lookup.uuid, order_id = ?lookup.order_id))]
    pub async fn resend_webhook_with_context(
        &self,
        ctx: &CallContext,
        lookup: &Lookup,
    ) -> Result<ApiResponse<Vec<Value>>> {
        info!("resending webhook");
        self.call(ctx, Endpoint::ResendWebhook, lookup).await
    }

    /// Sends a test payment webhook to `request.url_callback`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn test_payment_webhook(
        &self,
        request: &TestWebhookRequest<PaymentStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        self.test_payment_webhook_with_context(&CallContext::default(), request).await
    }

    /// [`test_payment_webhook`](Self::test_payment_webhook) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(url_callback = %request.url_callback, status = ?request.status))]
    pub async fn test_payment_webhook_with_context(
        &self,
        ctx: &CallContext,
        request: &TestWebhookRequest<PaymentStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        info!("requesting test payment webhook");
        self.call(ctx, Endpoint::TestPaymentWebhook, request).await
    }

    /// Sends a test payout webhook to `request.url_callback`.
    ///
    /// Signed with the payment key, like the other test webhooks.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payment key is configured.
    pub async fn test_payout_webhook(
        &self,
        request: &TestWebhookRequest<PayoutStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        self.test_payout_webhook_with_context(&CallContext::default(), request).await
    }

    /// [`test_payout_webhook`](Self::test_payout_webhook) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(url_callback = %request.url_callback, status = ?request.status))]
    pub async fn test_payout_webhook_with_context(
        &self,
        ctx: &CallContext,
        request: &TestWebhookRequest<PayoutStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        info!("requesting test payout webhook");
        self.call(ctx, Endpoint::TestPayoutWebhook, request).await
    }

    /// Sends a test static wallet webhook to `request.url_callback`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn test_wallet_webhook(
        &self,
        request: &TestWebhookRequest<PaymentStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        self.test_wallet_webhook_with_context(&CallContext::default(), request).await
    }

    /// [`test_wallet_webhook`](Self::test_wallet_webhook) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(url_callback = %request.url_callback, status = ?request.status))]
    pub async fn test_wallet_webhook_with_context(
        &self,
        ctx: &CallContext,
        request: &TestWebhookRequest<PaymentStatus>,
    ) -> Result<ApiResponse<Vec<Value>>> {
        info!("requesting test wallet webhook");
        self.call(ctx, Endpoint::TestWalletWebhook, request).await
    }
}
