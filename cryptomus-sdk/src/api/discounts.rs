//! Per-method discounts and markups.

use tracing::{info, instrument};

use crate::{
    CryptomusClient,
    context::CallContext,
    endpoint::Endpoint,
    envelope::ApiResponse,
    error::Result,
    models::{Discount, SetDiscountRequest},
    transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Lists the discount configured for every payment method.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn list_discounts(&self) -> Result<ApiResponse<Vec<Discount>>> {
        self.list_discounts_with_context(&CallContext::default()).await
    }

    /// [`list_discounts`](Self::list_discounts) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all)]
    pub async fn list_discounts_with_context(
        &self,
        ctx: &CallContext,
    ) -> Result<ApiResponse<Vec<Discount>>> {
        info!("listing discounts");
        self.call_empty(ctx, Endpoint::ListDiscounts).await
    }

    /// Sets the discount (or markup, when negative) for one payment method.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn set_discount(
        &self,
        request: &SetDiscountRequest,
    ) -> Result<ApiResponse<Discount>> {
        self.set_discount_with_context(&CallContext::default(), request).await
    }

    /// [`set_discount`](Self::set_discount) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(currency = %request.currency, network = %request.network))]
    pub async fn set_discount_with_context(
        &self,
        ctx: &CallContext,
        request: &SetDiscountRequest,
    ) -> Result<ApiResponse<Discount>> {
        info!(discount_percent = request.discount_percent, "setting discount");
        self.call(ctx, Endpoint::SetDiscount, request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::tests::{RecordingTransport, client};

    #[tokio::test]
    async fn test_list_discounts() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": [{"currency": "BTC", "network": "btc", "discount": -5}]}),
        );
        let client = client(transport.clone());

        let discounts = client.list_discounts().await.unwrap().into_result().unwrap();
        assert_eq!(discounts[0].discount, -5);

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment/discount/list");
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_set_discount() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {"currency": "BTC", "network": "btc", "discount": 10}}),
        );
        let client = client(transport.clone());

        let discount = client
            .set_discount(&SetDiscountRequest::new("BTC", "btc", 10))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(discount.discount, 10);

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment/discount/set");
        assert_eq!(
            sent.body.as_deref(),
            Some(br#"{"currency":"BTC","network":"btc","discount_percent":10}"#.as_slice())
        );
    }
}
