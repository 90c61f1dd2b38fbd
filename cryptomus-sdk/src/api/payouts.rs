//! Payouts and wallet transfers.
//!
//! All operations are signed with the payout key.

use tracing::{info, instrument};

use crate::{
    CryptomusClient,
    context::CallContext,
    endpoint::Endpoint,
    envelope::ApiResponse,
    error::Result,
    models::{
        CreatePayoutRequest, Lookup, Payout, PayoutHistoryRequest, PayoutPage, ServiceInfo,
        Transfer, TransferRequest,
    },
    transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Sends funds from the merchant balance to an external address.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn create_payout(
        &self,
        request: &CreatePayoutRequest,
    ) -> Result<ApiResponse<Payout>> {
        self.create_payout_with_context(&CallContext::default(), request).await
    }

    /// [`create_payout`](Self::create_payout) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(order_id = %request.order_id, network = %request.network))]
    pub async fn create_payout_with_context(
        &self,
        ctx: &CallContext,
        request: &CreatePayoutRequest,
    ) -> Result<ApiResponse<Payout>> {
        info!(amount = %request.amount, currency = %request.currency, "creating payout");
        self.call(ctx, Endpoint::CreatePayout, request).await
    }

    /// Fetches a payout by `uuid` or `order_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn payout_info(&self, lookup: &Lookup) -> Result<ApiResponse<Payout>> {
        self.payout_info_with_context(&CallContext::default(), lookup).await
    }

    /// [`payout_info`](Self::payout_info) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?lookup.uuid, order_id = ?lookup.order_id))]
    pub async fn payout_info_with_context(
        &self,
        ctx: &CallContext,
        lookup: &Lookup,
    ) -> Result<ApiResponse<Payout>> {
        info!("fetching payout");
        self.call(ctx, Endpoint::PayoutInfo, lookup).await
    }

    /// Lists payouts, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn payout_history(
        &self,
        request: &PayoutHistoryRequest,
    ) -> Result<ApiResponse<PayoutPage>> {
        self.payout_history_with_context(&CallContext::default(), request).await
    }

    /// [`payout_history`](Self::payout_history) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(cursor = ?request.cursor))]
    pub async fn payout_history_with_context(
        &self,
        ctx: &CallContext,
        request: &PayoutHistoryRequest,
    ) -> Result<ApiResponse<PayoutPage>> {
        info!("listing payouts");
        self.invoke(ctx, Endpoint::PayoutHistory, &[], Some(request), request.cursor.as_deref())
            .await
    }

    /// Lists the currencies and networks available for payouts.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn payout_services(&self) -> Result<ApiResponse<Vec<ServiceInfo>>> {
        self.payout_services_with_context(&CallContext::default()).await
    }

    /// [`payout_services`](Self::payout_services) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all)]
    pub async fn payout_services_with_context(
        &self,
        ctx: &CallContext,
    ) -> Result<ApiResponse<Vec<ServiceInfo>>> {
        info!("listing payout services");
        self.call_empty(ctx, Endpoint::PayoutServices).await
    }

    /// Moves funds from the merchant balance to the personal wallet.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn transfer_to_personal(
        &self,
        request: &TransferRequest,
    ) -> Result<ApiResponse<Transfer>> {
        self.transfer_to_personal_with_context(&CallContext::default(), request).await
    }

    /// [`transfer_to_personal`](Self::transfer_to_personal) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(currency = %request.currency))]
    pub async fn transfer_to_personal_with_context(
        &self,
        ctx: &CallContext,
        request: &TransferRequest,
    ) -> Result<ApiResponse<Transfer>> {
        info!(amount = %request.amount, "transferring to personal wallet");
        self.call(ctx, Endpoint::TransferToPersonal, request).await
    }

    /// Moves funds from the personal wallet to the merchant balance.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or no payout key is configured.
    pub async fn transfer_to_business(
        &self,
        request: &TransferRequest,
    ) -> Result<ApiResponse<Transfer>> {
        self.transfer_to_business_with_context(&CallContext::default(), request).await
    }

    /// [`transfer_to_business`](Self::transfer_to_business) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(currency = %request.currency))]
    pub async fn transfer_to_business_with_context(
        &self,
        ctx: &CallContext,
        request: &TransferRequest,
    ) -> Result<ApiResponse<Transfer>> {
        info!(amount = %request.amount, "transferring to business wallet");
        self.call(ctx, Endpoint::TransferToBusiness, request).await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::{
        client::{
            ClientBuilder,
            tests::{RecordingTransport, client},
        },
        endpoint::KeyScope,
        error::CryptomusError,
        sign,
    };

    #[tokio::test]
    async fn test_create_payout_signed_with_payout_key() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "uuid": "p-1",
                "amount": "5",
                "currency": "USDT",
                "status": "process"
            }}),
        );
        let client = client(transport.clone());

        let request = CreatePayoutRequest::new(Decimal::new(5, 0), "USDT", "tron", "p-1", "TXYZ");
        let payout = client.create_payout(&request).await.unwrap().into_result().unwrap();
        assert_eq!(payout.uuid, "p-1");

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payout");
        let body = sent.body.as_deref();
        assert_eq!(sent.header("sign"), Some(sign::sign_body("payout-secret", body).as_str()));
    }

    #[tokio::test]
    async fn test_payout_without_payout_key_fails_before_io() {
        let transport = RecordingTransport::new(200, &json!({"state": 0, "result": []}));
        let client = ClientBuilder::new()
            .merchant("merchant-uuid")
            .payment_key("payment-secret")
            .build_with_transport(transport.clone())
            .unwrap();

        let err = client.payout_services().await.unwrap_err();
        assert!(matches!(err, CryptomusError::MissingSecretKey(KeyScope::Payout)));
        assert_eq!(transport.count(), 0);
    }

    #[tokio::test]
    async fn test_payout_history_cursor() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "merchant_uuid": "m-1",
                "items": [],
                "paginate": {
                    "count": 0,
                    "hasPages": false,
                    "nextCursor": null,
                    "previousCursor": null,
                    "perPage": 15
                }
            }}),
        );
        let client = client(transport.clone());

        let request = PayoutHistoryRequest { cursor: Some("c2".to_owned()), ..Default::default() };
        let page = client.payout_history(&request).await.unwrap().into_result().unwrap();
        assert_eq!(page.merchant_uuid, "m-1");
        assert!(page.next_cursor().is_none());

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payout/list");
        assert_eq!(sent.url.query(), Some("cursor=c2"));
    }

    #[tokio::test]
    async fn test_payout_services_is_post_without_body() {
        let transport = RecordingTransport::new(200, &json!({"state": 0, "result": []}));
        let client = client(transport.clone());

        client.payout_services().await.unwrap();
        let sent = transport.last();
        assert_eq!(sent.method, reqwest::Method::POST);
        assert_eq!(sent.url.path(), "/v1/payout/services");
        assert!(sent.body.is_none());
    }

    #[tokio::test]
    async fn test_transfers() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "user_wallet_transaction_uuid": "u-1",
                "user_wallet_balance": "10",
                "merchant_transaction_uuid": "m-1",
                "merchant_balance": "0"
            }}),
        );
        let client = client(transport.clone());
        let request = TransferRequest::new(Decimal::new(10, 0), "USDT");

        let transfer = client.transfer_to_personal(&request).await.unwrap().into_result().unwrap();
        assert_eq!(transfer.user_wallet_balance, Some(Decimal::new(10, 0)));
        assert_eq!(transport.last().url.path(), "/v1/transfer/to-personal");

        client.transfer_to_business(&request).await.unwrap();
        assert_eq!(transport.last().url.path(), "/v1/transfer/to-business");
    }

    #[tokio::test]
    async fn test_payout_info() {
        let transport =
            RecordingTransport::new(200, &json!({"state": 0, "result": {"uuid": "p-2"}}));
        let client = client(transport.clone());

        client.payout_info(&Lookup::by_uuid("p-2")).await.unwrap();
        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payout/info");
        assert_eq!(sent.body.as_deref(), Some(br#"{"uuid":"p-2"}"#.as_slice()));
    }
}
