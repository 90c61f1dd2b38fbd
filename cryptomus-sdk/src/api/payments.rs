//! Invoices, static wallets, QR codes, refunds, and payment history.
//!
//! All operations are signed with the payment key.

use serde_json::Value;
use tracing::{info, instrument};

use crate::{
    CryptomusClient,
    context::CallContext,
    endpoint::Endpoint,
    envelope::{ApiResponse, Page},
    error::Result,
    models::{
        BlockStaticWalletRequest, BlockedAddressRefund, BlockedWallet, CreateInvoiceRequest,
        CreateStaticWalletRequest, GenerateInvoiceQrRequest, GenerateWalletQrRequest, Invoice,
        Lookup, PaymentHistoryRequest, QrCode, RefundBlockedAddressRequest, RefundRequest,
        ServiceInfo, StaticWallet,
    },
    transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Creates an invoice.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete; see [`crate::CryptomusError`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cryptomus_sdk::{CryptomusClient, models::CreateInvoiceRequest};
    /// use rust_decimal::Decimal;
    ///
    /// # async fn example() -> cryptomus_sdk::Result<()> {
    /// let client = CryptomusClient::builder()
    ///     .merchant("8b03432e-385b-4670-8d06-064591096795")
    ///     .payment_key("payment-key")
    ///     .build()?;
    ///
    /// let request = CreateInvoiceRequest::new(Decimal::new(15, 0), "USDT", "order-1");
    /// let invoice = client.create_invoice(&request).await?.into_result()?;
    /// println!("pay at {}", invoice.url);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_invoice(
        &self,
        request: &CreateInvoiceRequest,
    ) -> Result<ApiResponse<Invoice>> {
        self.create_invoice_with_context(&CallContext::default(), request).await
    }

    /// [`create_invoice`](Self::create_invoice) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(order_id = %request.order_id, currency = %request.currency))]
    pub async fn create_invoice_with_context(
        &self,
        ctx: &CallContext,
        request: &CreateInvoiceRequest,
    ) -> Result<ApiResponse<Invoice>> {
        info!(amount = %request.amount, "creating invoice");
        self.call(ctx, Endpoint::CreateInvoice, request).await
    }

    /// Creates a static wallet bound to `order_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn create_static_wallet(
        &self,
        request: &CreateStaticWalletRequest,
    ) -> Result<ApiResponse<StaticWallet>> {
        self.create_static_wallet_with_context(&CallContext::default(), request).await
    }

    /// [`create_static_wallet`](Self::create_static_wallet) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(order_id = %request.order_id, network = %request.network))]
    pub async fn create_static_wallet_with_context(
        &self,
        ctx: &CallContext,
        request: &CreateStaticWalletRequest,
    ) -> Result<ApiResponse<StaticWallet>> {
        info!(currency = %request.currency, "creating static wallet");
        self.call(ctx, Endpoint::CreateStaticWallet, request).await
    }

    /// Generates a QR code for a static wallet address.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn generate_wallet_qr(
        &self,
        request: &GenerateWalletQrRequest,
    ) -> Result<ApiResponse<QrCode>> {
        self.generate_wallet_qr_with_context(&CallContext::default(), request).await
    }

    /// [`generate_wallet_qr`](Self::generate_wallet_qr) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(wallet_address_uuid = %request.wallet_address_uuid))]
    pub async fn generate_wallet_qr_with_context(
        &self,
        ctx: &CallContext,
        request: &GenerateWalletQrRequest,
    ) -> Result<ApiResponse<QrCode>> {
        info!("generating wallet QR code");
        self.call(ctx, Endpoint::GenerateWalletQr, request).await
    }

    /// Generates a QR code for an invoice.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn generate_invoice_qr(
        &self,
        request: &GenerateInvoiceQrRequest,
    ) -> Result<ApiResponse<QrCode>> {
        self.generate_invoice_qr_with_context(&CallContext::default(), request).await
    }

    /// [`generate_invoice_qr`](Self::generate_invoice_qr) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(merchant_payment_uuid = %request.merchant_payment_uuid))]
    pub async fn generate_invoice_qr_with_context(
        &self,
        ctx: &CallContext,
        request: &GenerateInvoiceQrRequest,
    ) -> Result<ApiResponse<QrCode>> {
        info!("generating invoice QR code");
        self.call(ctx, Endpoint::GenerateInvoiceQr, request).await
    }

    /// Blocks a static wallet so it stops crediting payments.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn block_static_wallet(
        &self,
        request: &BlockStaticWalletRequest,
    ) -> Result<ApiResponse<BlockedWallet>> {
        self.block_static_wallet_with_context(&CallContext::default(), request).await
    }

    /// [`block_static_wallet`](Self::block_static_wallet) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?request.uuid, order_id = ?request.order_id))]
    pub async fn block_static_wallet_with_context(
        &self,
        ctx: &CallContext,
        request: &BlockStaticWalletRequest,
    ) -> Result<ApiResponse<BlockedWallet>> {
        info!(is_force_refund = request.is_force_refund, "blocking static wallet");
        self.call(ctx, Endpoint::BlockStaticWallet, request).await
    }

    /// Sends the funds held on a blocked address to `address`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn refund_blocked_address(
        &self,
        request: &RefundBlockedAddressRequest,
    ) -> Result<ApiResponse<BlockedAddressRefund>> {
        self.refund_blocked_address_with_context(&CallContext::default(), request).await
    }

    /// [`refund_blocked_address`](Self::refund_blocked_address) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?request.uuid, order_id = ?request.order_id))]
    pub async fn refund_blocked_address_with_context(
        &self,
        ctx: &CallContext,
        request: &RefundBlockedAddressRequest,
    ) -> Result<ApiResponse<BlockedAddressRefund>> {
        info!("refunding blocked address");
        self.call(ctx, Endpoint::RefundBlockedAddress, request).await
    }

    /// Fetches an invoice by `uuid` or `order_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn payment_info(&self, lookup: &Lookup) -> Result<ApiResponse<Invoice>> {
        self.payment_info_with_context(&CallContext::default(), lookup).await
    }

    /// [`payment_info`](Self::payment_info) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?lookup.uuid, order_id = ?lookup.order_id))]
    pub async fn payment_info_with_context(
        &self,
        ctx: &CallContext,
        lookup: &Lookup,
    ) -> Result<ApiResponse<Invoice>> {
        info!("fetching invoice");
        self.call(ctx, Endpoint::PaymentInfo, lookup).await
    }

    /// Refunds a paid invoice.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn refund(&self, request: &RefundRequest) -> Result<ApiResponse<Vec<Value>>> {
        self.refund_with_context(&CallContext::default(), request).await
    }

    /// [`refund`](Self::refund) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?request.uuid, order_id = ?request.order_id))]
    pub async fn refund_with_context(
        &self,
        ctx: &CallContext,
        request: &RefundRequest,
    ) -> Result<ApiResponse<Vec<Value>>> {
        info!(is_subtract = request.is_subtract, "refunding invoice");
        self.call(ctx, Endpoint::Refund, request).await
    }

    /// Lists the currencies and networks available for payments.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn payment_services(&self) -> Result<ApiResponse<Vec<ServiceInfo>>> {
        self.payment_services_with_context(&CallContext::default()).await
    }

    /// [`payment_services`](Self::payment_services) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all)]
    pub async fn payment_services_with_context(
        &self,
        ctx: &CallContext,
    ) -> Result<ApiResponse<Vec<ServiceInfo>>> {
        info!("listing payment services");
        self.call_empty(ctx, Endpoint::PaymentServices).await
    }

    /// Lists invoices, one page at a time.
    ///
    /// Pass the previous page's [`Page::next_cursor`] as `request.cursor` to fetch
    /// the next page.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn payment_history(
        &self,
        request: &PaymentHistoryRequest,
    ) -> Result<ApiResponse<Page<Invoice>>> {
        self.payment_history_with_context(&CallContext::default(), request).await
    }

    /// [`payment_history`](Self::payment_history) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(cursor = ?request.cursor))]
    pub async fn payment_history_with_context(
        &self,
        ctx: &CallContext,
        request: &PaymentHistoryRequest,
    ) -> Result<ApiResponse<Page<Invoice>>> {
        info!("listing invoices");
        self.invoke(ctx, Endpoint::PaymentHistory, &[], Some(request), request.cursor.as_deref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;
    use crate::{
        client::tests::{RecordingTransport, client},
        envelope::ApiOutcome,
        models::{PaymentStatus, WalletStatus},
        sign,
    };

    #[tokio::test]
    async fn test_create_invoice() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "uuid": "inv-1",
                "order_id": "1",
                "amount": "15.00",
                "currency": "USDT",
                "url": "https://pay.cryptomus.com/pay/inv-1",
                "payment_status": "check",
                "is_final": false
            }}),
        );
        let client = client(transport.clone());

        let request = CreateInvoiceRequest::new(Decimal::new(15, 0), "USDT", "1");
        let invoice = client.create_invoice(&request).await.unwrap().into_result().unwrap();
        assert_eq!(invoice.uuid, "inv-1");
        assert_eq!(invoice.payment_status, Some(PaymentStatus::Check));

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment");
        let body = sent.body.as_deref().unwrap();
        assert_eq!(body, br#"{"amount":"15","currency":"USDT","order_id":"1"}"#);
        let expected = sign::sign_body("payment-secret", Some(body));
        assert_eq!(sent.header("sign"), Some(expected.as_str()));
    }

    #[tokio::test]
    async fn test_create_invoice_validation_error() {
        let transport = RecordingTransport::new(
            422,
            &json!({
                "state": 1,
                "message": "Validation error",
                "errors": {"amount": ["The amount must be at least 0.1."]}
            }),
        );
        let client = client(transport);

        let request = CreateInvoiceRequest::new(Decimal::new(1, 2), "USDT", "1");
        let response = client.create_invoice(&request).await.unwrap();
        match response.into_outcome() {
            ApiOutcome::Failure { failure, result } => {
                assert_eq!(failure.state, 1);
                assert_eq!(
                    failure.errors.get("amount").unwrap(),
                    &["The amount must be at least 0.1.".to_owned()]
                );
                assert!(result.is_none());
            }
            ApiOutcome::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn test_payment_info_by_order_id() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {"uuid": "inv-2", "order_id": "A"}}),
        );
        let client = client(transport.clone());

        let invoice =
            client.payment_info(&Lookup::by_order_id("A")).await.unwrap().into_result().unwrap();
        assert_eq!(invoice.uuid, "inv-2");

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment/info");
        assert_eq!(sent.body.as_deref(), Some(br#"{"order_id":"A"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_payment_services_signs_empty_body() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": [{
                "network": "TRON",
                "currency": "USDT",
                "is_available": true,
                "limit": {"min_amount": "1", "max_amount": "100"},
                "commission": {"fee_amount": "0", "percent": "1"}
            }]}),
        );
        let client = client(transport.clone());

        let services = client.payment_services().await.unwrap().into_result().unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].limit.max_amount, Some(Decimal::new(100, 0)));

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment/services");
        assert!(sent.body.is_none());
        assert_eq!(sent.header("sign"), Some(sign::sign_body("payment-secret", None).as_str()));
    }

    #[tokio::test]
    async fn test_payment_history_sends_cursor_in_query() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "items": [{"uuid": "inv-3"}],
                "paginate": {
                    "count": 1,
                    "hasPages": true,
                    "nextCursor": "next",
                    "previousCursor": "prev",
                    "perPage": 1
                }
            }}),
        );
        let client = client(transport.clone());

        let request =
            PaymentHistoryRequest { cursor: Some("abc".to_owned()), ..Default::default() };
        let page = client.payment_history(&request).await.unwrap().into_result().unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.next_cursor(), Some("next"));

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/payment/list");
        assert_eq!(sent.url.query(), Some("cursor=abc"));
        assert_eq!(sent.body.as_deref(), Some(b"{}".as_slice()));
    }

    #[tokio::test]
    async fn test_create_static_wallet() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {
                "wallet_uuid": "w-1",
                "uuid": "a-1",
                "address": "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm",
                "network": "tron",
                "currency": "USDT",
                "url": "https://pay.cryptomus.com/wallet/a-1"
            }}),
        );
        let client = client(transport.clone());

        let request = CreateStaticWalletRequest::new("USDT", "tron", "wallet-1");
        let wallet = client.create_static_wallet(&request).await.unwrap().into_result().unwrap();
        assert_eq!(wallet.wallet_uuid, "w-1");
        assert_eq!(wallet.network, "tron");

        let sent = transport.last();
        assert_eq!(sent.url.path(), "/v1/wallet");
        let body: Value = serde_json::from_slice(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"currency": "USDT", "network": "tron", "order_id": "wallet-1"}));
    }

    #[tokio::test]
    async fn test_refund_blocked_address() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {"commission": "0.1", "amount": "9.9"}}),
        );
        let client = client(transport.clone());

        let request = RefundBlockedAddressRequest {
            uuid: None,
            order_id: Some("wallet-1".to_owned()),
            address: "TK8fSfKrbZqGqNstMEBAiz5ZVYYvaG6Fzv".to_owned(),
        };
        let refund =
            client.refund_blocked_address(&request).await.unwrap().into_result().unwrap();
        assert_eq!(refund.commission, Some(Decimal::new(1, 1)));
        assert_eq!(refund.amount, Some(Decimal::new(99, 1)));
        assert_eq!(transport.last().url.path(), "/v1/wallet/blocked-address-refund");
    }

    #[tokio::test]
    async fn test_block_static_wallet() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {"uuid": "w-1", "status": "blocked"}}),
        );
        let client = client(transport.clone());

        let request =
            BlockStaticWalletRequest { uuid: Some("w-1".to_owned()), ..Default::default() };
        let blocked = client.block_static_wallet(&request).await.unwrap().into_result().unwrap();
        assert_eq!(blocked.status, Some(WalletStatus::Blocked));
        assert_eq!(transport.last().url.path(), "/v1/wallet/block-address");
    }

    #[tokio::test]
    async fn test_block_static_wallet_without_status() {
        let transport = RecordingTransport::new(200, &json!({"state": 0, "result": {"uuid": "u"}}));
        let client = client(transport);

        let request = BlockStaticWalletRequest {
            order_id: Some("wallet-1".to_owned()),
            ..Default::default()
        };
        let blocked = client.block_static_wallet(&request).await.unwrap().into_result().unwrap();
        assert_eq!(blocked.uuid, "u");
        assert!(blocked.status.is_none());
    }

    #[tokio::test]
    async fn test_refund_returns_empty_list() {
        let transport = RecordingTransport::new(200, &json!({"state": 0, "result": []}));
        let client = client(transport.clone());

        let request = RefundRequest {
            address: "TDD97yguPESTpcrJMqU6h2ozZbibv4Vaqm".to_owned(),
            is_subtract: false,
            uuid: Some("inv-1".to_owned()),
            order_id: None,
        };
        let result = client.refund(&request).await.unwrap().into_result().unwrap();
        assert!(result.is_empty());
        assert_eq!(transport.last().url.path(), "/v1/payment/refund");
    }

    #[tokio::test]
    async fn test_qr_codes() {
        let transport = RecordingTransport::new(
            200,
            &json!({"state": 0, "result": {"image": "data:image/png;base64,iVBORw0KGgo"}}),
        );
        let client = client(transport.clone());

        let request = GenerateInvoiceQrRequest { merchant_payment_uuid: "inv-1".to_owned() };
        let qr = client
            .generate_invoice_qr(&request)
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert!(qr.image.starts_with("data:image/png;base64,"));
        assert_eq!(transport.last().url.path(), "/v1/payment/qr");

        client
            .generate_wallet_qr(&GenerateWalletQrRequest { wallet_address_uuid: "w-1".to_owned() })
            .await
            .unwrap();
        assert_eq!(transport.last().url.path(), "/v1/wallet/qr");
        assert_eq!(transport.count(), 2);
    }
}
