//! Invoices, static wallets, QR codes, refunds, and payment history.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyNetwork;
use crate::de::{
    datetime_opt, decimal_opt, int_opt, null_as_default, request_datetime_from_str,
    request_datetime_opt,
};

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment in processing.
    Process,
    /// Waiting for the transaction to appear on the blockchain.
    Check,
    /// Transaction seen, waiting for the confirmations required.
    ConfirmCheck,
    /// Paid less than required; waiting for the remainder.
    WrongAmountWaiting,
    /// Paid in full.
    Paid,
    /// Paid more than required.
    PaidOver,
    /// Payment error.
    Fail,
    /// Paid less than required and the invoice expired.
    WrongAmount,
    /// Expired without payment.
    Cancel,
    /// Internal service error.
    SystemFail,
    /// Refund in processing.
    RefundProcess,
    /// Refund failed.
    RefundFail,
    /// Refund completed.
    RefundPaid,
    /// Funds locked by AML screening.
    Locked,
    /// A status this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Static wallet state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    /// Wallet blocked; incoming payments are not credited.
    Blocked,
    /// Wallet accepts payments.
    Active,
    /// Wallet inactive.
    InActive,
    /// A status this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Parameters for creating an invoice.
///
/// Optional fields left as `None` are not sent at all, rather than as `""`, `0` or
/// `false`, so the service applies its own defaults for them. Set a field explicitly
/// to send the zero value.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::models::CreateInvoiceRequest;
/// use rust_decimal::Decimal;
///
/// let mut request = CreateInvoiceRequest::new(Decimal::new(1500, 2), "USD", "order-1");
/// request.to_currency = Some("USDT".to_owned());
/// request.lifetime = Some(3600);
///
/// let json = serde_json::to_string(&request)?;
/// assert!(json.starts_with(r#"{"amount":"15.00","currency":"USD","order_id":"order-1""#));
/// assert!(json.ends_with(r#""lifetime":3600,"to_currency":"USDT"}"#));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    /// Amount to pay.
    pub amount: Decimal,
    /// Currency code of `amount` (fiat or crypto).
    pub currency: String,
    /// Merchant order identifier; unique per merchant.
    pub order_id: String,
    /// Blockchain network code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// URL of the "return to shop" button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_return: Option<String>,
    /// URL the payer is sent to after a successful payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_success: Option<String>,
    /// Webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    /// Allow paying the remainder after an underpayment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_payment_multiple: Option<bool>,
    /// Invoice lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<u32>,
    /// Cryptocurrency to convert `amount` into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<String>,
    /// Percentage of the commission charged to the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtract: Option<u8>,
    /// Tolerated underpayment, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_payment_percent: Option<Decimal>,
    /// Free-form data returned in webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<String>,
    /// Currencies the payer may choose from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<CurrencyNetwork>>,
    /// Currencies the payer may not choose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub except_currencies: Option<Vec<CurrencyNetwork>>,
    /// Exchange rate source, e.g. `Binance`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_source: Option<String>,
    /// Referral code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_referral_code: Option<String>,
    /// Discount (negative) or markup (positive), in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i32>,
    /// Refresh an expired invoice with the same `order_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_refresh: Option<bool>,
}

impl CreateInvoiceRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, order_id: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            order_id: order_id.into(),
            network: None,
            url_return: None,
            url_success: None,
            url_callback: None,
            is_payment_multiple: None,
            lifetime: None,
            to_currency: None,
            subtract: None,
            accuracy_payment_percent: None,
            additional_data: None,
            currencies: None,
            except_currencies: None,
            course_source: None,
            from_referral_code: None,
            discount_percent: None,
            is_refresh: None,
        }
    }
}

/// An invoice as returned by create, info, and history operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Merchant order identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub order_id: String,
    /// Invoice amount.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub amount: Option<Decimal>,
    /// Amount actually paid.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub payment_amount: Option<Decimal>,
    /// Amount the payer has to pay, in `payer_currency`.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub payer_amount: Option<Decimal>,
    /// Discount or markup percent.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub discount_percent: Option<Decimal>,
    /// Discount amount.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub discount: Option<Decimal>,
    /// Currency the payer pays in.
    #[serde(default)]
    pub payer_currency: Option<String>,
    /// Invoice currency.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Amount credited to the merchant.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub merchant_amount: Option<Decimal>,
    /// Network code.
    #[serde(default)]
    pub network: Option<String>,
    /// Payment address.
    #[serde(default)]
    pub address: Option<String>,
    /// Sender address.
    #[serde(default)]
    pub from: Option<String>,
    /// Transaction hash.
    #[serde(default)]
    pub txid: Option<String>,
    /// Payment status.
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    /// Payment page URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Expiry as a Unix timestamp.
    #[serde(default, deserialize_with = "int_opt")]
    pub expired_at: Option<i64>,
    /// Invoice status.
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    /// Whether the invoice reached a final state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_final: bool,
    /// Merchant-supplied data.
    #[serde(default)]
    pub additional_data: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "datetime_opt")]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Last update time.
    #[serde(default, deserialize_with = "datetime_opt")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Parameters for creating a static wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaticWalletRequest {
    /// Currency code.
    pub currency: String,
    /// Network code.
    pub network: String,
    /// Merchant order identifier.
    pub order_id: String,
    /// Webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    /// Referral code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_referral_code: Option<String>,
}

impl CreateStaticWalletRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        currency: impl Into<String>,
        network: impl Into<String>,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            currency: currency.into(),
            network: network.into(),
            order_id: order_id.into(),
            url_callback: None,
            from_referral_code: None,
        }
    }
}

/// A static wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticWallet {
    /// Wallet identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub wallet_uuid: String,
    /// Wallet address identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Deposit address.
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    /// Network code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: String,
    /// Currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Payment page URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// Parameters for a static wallet QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateWalletQrRequest {
    /// Wallet address identifier (`uuid` of [`StaticWallet`]).
    pub wallet_address_uuid: String,
}

/// Parameters for an invoice QR code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateInvoiceQrRequest {
    /// Invoice identifier.
    pub merchant_payment_uuid: String,
}

/// A QR code image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    /// Image as a `data:image/png;base64,...` URI.
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

/// Parameters for blocking a static wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStaticWalletRequest {
    /// Wallet address identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Merchant order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Refund every future payment to the sender.
    #[serde(default)]
    pub is_force_refund: bool,
}

/// Result of blocking a static wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedWallet {
    /// Wallet address identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// New wallet status.
    #[serde(default)]
    pub status: Option<WalletStatus>,
}

/// Parameters for refunding a blocked address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundBlockedAddressRequest {
    /// Wallet address identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Merchant order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Address to send the funds to.
    pub address: String,
}

/// Result of refunding a blocked address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedAddressRefund {
    /// Commission withheld.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub commission: Option<Decimal>,
    /// Amount refunded.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub amount: Option<Decimal>,
}

/// Parameters for refunding an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Address to send the refund to.
    pub address: String,
    /// Whether the commission is taken from the refund.
    pub is_subtract: bool,
    /// Invoice identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Merchant order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

/// Parameters for listing invoices.
///
/// `cursor` is sent in the query string, not the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistoryRequest {
    /// Start of the range.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "request_datetime_opt",
        deserialize_with = "request_datetime_from_str"
    )]
    pub date_from: Option<NaiveDateTime>,
    /// End of the range.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "request_datetime_opt",
        deserialize_with = "request_datetime_from_str"
    )]
    pub date_to: Option<NaiveDateTime>,
    /// Page cursor from a previous page.
    #[serde(skip)]
    pub cursor: Option<String>,
}
