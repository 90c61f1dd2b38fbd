//! Payouts and transfers between merchant and personal wallets.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    de::{
        datetime_opt, decimal_opt, null_as_default, request_datetime_from_str,
        request_datetime_opt,
    },
    envelope::Pagination,
};

/// Payout status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Payout in processing.
    Process,
    /// Payout being verified.
    Check,
    /// Payout sent.
    Paid,
    /// Payout failed.
    Fail,
    /// Payout cancelled.
    Cancel,
    /// Internal service error.
    SystemFail,
    /// A status this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Parameters for creating a payout.
///
/// Optional fields left as `None` are not sent at all, rather than as `""`, `0` or
/// `false`, so the service applies its own defaults for them. Set a field explicitly
/// to send the zero value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePayoutRequest {
    /// Amount to send.
    pub amount: Decimal,
    /// Currency code of `amount`.
    pub currency: String,
    /// Merchant order identifier.
    pub order_id: String,
    /// Recipient address.
    pub address: String,
    /// Whether the commission is taken from `amount`.
    pub is_subtract: bool,
    /// Network code.
    pub network: String,
    /// Webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    /// Cryptocurrency to convert `amount` into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<String>,
    /// Exchange rate source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_source: Option<String>,
    /// Balance currency to pay from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_currency: Option<String>,
    /// Network fee priority, e.g. `recommended` or `economy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Destination memo or tag, for networks that need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl CreatePayoutRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        network: impl Into<String>,
        order_id: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            order_id: order_id.into(),
            address: address.into(),
            is_subtract: false,
            network: network.into(),
            url_callback: None,
            to_currency: None,
            course_source: None,
            from_currency: None,
            priority: None,
            memo: None,
        }
    }
}

/// A payout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Payout identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Amount sent.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub amount: Option<Decimal>,
    /// Currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Network code.
    #[serde(default)]
    pub network: Option<String>,
    /// Recipient address.
    #[serde(default)]
    pub address: Option<String>,
    /// Transaction hash.
    #[serde(default)]
    pub txid: Option<String>,
    /// Payout status.
    #[serde(default)]
    pub status: Option<PayoutStatus>,
    /// Whether the payout reached a final state.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_final: bool,
    /// Merchant balance after the payout.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub balance: Option<Decimal>,
    /// Currency debited.
    #[serde(default)]
    pub payer_currency: Option<String>,
    /// Amount debited, in `payer_currency`.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub payer_amount: Option<Decimal>,
    /// Creation time.
    #[serde(default, deserialize_with = "datetime_opt")]
    pub created_at: Option<DateTime<FixedOffset>>,
    /// Last update time.
    #[serde(default, deserialize_with = "datetime_opt")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

/// Parameters for listing payouts.
///
/// `cursor` is sent in the query string, not the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutHistoryRequest {
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

/// One page of payout history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutPage {
    /// Merchant identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchant_uuid: String,
    /// Payouts on this page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Payout>,
    /// Cursors to neighbouring pages.
    #[serde(default, deserialize_with = "null_as_default")]
    pub paginate: Pagination,
}

impl PayoutPage {
    /// Cursor of the next page, if there is one.
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        self.paginate.next_cursor()
    }
}

/// Parameters for moving funds between the merchant and personal wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Amount to move.
    pub amount: Decimal,
    /// Currency code.
    pub currency: String,
}

impl TransferRequest {
    /// Creates a transfer request.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self { amount, currency: currency.into() }
    }
}

/// Result of a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Transaction identifier on the personal wallet side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_wallet_transaction_uuid: String,
    /// Personal wallet balance after the transfer.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub user_wallet_balance: Option<Decimal>,
    /// Transaction identifier on the merchant side.
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchant_transaction_uuid: String,
    /// Merchant balance after the transfer.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub merchant_balance: Option<Decimal>,
}
