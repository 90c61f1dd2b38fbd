//! Request and result types for every operation.
//!
//! Field names match the wire format exactly. Optional request fields are omitted
//! from the JSON body when `None`. Money is [`rust_decimal::Decimal`], sent as a JSON
//! string; timestamps are [`chrono`] types.

pub mod balance;
pub mod discounts;
pub mod payments;
pub mod payouts;
pub mod rates;
pub mod recurring;
pub mod webhooks;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use self::{
    balance::{Balance, BalanceEntry, Balances},
    discounts::{Discount, SetDiscountRequest},
    payments::{
        BlockStaticWalletRequest, BlockedAddressRefund, BlockedWallet, CreateInvoiceRequest,
        CreateStaticWalletRequest, GenerateInvoiceQrRequest, GenerateWalletQrRequest, Invoice,
        PaymentHistoryRequest, PaymentStatus, QrCode, RefundBlockedAddressRequest, RefundRequest,
        StaticWallet, WalletStatus,
    },
    payouts::{
        CreatePayoutRequest, Payout, PayoutHistoryRequest, PayoutPage, PayoutStatus, Transfer,
        TransferRequest,
    },
    rates::ExchangeRate,
    recurring::{CreateRecurringRequest, RecurringPayment, RecurringPeriod, RecurringStatus},
    webhooks::TestWebhookRequest,
};
use crate::de::{decimal_opt, null_as_default};

/// Identifies an invoice, payout, or recurring payment by `uuid` or `order_id`.
///
/// The service requires one of the two; set whichever you have.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::models::Lookup;
///
/// let json = serde_json::to_string(&Lookup::by_order_id("order-42"))?;
/// assert_eq!(json, r#"{"order_id":"order-42"}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    /// Service-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
    /// Merchant-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

impl Lookup {
    /// Looks up by service-assigned `uuid`.
    #[must_use]
    pub fn by_uuid(uuid: impl Into<String>) -> Self {
        Self { uuid: Some(uuid.into()), order_id: None }
    }

    /// Looks up by merchant-assigned `order_id`.
    #[must_use]
    pub fn by_order_id(order_id: impl Into<String>) -> Self {
        Self { uuid: None, order_id: Some(order_id.into()) }
    }
}

/// A currency on a specific network, e.g. USDT on TRON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyNetwork {
    /// Currency code.
    pub currency: String,
    /// Network code. Omitted to mean every network of the currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

impl CurrencyNetwork {
    /// A currency on one network.
    #[must_use]
    pub fn new(currency: impl Into<String>, network: impl Into<String>) -> Self {
        Self { currency: currency.into(), network: Some(network.into()) }
    }

    /// A currency on any network.
    #[must_use]
    pub fn any_network(currency: impl Into<String>) -> Self {
        Self { currency: currency.into(), network: None }
    }
}

/// A payment or payout service (currency and network) with its limits and fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Network code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: String,
    /// Currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Whether the service currently accepts operations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_available: bool,
    /// Amount limits.
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: ServiceLimit,
    /// Commission.
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission: ServiceCommission,
}

/// Amount limits of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceLimit {
    /// Minimum amount.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub min_amount: Option<Decimal>,
    /// Maximum amount.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub max_amount: Option<Decimal>,
}

/// Commission charged by a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCommission {
    /// Fixed fee.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub fee_amount: Option<Decimal>,
    /// Percentage fee.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub percent: Option<Decimal>,
}

/// Encodes `value` as JSON, decodes it back and checks that nothing changed.
#[cfg(test)]
pub(crate) fn assert_round_trip<T>(value: &T)
where
    T: Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    let json = serde_json::to_string(value).unwrap();
    let decoded: T = serde_json::from_str(&json).unwrap();
    assert_eq!(&decoded, value, "round trip through {json}");
}
