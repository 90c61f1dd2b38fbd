//! Recurring payments (subscriptions).

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::{datetime_opt, decimal_opt, null_as_default};

/// Billing period of a recurring payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringPeriod {
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every three months.
    ThreeMonth,
    /// A period this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Recurring payment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringStatus {
    /// Waiting for the first payment.
    WaitAccept,
    /// Active and billing.
    Active,
    /// Cancelled by the merchant.
    CancelByMerchant,
    /// Cancelled by the payer.
    CancelByUser,
    /// A status this client does not know yet.
    #[serde(other)]
    Unknown,
}

/// Parameters for creating a recurring payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecurringRequest {
    /// Amount per period.
    pub amount: Decimal,
    /// Currency code of `amount`.
    pub currency: String,
    /// Name shown to the payer.
    pub name: String,
    /// Billing period.
    pub period: RecurringPeriod,
    /// Cryptocurrency to convert `amount` into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_currency: Option<String>,
    /// Merchant order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    /// Webhook URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_callback: Option<String>,
    /// Length of the discounted introductory period, in days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_days: Option<u32>,
    /// Amount charged during the introductory period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<Decimal>,
    /// Free-form data returned in webhooks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<String>,
}

impl CreateRecurringRequest {
    /// Creates a request with the required fields only.
    #[must_use]
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        name: impl Into<String>,
        period: RecurringPeriod,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            name: name.into(),
            period,
            to_currency: None,
            order_id: None,
            url_callback: None,
            discount_days: None,
            discount_amount: None,
            additional_data: None,
        }
    }
}

/// A recurring payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringPayment {
    /// Recurring payment identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Name shown to the payer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Merchant order identifier.
    #[serde(default)]
    pub order_id: Option<String>,
    /// Amount per period.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub amount: Option<Decimal>,
    /// Currency code of `amount`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Currency the payer pays in.
    #[serde(default)]
    pub payer_currency: Option<String>,
    /// Amount per period in USD.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub payer_amount_usd: Option<Decimal>,
    /// Amount per period in `payer_currency`.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub payer_amount: Option<Decimal>,
    /// Webhook URL.
    #[serde(default)]
    pub url_callback: Option<String>,
    /// Billing period.
    #[serde(default)]
    pub period: Option<RecurringPeriod>,
    /// Current state.
    #[serde(default)]
    pub status: Option<RecurringStatus>,
    /// Payment page URL.
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Time of the last successful charge.
    #[serde(default, deserialize_with = "datetime_opt")]
    pub last_pay_off: Option<DateTime<FixedOffset>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::assert_round_trip;

    #[test]
    fn test_create_recurring_request() {
        let mut request = CreateRecurringRequest::new(
            Decimal::new(5, 0),
            "USDT",
            "Pro plan",
            RecurringPeriod::ThreeMonth,
        );
        request.discount_days = Some(7);
        request.discount_amount = Some(Decimal::new(1, 0));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "amount": "5",
                "currency": "USDT",
                "name": "Pro plan",
                "period": "three_month",
                "discount_days": 7,
                "discount_amount": "1"
            })
        );
    }

    #[test]
    fn test_recurring_payment_decoding() {
        let payment: RecurringPayment = serde_json::from_value(json!({
            "uuid": "afd050e8-35ea-4129-bbdd-73f510bd1ba5",
            "name": "Recurring invoice",
            "order_id": null,
            "amount": "5",
            "currency": "USDT",
            "payer_currency": "USDT",
            "payer_amount_usd": "5.00",
            "payer_amount": "5.00000000",
            "url_callback": null,
            "period": "monthly",
            "status": "wait_accept",
            "url": "https://pay.cryptomus.com/recurring/afd050e8-35ea-4129-bbdd-73f510bd1ba5",
            "last_pay_off": null
        }))
        .unwrap();

        assert_eq!(payment.period, Some(RecurringPeriod::Monthly));
        assert_eq!(payment.status, Some(RecurringStatus::WaitAccept));
        assert_eq!(payment.payer_amount_usd, Some(Decimal::new(500, 2)));
        assert!(payment.last_pay_off.is_none());
    }

    #[test]
    fn test_recurring_status_fallback() {
        let status: RecurringStatus = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(status, RecurringStatus::Unknown);
        assert_eq!(
            serde_json::to_value(RecurringStatus::CancelByMerchant).unwrap(),
            json!("cancel_by_merchant")
        );
    }

    #[test]
    fn test_recurring_types_round_trip() {
        assert_round_trip(&CreateRecurringRequest {
            amount: Decimal::new(5, 0),
            currency: "USDT".to_owned(),
            name: "Pro plan".to_owned(),
            period: RecurringPeriod::Weekly,
            to_currency: Some("USDT".to_owned()),
            order_id: Some("sub-1".to_owned()),
            url_callback: Some("https://shop.example.com/hook".to_owned()),
            discount_days: Some(7),
            discount_amount: Some(Decimal::new(1, 0)),
            additional_data: Some("tier=pro".to_owned()),
        });
        assert_round_trip(&RecurringPayment {
            uuid: "afd050e8-35ea-4129-bbdd-73f510bd1ba5".to_owned(),
            name: "Pro plan".to_owned(),
            order_id: Some("sub-1".to_owned()),
            amount: Some(Decimal::new(5, 0)),
            currency: "USDT".to_owned(),
            payer_currency: Some("USDT".to_owned()),
            payer_amount_usd: Some(Decimal::new(500, 2)),
            payer_amount: Some(Decimal::new(500, 2)),
            url_callback: Some("https://shop.example.com/hook".to_owned()),
            period: Some(RecurringPeriod::Monthly),
            status: Some(RecurringStatus::Active),
            url: "https://pay.cryptomus.com/recurring/afd050e8".to_owned(),
            last_pay_off: DateTime::parse_from_rfc3339("2024-01-05T10:00:00+00:00").ok(),
        });
    }
}
