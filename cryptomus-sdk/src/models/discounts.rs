//! Per-method discounts and markups.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Discount configured for a payment method.
///
/// Negative values are markups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    /// Currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Network code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: String,
    /// Discount in percent.
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: i32,
}

/// Parameters for setting a discount on a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDiscountRequest {
    /// Currency code.
    pub currency: String,
    /// Network code.
    pub network: String,
    /// Discount in percent, from -99 to 100.
    pub discount_percent: i32,
}

impl SetDiscountRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        currency: impl Into<String>,
        network: impl Into<String>,
        discount_percent: i32,
    ) -> Self {
        Self { currency: currency.into(), network: network.into(), discount_percent }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::assert_round_trip;

    #[test]
    fn test_set_discount_request() {
        assert_eq!(
            serde_json::to_value(SetDiscountRequest::new("BTC", "btc", -5)).unwrap(),
            json!({"currency": "BTC", "network": "btc", "discount_percent": -5})
        );
    }

    #[test]
    fn test_discount_list_decoding() {
        let discounts: Vec<Discount> = serde_json::from_value(json!([
            {"currency": "CGPT", "network": "bsc", "discount": 0},
            {"currency": "TRX", "network": "tron", "discount": 10}
        ]))
        .unwrap();

        assert_eq!(discounts.len(), 2);
        assert_eq!(discounts[1].discount, 10);
    }

    #[test]
    fn test_discount_types_round_trip() {
        assert_round_trip(&SetDiscountRequest::new("TRX", "tron", 10));
        assert_round_trip(&Discount {
            currency: "TRX".to_owned(),
            network: "tron".to_owned(),
            discount: -3,
        });
    }
}
