//! Merchant and personal balances.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::{decimal_opt, null_as_default};

/// One entry of the balance result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceEntry {
    /// Balances grouped by wallet kind.
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: Balances,
}

/// Business and personal wallet balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    /// Business wallet balances.
    #[serde(default, deserialize_with = "null_as_default")]
    pub merchant: Vec<Balance>,
    /// Personal wallet balances.
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: Vec<Balance>,
}

/// Balance of one currency wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Wallet identifier.
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// Available amount.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub balance: Option<Decimal>,
    /// Currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency_code: String,
}
