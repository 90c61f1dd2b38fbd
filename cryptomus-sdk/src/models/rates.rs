//! Exchange rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::de::{decimal_opt, null_as_default};

/// Rate from one currency to another.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Source currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub from: String,
    /// Target currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub to: String,
    /// Units of `to` per unit of `from`.
    #[serde(default, deserialize_with = "decimal_opt")]
    pub course: Option<Decimal>,
}
