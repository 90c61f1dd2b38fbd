//! Cryptomus SDK: an async client for the Cryptomus crypto payment API.
//!
//! Create invoices and static wallets, send payouts, manage recurring payments,
//! and query exchange rates, discounts, and balances from Rust.
//!
//! # How a call works
//!
//! ```text
//! ┌──────────────────┐  typed request
//! │  CryptomusClient │──────────────────┐
//! └──────────────────┘                  │
//!          ┌────────────────────────────▼─────────────┐
//!          │ encode JSON once                         │
//!          │ sign = md5(base64(body) + key)           │
//!          │ headers: merchant, sign, Content-Type    │
//!          └────────────────────────────┬─────────────┘
//!                                       │ Transport (reqwest by default)
//!          ┌────────────────────────────▼─────────────┐
//!          │ decode envelope {state, message, result} │
//!          │ regardless of HTTP status                │
//!          └──────────────────────────────────────────┘
//! ```
//!
//! Payment operations are signed with the payment key, payout operations with the
//! payout key, and exchange rates are unsigned.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cryptomus_sdk::{CryptomusClient, models::CreateInvoiceRequest};
//! use rust_decimal::Decimal;
//!
//! # async fn example() -> cryptomus_sdk::Result<()> {
//! let client = CryptomusClient::builder()
//!     .merchant("8b03432e-385b-4670-8d06-064591096795")
//!     .payment_key("payment-key")
//!     .payout_key("payout-key")
//!     .build()?;
//!
//! let mut request = CreateInvoiceRequest::new(Decimal::new(15, 0), "USD", "order-1");
//! request.to_currency = Some("USDT".to_owned());
//!
//! let invoice = client.create_invoice(&request).await?.into_result()?;
//! println!("pay at {}", invoice.url);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: [`CryptomusClient`] and its builder
//! - [`api`]: one method per operation, grouped by area
//! - [`models`]: request and result types
//! - [`envelope`]: the response envelope and pagination
//! - [`sign`]: request signing
//! - [`endpoint`]: operation catalog and URL resolution
//! - [`transport`]: transport abstraction and the reqwest implementation
//! - [`config`]: configuration from TOML or environment
//! - [`context`]: per-call cancellation and timeout
//! - [`error`]: error types
//!
//! # Cancellation and timeouts
//!
//! Every operation has a `*_with_context` variant taking a [`CallContext`]:
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use cryptomus_sdk::{CallContext, CryptomusClient};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(client: CryptomusClient) -> cryptomus_sdk::Result<()> {
//! let shutdown = CancellationToken::new();
//! let ctx = CallContext::new()
//!     .with_cancellation(shutdown.child_token())
//!     .with_timeout(Duration::from_secs(2));
//!
//! let rates = client.exchange_rates_with_context(&ctx, "BTC").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! An operation returns `Err` when the call did not complete, and `Ok` with the
//! decoded envelope otherwise, including when the service rejected the request.
//!
//! ```rust,no_run
//! use cryptomus_sdk::{ApiOutcome, CryptomusClient, CryptomusError, models::Lookup};
//!
//! # async fn example(client: CryptomusClient) {
//! match client.payment_info(&Lookup::by_order_id("order-1")).await {
//!     Ok(response) => match response.into_outcome() {
//!         ApiOutcome::Success(invoice) => println!("status: {:?}", invoice.status),
//!         ApiOutcome::Failure { failure, .. } => eprintln!("rejected: {failure}"),
//!     },
//!     Err(e) if e.is_transport() => eprintln!("network problem, safe to retry: {e}"),
//!     Err(CryptomusError::MissingSecretKey(scope)) => eprintln!("configure the {scope} key"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! # }
//! ```
//!
//! # Examples
//!
//! See the `examples/` directory of the crate:
//! - `create_invoice.rs`: invoice creation and lookup
//! - `balance.rs`: balances from environment configuration
//! - `exchange_rates.rs`: unsigned rate lookup with a timeout
//! - `discounts.rs`: listing and setting discounts
//! - `recurring_payments.rs`: recurring payments and pagination

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![allow(
    clippy::multiple_crate_versions,
    reason = "transitive dependencies from reqwest and tokio"
)]

pub mod api;
pub mod client;
pub mod config;
pub mod context;
mod de;
pub mod endpoint;
pub mod envelope;
pub mod error;
mod json;
pub mod models;
pub mod sign;
pub mod transport;

pub use client::{ClientBuilder, CryptomusClient};
pub use config::{ClientConfig, SecretKey};
pub use context::CallContext;
pub use envelope::{ApiFailure, ApiOutcome, ApiResponse, Page, Pagination};
pub use error::{CryptomusError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let _ = std::marker::PhantomData::<CryptomusError>;
        let _ = std::marker::PhantomData::<CryptomusClient>;
        let _ = std::marker::PhantomData::<ApiResponse<serde_json::Value>>;
    }
}
