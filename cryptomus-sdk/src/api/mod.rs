//! Typed operations on [`CryptomusClient`](crate::CryptomusClient).
//!
//! Each operation comes in two forms: `op(&request)` runs with
//! [`CallContext::default`](crate::CallContext::default), and
//! `op_with_context(&ctx, &request)` lets the caller cancel the call or override
//! its timeout.
//!
//! Every operation returns `Result<ApiResponse<T>>`. `Err` means the call did not
//! complete (network, cancellation, undecodable body, missing key). An application
//! error from the service arrives as `Ok` with a failed envelope; use
//! [`ApiResponse::into_result`](crate::ApiResponse::into_result) to turn it into an
//! `Err`.
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`payments`] | invoices, static wallets, QR codes, refunds, history |
//! | [`webhooks`] | resend and test webhooks |
//! | [`payouts`] | payouts, payout history, wallet transfers |
//! | [`recurring`] | recurring payments |
//! | [`exchange_rates`] | exchange rates |
//! | [`discounts`] | per-method discounts |
//! | [`balance`] | balances |

pub mod balance;
pub mod discounts;
pub mod exchange_rates;
pub mod payments;
pub mod payouts;
pub mod recurring;
pub mod webhooks;
