//! Creates an invoice and looks it up again by order id.
//!
//! # Running this example
//!
//! ```bash
//! export CRYPTOMUS_MERCHANT=<merchant uuid>
//! export CRYPTOMUS_PAYMENT_KEY=<payment key>
//! RUST_LOG=cryptomus_sdk=debug cargo run --example create_invoice
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use cryptomus_sdk::{
    ApiOutcome, CryptomusClient,
    models::{CreateInvoiceRequest, CurrencyNetwork, Lookup},
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let client = CryptomusClient::from_env()?;
    let order_id = format!("example-{}", uuid::Uuid::new_v4());

    let mut request = CreateInvoiceRequest::new(Decimal::new(1000, 2), "USD", order_id.clone());
    request.to_currency = Some("USDT".to_string());
    request.lifetime = Some(3600);
    request.currencies = Some(vec![CurrencyNetwork::new("USDT", "tron")]);

    match client.create_invoice(&request).await?.into_outcome() {
        ApiOutcome::Success(invoice) => {
            println!("Invoice {} created", invoice.uuid);
            println!("  pay at:  {}", invoice.url);
            println!("  status:  {:?}", invoice.status);
        }
        ApiOutcome::Failure { failure, .. } => {
            eprintln!("Invoice rejected: {}", failure);
            for (field, messages) in failure.errors.iter() {
                eprintln!("  {}: {}", field, messages.join(", "));
            }
            return Ok(());
        }
    }

    let invoice = client.payment_info(&Lookup::by_order_id(order_id)).await?.into_result()?;
    println!("Lookup by order id: {} ({:?})", invoice.uuid, invoice.payment_status);

    Ok(())
}
