//! Creates a recurring payment, then walks every page of recurring payments.
//!
//! # Running this example
//!
//! ```bash
//! export CRYPTOMUS_MERCHANT=<merchant uuid>
//! export CRYPTOMUS_PAYMENT_KEY=<payment key>
//! cargo run --example recurring_payments
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
    CryptomusClient,
    models::{CreateRecurringRequest, RecurringPeriod},
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let client = CryptomusClient::from_env()?;

    let mut request = CreateRecurringRequest::new(
        Decimal::new(5, 0),
        "USDT",
        "Monthly plan",
        RecurringPeriod::Monthly,
    );
    request.discount_days = Some(7);
    request.discount_amount = Some(Decimal::ONE);

    let created = client.create_recurring(&request).await?.into_result()?;
    println!("Created {} ({:?}): {}", created.uuid, created.status, created.url);

    let mut cursor: Option<String> = None;
    let mut total = 0;
    loop {
        let page = client.list_recurring(cursor.as_deref()).await?.into_result()?;
        for payment in &page.items {
            println!("  {} {:<20} {:?}", payment.uuid, payment.name, payment.status);
        }
        total += page.items.len();

        match page.next_cursor() {
            Some(next) if page.paginate.has_pages => cursor = Some(next.to_string()),
            _ => break,
        }
    }
    println!("{} recurring payments", total);

    Ok(())
}
