//! Lists payment method discounts and optionally sets one.
//!
//! # Running this example
//!
//! ```bash
//! export CRYPTOMUS_MERCHANT=<merchant uuid>
//! export CRYPTOMUS_PAYMENT_KEY=<payment key>
//! cargo run --example discounts                 # list
//! cargo run --example discounts -- BTC btc 5    # set 5% discount on BTC
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::env;

use cryptomus_sdk::{CryptomusClient, models::SetDiscountRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let client = CryptomusClient::from_env()?;
    let args: Vec<String> = env::args().skip(1).collect();

    if let [currency, network, percent] = args.as_slice() {
        let request =
            SetDiscountRequest::new(currency.as_str(), network.as_str(), percent.parse()?);
        let discount = client.set_discount(&request).await?.into_result()?;
        println!("Set {} on {}: {}%", discount.currency, discount.network, discount.discount);
        return Ok(());
    }

    for discount in client.list_discounts().await?.into_result()? {
        println!("{:>8} {:<10} {:>4}%", discount.currency, discount.network, discount.discount);
    }

    Ok(())
}
