//! Fetches exchange rates. No credentials needed.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example exchange_rates -- BTC
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::{env, time::Duration};

use cryptomus_sdk::{CallContext, CryptomusClient, CryptomusError};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let currency = env::args().nth(1).unwrap_or_else(|| "BTC".to_string());
    let client = CryptomusClient::builder().build()?;

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let ctx = CallContext::new()
        .with_cancellation(shutdown.child_token())
        .with_timeout(Duration::from_secs(3));

    match client.exchange_rates_with_context(&ctx, &currency).await {
        Ok(response) => {
            for rate in response.into_result()? {
                let course = rate.course.map_or_else(|| "-".to_string(), |c| c.to_string());
                println!("{} -> {}: {}", rate.from, rate.to, course);
            }
        }
        Err(CryptomusError::Cancelled) => eprintln!("Interrupted"),
        Err(e) if e.is_timeout() => eprintln!("Timed out after 3s"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
