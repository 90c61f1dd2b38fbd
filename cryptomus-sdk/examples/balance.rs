//! Prints business and personal wallet balances.
//!
//! Configuration is read from `cryptomus.toml` when present, otherwise from
//! `CRYPTOMUS_*` environment variables.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example balance
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::str_to_string,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use std::path::Path;

use cryptomus_sdk::{ClientConfig, CryptomusClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config_path = Path::new("cryptomus.toml");
    let config = if config_path.exists() {
        ClientConfig::from_file(config_path)?
    } else {
        ClientConfig::from_env()?
    };
    let client = CryptomusClient::from_config(config)?;

    for entry in client.balance().await?.into_result()? {
        println!("Business wallets:");
        for wallet in &entry.balance.merchant {
            println!("  {:>8} {}", wallet.currency_code, wallet.balance.unwrap_or_default());
        }
        println!("Personal wallets:");
        for wallet in &entry.balance.user {
            println!("  {:>8} {}", wallet.currency_code, wallet.balance.unwrap_or_default());
        }
    }

    Ok(())
}
