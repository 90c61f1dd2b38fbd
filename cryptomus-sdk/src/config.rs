//! Client configuration.
//!
//! Credentials and transport settings can come from a TOML file, from environment
//! variables, or be set directly on [`ClientBuilder`](crate::ClientBuilder).
//!
//! # Examples
//!
//! ```
//! use cryptomus_sdk::config::ClientConfig;
//!
//! let config = ClientConfig::from_toml(
//!     r#"
//!     merchant = "8b03432e-385b-4670-8d06-064591096795"
//!     payment_key = "payment-secret"
//!
//!     [http]
//!     timeout_secs = 10
//!     "#,
//! )?;
//!
//! assert_eq!(config.host, "https://api.cryptomus.com");
//! assert!(config.payout_key.is_none());
//! # Ok::<(), cryptomus_sdk::error::CryptomusError>(())
//! ```

use std::{fmt, path::Path};

use serde::{Deserialize, Deserializer};
use zeroize::Zeroizing;

use crate::{
    endpoint::{DEFAULT_HOST, EndpointResolver, KeyScope},
    error::{CryptomusError, Result},
    transport::HttpConfig,
};

/// Environment variable holding the API host.
pub const ENV_HOST: &str = "CRYPTOMUS_HOST";
/// Environment variable holding the merchant identifier.
pub const ENV_MERCHANT: &str = "CRYPTOMUS_MERCHANT";
/// Environment variable holding the payment key.
pub const ENV_PAYMENT_KEY: &str = "CRYPTOMUS_PAYMENT_KEY";
/// Environment variable holding the payout key.
pub const ENV_PAYOUT_KEY: &str = "CRYPTOMUS_PAYOUT_KEY";
/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "CRYPTOMUS_TIMEOUT_SECS";

/// An API secret key.
///
/// The key is wiped from memory on drop and never printed by `Debug`.
///
/// # Examples
///
/// ```
/// use cryptomus_sdk::config::SecretKey;
///
/// let key = SecretKey::new("very-secret");
/// assert_eq!(key.expose(), "very-secret");
/// assert_eq!(format!("{key:?}"), "SecretKey(***)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(Zeroizing<String>);

impl SecretKey {
    /// Wraps a secret key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Returns the key material.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(***)")
    }
}

impl From<String> for SecretKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for SecretKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Root client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// API host. Defaults to the production host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Merchant identifier sent in the `merchant` header.
    #[serde(default)]
    pub merchant: String,

    /// Key for payment-scope operations.
    #[serde(default)]
    pub payment_key: Option<SecretKey>,

    /// Key for payout-scope operations.
    #[serde(default)]
    pub payout_key: Option<SecretKey>,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            merchant: String::new(),
            payment_key: None,
            payout_key: None,
            http: HttpConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] if the TOML is malformed or fails
    /// [`validate`](Self::validate).
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| CryptomusError::InvalidConfig(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            CryptomusError::InvalidConfig(format!(
                "cannot read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Builds a configuration from `CRYPTOMUS_*` environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `CRYPTOMUS_HOST` | `host` |
    /// | `CRYPTOMUS_MERCHANT` | `merchant` |
    /// | `CRYPTOMUS_PAYMENT_KEY` | `payment_key` |
    /// | `CRYPTOMUS_PAYOUT_KEY` | `payout_key` |
    /// | `CRYPTOMUS_TIMEOUT_SECS` | `http.timeout_secs` |
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] if a value cannot be parsed or the
    /// result fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let mut config = Self::default();
        if let Some(host) = var(ENV_HOST) {
            config.host = host;
        }
        if let Some(merchant) = var(ENV_MERCHANT) {
            config.merchant = merchant;
        }
        config.payment_key = var(ENV_PAYMENT_KEY).map(SecretKey::from);
        config.payout_key = var(ENV_PAYOUT_KEY).map(SecretKey::from);
        if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
            config.http.timeout_secs = timeout.trim().parse().map_err(|e| {
                CryptomusError::InvalidConfig(format!("{ENV_TIMEOUT_SECS}='{timeout}': {e}"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// This method checks that:
    /// - `host` is an absolute `http` or `https` URL without query or fragment
    /// - `merchant` has no control characters
    /// - configured keys are not empty
    /// - HTTP settings are within bounds
    ///
    /// # Errors
    ///
    /// Returns [`CryptomusError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        EndpointResolver::new(&self.host)
            .map_err(|e| CryptomusError::InvalidConfig(e.to_string()))?;

        if self.merchant.chars().any(char::is_control) {
            return Err(CryptomusError::InvalidConfig(
                "merchant must not contain control characters".to_owned(),
            ));
        }

        let keys = [(KeyScope::Payment, &self.payment_key), (KeyScope::Payout, &self.payout_key)];
        for (scope, key) in keys {
            if key.as_ref().is_some_and(SecretKey::is_empty) {
                return Err(CryptomusError::InvalidConfig(format!(
                    "{scope}_key must not be empty"
                )));
            }
        }

        self.http.validate()
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_owned()
}
