//! Exchange rates. Public; no key needed.

use tracing::{info, instrument};

use crate::{
    CryptomusClient, context::CallContext, endpoint::Endpoint, envelope::ApiResponse,
    error::Result, models::ExchangeRate, transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Lists exchange rates from `currency` to every supported currency.
    ///
    /// The request is sent unsigned, so a client without keys can call it.
    ///
    /// # Errors
    ///
    /// Returns error if `currency` is empty or the call does not complete.
    pub async fn exchange_rates(&self, currency: &str) -> Result<ApiResponse<Vec<ExchangeRate>>> {
        self.exchange_rates_with_context(&CallContext::default(), currency).await
    }

    /// [`exchange_rates`](Self::exchange_rates) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if `currency` is empty or the call does not complete or is cancelled.
    #[instrument(skip_all, fields(currency = %currency))]
    pub async fn exchange_rates_with_context(
        &self,
        ctx: &CallContext,
        currency: &str,
    ) -> Result<ApiResponse<Vec<ExchangeRate>>> {
        info!("fetching exchange rates");
        self.invoke::<(), _>(ctx, Endpoint::ExchangeRateList, &[("currency", currency)], None, None)
            .await
    }
}
