//! Balances.

use tracing::{info, instrument};

use crate::{
    CryptomusClient, context::CallContext, endpoint::Endpoint, envelope::ApiResponse,
    error::Result, models::BalanceEntry, transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Fetches business and personal wallet balances.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cryptomus_sdk::CryptomusClient;
    ///
    /// # async fn example() -> cryptomus_sdk::Result<()> {
    /// let client = CryptomusClient::from_env()?;
    /// for entry in client.balance().await?.into_result()? {
    ///     for wallet in &entry.balance.merchant {
    ///         println!("{}: {:?}", wallet.currency_code, wallet.balance);
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn balance(&self) -> Result<ApiResponse<Vec<BalanceEntry>>> {
        self.balance_with_context(&CallContext::default()).await
    }

    /// [`balance`](Self::balance) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all)]
    pub async fn balance_with_context(
        &self,
        ctx: &CallContext,
    ) -> Result<ApiResponse<Vec<BalanceEntry>>> {
        info!("fetching balance");
        self.call_empty(ctx, Endpoint::Balance).await
    }
}
