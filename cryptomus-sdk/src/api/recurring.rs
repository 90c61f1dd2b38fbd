//! Recurring payments.

use tracing::{info, instrument};

use crate::{
    CryptomusClient,
    context::CallContext,
    endpoint::Endpoint,
    envelope::{ApiResponse, Page},
    error::Result,
    models::{CreateRecurringRequest, Lookup, RecurringPayment},
    transport::Transport,
};

impl<T: Transport> CryptomusClient<T> {
    /// Creates a recurring payment.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn create_recurring(
        &self,
        request: &CreateRecurringRequest,
    ) -> Result<ApiResponse<RecurringPayment>> {
        self.create_recurring_with_context(&CallContext::default(), request).await
    }

    /// [`create_recurring`](Self::create_recurring) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(name = %request.name, period = ?request.period))]
    pub async fn create_recurring_with_context(
        &self,
        ctx: &CallContext,
        request: &CreateRecurringRequest,
    ) -> Result<ApiResponse<RecurringPayment>> {
        info!(
            amount = %request.amount,
            currency = %request.currency,
            "creating recurring payment"
        );
        self.call(ctx, Endpoint::CreateRecurring, request).await
    }

    /// Fetches a recurring payment by `uuid` or `order_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn recurring_info(&self, lookup: &Lookup) -> Result<ApiResponse<RecurringPayment>> {
        self.recurring_info_with_context(&CallContext::default(), lookup).await
    }

    /// [`recurring_info`](Self::recurring_info) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?lookup.uuid, order_id = ?lookup.order_id))]
    pub async fn recurring_info_with_context(
        &self,
        ctx: &CallContext,
        lookup: &Lookup,
    ) -> Result<ApiResponse<RecurringPayment>> {
        info!("fetching recurring payment");
        self.call(ctx, Endpoint::RecurringInfo, lookup).await
    }

    /// Lists recurring payments. Pass `None` for the first page.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn list_recurring(
        &self,
        cursor: Option<&str>,
    ) -> Result<ApiResponse<Page<RecurringPayment>>> {
        self.list_recurring_with_context(&CallContext::default(), cursor).await
    }

    /// [`list_recurring`](Self::list_recurring) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(cursor = ?cursor))]
    pub async fn list_recurring_with_context(
        &self,
        ctx: &CallContext,
        cursor: Option<&str>,
    ) -> Result<ApiResponse<Page<RecurringPayment>>> {
        info!("listing recurring payments");
        self.invoke::<(), _>(ctx, Endpoint::ListRecurring, &[], None, cursor).await
    }

    /// Cancels a recurring payment.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete.
    pub async fn cancel_recurring(&self, lookup: &Lookup) -> Result<ApiResponse<RecurringPayment>> {
        self.cancel_recurring_with_context(&CallContext::default(), lookup).await
    }

    /// [`cancel_recurring`](Self::cancel_recurring) with a call context.
    ///
    /// # Errors
    ///
    /// Returns error if the call does not complete or is cancelled.
    #[instrument(skip_all, fields(uuid = ?lookup.uuid, order_id = ?lookup.order_id))]
    pub async fn cancel_recurring_with_context(
        &self,
        ctx: &CallContext,
        lookup: &Lookup,
    ) -> Result<ApiResponse<RecurringPayment>> {
        info!("cancelling recurring payment");
        self.call(ctx, Endpoint::CancelRecurring, lookup).await
    }
}
