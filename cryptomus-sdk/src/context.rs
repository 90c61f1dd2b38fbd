//! Per-call options.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

/// Cancellation and deadline for a single call.
///
/// Every operation has a `*_with_context` variant taking a `CallContext`; the plain
/// variant uses [`CallContext::default`], which never cancels and keeps the
/// transport's timeout.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use cryptomus_sdk::CallContext;
/// use tokio_util::sync::CancellationToken;
///
/// let token = CancellationToken::new();
/// let ctx = CallContext::new()
///     .with_cancellation(token.child_token())
///     .with_timeout(Duration::from_secs(2));
///
/// assert!(!ctx.is_cancelled());
/// token.cancel();
/// assert!(ctx.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancellation: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl CallContext {
    /// Creates a context with no cancellation and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Overrides the transport timeout for this call.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns `true` if the attached token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// The attached cancellation token, if any.
    #[must_use]
    pub const fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// The timeout override, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = CallContext::default();
        assert!(!ctx.is_cancelled());
        assert!(ctx.cancellation().is_none());
        assert!(ctx.timeout().is_none());
    }

    #[test]
    fn test_cancelled_token() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = CallContext::new().with_cancellation(token);
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_timeout_override() {
        let ctx = CallContext::new().with_timeout(Duration::from_millis(250));
        assert_eq!(ctx.timeout(), Some(Duration::from_millis(250)));
    }
}
