//! Observability hook fired by the link services.

/// Receives notifications about successful link operations.
///
/// Calls happen inline on the request path after the operation has already
/// succeeded, so implementations must be cheap and must not fail.
#[cfg_attr(test, mockall::automock)]
pub trait LinkObserver: Send + Sync {
    /// A new link was stored under `code`.
    fn on_shortened(&self, code: &str);

    /// `code` was resolved to its long URL.
    fn on_resolved(&self, code: &str);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl LinkObserver for NoopObserver {
    fn on_shortened(&self, _code: &str) {}

    fn on_resolved(&self, _code: &str) {}
}
