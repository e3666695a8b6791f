//! Short code resolution service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::LinkObserver;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Resolves short codes back to their long URLs.
///
/// Reserved transport paths are filtered by the HTTP layer before this
/// service is called.
pub struct ResolveService {
    link_repository: Arc<dyn LinkRepository>,
    observer: Arc<dyn LinkObserver>,
}

impl ResolveService {
    /// Creates a new resolution service.
    pub fn new(link_repository: Arc<dyn LinkRepository>, observer: Arc<dyn LinkObserver>) -> Self {
        Self {
            link_repository,
            observer,
        }
    }

    /// Returns the long URL stored under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::StoreUnavailable`] on backend errors.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        self.observer.on_resolved(code);

        Ok(link.long_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Link;
    use crate::domain::link_observer::MockLinkObserver;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(code: &str, url: &str) -> Link {
        Link::new(code.to_string(), url.to_string(), Utc::now())
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockLinkRepository::new();
        let link = create_test_link("a1b2c3", "https://example.com/a");
        repo.expect_find_by_code()
            .withf(|code| code == "a1b2c3")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let mut observer = MockLinkObserver::new();
        observer
            .expect_on_resolved()
            .withf(|code| code == "a1b2c3")
            .times(1)
            .return_const(());

        let service = ResolveService::new(Arc::new(repo), Arc::new(observer));

        let url = service.resolve("a1b2c3").await.unwrap();
        assert_eq!(url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_not_found_skips_observer() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let mut observer = MockLinkObserver::new();
        observer.expect_on_resolved().times(0);

        let service = ResolveService::new(Arc::new(repo), Arc::new(observer));

        let result = service.resolve("doesnotexist").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Err(AppError::store_unavailable("Database error", json!({}))));

        let mut observer = MockLinkObserver::new();
        observer.expect_on_resolved().times(0);

        let service = ResolveService::new(Arc::new(repo), Arc::new(observer));

        let result = service.resolve("a1b2c3").await;
        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
    }
}
