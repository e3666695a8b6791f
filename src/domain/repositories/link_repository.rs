//! Repository trait for the short code to URL mapping store.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage abstraction over the `short code -> long URL` relation.
///
/// Implementations must enforce code uniqueness themselves: callers never
/// perform a separate existence check before writing. Once
/// [`insert_if_absent`](LinkRepository::insert_if_absent) reports success,
/// every later [`find_by_code`](LinkRepository::find_by_code) for that code
/// must observe the link.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL table
/// - [`crate::infrastructure::persistence::InMemoryLinkRepository`] - concurrent map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a link with this code is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be queried.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Atomically stores the link unless its code is already taken.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if this call created the link
    /// - `Ok(false)` if another writer already holds the code; nothing is written
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] if the backend cannot be reached.
    /// A failed call never leaves a partially written link behind.
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<bool, AppError>;

    /// Looks up a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on backend errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Counts stored links.
    async fn count(&self) -> Result<i64, AppError>;

    /// Verifies that the backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
