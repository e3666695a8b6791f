//! Short link allocation service.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::LinkObserver;
use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};

/// Default number of candidate codes tried per request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// What the allocation loop does when the store fails during an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreErrorPolicy {
    /// Log the error and move on to the next candidate.
    #[default]
    Retry,
    /// Abort the request with the store error.
    FailFast,
}

impl FromStr for StoreErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "retry" => Ok(Self::Retry),
            "fail_fast" | "fail-fast" => Ok(Self::FailFast),
            other => Err(format!(
                "unknown store error policy '{}', expected 'retry' or 'fail_fast'",
                other
            )),
        }
    }
}

impl fmt::Display for StoreErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Retry => write!(f, "retry"),
            Self::FailFast => write!(f, "fail_fast"),
        }
    }
}

/// Tunables for [`ShortenService`].
#[derive(Debug, Clone, Copy)]
pub struct ShortenOptions {
    pub code_length: usize,
    pub max_attempts: usize,
    pub store_error_policy: StoreErrorPolicy,
}

impl Default for ShortenOptions {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            store_error_policy: StoreErrorPolicy::default(),
        }
    }
}

/// Allocates unique short codes for long URLs.
///
/// Each attempt generates a candidate and hands it to
/// [`LinkRepository::insert_if_absent`]; the store decides which concurrent
/// writer wins a code. The service never checks for existence first.
pub struct ShortenService {
    link_repository: Arc<dyn LinkRepository>,
    code_generator: Arc<dyn CodeGenerator>,
    observer: Arc<dyn LinkObserver>,
    options: ShortenOptions,
}

impl ShortenService {
    /// Creates a new shortening service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        observer: Arc<dyn LinkObserver>,
        options: ShortenOptions,
    ) -> Self {
        Self {
            link_repository,
            code_generator,
            observer,
            options,
        }
    }

    /// Stores `long_url` under a freshly allocated short code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `long_url` is empty
    /// - [`AppError::Internal`] if no candidate code could be generated or
    ///   the store rejected the URL itself
    /// - [`AppError::StoreUnavailable`] on a store error under
    ///   [`StoreErrorPolicy::FailFast`]
    /// - [`AppError::CapacityExhausted`] if every attempt collided or failed
    pub async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        if long_url.is_empty() {
            return Err(AppError::bad_request("URL cannot be empty", json!({})));
        }

        let max_attempts = self.options.max_attempts;

        for attempt in 1..=max_attempts {
            let candidate = self.code_generator.generate(self.options.code_length)?;
            let new_link = NewLink::new(candidate.clone(), long_url);

            match self.link_repository.insert_if_absent(new_link).await {
                Ok(true) => {
                    info!(code = %candidate, attempt, "Short link created");
                    self.observer.on_shortened(&candidate);
                    return Ok(candidate);
                }
                Ok(false) => {
                    debug!(code = %candidate, attempt, "Short code collision");
                }
                Err(e @ AppError::StoreUnavailable { .. })
                    if self.options.store_error_policy == StoreErrorPolicy::Retry =>
                {
                    warn!(attempt, error = %e, "Store error while allocating short code");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::capacity_exhausted(
            "Could not generate a unique short code",
            json!({ "attempts": max_attempts }),
        ))
    }
}
