//! Shared application state injected into every handler.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::services::{ResolveService, ShortenOptions, ShortenService};
use crate::domain::LinkObserver;
use crate::domain::repositories::LinkRepository;
use crate::utils::code_generator::CodeGenerator;

#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub resolve_service: Arc<ResolveService>,
    /// Used directly only by the health check.
    pub link_repository: Arc<dyn LinkRepository>,
    /// Prefix joined with a code to build the returned short URL, without a trailing slash.
    pub short_url_base: Arc<str>,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires both services around a single repository and observer.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_generator: Arc<dyn CodeGenerator>,
        observer: Arc<dyn LinkObserver>,
        options: ShortenOptions,
        short_url_base: &str,
    ) -> Self {
        let shorten_service = Arc::new(ShortenService::new(
            link_repository.clone(),
            code_generator,
            observer.clone(),
            options,
        ));
        let resolve_service = Arc::new(ResolveService::new(link_repository.clone(), observer));

        Self {
            shorten_service,
            resolve_service,
            link_repository,
            short_url_base: Arc::from(short_url_base.trim_end_matches('/')),
            metrics_handle: None,
        }
    }

    /// Enables the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics_handle = handle;
        self
    }

    /// Builds the public URL for a short code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.short_url_base, code)
    }
}
