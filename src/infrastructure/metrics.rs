//! Prometheus metrics recorder and the metrics-backed link observer.

use metrics::{counter, describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

use crate::domain::LinkObserver;

pub const LINKS_CREATED_TOTAL: &str = "linkshortener_links_created_total";
pub const LINKS_REDIRECTED_TOTAL: &str = "linkshortener_links_redirected_total";
pub const HTTP_REQUESTS_TOTAL: &str = "linkshortener_http_requests_total";
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "linkshortener_http_request_duration_seconds";

/// Latency buckets in seconds.
const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Exporter configured with the latency histogram buckets.
pub fn builder() -> Result<PrometheusBuilder, BuildError> {
    PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
        DURATION_BUCKETS,
    )
}

/// Installs the global Prometheus recorder and registers metric descriptions.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = builder()?.install_recorder()?;

    describe_counter!(LINKS_CREATED_TOTAL, "Total number of links created");
    describe_counter!(LINKS_REDIRECTED_TOTAL, "Total number of links redirected");
    describe_counter!(HTTP_REQUESTS_TOTAL, "Total number of HTTP requests");
    describe_histogram!(HTTP_REQUEST_DURATION_SECONDS, "Duration of HTTP requests");

    Ok(handle)
}

/// Observer that feeds link events into the `metrics` facade.
///
/// Without an installed recorder every increment is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsObserver;

impl LinkObserver for MetricsObserver {
    fn on_shortened(&self, _code: &str) {
        counter!(LINKS_CREATED_TOTAL).increment(1);
    }

    fn on_resolved(&self, code: &str) {
        counter!(LINKS_REDIRECTED_TOTAL, "short_code" => code.to_string()).increment(1);
    }
}
