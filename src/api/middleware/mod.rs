//! HTTP middleware for request processing.

pub mod http_metrics;
pub mod tracing;
