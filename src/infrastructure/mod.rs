//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`metrics`] - Prometheus recorder and metrics-backed observer
//! - [`persistence`] - PostgreSQL and in-memory repository implementations

pub mod metrics;
pub mod persistence;
