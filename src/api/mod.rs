//! HTTP layer translating requests into service calls.
//!
//! # Modules
//!
//! - [`dto`] - Response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing and HTTP metrics

pub mod dto;
pub mod handlers;
pub mod middleware;
