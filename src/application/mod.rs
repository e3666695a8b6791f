//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - Short code allocation with bounded retry
//! - [`services::resolve_service::ResolveService`] - Short code lookup

pub mod services;
