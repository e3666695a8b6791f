//! Link repository implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL table with a unique constraint on the code
//! - [`InMemoryLinkRepository`] - Concurrent map for development and tests

pub mod memory_link_repository;
pub mod pg_link_repository;

pub use memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
