//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`link_observer`] - Hook invoked after successful shorten/resolve calls
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Business logic lives in [`crate::application::services`].

pub mod entities;
pub mod link_observer;
pub mod repositories;

pub use link_observer::{LinkObserver, NoopObserver};
