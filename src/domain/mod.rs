//! Domain layer containing the URL mapping entity and its storage contract.
//!
//! The domain layer has no dependencies on infrastructure or presentation layers:
//!
//! - [`entities`] - Core data structures ([`entities::UrlMapping`])
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//!
//! Creation and resolution logic lives in
//! [`crate::application::services::UrlService`].

pub mod entities;
pub mod repositories;
