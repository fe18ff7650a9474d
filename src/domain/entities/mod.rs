//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored slug → URL mapping
//! - [`NewUrlMapping`] - Input for creating one

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, UrlMapping};
