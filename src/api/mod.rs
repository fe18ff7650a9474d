//! HTTP layer: request/response translation for the creation endpoint and
//! the redirect resolver.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing, CORS and security headers

pub mod dto;
pub mod handlers;
pub mod middleware;
