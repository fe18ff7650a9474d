//! HTTP middleware applied to every route.
//!
//! Provides request tracing, CORS and security response headers.

pub mod headers;
pub mod tracing;
