//! Utility functions for slug generation, input validation, and store errors.
//!
//! - [`slug_generator`] - Random slug generation
//! - [`validation`] - Validation of submitted URLs and slugs
//! - [`db_error`] - Classification of database errors

pub mod db_error;
pub mod slug_generator;
pub mod validation;
