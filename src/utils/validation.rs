//! Validation of submitted URLs and slugs.
//!
//! Turns the raw `{url, slug?}` of a creation request into a trimmed
//! [`UrlSubmission`], or fails with [`AppError::Validation`] /
//! [`AppError::SelfReference`]. Pure; nothing here touches the store.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;
use validator::{Validate, ValidationError};

use crate::error::AppError;

/// Allowed slug characters: ASCII letters, digits, underscore, hyphen.
static SLUG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// URL schemes accepted as shortening targets.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// A trimmed creation request that passed syntax validation.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UrlSubmission {
    #[validate(custom(function = "validate_absolute_url"))]
    pub url: String,

    #[validate(regex(
        path = "*SLUG_REGEX",
        message = "slug may only contain letters, digits, '_' and '-'"
    ))]
    pub slug: Option<String>,
}

/// Validates and normalizes a creation request.
///
/// # Rules
///
/// - `url` is required, trimmed, and must parse with a scheme and a host
/// - `slug`, if present, is trimmed and must match `^[A-Za-z0-9_-]+$`
///   (an empty slug does not match)
/// - `url` must not contain `self_domain` (compared case-insensitively)
///
/// The slug keeps its case here; lowercasing happens in the creation flow.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for syntax errors and
/// [`AppError::SelfReference`] when the URL targets this service.
pub fn validate_submission(
    url: Option<String>,
    slug: Option<String>,
    self_domain: &str,
) -> Result<UrlSubmission, AppError> {
    let url = url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::Validation("url is a required field".to_string()))?;

    let submission = UrlSubmission {
        url,
        slug: slug.map(|s| s.trim().to_string()),
    };
    submission.validate()?;

    if submission
        .url
        .to_ascii_lowercase()
        .contains(&self_domain.to_ascii_lowercase())
    {
        return Err(AppError::SelfReference {
            domain: self_domain.to_string(),
        });
    }

    Ok(submission)
}

fn validate_absolute_url(url: &str) -> Result<(), ValidationError> {
    let invalid = || {
        ValidationError::new("url").with_message(Cow::Borrowed("url must be a valid URL"))
    };

    // `Url::parse` silently strips or escapes these, but the stored string
    // must stay usable as a `Location` header.
    if url.chars().any(char::is_control) {
        return Err(invalid());
    }

    let parsed = Url::parse(url).map_err(|_| invalid())?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(invalid());
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(invalid()),
    }
}
