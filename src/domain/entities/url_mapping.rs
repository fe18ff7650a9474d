//! URL mapping entity.

use chrono::{DateTime, Utc};

/// A stored mapping from a short slug to a target URL.
///
/// `slug` is the natural key. `id` and `created_at` are assigned by the store
/// and carry no meaning for callers beyond being echoed back on creation.
/// Mappings are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(id: i64, slug: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            slug,
            url,
            created_at,
        }
    }
}

/// Input data for creating a new mapping.
///
/// The slug is already validated and lowercased when this is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub slug: String,
    pub url: String,
}

impl NewUrlMapping {
    pub fn new(slug: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            url: url.into(),
        }
    }

    /// Turns the input into a stored mapping with store-assigned metadata.
    pub fn into_mapping(self, id: i64, created_at: DateTime<Utc>) -> UrlMapping {
        UrlMapping::new(id, self.slug, self.url, created_at)
    }
}
