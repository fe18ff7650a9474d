//! DTOs for the link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::UrlMapping;

/// Request body of `POST /url`.
///
/// Both fields are optional at the JSON level so that a missing `url` is
/// reported by the validation stage with the regular error body.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: Option<String>,
    pub slug: Option<String>,
}

/// The stored mapping echoed back on success.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl From<UrlMapping> for CreateUrlResponse {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            id: mapping.id,
            slug: mapping.slug,
            url: mapping.url,
            created_at: mapping.created_at,
        }
    }
}
