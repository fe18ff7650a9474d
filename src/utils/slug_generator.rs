//! Random slug generation.
//!
//! Slugs are drawn from the OS CSPRNG and encoded as URL-safe base64, so every
//! character comes from `A-Z a-z 0-9 - _`. The generator does not check for
//! collisions; the store's unique constraint does, and
//! [`crate::application::services::UrlService`] retries a bounded number of times.

use base64::Engine as _;

/// Length of a generated slug.
pub const SLUG_LENGTH: usize = 5;

/// Random bytes drawn per slug. Four bytes encode to six base64 characters;
/// the first five each carry six fully random bits.
const SLUG_ENTROPY_BYTES: usize = 4;

/// Generates a random slug of [`SLUG_LENGTH`] URL-safe characters.
///
/// # Errors
///
/// Returns an error if the system random number generator is unavailable.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug()?;
/// assert_eq!(slug.len(), 5);
/// assert!(slug.chars().all(is_slug_char));
/// ```
pub fn generate_slug() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SLUG_ENTROPY_BYTES];
    getrandom::fill(&mut buffer)?;

    let mut slug = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    slug.truncate(SLUG_LENGTH);

    Ok(slug)
}

/// Returns true for characters of the slug alphabet.
pub fn is_slug_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}
