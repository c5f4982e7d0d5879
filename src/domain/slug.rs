//! Anchor slugs for heading ids and table-of-contents links.
//!
//! Slugs come from the `slug` crate: lowercase ASCII, with every run of
//! non-alphanumeric characters collapsed to a single `-`. Identical headings
//! produce identical slugs; anchors are not disambiguated within a document.

use slug::slugify;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    #[error("slug source text is empty")]
    EmptyInput,
    #[error("failed to derive slug from `{input}`")]
    Unrepresentable { input: String },
}

/// Derive a slug from human-readable text.
pub fn derive_slug(input: &str) -> Result<String, SlugError> {
    if input.trim().is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let candidate = slugify(input);
    if candidate.is_empty() {
        return Err(SlugError::Unrepresentable {
            input: input.to_string(),
        });
    }

    Ok(candidate)
}

/// Anchor for a heading, falling back to the block id when the heading text
/// has nothing sluggable in it.
pub fn heading_anchor(text: &str, block_id: &str) -> String {
    derive_slug(text).unwrap_or_else(|_| block_id.to_string())
}
