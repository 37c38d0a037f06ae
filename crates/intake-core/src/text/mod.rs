//! Text transforms.

use thiserror::Error;

/// The error returned when a string cannot be slugified.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlugError {
    /// The input string was empty.
    #[error("cannot slugify an empty string")]
    EmptyInput,
    /// The input contained no characters usable in a slug.
    #[error("input contains no slug-safe characters")]
    NoUsableCharacters,
}

/// Converts a string into a URL-safe slug.
///
/// Lowercases the input and collapses every run of non-alphanumeric
/// characters into a single hyphen. Leading and trailing hyphens are
/// trimmed.
pub fn slugify(input: &str) -> Result<String, SlugError> {
    if input.is_empty() {
        return Err(SlugError::EmptyInput);
    }

    let mut slug = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }

    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        return Err(SlugError::NoUsableCharacters);
    }

    Ok(slug.to_owned())
}
