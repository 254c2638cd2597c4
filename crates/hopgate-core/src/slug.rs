use crate::error::SlugError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Longest path segment accepted as a slug.
pub const MAX_LENGTH: usize = 256;

/// A validated slug, the short identifier taken from a request path.
///
/// Slugs are 1-256 characters long and contain only ASCII alphanumeric
/// characters, hyphens, or underscores.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

/// Outcome of checking a raw path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlugCheck {
    /// The segment has zero length.
    Empty,
    /// The segment is non-empty but not an acceptable slug.
    Invalid(SlugError),
    /// The segment is a valid slug.
    Valid(Slug),
}

impl Slug {
    /// Creates a new `Slug` after validating the input.
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugError> {
        let slug = slug.into();
        Self::validate(&slug)?;
        Ok(Self(slug))
    }

    /// Creates a `Slug` without validation.
    ///
    /// Use this only for values produced by trusted internal sources.
    pub fn new_unchecked(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Classifies a raw path segment without touching any store.
    pub fn check(raw: &str) -> SlugCheck {
        match Self::validate(raw) {
            Ok(()) => SlugCheck::Valid(Self(raw.to_owned())),
            Err(SlugError::Empty) => SlugCheck::Empty,
            Err(e) => SlugCheck::Invalid(e),
        }
    }

    /// Returns the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(slug: &str) -> Result<(), SlugError> {
        if slug.is_empty() {
            return Err(SlugError::Empty);
        }

        if slug.len() > MAX_LENGTH {
            return Err(SlugError::TooLong {
                len: slug.len(),
                max: MAX_LENGTH,
            });
        }

        if let Some((position, ch)) = slug
            .char_indices()
            .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidCharacter { ch, position });
        }

        Ok(())
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        assert!(Slug::new("a").is_ok());
        assert!(Slug::new("abc123").is_ok());
        assert!(Slug::new("Abc-123_xyz").is_ok());
        assert!(Slug::new("-_-").is_ok());
        assert!(Slug::new("a".repeat(MAX_LENGTH)).is_ok());
    }

    #[test]
    fn empty() {
        assert_eq!(Slug::new(""), Err(SlugError::Empty));
        assert_eq!(Slug::check(""), SlugCheck::Empty);
    }

    #[test]
    fn too_long() {
        let raw = "a".repeat(MAX_LENGTH + 1);
        assert!(matches!(
            Slug::check(&raw),
            SlugCheck::Invalid(SlugError::TooLong { .. })
        ));
    }

    #[test]
    fn invalid_characters() {
        for raw in ["bad slug!", "abc/def", "abc.def", "abc%20", "ümlaut", "a+b"] {
            assert!(
                matches!(Slug::check(raw), SlugCheck::Invalid(_)),
                "{raw:?} should be invalid"
            );
        }
    }

    #[test]
    fn reports_first_offending_character() {
        assert_eq!(
            Slug::new("ab cd!"),
            Err(SlugError::InvalidCharacter { ch: ' ', position: 2 })
        );
    }

    #[test]
    fn check_keeps_the_segment() {
        match Slug::check("abc123") {
            SlugCheck::Valid(slug) => assert_eq!(slug.as_str(), "abc123"),
            other => panic!("expected a valid slug, got {other:?}"),
        }
    }

    #[test]
    fn serde_rejects_invalid_slugs() {
        let slug: Slug = serde_json::from_str("\"my-code\"").unwrap();
        assert_eq!(slug.to_string(), "my-code");
        assert!(serde_json::from_str::<Slug>("\"no way\"").is_err());
    }
}
