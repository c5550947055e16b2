//! URL slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `a-z`, `0-9` and `-`.
    #[error("slug contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen, or has consecutive hyphens.
    #[error("slug hyphens must separate non-empty segments")]
    MisplacedHyphen,
}

/// A document routing key (e.g. `intro-to-os`).
///
/// Slugs are used as content query parameters, so they are validated up
/// front and only ever reach the store as bound parameters.
///
/// ## Constraints
///
/// - Length: 1-96 characters (Sanity's default slug `maxLength`)
/// - Only lowercase ASCII letters, digits and hyphens
/// - Hyphens separate non-empty segments
///
/// ## Examples
///
/// ```
/// use notevault_core::Slug;
///
/// assert!(Slug::parse("intro-to-os").is_ok());
/// assert!(Slug::parse("cs101").is_ok());
///
/// assert!(Slug::parse("").is_err());
/// assert!(Slug::parse("Intro-To-OS").is_err());
/// assert!(Slug::parse("intro--os").is_err());
/// assert!(Slug::parse("\"] | *[_type == 'user'").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 96;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 96 characters,
    /// contains characters other than `a-z`, `0-9` and `-`, or has a
    /// leading, trailing or doubled hyphen.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(c));
        }

        if s.split('-').any(str::is_empty) {
            return Err(SlugError::MisplacedHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("intro-to-os").is_ok());
        assert!(Slug::parse("a").is_ok());
        assert!(Slug::parse("2024-semester-1").is_ok());
        assert!(Slug::parse(&"a".repeat(96)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Slug::parse(""), Err(SlugError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            Slug::parse(&"a".repeat(97)),
            Err(SlugError::TooLong { max: 96 })
        ));
    }

    #[test]
    fn test_parse_rejects_query_syntax() {
        assert_eq!(
            Slug::parse("x\"]{...}"),
            Err(SlugError::InvalidCharacter('"'))
        );
        assert_eq!(Slug::parse("a b"), Err(SlugError::InvalidCharacter(' ')));
        assert_eq!(Slug::parse("Notes"), Err(SlugError::InvalidCharacter('N')));
    }

    #[test]
    fn test_parse_misplaced_hyphens() {
        assert_eq!(Slug::parse("-intro"), Err(SlugError::MisplacedHyphen));
        assert_eq!(Slug::parse("intro-"), Err(SlugError::MisplacedHyphen));
        assert_eq!(Slug::parse("intro--os"), Err(SlugError::MisplacedHyphen));
    }

    #[test]
    fn test_deserialize_validates() {
        let slug: Slug = serde_json::from_str("\"intro-to-os\"").unwrap();
        assert_eq!(slug.as_str(), "intro-to-os");

        let bad: Result<Slug, _> = serde_json::from_str("\"Intro To OS\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        let slug = Slug::parse("intro-to-os").unwrap();
        assert_eq!(format!("{slug}"), "intro-to-os");
    }
}
