//! Content store document identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdError {
    /// The input string is empty.
    #[error("document id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("document id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character Sanity does not allow in ids.
    #[error("document id contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The input starts with a hyphen.
    #[error("document id cannot start with a hyphen")]
    LeadingHyphen,
}

/// A Sanity document `_id`.
///
/// Ids are made of ASCII letters, digits, `_`, `-` and `.` (the dot is used
/// for path prefixes such as `drafts.`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Maximum length of a document id.
    pub const MAX_LENGTH: usize = 128;

    const DRAFTS_PREFIX: &'static str = "drafts.";

    /// Parse a `DocumentId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, starts with a
    /// hyphen or contains characters outside `[A-Za-z0-9._-]`.
    pub fn parse(s: &str) -> Result<Self, DocumentIdError> {
        if s.is_empty() {
            return Err(DocumentIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(DocumentIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if s.starts_with('-') {
            return Err(DocumentIdError::LeadingHyphen);
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(DocumentIdError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id refers to an unpublished draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.0.starts_with(Self::DRAFTS_PREFIX)
    }

    /// The id of the published document this id belongs to.
    #[must_use]
    pub fn published(&self) -> &str {
        self.0
            .strip_prefix(Self::DRAFTS_PREFIX)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}
