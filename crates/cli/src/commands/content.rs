//! Content query commands.
//!
//! # Environment Variables
//!
//! - `SANITY_PROJECT_ID` - Sanity project (required)
//! - `SANITY_DATASET` - Dataset name (default: `production`)
//! - `SANITY_READ_TOKEN` - Token for private datasets (optional)

use std::time::Duration;

use notevault_core::{Slug, SlugError};
use notevault_web::config::{ConfigError, ContentCacheConfig, SanityConfig};
use notevault_web::sanity::{ContentClient, ContentRequest, NoteFilter, SanityError};
use thiserror::Error;

use super::emit;

/// Errors that can occur during content commands.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The slug argument is not a valid slug.
    #[error("Invalid slug: {0}")]
    Slug(#[from] SlugError),

    /// The content store call failed.
    #[error("Content store error: {0}")]
    Sanity(#[from] SanityError),

    /// No document with the given slug.
    #[error("No {0} with slug: {1}")]
    NotFound(&'static str, String),

    /// Output could not be serialized.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Open a request scope against the configured dataset.
///
/// One-shot runs skip the process cache.
fn connect() -> Result<ContentRequest, ContentError> {
    dotenvy::dotenv().ok();

    let sanity = SanityConfig::from_env()?;
    let cache = ContentCacheConfig {
        revalidate: Duration::ZERO,
        ..ContentCacheConfig::default()
    };

    tracing::debug!(project = %sanity.project_id, dataset = %sanity.dataset, "Connecting");
    Ok(ContentClient::new(&sanity, &cache)?.request())
}

/// Print a note.
pub async fn note(slug: &str) -> Result<(), ContentError> {
    let slug = Slug::parse(slug)?;
    let note = connect()?
        .note_by_slug(&slug)
        .await?
        .ok_or_else(|| ContentError::NotFound("note", slug.into_inner()))?;

    emit(&note)?;
    Ok(())
}

/// Print a page of notes, or the notes matching `filter` when it is set.
pub async fn notes(filter: &NoteFilter, offset: usize, limit: usize) -> Result<(), ContentError> {
    let content = connect()?;
    let notes = if filter.is_empty() {
        content.notes(offset, limit).await?
    } else {
        content.notes_by_classification(filter).await?
    };

    tracing::info!(count = notes.len(), "Fetched notes");
    emit(&notes)?;
    Ok(())
}

/// Print every note slug.
pub async fn slugs() -> Result<(), ContentError> {
    let slugs = connect()?.note_slugs().await?;
    emit(&slugs)?;
    Ok(())
}

/// Print a flashcard deck.
pub async fn deck(slug: &str) -> Result<(), ContentError> {
    let slug = Slug::parse(slug)?;
    let deck = connect()?
        .flashcard_deck_by_slug(&slug)
        .await?
        .ok_or_else(|| ContentError::NotFound("flashcard deck", slug.into_inner()))?;

    emit(&deck)?;
    Ok(())
}

/// Print the flashcard decks of a subject.
pub async fn decks(subject: &str) -> Result<(), ContentError> {
    let decks = connect()?.flashcard_decks_by_subject(subject).await?;
    emit(&decks)?;
    Ok(())
}

/// Print a quiz.
pub async fn quiz(slug: &str) -> Result<(), ContentError> {
    let slug = Slug::parse(slug)?;
    let quiz = connect()?
        .quiz_by_slug(&slug)
        .await?
        .ok_or_else(|| ContentError::NotFound("quiz", slug.into_inner()))?;

    emit(&quiz)?;
    Ok(())
}
