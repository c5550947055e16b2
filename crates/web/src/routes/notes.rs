//! Public note pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use notevault_core::Slug;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::sanity::{ContentBlock, ContentClient, ContentRequest, Note};

/// Rendered content block.
///
/// `kind` is one of `heading`, `paragraph`, `quote`, `image`, `code` or
/// `video`; only the fields that kind uses are filled in.
#[derive(Clone, Default)]
pub struct BlockView {
    pub kind: &'static str,
    pub level: u8,
    pub text: String,
    pub url: String,
    pub alt: String,
    pub caption: Option<String>,
    pub language: Option<String>,
    pub filename: Option<String>,
}

impl BlockView {
    /// Convert a stored block; `None` for blocks with nothing to show.
    fn from_block(block: &ContentBlock) -> Option<Self> {
        match block {
            ContentBlock::Block { style, .. } => {
                let text = block.text();
                if text.trim().is_empty() {
                    return None;
                }
                let (kind, level) = match style.as_deref() {
                    Some("h1" | "h2") => ("heading", 2),
                    Some("h3") => ("heading", 3),
                    Some("h4" | "h5" | "h6") => ("heading", 4),
                    Some("blockquote") => ("quote", 0),
                    _ => ("paragraph", 0),
                };
                Some(Self {
                    kind,
                    level,
                    text,
                    ..Self::default()
                })
            }
            ContentBlock::Image { url, alt, caption } => url.as_ref().map(|url| Self {
                kind: "image",
                url: url.clone(),
                alt: alt.clone().unwrap_or_default(),
                caption: caption.clone(),
                ..Self::default()
            }),
            ContentBlock::Code { code, .. } if code.trim().is_empty() => None,
            ContentBlock::Code {
                language,
                filename,
                code,
            } => Some(Self {
                kind: "code",
                text: code.clone(),
                language: language.clone(),
                filename: filename.clone(),
                ..Self::default()
            }),
            ContentBlock::Youtube { url } => url
                .as_ref()
                .filter(|url| !url.trim().is_empty())
                .map(|url| Self {
                    kind: "video",
                    url: url.clone(),
                    ..Self::default()
                }),
            ContentBlock::Unknown => None,
        }
    }
}

/// Note display data for templates.
#[derive(Clone)]
pub struct NoteView {
    pub title: String,
    pub syllabus: Option<String>,
    pub views: u64,
    /// Classification breadcrumbs (university, degree, year, semester, subject).
    pub classification: Vec<String>,
    pub blocks: Vec<BlockView>,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        let classification = [
            note.university.clone(),
            note.degree.clone(),
            note.year.as_ref().map(|y| format!("Year {y}")),
            note.semester.as_ref().map(|s| format!("Semester {s}")),
            note.subject.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            title: note.title.clone(),
            syllabus: note.syllabus.clone(),
            views: note.views,
            classification,
            blocks: note.content.iter().filter_map(BlockView::from_block).collect(),
        }
    }
}

/// Note detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "notes/show.html")]
pub struct NoteShowTemplate {
    pub note: NoteView,
}

fn parse_slug(raw: &str) -> Result<Slug> {
    Slug::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid note slug: {e}")))
}

async fn find_note(content: &ContentRequest, slug: &Slug) -> Result<Note> {
    content
        .note_by_slug(slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("note {slug}")))
}

/// Display a note.
#[instrument(skip(content))]
pub async fn show(Path(slug): Path<String>, content: ContentRequest) -> Result<NoteShowTemplate> {
    let slug = parse_slug(&slug)?;
    let note = find_note(&content, &slug).await?;

    Ok(NoteShowTemplate {
        note: NoteView::from(&note),
    })
}

/// Count a view of a note.
#[instrument(skip(client, content))]
pub async fn record_view(
    State(client): State<ContentClient>,
    Path(slug): Path<String>,
    content: ContentRequest,
) -> Result<StatusCode> {
    let slug = parse_slug(&slug)?;
    let note = find_note(&content, &slug).await?;

    client.increment_note_views(&note.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
