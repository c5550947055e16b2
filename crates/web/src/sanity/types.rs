//! Domain types for Sanity documents.
//!
//! These mirror the GROQ projections in [`super::queries`]; field names
//! follow the content schema (`note`, `flashcardDeck`, `quiz`).

use notevault_core::DocumentId;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Notes
// =============================================================================

/// A study note, as projected by `note_by_slug`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Sanity document id.
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Note title.
    pub title: String,
    /// Syllabus text the note covers.
    #[serde(default)]
    pub syllabus: Option<String>,
    /// Routing key (`slug.current`).
    pub slug: String,
    /// View counter, incremented on each public page view.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub views: u64,
    /// University the note belongs to.
    #[serde(default, deserialize_with = "label")]
    pub university: Option<String>,
    /// Degree programme.
    #[serde(default, deserialize_with = "label")]
    pub degree: Option<String>,
    /// Year of study.
    #[serde(default, deserialize_with = "label")]
    pub year: Option<String>,
    /// Semester within the year.
    #[serde(default, deserialize_with = "label")]
    pub semester: Option<String>,
    /// Subject name.
    #[serde(default, deserialize_with = "label")]
    pub subject: Option<String>,
    /// Rich text body.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: Vec<ContentBlock>,
}

/// List projection of a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Empty when the document has no slug yet.
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "label")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "label")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub views: u64,
}

/// Classification filter for note listings.
///
/// Absent fields match any value. Every field is always sent (as `null`
/// when absent) because GROQ rejects queries that reference unbound
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteFilter {
    pub university: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub semester: Option<String>,
    pub subject: Option<String>,
}

impl NoteFilter {
    /// Whether the filter constrains nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.university.is_none()
            && self.degree.is_none()
            && self.year.is_none()
            && self.semester.is_none()
            && self.subject.is_none()
    }
}

// =============================================================================
// Portable Text
// =============================================================================

/// A block in a note body.
///
/// Block types the schema adds later decode as [`ContentBlock::Unknown`]
/// instead of failing the whole note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "camelCase")]
pub enum ContentBlock {
    /// Paragraph or heading.
    Block {
        #[serde(default)]
        style: Option<String>,
        #[serde(default)]
        children: Vec<Span>,
    },
    /// Embedded image; `url` is dereferenced from the asset in the query.
    Image {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        alt: Option<String>,
        #[serde(default)]
        caption: Option<String>,
    },
    /// Code snippet.
    Code {
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        filename: Option<String>,
        #[serde(default, deserialize_with = "null_as_default")]
        code: String,
    },
    /// Embedded video.
    Youtube {
        #[serde(default)]
        url: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

/// Inline text run inside a [`ContentBlock::Block`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub marks: Vec<String>,
}

impl ContentBlock {
    /// Concatenated text of a text block; empty for other block types.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Block { children, .. } => children.iter().map(|s| s.text.as_str()).collect(),
            _ => String::new(),
        }
    }
}

// =============================================================================
// Flashcards & Quizzes
// =============================================================================

/// A deck of flashcards for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDeck {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "label")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards: Vec<Flashcard>,
}

/// A single flashcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// A quiz. Attempt scoring lives outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "label")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub questions: Vec<QuizQuestion>,
}

/// A multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    #[serde(default)]
    pub answer_index: Option<usize>,
}

// =============================================================================
// Lenient field decoding
// =============================================================================

/// Classification fields are strings in the schema, but older documents
/// store year and semester as numbers.
fn label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_note_decodes_full_projection() {
        let note: Note = serde_json::from_value(json!({
            "_id": "note-1",
            "title": "Introduction to Operating Systems",
            "syllabus": "Processes, threads, scheduling",
            "slug": "intro-to-os",
            "views": 42,
            "university": "TU Delft",
            "degree": "BSc Computer Science",
            "year": 2,
            "semester": "1",
            "subject": "Operating Systems",
            "content": [
                {"_type": "block", "_key": "a", "style": "h2", "children": [{"text": "Processes"}]},
                {"_type": "code", "_key": "b", "language": "c", "code": "fork();"},
                {"_type": "youtube", "_key": "c", "url": "https://youtu.be/xyz"},
                {"_type": "image", "_key": "d", "url": "https://cdn.sanity.io/x.png"}
            ]
        }))
        .unwrap();

        assert_eq!(note.id.as_str(), "note-1");
        assert_eq!(note.views, 42);
        assert_eq!(note.year.as_deref(), Some("2"));
        assert_eq!(note.semester.as_deref(), Some("1"));
        assert_eq!(note.content.len(), 4);
        assert_eq!(note.content[0].text(), "Processes");
        assert!(matches!(&note.content[1], ContentBlock::Code { code, .. } if code == "fork();"));
    }

    #[test]
    fn test_note_tolerates_nulls() {
        let note: Note = serde_json::from_value(json!({
            "_id": "note-2",
            "title": "Draft",
            "slug": "draft",
            "views": null,
            "university": null,
            "subject": "",
            "content": null
        }))
        .unwrap();

        assert_eq!(note.views, 0);
        assert!(note.university.is_none());
        assert!(note.subject.is_none());
        assert!(note.content.is_empty());
        assert!(note.syllabus.is_none());
    }

    #[test]
    fn test_summary_list_tolerates_incomplete_documents() {
        let notes: Vec<NoteSummary> = serde_json::from_value(json!([
            {"_id": "note-a", "title": "Algorithms", "slug": "a", "views": 3},
            {"_id": "note-b", "title": null, "slug": null, "views": null}
        ]))
        .unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].slug, "a");
        assert_eq!(notes[1].title, "");
        assert_eq!(notes[1].slug, "");
        assert_eq!(notes[1].views, 0);
    }

    #[test]
    fn test_known_blocks_with_missing_fields_still_decode() {
        let note: Note = serde_json::from_value(json!({
            "_id": "note-3",
            "title": "Half written",
            "slug": "half-written",
            "content": [
                {"_type": "youtube", "_key": "c"},
                {"_type": "code", "_key": "d", "language": "rust", "code": null}
            ]
        }))
        .unwrap();

        assert_eq!(note.content[0], ContentBlock::Youtube { url: None });
        assert!(matches!(&note.content[1], ContentBlock::Code { code, .. } if code.is_empty()));
    }

    #[test]
    fn test_unknown_block_type() {
        let block: ContentBlock =
            serde_json::from_value(json!({"_type": "table", "rows": []})).unwrap();
        assert_eq!(block, ContentBlock::Unknown);
        assert_eq!(block.text(), "");
    }

    #[test]
    fn test_note_filter_is_empty() {
        assert!(NoteFilter::default().is_empty());
        let filter = NoteFilter {
            subject: Some("Databases".to_string()),
            ..NoteFilter::default()
        };
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_note_filter_serializes_absent_fields_as_null() {
        let value = serde_json::to_value(NoteFilter::default()).unwrap();
        assert_eq!(value["subject"], serde_json::Value::Null);
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
