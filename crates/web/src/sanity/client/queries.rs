//! Named GROQ query definitions.
//!
//! Each query is a unit type implementing [`QueryDefinition`]. The GROQ text
//! is a constant; everything that varies per call goes through `Params`,
//! which is serialized to JSON and sent as bound `$name` parameters.

use std::collections::BTreeMap;

use notevault_core::Slug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::cache::CacheKey;
use crate::sanity::SanityError;
use crate::sanity::types::{FlashcardDeck, Note, NoteFilter, NoteSummary, Quiz};

/// Largest page `Notes` will request.
pub const MAX_PAGE_SIZE: usize = 100;

/// A named, parameterized read against the content store.
pub trait QueryDefinition {
    /// Stable identifier, used in cache keys and logs.
    const ID: &'static str;
    /// GROQ query text. Must reference parameters only as `$name`.
    const GROQ: &'static str;
    /// Parameters; must serialize to a JSON object (or `null` for none).
    type Params: Serialize;
    /// Decoded `result` of the response.
    type Output: DeserializeOwned;
}

/// A validated query ready to send: id, GROQ text and bound parameters.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    id: &'static str,
    groq: &'static str,
    params: BTreeMap<String, Value>,
    key: CacheKey,
}

impl QueryRequest {
    /// Build a request for `Q`, validating its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SanityError::InvalidParams`] if the parameters do not
    /// serialize to a JSON object or a parameter name is not a valid GROQ
    /// identifier.
    pub fn new<Q: QueryDefinition>(params: &Q::Params) -> Result<Self, SanityError> {
        let params = match serde_json::to_value(params)? {
            Value::Null => BTreeMap::new(),
            Value::Object(map) => map.into_iter().collect::<BTreeMap<_, _>>(),
            other => {
                return Err(SanityError::InvalidParams(format!(
                    "{} parameters must be an object, got {other}",
                    Q::ID
                )));
            }
        };

        if let Some(name) = params.keys().find(|name| !is_valid_param_name(name)) {
            return Err(SanityError::InvalidParams(format!(
                "{name:?} is not a valid GROQ parameter name"
            )));
        }

        let key = CacheKey::new(Q::ID, &params)?;

        Ok(Self {
            id: Q::ID,
            groq: Q::GROQ,
            params,
            key,
        })
    }

    /// Query identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        self.id
    }

    /// GROQ query text.
    #[must_use]
    pub const fn groq(&self) -> &'static str {
        self.groq
    }

    /// Bound parameters, sorted by name.
    #[must_use]
    pub const fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// Canonical cache key of `(id, params)`.
    #[must_use]
    pub const fn cache_key(&self) -> &CacheKey {
        &self.key
    }
}

/// GROQ parameter names follow identifier rules: `[A-Za-z_][A-Za-z0-9_]*`.
fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// =============================================================================
// Parameter types
// =============================================================================

/// Single `$slug` parameter.
#[derive(Debug, Clone, Serialize)]
pub struct SlugParams {
    pub slug: Slug,
}

/// `$start` / `$end` slice bounds.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageParams {
    pub start: usize,
    pub end: usize,
}

impl PageParams {
    /// Page starting at `offset`, at most [`MAX_PAGE_SIZE`] long.
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        Self {
            start: offset,
            end: offset.saturating_add(limit),
        }
    }
}

/// Single `$subject` parameter.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectParams {
    pub subject: String,
}

// =============================================================================
// Notes
// =============================================================================

/// Note by slug, with its rich text body.
pub struct NoteBySlug;

impl QueryDefinition for NoteBySlug {
    const ID: &'static str = "note_by_slug";
    const GROQ: &'static str = r#"*[_type == "note" && slug.current == $slug][0]{
  _id,
  title,
  syllabus,
  "slug": slug.current,
  views,
  university,
  degree,
  year,
  semester,
  subject,
  content[]{
    ...,
    _type == "image" => { ..., "url": asset->url }
  }
}"#;
    type Params = SlugParams;
    type Output = Option<Note>;
}

/// Slugs of every published note.
pub struct NoteSlugs;

impl QueryDefinition for NoteSlugs {
    const ID: &'static str = "note_slugs";
    const GROQ: &'static str = r#"*[_type == "note" && defined(slug.current)].slug.current"#;
    type Params = ();
    type Output = Vec<String>;
}

/// Notes ordered by title, sliced by `$start` / `$end`.
pub struct Notes;

impl QueryDefinition for Notes {
    const ID: &'static str = "notes";
    const GROQ: &'static str = concat!(
        r#"*[_type == "note" && defined(slug.current)] | order(title asc) [$start...$end]"#,
        r#"{ _id, title, "slug": slug.current, subject, university, views }"#
    );
    type Params = PageParams;
    type Output = Vec<NoteSummary>;
}

/// Notes matching a classification filter; `null` parameters match anything.
///
/// Year and semester are compared as strings since older documents store
/// them as numbers.
pub struct NotesByClassification;

impl QueryDefinition for NotesByClassification {
    const ID: &'static str = "notes_by_classification";
    const GROQ: &'static str = concat!(
        r#"*[_type == "note" && defined(slug.current)"#,
        r#" && (!defined($university) || university == $university)"#,
        r#" && (!defined($degree) || degree == $degree)"#,
        r#" && (!defined($year) || string(year) == $year)"#,
        r#" && (!defined($semester) || string(semester) == $semester)"#,
        r#" && (!defined($subject) || subject == $subject)"#,
        r#"] | order(title asc)"#,
        r#"{ _id, title, "slug": slug.current, subject, university, views }"#
    );
    type Params = NoteFilter;
    type Output = Vec<NoteSummary>;
}

// =============================================================================
// Flashcards & Quizzes
// =============================================================================

/// Flashcard deck by slug.
pub struct FlashcardDeckBySlug;

impl QueryDefinition for FlashcardDeckBySlug {
    const ID: &'static str = "flashcard_deck_by_slug";
    const GROQ: &'static str = r#"*[_type == "flashcardDeck" && slug.current == $slug][0]{
  _id, title, "slug": slug.current, subject, cards[]{ front, back }
}"#;
    type Params = SlugParams;
    type Output = Option<FlashcardDeck>;
}

/// Flashcard decks for one subject.
pub struct FlashcardDecksBySubject;

impl QueryDefinition for FlashcardDecksBySubject {
    const ID: &'static str = "flashcard_decks_by_subject";
    const GROQ: &'static str = r#"*[_type == "flashcardDeck" && subject == $subject] | order(title asc){
  _id, title, "slug": slug.current, subject, cards[]{ front, back }
}"#;
    type Params = SubjectParams;
    type Output = Vec<FlashcardDeck>;
}

/// Quiz by slug.
pub struct QuizBySlug;

impl QueryDefinition for QuizBySlug {
    const ID: &'static str = "quiz_by_slug";
    const GROQ: &'static str = r#"*[_type == "quiz" && slug.current == $slug][0]{
  _id, title, "slug": slug.current, subject, questions[]{ prompt, options, answerIndex }
}"#;
    type Params = SlugParams;
    type Output = Option<Quiz>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct BadParams;

    impl QueryDefinition for BadParams {
        const ID: &'static str = "bad_params";
        const GROQ: &'static str = "*[_id == $id]";
        type Params = BTreeMap<String, String>;
        type Output = Value;
    }

    struct ScalarParams;

    impl QueryDefinition for ScalarParams {
        const ID: &'static str = "scalar_params";
        const GROQ: &'static str = "*";
        type Params = u32;
        type Output = Value;
    }

    #[test]
    fn test_slug_params_are_bound_not_interpolated() {
        let slug = Slug::parse("intro-to-os").unwrap();
        let request = QueryRequest::new::<NoteBySlug>(&SlugParams { slug }).unwrap();

        assert_eq!(request.id(), "note_by_slug");
        assert!(request.groq().contains("$slug"));
        assert!(!request.groq().contains("intro-to-os"));
        assert_eq!(request.params()["slug"], Value::String("intro-to-os".into()));
    }

    #[test]
    fn test_unit_params_are_empty() {
        let request = QueryRequest::new::<NoteSlugs>(&()).unwrap();
        assert!(request.params().is_empty());
    }

    #[test]
    fn test_rejects_invalid_param_names() {
        let mut params = BTreeMap::new();
        params.insert("id] | *[true".to_string(), "x".to_string());
        let err = QueryRequest::new::<BadParams>(&params).unwrap_err();
        assert!(matches!(err, SanityError::InvalidParams(_)));
    }

    #[test]
    fn test_rejects_non_object_params() {
        let err = QueryRequest::new::<ScalarParams>(&7).unwrap_err();
        assert!(matches!(err, SanityError::InvalidParams(_)));
    }

    #[test]
    fn test_param_name_rules() {
        assert!(is_valid_param_name("slug"));
        assert!(is_valid_param_name("_start2"));
        assert!(!is_valid_param_name(""));
        assert!(!is_valid_param_name("2start"));
        assert!(!is_valid_param_name("sl-ug"));
    }

    #[test]
    fn test_page_params_clamp() {
        let page = PageParams::new(20, 1_000);
        assert_eq!((page.start, page.end), (20, 120));

        let page = PageParams::new(0, 0);
        assert_eq!((page.start, page.end), (0, 1));
    }

    #[test]
    fn test_classification_query_binds_every_field() {
        let request = QueryRequest::new::<NotesByClassification>(&NoteFilter {
            subject: Some("Databases".to_string()),
            ..NoteFilter::default()
        })
        .unwrap();

        let names: Vec<&str> = request.params().keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["degree", "semester", "subject", "university", "year"]
        );
        assert_eq!(request.params()["university"], Value::Null);
    }

    #[test]
    fn test_list_queries_skip_notes_without_slug() {
        assert!(Notes::GROQ.contains("defined(slug.current)"));
        assert!(NotesByClassification::GROQ.contains("defined(slug.current)"));
    }

    #[test]
    fn test_classification_compares_year_and_semester_as_strings() {
        let request = QueryRequest::new::<NotesByClassification>(&NoteFilter {
            year: Some("2".to_string()),
            semester: Some("1".to_string()),
            ..NoteFilter::default()
        })
        .unwrap();

        assert!(request.groq().contains("string(year) == $year"));
        assert!(request.groq().contains("string(semester) == $semester"));
        assert!(!request.groq().contains(" year == $year"));
        assert_eq!(request.params()["year"], Value::String("2".into()));
    }

    #[test]
    fn test_list_queries_share_summary_projection() {
        let projection = r#"{ _id, title, "slug": slug.current, subject, university, views }"#;
        assert!(Notes::GROQ.ends_with(projection));
        assert!(NotesByClassification::GROQ.ends_with(projection));
    }
}
