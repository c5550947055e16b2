//! Sanity HTTP API client implementation.
//!
//! Queries go to the Query API (`GET /v{version}/data/query/{dataset}`) with
//! parameters bound as `$name=<json>`. Results are cached with `moka`; each
//! entry carries its fetch time and is refetched once it is older than the
//! configured revalidation interval.

mod cache;
pub mod queries;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use notevault_core::{DocumentId, Slug};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

use crate::config::{ContentCacheConfig, SanityConfig};
use crate::sanity::SanityError;
use crate::sanity::types::{FlashcardDeck, Note, NoteFilter, NoteSummary, Quiz};

use cache::{CacheKey, CachedResult, RequestMemo};
use queries::{
    FlashcardDeckBySlug, FlashcardDecksBySubject, NoteBySlug, NoteSlugs, Notes,
    NotesByClassification, PageParams, QueryDefinition, QueryRequest, QuizBySlug, SlugParams,
    SubjectParams,
};

/// Body of a successful Query API response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    ms: Option<u64>,
}

/// Body of a failed API response.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Cheapest query that still touches the dataset; used for readiness.
struct StorePing;

impl QueryDefinition for StorePing {
    const ID: &'static str = "store_ping";
    const GROQ: &'static str = r#"count(*[_type == "note"][0...1])"#;
    type Params = ();
    type Output = u64;
}

// =============================================================================
// ContentClient
// =============================================================================

/// Process-wide client for the Sanity content store.
///
/// Cheap to clone. Holds the revalidation cache shared by every request;
/// use [`ContentClient::request`] to get a per-request handle.
#[derive(Clone)]
pub struct ContentClient {
    inner: Arc<ContentClientInner>,
}

struct ContentClientInner {
    client: reqwest::Client,
    query_endpoint: Url,
    mutate_endpoint: Url,
    read_token: Option<SecretString>,
    write_token: Option<SecretString>,
    revalidate: Duration,
    cache: Cache<CacheKey, CachedResult>,
}

impl ContentClient {
    /// Create a new content client.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured host, API version or dataset do not
    /// form a valid URL.
    pub fn new(
        config: &SanityConfig,
        cache_config: &ContentCacheConfig,
    ) -> Result<Self, SanityError> {
        let query_endpoint = Url::parse(&format!(
            "{}/v{}/data/query/{}",
            config.query_host(),
            config.api_version,
            config.dataset
        ))?;
        let mutate_endpoint = Url::parse(&format!(
            "{}/v{}/data/mutate/{}",
            config.mutation_host(),
            config.api_version,
            config.dataset
        ))?;

        let cache = Cache::builder()
            .max_capacity(cache_config.capacity)
            .build();

        Ok(Self {
            inner: Arc::new(ContentClientInner {
                client: reqwest::Client::new(),
                query_endpoint,
                mutate_endpoint,
                read_token: config.read_token.clone(),
                write_token: config.write_token.clone(),
                revalidate: cache_config.revalidate,
                cache,
            }),
        })
    }

    /// Start a request scope.
    ///
    /// Identical queries issued through the returned handle (or its clones)
    /// hit the store at most once.
    #[must_use]
    pub fn request(&self) -> ContentRequest {
        ContentRequest {
            client: self.clone(),
            memo: Arc::new(RequestMemo::default()),
        }
    }

    /// Execute a query against the Query API, bypassing every cache.
    #[instrument(skip(self, request), fields(query = request.id()))]
    async fn execute(&self, request: &QueryRequest) -> Result<Value, SanityError> {
        let mut url = self.inner.query_endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", request.groq());
            for (name, value) in request.params() {
                pairs.append_pair(&format!("${name}"), &value.to_string());
            }
        }

        let mut builder = self.inner.client.get(url);
        if let Some(token) = &self.inner.read_token {
            builder = builder.bearer_auth(token.expose_secret());
        }

        let body = read_body(builder.send().await?).await?;

        let response: QueryResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse Sanity query response"
            );
            SanityError::Parse(e)
        })?;

        debug!(server_ms = ?response.ms, "Query executed");
        Ok(response.result)
    }

    /// Return a cached result younger than the revalidation interval, or
    /// fetch and cache a new one.
    async fn fetch_revalidated(&self, request: &QueryRequest) -> Result<Arc<Value>, SanityError> {
        if self.inner.revalidate.is_zero() {
            return self.execute(request).await.map(Arc::new);
        }

        if let Some(entry) = self.inner.cache.get(request.cache_key()).await {
            if entry.is_fresh(self.inner.revalidate) {
                debug!(query = request.id(), "Cache hit");
                return Ok(entry.value);
            }
            debug!(query = request.id(), "Cached result expired, revalidating");
        }

        let value = Arc::new(self.execute(request).await?);

        self.inner
            .cache
            .insert(
                request.cache_key().clone(),
                CachedResult::new(Arc::clone(&value)),
            )
            .await;

        Ok(value)
    }

    /// Check that the store answers queries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn ping(&self) -> Result<(), SanityError> {
        let request = QueryRequest::new::<StorePing>(&())?;
        self.execute(&request).await.map(|_| ())
    }

    // =========================================================================
    // Mutations (not cached)
    // =========================================================================

    /// Increment a note's view counter by one.
    ///
    /// Cached reads of the note keep the old count until they revalidate.
    ///
    /// # Errors
    ///
    /// Returns [`SanityError::MissingWriteToken`] without a write token, or
    /// an error if the mutation is rejected.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn increment_note_views(&self, id: &DocumentId) -> Result<(), SanityError> {
        let token = self
            .inner
            .write_token
            .as_ref()
            .ok_or(SanityError::MissingWriteToken)?;

        let body = json!({
            "mutations": [{
                "patch": {
                    "id": id.as_str(),
                    "setIfMissing": { "views": 0 },
                    "inc": { "views": 1 }
                }
            }]
        });

        let response = self
            .inner
            .client
            .post(self.inner.mutate_endpoint.clone())
            .bearer_auth(token.expose_secret())
            .json(&body)
            .send()
            .await?;

        read_body(response).await?;
        Ok(())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Drop every cached result.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Turn a non-success response into a [`SanityError`], or return the body.
async fn read_body(response: reqwest::Response) -> Result<String, SanityError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return Err(SanityError::RateLimited(retry_after));
    }

    let text = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %text.chars().take(500).collect::<String>(),
            "Sanity API returned non-success status"
        );

        let (kind, description) = serde_json::from_str::<ApiErrorBody>(&text).map_or_else(
            |_| (None, text.chars().take(200).collect()),
            |body| (body.error.kind, body.error.description),
        );

        return Err(SanityError::Api {
            status: status.as_u16(),
            kind,
            description,
        });
    }

    Ok(text)
}

// =============================================================================
// ContentRequest
// =============================================================================

/// Content access for a single inbound request.
///
/// Wraps the process-wide [`ContentClient`] with a memo keyed by the
/// canonical `(query, params)` key: the first call for a key fetches (through
/// the revalidation cache), later and concurrent calls reuse its result.
/// Clones share the memo.
#[derive(Clone)]
pub struct ContentRequest {
    client: ContentClient,
    memo: Arc<RequestMemo>,
}

impl ContentRequest {
    /// Run a query definition with typed parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, the store call fails,
    /// or the result does not decode into `Q::Output`. Failures are not
    /// memoized.
    pub async fn fetch<Q: QueryDefinition>(
        &self,
        params: &Q::Params,
    ) -> Result<Q::Output, SanityError> {
        let request = QueryRequest::new::<Q>(params)?;
        let cell = self.memo.cell(request.cache_key());

        if cell.initialized() {
            debug!(query = Q::ID, "Request memo hit");
        }

        let value = cell
            .get_or_try_init(|| self.client.fetch_revalidated(&request))
            .await?;

        Ok(Q::Output::deserialize(value.as_ref())?)
    }

    // =========================================================================
    // Note Methods
    // =========================================================================

    /// Get a note by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails. A missing note is `Ok(None)`.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn note_by_slug(&self, slug: &Slug) -> Result<Option<Note>, SanityError> {
        self.fetch::<NoteBySlug>(&SlugParams { slug: slug.clone() })
            .await
    }

    /// Get the slugs of all notes.
    ///
    /// Slugs that are not valid routing keys are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    #[instrument(skip(self))]
    pub async fn note_slugs(&self) -> Result<Vec<Slug>, SanityError> {
        let raw = self.fetch::<NoteSlugs>(&()).await?;

        Ok(raw
            .into_iter()
            .filter_map(|s| match Slug::parse(&s) {
                Ok(slug) => Some(slug),
                Err(e) => {
                    tracing::warn!(slug = %s, error = %e, "Skipping note with invalid slug");
                    None
                }
            })
            .collect())
    }

    /// Get a page of notes ordered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    #[instrument(skip(self))]
    pub async fn notes(&self, offset: usize, limit: usize) -> Result<Vec<NoteSummary>, SanityError> {
        let notes = self.fetch::<Notes>(&PageParams::new(offset, limit)).await?;
        Ok(with_slug(notes))
    }

    /// Get notes matching a classification filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    #[instrument(skip(self))]
    pub async fn notes_by_classification(
        &self,
        filter: &NoteFilter,
    ) -> Result<Vec<NoteSummary>, SanityError> {
        let notes = self.fetch::<NotesByClassification>(filter).await?;
        Ok(with_slug(notes))
    }

    // =========================================================================
    // Flashcard & Quiz Methods
    // =========================================================================

    /// Get a flashcard deck by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails. A missing deck is `Ok(None)`.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn flashcard_deck_by_slug(
        &self,
        slug: &Slug,
    ) -> Result<Option<FlashcardDeck>, SanityError> {
        self.fetch::<FlashcardDeckBySlug>(&SlugParams { slug: slug.clone() })
            .await
    }

    /// Get the flashcard decks for a subject.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails.
    #[instrument(skip(self))]
    pub async fn flashcard_decks_by_subject(
        &self,
        subject: &str,
    ) -> Result<Vec<FlashcardDeck>, SanityError> {
        self.fetch::<FlashcardDecksBySubject>(&SubjectParams {
            subject: subject.to_string(),
        })
        .await
    }

    /// Get a quiz by its slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails. A missing quiz is `Ok(None)`.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn quiz_by_slug(&self, slug: &Slug) -> Result<Option<Quiz>, SanityError> {
        self.fetch::<QuizBySlug>(&SlugParams { slug: slug.clone() })
            .await
    }
}

/// Drop summaries that cannot be linked to.
fn with_slug(notes: Vec<NoteSummary>) -> Vec<NoteSummary> {
    notes
        .into_iter()
        .filter(|note| {
            let routable = !note.slug.is_empty();
            if !routable {
                tracing::warn!(id = %note.id, "Skipping note without slug");
            }
            routable
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const QUERY_PATH: &str = "/v2023-05-03/data/query/production";
    const MUTATE_PATH: &str = "/v2023-05-03/data/mutate/production";

    fn sanity_config(server: &MockServer) -> SanityConfig {
        SanityConfig {
            project_id: "abc123".to_string(),
            dataset: "production".to_string(),
            api_version: "2023-05-03".to_string(),
            use_cdn: false,
            api_host: Some(server.uri()),
            read_token: None,
            write_token: None,
        }
    }

    fn client(server: &MockServer, revalidate: Duration) -> ContentClient {
        ContentClient::new(
            &sanity_config(server),
            &ContentCacheConfig {
                revalidate,
                capacity: 100,
            },
        )
        .unwrap()
    }

    fn note_json() -> Value {
        json!({
            "_id": "note-os",
            "title": "Introduction to Operating Systems",
            "syllabus": "Processes, threads, memory",
            "slug": "intro-to-os",
            "views": 7,
            "university": "MIT",
            "degree": "BSc Computer Science",
            "year": "2",
            "semester": "1",
            "subject": "Operating Systems",
            "content": []
        })
    }

    fn slug() -> Slug {
        Slug::parse("intro-to-os").unwrap()
    }

    async fn mount_note(server: &MockServer, result: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("$slug", "\"intro-to-os\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"ms": 2, "result": result})),
            )
            .expect(times)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_note_by_slug_returns_document() {
        let server = MockServer::start().await;
        mount_note(&server, note_json(), 1).await;

        let note = client(&server, Duration::from_secs(3600))
            .request()
            .note_by_slug(&slug())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(note.title, "Introduction to Operating Systems");
        assert_eq!(note.syllabus.as_deref(), Some("Processes, threads, memory"));
        assert_eq!(note.slug, "intro-to-os");
        assert_eq!(note.university.as_deref(), Some("MIT"));
        assert_eq!(note.degree.as_deref(), Some("BSc Computer Science"));
        assert_eq!(note.year.as_deref(), Some("2"));
        assert_eq!(note.semester.as_deref(), Some("1"));
        assert_eq!(note.subject.as_deref(), Some("Operating Systems"));
        assert_eq!(note.views, 7);
    }

    #[tokio::test]
    async fn test_note_by_slug_missing_is_none() {
        let server = MockServer::start().await;
        mount_note(&server, Value::Null, 1).await;

        let note = client(&server, Duration::from_secs(3600))
            .request()
            .note_by_slug(&slug())
            .await
            .unwrap();

        assert!(note.is_none());
    }

    #[tokio::test]
    async fn test_identical_calls_in_one_request_hit_store_once() {
        let server = MockServer::start().await;
        // Revalidation disabled, so only the request memo can dedupe.
        mount_note(&server, note_json(), 1).await;

        let content = client(&server, Duration::ZERO).request();
        let first = content.note_by_slug(&slug()).await.unwrap();
        let second = content.clone().note_by_slug(&slug()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_identical_calls_hit_store_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": note_json()}))
                    .set_delay(Duration::from_millis(50)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let content = client(&server, Duration::ZERO).request();
        let slug = slug();
        let (a, b) = tokio::join!(content.note_by_slug(&slug), content.note_by_slug(&slug));

        assert!(a.unwrap().is_some());
        assert!(b.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_separate_requests_share_revalidation_cache() {
        let server = MockServer::start().await;
        mount_note(&server, note_json(), 1).await;

        let client = client(&server, Duration::from_secs(3600));
        client.request().note_by_slug(&slug()).await.unwrap();
        client.request().note_by_slug(&slug()).await.unwrap();
    }

    #[tokio::test]
    async fn test_expired_result_is_refetched() {
        let server = MockServer::start().await;
        mount_note(&server, note_json(), 2).await;

        let client = client(&server, Duration::from_millis(50));
        client.request().note_by_slug(&slug()).await.unwrap();

        tokio::time::sleep(Duration::from_millis(120)).await;

        client.request().note_by_slug(&slug()).await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_revalidate_disables_process_cache() {
        let server = MockServer::start().await;
        mount_note(&server, note_json(), 2).await;

        let client = client(&server, Duration::ZERO);
        client.request().note_by_slug(&slug()).await.unwrap();
        client.request().note_by_slug(&slug()).await.unwrap();
    }

    #[tokio::test]
    async fn test_store_error_is_hard_failure_and_not_memoized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "description": "expected ']' following expression",
                    "type": "queryParseError"
                }
            })))
            .expect(2)
            .mount(&server)
            .await;

        let content = client(&server, Duration::from_secs(3600)).request();

        let err = content.note_by_slug(&slug()).await.unwrap_err();
        assert!(matches!(
            err,
            SanityError::Api { status: 400, ref kind, .. } if kind.as_deref() == Some("queryParseError")
        ));

        // Retrying within the same request reaches the store again.
        assert!(content.note_by_slug(&slug()).await.is_err());
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let err = client(&server, Duration::ZERO)
            .request()
            .note_slugs()
            .await
            .unwrap_err();

        assert!(matches!(err, SanityError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_read_token_is_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(header("authorization", "Bearer skReadToken"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"result": ["intro-to-os", "Bad Slug", "cs-101"]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = sanity_config(&server);
        config.read_token = Some(SecretString::from("skReadToken"));
        let client = ContentClient::new(
            &config,
            &ContentCacheConfig {
                revalidate: Duration::ZERO,
                capacity: 10,
            },
        )
        .unwrap();

        let slugs = client.request().note_slugs().await.unwrap();
        assert_eq!(
            slugs,
            vec![Slug::parse("intro-to-os").unwrap(), Slug::parse("cs-101").unwrap()]
        );
    }

    #[tokio::test]
    async fn test_classification_filter_binds_null_for_absent_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("$subject", "\"Databases\""))
            .and(query_param("$university", "null"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [
                {"_id": "n1", "title": "Relational Algebra", "slug": "relational-algebra",
                 "subject": "Databases", "university": "ETH", "views": 3}
            ]})))
            .expect(1)
            .mount(&server)
            .await;

        let notes = client(&server, Duration::ZERO)
            .request()
            .notes_by_classification(&NoteFilter {
                subject: Some("Databases".to_string()),
                ..NoteFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].slug, "relational-algebra");
    }

    #[tokio::test]
    async fn test_classification_filter_matches_numeric_years() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .and(query_param("$year", "\"2\""))
            .and(|req: &wiremock::Request| {
                req.url
                    .query_pairs()
                    .any(|(k, v)| k == "query" && v.contains("string(year) == $year"))
            })
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [
                {"_id": "n1", "title": "Operating Systems", "slug": "intro-to-os", "views": 1}
            ]})))
            .expect(1)
            .mount(&server)
            .await;

        let notes = client(&server, Duration::ZERO)
            .request()
            .notes_by_classification(&NoteFilter {
                year: Some("2".to_string()),
                ..NoteFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(notes.len(), 1);
    }

    #[tokio::test]
    async fn test_notes_skip_documents_without_slug() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(QUERY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": [
                {"_id": "n1", "title": "Algorithms", "slug": "algorithms", "views": 2},
                {"_id": "n2", "title": null, "slug": null, "views": null}
            ]})))
            .expect(1)
            .mount(&server)
            .await;

        let notes = client(&server, Duration::ZERO)
            .request()
            .notes(0, 20)
            .await
            .unwrap();

        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].slug, "algorithms");
    }

    #[tokio::test]
    async fn test_increment_views_requires_write_token() {
        let server = MockServer::start().await;
        let id = DocumentId::parse("note-os").unwrap();

        let err = client(&server, Duration::ZERO)
            .increment_note_views(&id)
            .await
            .unwrap_err();

        assert!(matches!(err, SanityError::MissingWriteToken));
    }

    #[tokio::test]
    async fn test_increment_views_patches_document() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MUTATE_PATH))
            .and(header("authorization", "Bearer skWriteToken"))
            .and(body_partial_json(json!({
                "mutations": [{"patch": {"id": "note-os", "inc": {"views": 1}}}]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"transactionId": "tx1", "results": []})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = sanity_config(&server);
        config.write_token = Some(SecretString::from("skWriteToken"));
        let client = ContentClient::new(
            &config,
            &ContentCacheConfig {
                revalidate: Duration::ZERO,
                capacity: 10,
            },
        )
        .unwrap();

        client
            .increment_note_views(&DocumentId::parse("note-os").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_invalidate_all_forces_refetch() {
        let server = MockServer::start().await;
        mount_note(&server, note_json(), 2).await;

        let client = client(&server, Duration::from_secs(3600));
        client.request().note_by_slug(&slug()).await.unwrap();
        client.invalidate_all().await;
        client.request().note_by_slug(&slug()).await.unwrap();
    }
}
