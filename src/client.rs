//! The Daypia client: configuration, construction and the public
//! operation surface.
//!
//! Each operation shapes its parameters into a [`RequestSpec`], hands it to
//! the execution engine and decodes the typed result. Calls are independent;
//! callers sequence operations that depend on each other (a chapter must
//! exist before its content is set).

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::decode;
use crate::endpoint::Endpoint;
use crate::error::DaypiaError;
use crate::request::{FileAttachment, RequestSpec};
use crate::trace::TraceContextProvider;
use crate::types::Chunk;

/// Production host used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.daypia.com";

/// Result cap applied by callers that have no better bound for
/// [`DaypiaClient::search_chunk`].
pub const DEFAULT_MAX_RESULTS: u32 = 10;

const BASE_URL_ENV: &str = "DAYPIA_BASE_URL";
const API_KEY_ENV: &str = "DAYPIA_API_KEY";

/// Client for the Daypia document & AI processing API.
///
/// Cheap to clone; holds no mutable state after construction and is safe
/// to use concurrently from multiple tasks.
#[derive(Debug, Clone)]
pub struct DaypiaClient {
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) auth_header: HeaderValue,
    pub(crate) trace_provider: Option<Arc<dyn TraceContextProvider>>,
}

impl DaypiaClient {
    pub fn builder() -> DaypiaClientBuilder {
        DaypiaClientBuilder::new()
    }

    /// Build a client from `DAYPIA_BASE_URL` (falling back to the
    /// production host) and `DAYPIA_API_KEY`.
    ///
    /// This is the only place the crate reads environment state.
    pub fn from_env() -> Result<Self, DaypiaError> {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| DaypiaError::Configuration(format!("{API_KEY_ENV} is not set")))?;
        Self::builder().api_key(api_key).base_url(base_url).build()
    }

    /// Upload a media file and register it under the given project.
    pub async fn create_mediafile(
        &self,
        project_id: Uuid,
        mediafile_id: Uuid,
        file: FileAttachment,
    ) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("mediafileId".into(), json!(mediafile_id.to_string()));
        body.insert("projectId".into(), json!(project_id.to_string()));
        body.insert("tagIds".into(), json!([]));
        let spec = RequestSpec::multipart(Endpoint::CreateMediafile, Some(body), file);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Store a chunk of text for semantic retrieval.
    pub async fn create_chunk(&self, project_id: Uuid, text: &str) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("projectId".into(), json!(project_id.to_string()));
        body.insert("text".into(), json!(text));
        let spec = RequestSpec::json(Endpoint::CreateChunk, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Search a project's chunks by semantic similarity.
    ///
    /// Results come back in the order the API returned them; see
    /// [`DEFAULT_MAX_RESULTS`] for a conventional cap.
    pub async fn search_chunk(
        &self,
        project_id: Uuid,
        search: &str,
        max_results: u32,
    ) -> Result<Vec<Chunk>, DaypiaError> {
        let mut body = Map::new();
        body.insert("projectId".into(), json!(project_id.to_string()));
        body.insert("search".into(), json!(search));
        body.insert("maxResults".into(), json!(max_results));
        let spec = RequestSpec::json(Endpoint::SearchChunk, body);
        let response = self.execute(&spec).await?;
        let value = self.read_json(response).await?;
        decode::search_results(&value).map_err(|f| self.fail(f))
    }

    /// Create a named chapter under a media file.
    pub async fn create_chapter(
        &self,
        mediafile_id: Uuid,
        chapter_id: Uuid,
        name: &str,
    ) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("mediaFileId".into(), json!(mediafile_id.to_string()));
        body.insert("chapterId".into(), json!(chapter_id.to_string()));
        body.insert("name".into(), json!(name));
        let spec = RequestSpec::json(Endpoint::CreateChapter, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Link a chapter to its predecessor in the sequence.
    pub async fn set_previous_chapter(
        &self,
        previous_chapter_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert(
            "previousChapterId".into(),
            json!(previous_chapter_id.to_string()),
        );
        body.insert("chapterId".into(), json!(chapter_id.to_string()));
        let spec = RequestSpec::json(Endpoint::SetPreviousChapter, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Mark a chapter as the first one of a media file.
    pub async fn set_mediafile_first_chapter(
        &self,
        mediafile_id: Uuid,
        chapter_id: Uuid,
    ) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("mediaFileId".into(), json!(mediafile_id.to_string()));
        body.insert("chapterId".into(), json!(chapter_id.to_string()));
        let spec = RequestSpec::json(Endpoint::SetMediafileFirstChapter, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Replace a chapter's content and breadcrumb.
    pub async fn set_chapter_content(
        &self,
        chapter_id: Uuid,
        breadcrumb: &str,
        content: &str,
    ) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("chapterId".into(), json!(chapter_id.to_string()));
        body.insert("breadcrumb".into(), json!(breadcrumb));
        body.insert("content".into(), json!(content));
        let spec = RequestSpec::json(Endpoint::SetChapterContent, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Ask the remote side to split a chapter into searchable chunks.
    pub async fn chunk_chapter(&self, chapter_id: Uuid) -> Result<(), DaypiaError> {
        let mut body = Map::new();
        body.insert("chapterId".into(), json!(chapter_id.to_string()));
        let spec = RequestSpec::json(Endpoint::ChunkChapter, body);
        self.execute(&spec).await?;
        Ok(())
    }

    /// Extract the text content of a PDF on disk.
    pub async fn pdf_content(&self, path: impl AsRef<Path>) -> Result<String, DaypiaError> {
        let spec = RequestSpec::multipart(
            Endpoint::PdfToText,
            None,
            FileAttachment::pdf(path.as_ref()),
        );
        let response = self.execute(&spec).await?;
        let value = self.read_json(response).await?;
        decode::pdf_content(&value).map_err(|f| self.fail(f))
    }

    /// Generate a structured JSON document from a prompt pair.
    pub async fn generate_structured(
        &self,
        prompt: &str,
        system_prompt: &str,
    ) -> Result<Value, DaypiaError> {
        let mut body = Map::new();
        body.insert("prompt".into(), json!(prompt));
        body.insert("systemPrompt".into(), json!(system_prompt));
        let spec = RequestSpec::json(Endpoint::GenerateJson, body);
        let response = self.execute(&spec).await?;
        let value = self.read_json(response).await?;
        decode::structured_result(&value).map_err(|f| self.fail(f))
    }

    /// Turn structured data into spreadsheet sheet definitions.
    pub async fn generate_sheets(
        &self,
        data: &Value,
        autosize: bool,
    ) -> Result<Vec<Value>, DaypiaError> {
        let mut body = Map::new();
        body.insert("data".into(), data.clone());
        body.insert("autosize".into(), json!(autosize));
        let spec = RequestSpec::json(Endpoint::GenerateSheets, body);
        let response = self.execute(&spec).await?;
        let value = self.read_json(response).await?;
        decode::sheets(&value).map_err(|f| self.fail(f))
    }

    /// Render sheet definitions into an Excel workbook.
    ///
    /// The response body is the workbook itself and is returned as opaque
    /// bytes; columns are always autosized.
    pub async fn generate_excel(&self, sheets: &[Value]) -> Result<Bytes, DaypiaError> {
        let mut body = Map::new();
        body.insert("sheets".into(), Value::Array(sheets.to_vec()));
        body.insert("autosize".into(), json!(true));
        let spec = RequestSpec::json(Endpoint::GenerateExcel, body);
        let response = self.execute(&spec).await?;
        self.read_bytes(response).await
    }
}

/// Builder for [`DaypiaClient`].
#[derive(Default)]
pub struct DaypiaClientBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    trace_provider: Option<Arc<dyn TraceContextProvider>>,
}

impl DaypiaClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(api_key.into()));
        self
    }

    /// Override the API host. A trailing slash is trimmed so endpoint
    /// paths concatenate cleanly.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    /// Supply a pre-configured transport (timeouts, proxies, pooling).
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn trace_provider(mut self, provider: Arc<dyn TraceContextProvider>) -> Self {
        self.trace_provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<DaypiaClient, DaypiaError> {
        let api_key = self
            .api_key
            .ok_or_else(|| DaypiaError::Configuration("API key is required".into()))?;
        let mut auth_header =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
                .map_err(|e| DaypiaError::Configuration(format!("invalid API key: {e}")))?;
        auth_header.set_sensitive(true);

        Ok(DaypiaClient {
            http_client: self.http_client.unwrap_or_default(),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            auth_header,
            trace_provider: self.trace_provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_api_key_is_rejected() {
        let err = DaypiaClient::builder().build().unwrap_err();
        assert!(matches!(err, DaypiaError::Configuration(_)));
    }

    #[test]
    fn build_with_control_characters_in_api_key_is_rejected() {
        let err = DaypiaClient::builder()
            .api_key("key\nwith-newline")
            .build()
            .unwrap_err();
        assert!(matches!(err, DaypiaError::Configuration(_)));
    }

    #[test]
    fn default_base_url_is_the_production_host() {
        let client = DaypiaClient::builder().api_key("k").build().unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn trailing_slash_is_trimmed_from_the_base_url() {
        let client = DaypiaClient::builder()
            .api_key("k")
            .base_url("https://daypia.example.test/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "https://daypia.example.test");
    }

    #[test]
    fn auth_header_is_marked_sensitive() {
        let client = DaypiaClient::builder().api_key("k").build().unwrap();
        assert!(client.auth_header.is_sensitive());
        assert_eq!(client.auth_header.to_str().unwrap(), "Bearer k");
    }
}
