//! The request execution engine.
//!
//! Every outbound call goes through [`DaypiaClient::execute`]: it assembles
//! headers (bearer auth, content type, best-effort trace propagation),
//! encodes the body as JSON or multipart, performs the single network call
//! and validates the outcome. Any failure is logged once and normalized
//! into [`DaypiaError::Api`]; no retry is attempted at any layer.

use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use tokio_util::io::ReaderStream;

use crate::client::DaypiaClient;
use crate::error::{DaypiaError, Failure};
use crate::request::{FileAttachment, RequestSpec};

/// Trace correlation headers. Header names are ASCII-lowercase on the wire;
/// the remote side matches them case-insensitively.
pub(crate) const TRACE_ID_HEADER: &str = "traceid";
pub(crate) const PARENT_SPAN_ID_HEADER: &str = "parentspanid";

impl DaypiaClient {
    /// Execute one request spec and return the validated response.
    ///
    /// Exactly one network call per invocation; one error log on failure,
    /// none on success.
    pub(crate) async fn execute(&self, spec: &RequestSpec) -> Result<reqwest::Response, DaypiaError> {
        match self.dispatch(spec).await {
            Ok(response) => Ok(response),
            Err(failure) => Err(self.fail(failure)),
        }
    }

    /// Log one error event and normalize the failure for the caller.
    pub(crate) fn fail(&self, failure: Failure) -> DaypiaError {
        let code = failure.code();
        tracing::error!(
            code = %code,
            "The Daypia API call did not work, error: {}",
            failure.message()
        );
        DaypiaError::api(code, failure.message())
    }

    /// Read the response body as JSON.
    pub(crate) async fn read_json(&self, response: reqwest::Response) -> Result<Value, DaypiaError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.fail(Failure::Transport(e.to_string())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| self.fail(Failure::Decode(format!("invalid JSON response: {e}"))))
    }

    /// Read the response body as opaque bytes, with no parsing attempted.
    pub(crate) async fn read_bytes(&self, response: reqwest::Response) -> Result<Bytes, DaypiaError> {
        response
            .bytes()
            .await
            .map_err(|e| self.fail(Failure::Transport(e.to_string())))
    }

    async fn dispatch(&self, spec: &RequestSpec) -> Result<reqwest::Response, Failure> {
        let url = format!("{}{}", self.base_url, spec.endpoint.path());
        let headers = self.request_headers(spec.is_multipart());

        let mut request = self
            .http_client
            .request(spec.endpoint.method(), &url)
            .headers(headers);

        request = match &spec.file {
            Some(file) => request.multipart(build_form(spec.body.as_ref(), file).await?),
            None => match &spec.body {
                Some(body) => request.json(body),
                None => request,
            },
        };

        let response = request.send().await.map_err(Failure::from)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Failure::Status { status, body });
        }

        Ok(response)
    }

    /// Assemble the per-request headers.
    ///
    /// Multipart requests must own their boundary-based content type, so
    /// the JSON content type is only set for plain requests. Trace headers
    /// are attached best-effort: only when the injected provider yields a
    /// valid context, never as empty values.
    pub(crate) fn request_headers(&self, multipart: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        if !multipart {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        if let Some(provider) = &self.trace_provider {
            if let Some(context) = provider.current_context() {
                if context.is_valid() {
                    if let (Ok(trace_id), Ok(parent_span_id)) = (
                        HeaderValue::from_str(&context.trace_id),
                        HeaderValue::from_str(&context.parent_span_id),
                    ) {
                        headers.insert(HeaderName::from_static(TRACE_ID_HEADER), trace_id);
                        headers
                            .insert(HeaderName::from_static(PARENT_SPAN_ID_HEADER), parent_span_id);
                    }
                }
            }
        }

        headers
    }
}

/// Build the multipart body: one text part per body field plus the single
/// binary `file` part. The file is streamed from disk, not buffered; the
/// handle is owned by the stream and closed when the call completes.
async fn build_form(body: Option<&Map<String, Value>>, file: &FileAttachment) -> Result<Form, Failure> {
    let handle = tokio::fs::File::open(&file.path).await.map_err(|e| {
        Failure::Transport(format!("cannot read attachment {}: {e}", file.path.display()))
    })?;
    let part = Part::stream(reqwest::Body::wrap_stream(ReaderStream::new(handle)))
        .file_name(file.file_name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| Failure::Transport(format!("invalid attachment MIME type: {e}")))?;

    let mut form = Form::new().part("file", part);
    if let Some(fields) = body {
        for (name, value) in fields {
            form = form.text(name.clone(), form_value(value));
        }
    }
    Ok(form)
}

/// Strings go over the wire as-is; everything else in its JSON form.
fn form_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DaypiaClient;
    use crate::trace::{StaticTraceContextProvider, TraceContext};
    use serde_json::json;

    fn client() -> DaypiaClient {
        DaypiaClient::builder()
            .api_key("test-api-key")
            .build()
            .unwrap()
    }

    fn traced_client(context: TraceContext) -> DaypiaClient {
        DaypiaClient::builder()
            .api_key("test-api-key")
            .trace_provider(StaticTraceContextProvider::shared(context))
            .build()
            .unwrap()
    }

    #[test]
    fn form_values_render_naturally() {
        assert_eq!(form_value(&json!("plain text")), "plain text");
        assert_eq!(form_value(&json!([])), "[]");
        assert_eq!(form_value(&json!(5)), "5");
        assert_eq!(form_value(&json!(true)), "true");
        assert_eq!(form_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn json_requests_carry_bearer_and_json_content_type() {
        let headers = client().request_headers(false);
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer test-api-key");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn multipart_requests_leave_content_type_to_the_encoder() {
        let headers = client().request_headers(true);
        assert!(headers.get(CONTENT_TYPE).is_none());
        assert!(headers.get(AUTHORIZATION).is_some());
    }

    #[test]
    fn no_provider_means_no_trace_headers() {
        let headers = client().request_headers(false);
        assert!(headers.get(TRACE_ID_HEADER).is_none());
        assert!(headers.get(PARENT_SPAN_ID_HEADER).is_none());
    }

    #[test]
    fn valid_context_is_propagated() {
        let headers = traced_client(TraceContext::new(
            "4bf92f3577b34da6a3ce929d0e0e4736",
            "00f067aa0ba902b7",
        ))
        .request_headers(false);
        assert_eq!(
            headers.get(TRACE_ID_HEADER).unwrap(),
            "4bf92f3577b34da6a3ce929d0e0e4736"
        );
        assert_eq!(headers.get(PARENT_SPAN_ID_HEADER).unwrap(), "00f067aa0ba902b7");
    }

    #[test]
    fn invalid_context_is_silently_skipped() {
        let headers = traced_client(TraceContext::new(
            "00000000000000000000000000000000",
            "0000000000000000",
        ))
        .request_headers(false);
        assert!(headers.get(TRACE_ID_HEADER).is_none());
        assert!(headers.get(PARENT_SPAN_ID_HEADER).is_none());
    }
}
