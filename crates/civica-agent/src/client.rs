//! HTTP client for the external agent service.
//!
//! Two layers: `forward_*` calls relay raw JSON for the gateway, the typed
//! calls decode into `civica_common` DTOs for Rust callers.

use std::path::Path;
use std::time::Duration;

use civica_common::{
    CivicaError, DocumentMetadata, ErrorBody, IngestResponse, QueryRequest, QueryResponse,
    Result, StatusResponse,
};
use civica_config::AgentConfig;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::debug;

pub const QUERY_FAILED: &str = "Query failed";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const STATUS_FAILED: &str = "Failed to fetch status";

/// Outcome of a call that reached the agent service.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// 2xx with a JSON body.
    Success(Value),
    /// Non-2xx. `body` is the decoded JSON error payload, if it was read and parsed.
    Failure { status: u16, body: Option<Value> },
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Status code and `{"error": ...}` body to relay for a failure.
    pub fn error_payload(&self, fallback: &str) -> Option<(u16, ErrorBody)> {
        match self {
            Self::Success(_) => None,
            Self::Failure { status, body } => {
                Some((*status, ErrorBody::from_upstream(body.as_ref(), fallback)))
            }
        }
    }

    pub fn into_result(self, fallback: &str) -> Result<Value> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure { status, body } => Err(CivicaError::Upstream {
                status,
                message: ErrorBody::from_upstream(body.as_ref(), fallback).text(),
            }),
        }
    }
}

/// Agent service client. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct AgentClient {
    base_url: String,
    client: Client,
}

impl AgentClient {
    pub fn new(config: &AgentConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(&config.base_url, client))
    }

    pub fn with_client(base_url: &str, client: Client) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string(), client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Raw pass-through ────────────────────────────────────────────────────

    /// `POST /query` with `body` sent unchanged.
    pub async fn forward_query(&self, body: &Value) -> Result<UpstreamReply> {
        let url = self.url("/query");
        debug!(%url, "Forwarding query");
        let resp = self.client.post(&url).json(body).send().await?;
        read_reply(resp, true).await
    }

    /// `GET /status`. The body of a failed reply is not read.
    pub async fn forward_status(&self) -> Result<UpstreamReply> {
        let url = self.url("/status");
        debug!(%url, "Fetching status");
        let resp = self.client.get(&url).send().await?;
        read_reply(resp, false).await
    }

    /// `POST /ingest` with a prepared multipart form.
    pub async fn forward_ingest(&self, form: Form) -> Result<UpstreamReply> {
        let url = self.url("/ingest");
        debug!(%url, "Forwarding ingest");
        let resp = self.client.post(&url).multipart(form).send().await?;
        read_reply(resp, true).await
    }

    // ── Typed calls ─────────────────────────────────────────────────────────

    /// Check if the agent service is up.
    pub async fn health_check(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let body = serde_json::to_value(request)?;
        let value = self.forward_query(&body).await?.into_result(QUERY_FAILED)?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let value = self.forward_status().await?.into_result(STATUS_FAILED)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Upload a local file for ingestion.
    pub async fn ingest_file(
        &self,
        path: &Path,
        metadata: Option<&DocumentMetadata>,
    ) -> Result<IngestResponse> {
        let bytes = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CivicaError::InvalidRequest(format!("{} has no file name", path.display())))?
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(filename.clone())
            .mime_str(guess_mime(&filename))?;
        let mut form = Form::new().part("file", part);
        if let Some(meta) = metadata {
            form = form.text("metadata", serde_json::to_string(meta)?);
        }

        let value = self.forward_ingest(form).await?.into_result(UPLOAD_FAILED)?;
        Ok(serde_json::from_value(value)?)
    }
}

async fn read_reply(resp: Response, read_failure_body: bool) -> Result<UpstreamReply> {
    let status = resp.status();
    if status.is_success() {
        let value: Value = resp.json().await?;
        return Ok(UpstreamReply::Success(value));
    }
    // A non-JSON error body is treated as carrying no detail
    let body = if read_failure_body {
        resp.json::<Value>().await.ok()
    } else {
        None
    };
    Ok(UpstreamReply::Failure { status: status.as_u16(), body })
}

/// MIME type for an upload, from the file extension.
pub fn guess_mime(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf")  => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt")  => "text/plain",
        Some("md")   => "text/markdown",
        Some("csv")  => "text/csv",
        _            => "application/octet-stream",
    }
}
