//! Transport DTOs exchanged with the agent service and the browser.
//! Every agent-facing type keeps unknown fields in `extra` so a value
//! survives a decode/encode pass unchanged.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), ..Default::default() }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_agents(mut self, agents: Vec<String>) -> Self {
        self.agents = if agents.is_empty() { None } else { Some(agents) };
        self
    }
}

/// A document passage cited by an answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default = "unknown_agent")]
    pub agent_used: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub fallback: bool,
    #[serde(default)]
    pub raw_llm_output: Option<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unknown_agent() -> String { "unknown".to_string() }

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Metadata sent alongside an uploaded document (multipart `metadata` field).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetadata {
    pub source_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestResponse {
    pub status: String,
    pub ingested: u64,
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Usage counters reported by the agent service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    #[serde(default)]
    pub documents: u64,
    #[serde(default)]
    pub queries_today: u64,
    #[serde(default)]
    pub documents_ingested: u64,
    #[serde(default)]
    pub uptime_seconds: f64,
    #[serde(default)]
    pub use_mock_llm: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Complaint {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub ward: String,
    pub date: String,
    pub description: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Errors on the wire
// ---------------------------------------------------------------------------

/// Body of every error reply the gateway produces: `{"error": ...}`.
/// `error` is normally a string, but an upstream `detail` is relayed as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: Value,
}

impl ErrorBody {
    pub fn message(msg: impl Into<String>) -> Self {
        Self { error: Value::String(msg.into()) }
    }

    /// Build the body from an upstream failure payload: its `detail`
    /// when present and non-null, otherwise `fallback`.
    pub fn from_upstream(body: Option<&Value>, fallback: &str) -> Self {
        match body.and_then(|b| b.get("detail")) {
            Some(detail) if !is_blank(detail) => Self { error: detail.clone() },
            _ => Self::message(fallback),
        }
    }

    /// Human-readable rendering of `error`.
    pub fn text(&self) -> String {
        match &self.error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

/// `null`, `false`, `0` and `""` carry no usable detail.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
