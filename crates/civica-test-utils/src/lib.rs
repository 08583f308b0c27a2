//! Shared testing utilities for the Civica workspace.
//!
//! `MockAgent` stands in for the agent service: an axum server on an
//! ephemeral port that answers with canned replies and records every
//! request it receives.

use std::collections::HashMap;
use std::io::Write;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request as seen by the mock agent.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("recorded body is not JSON")
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
struct CannedReply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

struct MockState {
    replies: HashMap<(Method, String), CannedReply>,
    recorded: Mutex<Vec<RecordedRequest>>,
}

#[derive(Default)]
pub struct MockAgentBuilder {
    replies: HashMap<(Method, String), CannedReply>,
}

impl MockAgentBuilder {
    /// Reply to `method path` with `status` and a JSON body.
    pub fn json(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.replies.insert(
            (method, path.to_string()),
            CannedReply {
                status: StatusCode::from_u16(status).expect("valid status"),
                content_type: "application/json",
                body: body.to_string(),
            },
        );
        self
    }

    /// Reply to `method path` with `status` and a plain-text body.
    pub fn text(mut self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.replies.insert(
            (method, path.to_string()),
            CannedReply {
                status: StatusCode::from_u16(status).expect("valid status"),
                content_type: "text/plain",
                body: body.to_string(),
            },
        );
        self
    }

    pub async fn start(self) -> MockAgent {
        let state = Arc::new(MockState { replies: self.replies, recorded: Mutex::new(Vec::new()) });
        let app = Router::new().fallback(respond).with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock agent");
        let addr = listener.local_addr().expect("mock agent addr");
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        MockAgent { addr, state, task }
    }
}

pub struct MockAgent {
    addr: SocketAddr,
    state: Arc<MockState>,
    task: JoinHandle<()>,
}

impl MockAgent {
    pub fn builder() -> MockAgentBuilder {
        MockAgentBuilder::default()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.recorded.lock().expect("mock agent lock").clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one upstream request, got {requests:?}");
        requests.into_iter().next().expect("one request")
    }
}

impl Drop for MockAgent {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    state.recorded.lock().expect("mock agent lock").push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        content_type: headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.replies.get(&(method, path)) {
        Some(reply) => (
            reply.status,
            [(header::CONTENT_TYPE, reply.content_type)],
            reply.body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"detail":"Not Found"}"#,
        )
            .into_response(),
    }
}

/// A base URL on which nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind probe");
    let addr = listener.local_addr().expect("probe addr");
    drop(listener);
    format!("http://{addr}")
}

/// Collect a response body and decode it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("read body");
    serde_json::from_slice(&bytes).expect("response body is not JSON")
}

/// Complaints CSV with the three rows the map page ships with.
pub const SAMPLE_COMPLAINTS_CSV: &str = "\
id,lat,lon,type,ward,date,description,status
1,12.9716,77.5946,Pothole,Ward 12,2024-11-15,Large pothole on main road,open
2,12.9750,77.5980,Street Light,Ward 12,2024-11-20,Street light not working,open
3,12.9700,77.5920,Water Supply,Ward 11,2024-11-25,Low water pressure,resolved
";

/// Write `content` to a temporary CSV file that lives as long as the handle.
pub fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp csv");
    file.write_all(content.as_bytes()).expect("write temp csv");
    file
}

/// Build a `multipart/form-data` body by hand. Returns `(content_type, body)`.
pub fn multipart_body(parts: &[MultipartField<'_>]) -> (String, Body) {
    const BOUNDARY: &str = "civica-test-boundary";
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, file_name
                )
                .as_bytes(),
            ),
            None => out.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name).as_bytes(),
            ),
        }
        if let Some(ct) = part.content_type {
            out.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(part.data);
        out.extend_from_slice(b"\r\n");
    }
    out.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), Body::from(out))
}

pub struct MultipartField<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}
