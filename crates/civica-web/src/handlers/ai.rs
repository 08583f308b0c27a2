//! Agent proxy routes: chat query, document upload, and dashboard status.
//!
//! Each handler forwards one call to the agent service and relays the JSON
//! reply. Upstream failures keep the upstream status code; everything else
//! becomes a 500 carrying the error message.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use civica_agent::{UpstreamReply, QUERY_FAILED, STATUS_FAILED, UPLOAD_FAILED};
use civica_common::{CivicaError, ErrorBody};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// `POST /api/ai/query`
pub async fn query(State(state): State<SharedState>, body: Bytes) -> ApiResult<Json<Value>> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        error!("Error querying AI: {}", e);
        ApiError::internal(e)
    })?;
    let reply = state
        .agent
        .forward_query(&payload)
        .await
        .map_err(|e| logged("Error querying AI", e))?;
    relay(reply, QUERY_FAILED)
}

/// `POST /api/ai/upload`
pub async fn upload(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<Value>> {
    let multipart = multipart.map_err(|rejection| {
        error!("Error uploading document: {}", rejection.body_text());
        ApiError::internal(rejection.body_text())
    })?;

    let form = rebuild_form(multipart).await.map_err(|e| {
        error!("Error uploading document: {}", e);
        e
    })?;

    let reply = state
        .agent
        .forward_ingest(form)
        .await
        .map_err(|e| logged("Error uploading document", e))?;
    relay(reply, UPLOAD_FAILED)
}

/// `GET /api/ai/status`
pub async fn status(State(state): State<SharedState>) -> ApiResult<Json<Value>> {
    let reply = state
        .agent
        .forward_status()
        .await
        .map_err(|e| logged("Error fetching status", e))?;
    relay(reply, STATUS_FAILED)
}

fn relay(reply: UpstreamReply, fallback: &str) -> ApiResult<Json<Value>> {
    match reply {
        UpstreamReply::Success(value) => Ok(Json(value)),
        UpstreamReply::Failure { status, body } => Err(ApiError::upstream(
            status,
            ErrorBody::from_upstream(body.as_ref(), fallback),
        )),
    }
}

fn logged(context: &str, err: CivicaError) -> ApiError {
    error!("{}: {}", context, err);
    err.into()
}

/// Copy every incoming multipart field into an outgoing form, keeping the
/// field name, filename and content type.
async fn rebuild_form(mut multipart: Multipart) -> ApiResult<Form> {
    let mut form = Form::new();
    while let Some(field) = multipart.next_field().await.map_err(ApiError::internal)? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(ApiError::internal)?;

        let mut part = Part::bytes(data.to_vec());
        if let Some(file_name) = file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            part = part.mime_str(&content_type).map_err(ApiError::internal)?;
        }
        form = form.part(name, part);
    }
    Ok(form)
}
