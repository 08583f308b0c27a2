use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use civica_common::{CivicaError, ErrorBody};

/// Gateway error type. Every variant renders as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The agent service answered with a failure; its status is relayed.
    #[error("Upstream error {status}: {}", .body.text())]
    Upstream { status: StatusCode, body: ErrorBody },

    /// Anything else: network failures, bad bodies, unreadable files.
    #[error("{0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn upstream(status: u16, body: ErrorBody) -> Self {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
        Self::Upstream { status, body }
    }

    pub fn internal(msg: impl ToString) -> Self {
        Self::Internal(msg.to_string())
    }
}

impl From<CivicaError> for ApiError {
    fn from(err: CivicaError) -> Self {
        match err {
            CivicaError::Upstream { status, message } => {
                Self::upstream(status, ErrorBody::message(message))
            }
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Upstream { status, body } => (status, body),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(msg)),
        };
        (status, Json(body)).into_response()
    }
}
