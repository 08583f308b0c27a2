//! Complaints feed for the map view.

use axum::extract::{Query, State};
use axum::Json;
use civica_common::{load_complaints, Complaint, ComplaintFilter};
use tracing::error;

use crate::error::{ApiError, ApiResult};
use crate::state::SharedState;

/// `GET /api/complaints?ward=&status=&type=`
pub async fn complaints(
    State(state): State<SharedState>,
    Query(filter): Query<ComplaintFilter>,
) -> ApiResult<Json<Vec<Complaint>>> {
    let path = &state.config.data.complaints_csv;
    let all = load_complaints(path).await.map_err(|e| {
        error!("Error fetching complaints from {:?}: {}", path, e);
        ApiError::from(e)
    })?;
    Ok(Json(filter.apply(all)))
}
