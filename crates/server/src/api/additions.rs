//! Additions API handlers.

use axum::{
    extract::{OriginalUri, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use additions_core::{Acquisition, AcquisitionError, AcquisitionQuery};

use super::pagination::{Page, PageRequest};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for submitting a new download
#[derive(Debug, Deserialize)]
pub struct CreateAdditionBody {
    /// Magnet URI (or torrent URL) handed to the torrent client
    pub magnet_link: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

fn error_response(err: AcquisitionError) -> ApiError {
    let status = match &err {
        AcquisitionError::InvalidFilterField(_) | AcquisitionError::InvalidLink(_) => {
            StatusCode::BAD_REQUEST
        }
        AcquisitionError::ClientUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        AcquisitionError::DirectoryUnreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// List downloading and completed additions, filtered, ordered and paginated
pub async fn list_additions(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Page<Acquisition>>, ApiError> {
    let (page, params) = PageRequest::extract(params, state.pagination()).map_err(bad_request)?;

    let query = AcquisitionQuery::from_params(
        params.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    )
    .map_err(error_response)?;

    let additions = state
        .service()
        .list_acquisitions(&query)
        .await
        .map_err(error_response)?;
    debug!(
        count = additions.len(),
        limit = page.limit,
        offset = page.offset,
        "Listing additions"
    );

    Ok(Json(page.paginate(additions, uri.path(), &params)))
}

/// Submit a magnet link to the torrent client
pub async fn create_addition(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateAdditionBody>,
) -> Result<(StatusCode, Json<Acquisition>), ApiError> {
    let acquisition = state
        .service()
        .create_acquisition(&body.magnet_link)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(acquisition)))
}
