use axum::{
    extract::{Path, State},
    Extension, Json,
};

use ratfinder_core::EnrichedSite;

use crate::middleware::RequestId;

use super::{map_aggregator_error, ApiError, AppState};

/// `GET /api/rat/{lat}/{lng}`: sites within the search radius, nearest first.
///
/// The body is a bare JSON array, the shape browser clients already consume.
pub(super) async fn list_nearby_sites(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((lat, lng)): Path<(String, String)>,
) -> Result<Json<Vec<EnrichedSite>>, ApiError> {
    let sites = state
        .aggregator
        .nearby(&lat, &lng)
        .await
        .map_err(|e| map_aggregator_error(req_id.0, &e))?;

    Ok(Json(sites))
}
