//! Availability search handler

use axum::{extract::State, Json};
use chrono::Utc;

use crate::dto::scheduling::{AvailabilityQuery, AvailabilityResponse};
use crate::extractors::ValidatedQuery;
use crate::{error::ApiError, AppState};

/// `GET /api/availabilities?insurance=<payer id>`
///
/// Optional `datePreset`, `date`, `times`, `timeStart`/`timeEnd`, `soonest`
/// and `nextAvailable` narrow the result. Date presets resolve against the
/// current UTC date.
pub async fn search_availabilities(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<AvailabilityQuery>,
) -> Result<Json<Vec<AvailabilityResponse>>, ApiError> {
    let (insurance, filter) = query.into_search(Utc::now().date_naive())?;

    let slots = state
        .service
        .search_availabilities(&insurance, &filter)
        .await
        .map_err(|e| ApiError::from_scheduling("Error fetching availabilities", e))?;

    Ok(Json(slots.into_iter().map(AvailabilityResponse::from).collect()))
}
