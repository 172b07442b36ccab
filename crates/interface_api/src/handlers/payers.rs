//! Insurance payer handlers

use axum::{extract::State, Json};

use crate::dto::scheduling::PayerResponse;
use crate::{error::ApiError, AppState};

/// `GET /api/insurance-payers`
pub async fn list_payers(State(state): State<AppState>) -> Result<Json<Vec<PayerResponse>>, ApiError> {
    let payers = state
        .service
        .list_payers()
        .await
        .map_err(|e| ApiError::from_scheduling("Error fetching insurance payers", e))?;

    Ok(Json(payers.into_iter().map(PayerResponse::from).collect()))
}
