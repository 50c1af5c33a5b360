//! Farmer profile handlers

use axum::{extract::State, Json};
use shared::FarmerRecord;

use crate::error::AppResult;
use crate::middleware::CurrentSession;
use crate::AppState;

/// Current farmer, re-read from the store
pub async fn get_current_farmer(
    State(state): State<AppState>,
    current: CurrentSession,
) -> AppResult<Json<FarmerRecord>> {
    let farmer = state.store.find_by_id(current.farmer_id).await?;
    Ok(Json(farmer))
}
