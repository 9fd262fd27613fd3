//! Axum route handlers for the campaign library.

use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::library::SavedCampaign;
use crate::models::campaign::GeneratedCampaign;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveRequest {
    pub campaign: GeneratedCampaign,
    pub brand: String,
    pub industry: String,
}

#[derive(Debug, Serialize)]
pub struct FavoriteResponse {
    pub id: Uuid,
    pub favorite: bool,
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Saved campaign {id} not found"))
}

/// GET /api/v1/library
///
/// Flat id → record map of every saved campaign.
pub async fn handle_list(
    State(state): State<AppState>,
) -> Result<Json<HashMap<Uuid, SavedCampaign>>, AppError> {
    Ok(Json(state.store.list().await?))
}

/// POST /api/v1/library
///
/// Saving a campaign whose name is already saved for the brand returns the existing record.
pub async fn handle_save(
    State(state): State<AppState>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SavedCampaign>, AppError> {
    if request.brand.trim().is_empty() {
        return Err(AppError::Validation("brand cannot be empty".to_string()));
    }
    if request.campaign.campaign_name.trim().is_empty() {
        return Err(AppError::Validation("campaignName cannot be empty".to_string()));
    }

    let saved = state
        .store
        .save(request.campaign, &request.brand, &request.industry)
        .await?;
    Ok(Json(saved))
}

/// GET /api/v1/library/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedCampaign>, AppError> {
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// DELETE /api/v1/library/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.remove(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PATCH /api/v1/library/:id/favorite
pub async fn handle_toggle_favorite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FavoriteResponse>, AppError> {
    let favorite = state
        .store
        .toggle_favorite(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(FavoriteResponse { id, favorite }))
}
