//! Axum route handlers for the Generation API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::generator::{
    generate_campaign, GenerateOptions, GenerateRequest, GenerateResponse,
};
use crate::generation::trends::{generate_cultural_trends, CulturalTrend, Headline};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TrendsRequest {
    pub headlines: Vec<Headline>,
}

#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub total: usize,
    pub trends: Vec<CulturalTrend>,
}

/// POST /api/v1/campaigns/generate
///
/// Runs the full pipeline for a brief. The result is saved to the library
/// unless the request sets `"save": false`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let options = GenerateOptions {
        seed: state.config.match_seed,
        save: request.save.unwrap_or(true),
    };

    let trends = state.trends.snapshot().await;

    let response = generate_campaign(
        state.llm.as_ref(),
        &state.catalog,
        state.store.as_ref(),
        &request.brief,
        &trends,
        options,
    )
    .await?;

    Ok(Json(response))
}

/// POST /api/v1/trends
///
/// Derives cultural trends from headlines and adds them to the cache used by
/// campaign generation. Returns only the new trends.
pub async fn handle_generate_trends(
    State(state): State<AppState>,
    Json(request): Json<TrendsRequest>,
) -> Result<Json<TrendsResponse>, AppError> {
    if request.headlines.iter().all(|h| h.title.trim().is_empty()) {
        return Err(AppError::Validation(
            "headlines must contain at least one non-empty title".to_string(),
        ));
    }

    let trends = generate_cultural_trends(state.llm.as_ref(), &request.headlines).await;
    state.trends.extend(&trends).await;

    Ok(Json(TrendsResponse {
        total: trends.len(),
        trends,
    }))
}

/// GET /api/v1/trends
pub async fn handle_list_trends(State(state): State<AppState>) -> Json<TrendsResponse> {
    let trends = state.trends.snapshot().await;
    Json(TrendsResponse {
        total: trends.len(),
        trends,
    })
}

/// DELETE /api/v1/trends
pub async fn handle_clear_trends(State(state): State<AppState>) -> StatusCode {
    let cleared = state.trends.clear().await;
    info!("Cleared {cleared} cultural trends");
    StatusCode::NO_CONTENT
}
