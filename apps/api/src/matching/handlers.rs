//! Axum route handlers for reference matching and the catalog.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::match_rng;
use crate::matching::matcher::{find_similar_campaigns, thematic_matches};
use crate::matching::themes::{group_by_themes, ThemeGroups};
use crate::models::brief::Brief;
use crate::models::catalog::CatalogEntry;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemesRequest {
    /// Campaigns to group. Empty groups the whole catalog.
    #[serde(default)]
    pub campaign_ids: Vec<String>,
    /// When present, thematic matches are drawn from this brief's references.
    #[serde(default)]
    pub brief: Option<Brief>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemesResponse<'a> {
    pub groups: ThemeGroups<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thematic_matches: Option<Vec<&'a CatalogEntry>>,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse<'a> {
    pub total: usize,
    pub campaigns: &'a [CatalogEntry],
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/campaigns/match
///
/// Scores the catalog against a brief and returns the diverse reference set
/// with per-dimension scores and theme groups.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(brief): Json<Brief>,
) -> Result<Json<Value>, AppError> {
    brief.validate().map_err(AppError::Validation)?;

    let mut rng = match_rng(state.config.match_seed);
    let outcome = find_similar_campaigns(&brief, state.catalog.entries(), &mut rng);

    let body = serde_json::to_value(&outcome)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize matches: {e}")))?;
    Ok(Json(body))
}

/// POST /api/v1/campaigns/themes
///
/// Groups the given campaigns (or the whole catalog) into theme buckets. With a
/// brief, also returns the institutional-rebellion references for that brief
/// plus wildcards.
pub async fn handle_themes(
    State(state): State<AppState>,
    Json(request): Json<ThemesRequest>,
) -> Result<Json<Value>, AppError> {
    if let Some(brief) = &request.brief {
        brief.validate().map_err(AppError::Validation)?;
    }
    let entries = state.catalog.entries();

    let selected: Vec<&CatalogEntry> = if request.campaign_ids.is_empty() {
        entries.iter().collect()
    } else {
        let found: Vec<&CatalogEntry> = entries
            .iter()
            .filter(|e| request.campaign_ids.contains(&e.id))
            .collect();
        if found.is_empty() {
            return Err(AppError::NotFound(
                "None of the requested campaigns exist in the catalog".to_string(),
            ));
        }
        found
    };

    let thematic = request.brief.as_ref().map(|brief| {
        let mut rng = match_rng(state.config.match_seed);
        thematic_matches(brief, entries, &mut rng)
    });
    let response = ThemesResponse {
        groups: group_by_themes(&selected),
        thematic_matches: thematic,
    };

    let body = serde_json::to_value(&response)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize themes: {e}")))?;
    Ok(Json(body))
}

/// GET /api/v1/catalog
pub async fn handle_catalog(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let response = CatalogResponse {
        total: state.catalog.len(),
        campaigns: state.catalog.entries(),
    };
    let body = serde_json::to_value(&response)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize catalog: {e}")))?;
    Ok(Json(body))
}
