use axum::Json;
use serde::{Deserialize, Serialize};

use crate::bravery::scorer::{assess_campaign, assess_text, BraveryAssessment};
use crate::errors::AppError;
use crate::models::campaign::GeneratedCampaign;

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub campaign: Option<GeneratedCampaign>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub assessment: BraveryAssessment,
    pub display_score: f64,
}

/// POST /api/v1/bravery/score
///
/// Scores free text or a full campaign. A campaign wins when both are given.
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Result<Json<ScoreResponse>, AppError> {
    let assessment = match (&request.campaign, request.text.as_deref()) {
        (Some(campaign), _) => assess_campaign(campaign),
        (None, Some(text)) if !text.trim().is_empty() => assess_text(text),
        _ => {
            return Err(AppError::Validation(
                "Provide either non-empty 'text' or a 'campaign'".to_string(),
            ))
        }
    };

    Ok(Json(ScoreResponse {
        display_score: assessment.display_score(),
        assessment,
    }))
}
