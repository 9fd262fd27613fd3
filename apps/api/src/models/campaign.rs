use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::bravery::scorer::BraveryBreakdown;
use crate::models::catalog::CatalogEntry;

/// A generated campaign concept as returned by the LLM and enriched by the pipeline.
///
/// Only `campaignName` and `keyMessage` are mandatory; every other field tolerates
/// being absent in model output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCampaign {
    pub campaign_name: String,
    pub key_message: String,
    #[serde(default)]
    pub creative_strategy: Vec<String>,
    #[serde(default)]
    pub execution_plan: Vec<String>,
    #[serde(default)]
    pub expected_outcomes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viral_hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viral_element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_headline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_interaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<String>,
    #[serde(default)]
    pub emotional_appeal: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_insights")]
    pub creative_insights: Vec<String>,
    #[serde(default)]
    pub reference_campaigns: Vec<CatalogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<CampaignEvaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storytelling: Option<String>,
    /// Change log written by the creative-director pass.
    #[serde(default, rename = "_cdModifications")]
    pub cd_modifications: Vec<String>,
}

/// Juror-style scores plus the heuristic bravery assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignEvaluation {
    pub insight_sharpness: f64,
    pub idea_originality: f64,
    pub execution_potential: f64,
    pub award_potential: f64,
    /// Bravery on the 0–10 display scale.
    #[serde(default)]
    pub creative_bravery: f64,
    pub final_verdict: String,
    #[serde(default)]
    pub bravery_breakdown: BraveryBreakdown,
    #[serde(default)]
    pub bravery_suggestions: Vec<String>,
}

impl CampaignEvaluation {
    /// Neutral scores used when the juror pass cannot be parsed.
    pub fn fallback(verdict: &str) -> Self {
        Self {
            insight_sharpness: 5.0,
            idea_originality: 5.0,
            execution_potential: 5.0,
            award_potential: 5.0,
            creative_bravery: 5.0,
            final_verdict: verdict.to_string(),
            bravery_breakdown: BraveryBreakdown::default(),
            bravery_suggestions: vec![],
        }
    }
}

/// Models return insights either as plain strings or as
/// `{ "surfaceInsight": ..., ... }` objects. Both collapse to strings.
fn deserialize_insights<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get("surfaceInsight")
                .or_else(|| map.get("insight"))
                .and_then(|s| s.as_str())
                .map(str::to_string),
            _ => None,
        })
        .collect())
}
