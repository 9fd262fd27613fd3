use serde::Deserialize;
use tracing::{info, warn};

use crate::bravery::scorer::assess_campaign;
use crate::generation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::campaign::{CampaignEvaluation, GeneratedCampaign};

pub const FALLBACK_VERDICT: &str = "Evaluation failed. Default scores applied.";

/// References listed in the juror prompt.
const PROMPT_REFERENCES: usize = 3;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JurorScores {
    insight_sharpness: f64,
    idea_originality: f64,
    execution_potential: f64,
    award_potential: f64,
    #[serde(default)]
    final_verdict: String,
}

fn juror_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(1.0, 10.0)
    } else {
        5.0
    }
}

pub fn build_evaluation_prompt(campaign: &GeneratedCampaign, brand: &str, industry: &str) -> String {
    let mut lines = vec![
        format!("Name: {}", campaign.campaign_name),
        format!("Key Message: {}", campaign.key_message),
        format!("Creative Strategy: {}", campaign.creative_strategy.join("; ")),
        format!("Execution Plan: {}", campaign.execution_plan.join("; ")),
    ];
    if !campaign.creative_insights.is_empty() {
        lines.push(format!("Creative Insights: {}", campaign.creative_insights.join("; ")));
    }
    if !campaign.emotional_appeal.is_empty() {
        lines.push(format!("Emotional Appeal: {}", campaign.emotional_appeal.join(", ")));
    }
    let call_to_action = campaign
        .call_to_action
        .as_deref()
        .or(campaign.consumer_interaction.as_deref())
        .unwrap_or("None");
    lines.push(format!("Call to Action: {call_to_action}"));

    let references = campaign
        .reference_campaigns
        .iter()
        .take(PROMPT_REFERENCES)
        .map(|r| format!("- {} ({}, {}): {}", r.name, r.brand, r.year, r.key_message))
        .collect::<Vec<_>>();
    let references = if references.is_empty() {
        "None".to_string()
    } else {
        references.join("\n")
    };

    EVALUATION_PROMPT_TEMPLATE
        .replace("{brand}", brand)
        .replace("{industry}", industry)
        .replace("{campaign}", &lines.join("\n"))
        .replace("{references}", &references)
}

/// Juror-style LLM scores merged with the heuristic bravery assessment.
///
/// The bravery part never depends on the model, so it is attached even when the
/// juror pass fails and the neutral fallback scores are used.
pub async fn evaluate_campaign(
    llm: &dyn TextGenerator,
    campaign: &GeneratedCampaign,
    brand: &str,
    industry: &str,
) -> CampaignEvaluation {
    let prompt = build_evaluation_prompt(campaign, brand, industry);

    let mut evaluation = match generate_json::<JurorScores>(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(scores) => CampaignEvaluation {
            insight_sharpness: juror_score(scores.insight_sharpness),
            idea_originality: juror_score(scores.idea_originality),
            execution_potential: juror_score(scores.execution_potential),
            award_potential: juror_score(scores.award_potential),
            final_verdict: scores.final_verdict,
            ..CampaignEvaluation::fallback("")
        },
        Err(e) => {
            warn!("Evaluation failed, applying default scores: {e}");
            CampaignEvaluation::fallback(FALLBACK_VERDICT)
        }
    };

    let bravery = assess_campaign(campaign);
    evaluation.creative_bravery = bravery.display_score();
    evaluation.bravery_suggestions = bravery.suggestions;
    evaluation.bravery_breakdown = bravery.breakdown;

    info!(
        "Evaluated '{}': award potential {}, bravery {}",
        campaign.campaign_name, evaluation.award_potential, evaluation.creative_bravery
    );

    evaluation
}
