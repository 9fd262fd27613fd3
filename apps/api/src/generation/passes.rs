//! Refinement passes run on a parsed campaign draft.
//!
//! Every pass is best-effort: a failed or unreadable LLM answer leaves the
//! campaign as it was and the pipeline carries on.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{info, warn};

use crate::generation::prompts::{
    CREATIVE_DIRECTOR_PROMPT_TEMPLATE, DISRUPTIVE_PROMPT_TEMPLATE,
    NARRATIVE_ANCHOR_PROMPT_TEMPLATE, STORYTELLING_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{CREATIVE_SYSTEM, JSON_ONLY_SYSTEM};
use crate::llm_client::{generate_json, TextGenerator};
use crate::models::campaign::GeneratedCampaign;

/// First-person or struggle language that already anchors a story in a person.
static RE_NARRATIVE_ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bI\s(felt|remember|watched|lost)\b|\bthey\s(struggled|sacrificed|resisted|confessed)\b")
        .unwrap()
});

pub const NO_CHANGES: &str = "No changes made";

/// Campaign JSON as shown to the model: no references, no prior evaluation.
fn prompt_view(campaign: &GeneratedCampaign) -> String {
    let mut view = campaign.clone();
    view.reference_campaigns.clear();
    view.evaluation = None;
    view.cd_modifications.clear();
    serde_json::to_string_pretty(&view).unwrap_or_default()
}

// ────────────────────────────────────────────────────────────────────────────
// Creative director pass
// ────────────────────────────────────────────────────────────────────────────

/// Asks a "creative director" to sharpen the draft and records what changed in
/// `cd_modifications`. On failure the original comes back with a `Failed: ...` entry.
pub async fn creative_director_pass(
    llm: &dyn TextGenerator,
    campaign: GeneratedCampaign,
) -> GeneratedCampaign {
    let prompt = CREATIVE_DIRECTOR_PROMPT_TEMPLATE.replace("{campaign}", &prompt_view(&campaign));

    let improved: GeneratedCampaign = match generate_json(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(improved) => improved,
        Err(e) => {
            warn!("Creative director pass failed: {e}");
            let mut original = campaign;
            original.cd_modifications = vec![format!("Failed: {e}")];
            return original;
        }
    };

    let modifications = modifications_between(&campaign, &improved);
    if modifications.is_empty() {
        info!("Creative director pass made no meaningful changes");
        let mut original = campaign;
        original.cd_modifications = vec![NO_CHANGES.to_string()];
        return original;
    }

    info!("Creative director pass: {} modifications", modifications.len());

    // The pass may rewrite content but never drops what the pipeline attached.
    let mut result = improved;
    result.reference_campaigns = campaign.reference_campaigns;
    if result.emotional_appeal.is_empty() {
        result.emotional_appeal = campaign.emotional_appeal;
    }
    if result.execution_plan.is_empty() {
        result.execution_plan = campaign.execution_plan;
    }
    result.evaluation = None;
    result.cd_modifications = modifications;
    result
}

/// Renames, new execution steps and changed insights, in that order.
pub fn modifications_between(original: &GeneratedCampaign, modified: &GeneratedCampaign) -> Vec<String> {
    let mut changes = Vec::new();

    if original.campaign_name != modified.campaign_name {
        changes.push(format!(
            "Renamed: \"{}\" → \"{}\"",
            original.campaign_name, modified.campaign_name
        ));
    }

    for execution in &modified.execution_plan {
        if !original.execution_plan.contains(execution) {
            changes.push(format!("Added: {execution}"));
        }
    }

    if original.creative_insights != modified.creative_insights {
        changes.push("Enhanced insights".to_string());
    }

    changes
}

// ────────────────────────────────────────────────────────────────────────────
// Disruptive pass
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisruptivePatch {
    key_message: Option<String>,
    pr_headline: Option<String>,
    viral_hook: Option<String>,
    viral_element: Option<String>,
    call_to_action: Option<String>,
    consumer_interaction: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Injects one creative twist. Only non-empty fields of the answer are merged.
pub async fn disruptive_pass(
    llm: &dyn TextGenerator,
    mut campaign: GeneratedCampaign,
) -> GeneratedCampaign {
    let prompt = DISRUPTIVE_PROMPT_TEMPLATE.replace("{campaign}", &prompt_view(&campaign));

    let patch: DisruptivePatch = match generate_json(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(patch) => patch,
        Err(e) => {
            warn!("Disruptive pass failed, keeping campaign as is: {e}");
            return campaign;
        }
    };

    if let Some(key_message) = non_empty(patch.key_message) {
        campaign.key_message = key_message;
    }
    if let Some(v) = non_empty(patch.pr_headline) {
        campaign.pr_headline = Some(v);
    }
    if let Some(v) = non_empty(patch.viral_hook) {
        campaign.viral_hook = Some(v);
    }
    if let Some(v) = non_empty(patch.viral_element) {
        campaign.viral_element = Some(v);
    }
    if let Some(v) = non_empty(patch.call_to_action) {
        campaign.call_to_action = Some(v);
    }
    if let Some(v) = non_empty(patch.consumer_interaction) {
        campaign.consumer_interaction = Some(v);
    }

    campaign
}

// ────────────────────────────────────────────────────────────────────────────
// Storytelling
// ────────────────────────────────────────────────────────────────────────────

/// Case-film voiceover for the campaign. `None` when the call fails.
pub async fn generate_storytelling(
    llm: &dyn TextGenerator,
    campaign: &GeneratedCampaign,
    brand: &str,
) -> Option<String> {
    let executions = campaign
        .execution_plan
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = STORYTELLING_PROMPT_TEMPLATE
        .replace("{brand}", brand)
        .replace("{campaign_name}", &campaign.campaign_name)
        .replace("{key_message}", &campaign.key_message)
        .replace("{executions}", &executions);

    match llm.generate(&prompt, CREATIVE_SYSTEM).await {
        Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Ok(_) => {
            warn!("Storytelling pass returned empty text");
            None
        }
        Err(e) => {
            warn!("Storytelling pass failed: {e}");
            None
        }
    }
}

pub fn needs_narrative_anchor(storytelling: &str) -> bool {
    !RE_NARRATIVE_ANCHOR.is_match(storytelling)
}

#[derive(Debug, Deserialize)]
struct NarrativeResponse {
    narrative: String,
}

/// Prepends a short human narrative to the storytelling when it has none.
/// Returns `None` when no anchor is needed or the pass failed.
pub async fn inject_narrative_anchor(
    llm: &dyn TextGenerator,
    campaign: &GeneratedCampaign,
) -> Option<String> {
    let storytelling = campaign.storytelling.as_deref().unwrap_or_default();
    if !needs_narrative_anchor(storytelling) {
        return None;
    }

    let prompt = NARRATIVE_ANCHOR_PROMPT_TEMPLATE
        .replace("{campaign_name}", &campaign.campaign_name)
        .replace("{key_message}", &campaign.key_message)
        .replace("{storytelling}", storytelling);

    match generate_json::<NarrativeResponse>(llm, &prompt, JSON_ONLY_SYSTEM).await {
        Ok(response) if !response.narrative.trim().is_empty() => {
            let narrative = response.narrative.trim();
            if storytelling.is_empty() {
                Some(narrative.to_string())
            } else {
                Some(format!("{narrative}\n\n{storytelling}"))
            }
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Narrative anchor injection failed: {e}");
            None
        }
    }
}
