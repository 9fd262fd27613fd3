//! Cleanup helpers applied to a finished campaign.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::campaign::GeneratedCampaign;

/// Leading "3." / "2)" and "Execution 4:" prefixes the model likes to add.
static RE_STEP_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+[.)]\s*)?(execution\s*\d+[:.]?\s*)?").unwrap());
static RE_SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static RE_SLUG_SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());
static RE_HASHTAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#[\w-]+").unwrap());

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strips model-added numbering, capitalizes and renumbers as "1. ", "2. ", ...
/// Steps that end up empty are dropped.
pub fn clean_execution_steps(steps: &[String]) -> Vec<String> {
    steps
        .iter()
        .map(|step| RE_STEP_PREFIX.replace(step.trim(), "").trim().to_string())
        .filter(|step| !step.is_empty())
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, capitalize(&step)))
        .collect()
}

/// Names every mandatory field that is missing or blank.
pub fn validate_campaign_structure(campaign: &GeneratedCampaign) -> Result<(), Vec<&'static str>> {
    let mut missing = Vec::new();
    if campaign.campaign_name.trim().is_empty() {
        missing.push("campaignName");
    }
    if campaign.key_message.trim().is_empty() {
        missing.push("keyMessage");
    }
    if campaign.execution_plan.iter().all(|s| s.trim().is_empty()) {
        missing.push("executionPlan");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

/// Unique hashtags across the campaign's copy, in order of first appearance.
pub fn extract_hashtags(campaign: &GeneratedCampaign) -> Vec<String> {
    let mut sources: Vec<&str> = vec![campaign.campaign_name.as_str(), campaign.key_message.as_str()];
    sources.extend(campaign.execution_plan.iter().map(String::as_str));
    sources.extend(
        [
            &campaign.viral_hook,
            &campaign.viral_element,
            &campaign.call_to_action,
            &campaign.consumer_interaction,
            &campaign.pr_headline,
        ]
        .into_iter()
        .filter_map(|s| s.as_deref()),
    );

    let mut tags: Vec<String> = Vec::new();
    for source in sources {
        for m in RE_HASHTAG.find_iter(source) {
            let tag = m.as_str().to_string();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }
    tags
}

/// URL-safe slug: lowercase, punctuation dropped, whitespace and underscores as dashes.
pub fn campaign_slug(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let stripped = RE_SLUG_STRIP.replace_all(&lower, "");
    let dashed = RE_SLUG_SEPARATORS.replace_all(&stripped, "-");
    dashed.trim_matches('-').to_string()
}
