use chrono::Datelike;
use serde::Deserialize;
use tracing::{info, warn};

use crate::generation::prompts::INSIGHT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json, TextGenerator};
use crate::models::brief::Brief;

pub const MAX_INSIGHTS: usize = 3;

/// Used when the model answered but its answer could not be read.
pub const FALLBACK_INSIGHTS: [&str; 3] = [
    "The audience seeks authentic connections in an increasingly digital world.",
    "They value brands that understand their specific needs rather than generic solutions.",
    "They want to feel seen and validated through their brand choices.",
];

#[derive(Debug, Deserialize)]
struct InsightResponse {
    #[serde(default)]
    tension: Option<String>,
    insights: Vec<String>,
}

pub fn build_insight_prompt(brief: &Brief) -> String {
    INSIGHT_PROMPT_TEMPLATE
        .replace("{year}", &chrono::Utc::now().year().to_string())
        .replace("{audience}", &brief.target_audience.join(", "))
        .replace("{brand}", &brief.brand)
        .replace("{industry}", &brief.industry)
        .replace("{objectives}", &brief.objectives.join(", "))
        .replace("{emotions}", &brief.emotional_appeal.join(", "))
}

/// Cultural-tension insight pass.
///
/// Never fails: an unreadable answer yields [`FALLBACK_INSIGHTS`], a failed call
/// yields no insights and the campaign prompt simply omits the block.
pub async fn generate_creative_insights(llm: &dyn TextGenerator, brief: &Brief) -> Vec<String> {
    let prompt = build_insight_prompt(brief);

    let raw = match llm.generate(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Insight generation failed, continuing without insights: {e}");
            return vec![];
        }
    };

    let parsed = extract_json(&raw)
        .ok()
        .and_then(|value| serde_json::from_value::<InsightResponse>(value).ok());

    match parsed {
        Some(response) => {
            if let Some(tension) = &response.tension {
                info!("Cultural tension: {tension}");
            }
            response
                .insights
                .into_iter()
                .filter(|i| !i.trim().is_empty())
                .take(MAX_INSIGHTS)
                .collect()
        }
        None => {
            warn!("Could not parse insight response, using fallback insights");
            FALLBACK_INSIGHTS.iter().map(|s| s.to_string()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::ScriptedGenerator;
    use crate::models::brief::fixtures::brief;

    const MARKER: &str = "Cultural Tension Mapper";

    #[tokio::test]
    async fn test_insights_capped_at_three() {
        let llm = ScriptedGenerator::new().respond(
            MARKER,
            r#"{"tension": "Always on, never heard", "insights": ["a", "b", "c", "d"]}"#,
        );
        let insights = generate_creative_insights(&llm, &brief("Retail", &["Gen Z"], &[])).await;
        assert_eq!(insights, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_unparseable_answer_uses_fallback() {
        let llm = ScriptedGenerator::new().respond(MARKER, "I'd rather write a poem.");
        let insights = generate_creative_insights(&llm, &brief("Retail", &[], &[])).await;
        assert_eq!(insights.len(), 3);
        assert_eq!(insights[0], FALLBACK_INSIGHTS[0]);
    }

    #[tokio::test]
    async fn test_missing_insights_key_uses_fallback() {
        let llm = ScriptedGenerator::new().respond(MARKER, r#"{"tension": "only this"}"#);
        let insights = generate_creative_insights(&llm, &brief("Retail", &[], &[])).await;
        assert_eq!(insights[2], FALLBACK_INSIGHTS[2]);
    }

    #[tokio::test]
    async fn test_failed_call_yields_nothing() {
        let llm = ScriptedGenerator::new().fail(MARKER, 503);
        let insights = generate_creative_insights(&llm, &brief("Retail", &[], &[])).await;
        assert!(insights.is_empty());
    }

    #[test]
    fn test_prompt_mentions_brief() {
        let prompt = build_insight_prompt(&brief("Banking", &["Students", "Parents"], &["Trust"]));
        assert!(prompt.contains("**Industry:** Banking"));
        assert!(prompt.contains("Students, Parents"));
        assert!(!prompt.contains("{year}"));
    }
}
