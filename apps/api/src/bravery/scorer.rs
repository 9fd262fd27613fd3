//! Bravery Heuristic Scorer.
//!
//! Score = Σ weights of matched bravery patterns − Σ penalties of matched clichés,
//! floored at 0. There is no upper bound; `display_score` clamps for presentation.

use serde::{Deserialize, Serialize};

use crate::bravery::patterns::{PatternCategory, PatternTable, BRAVERY_PATTERNS, CLICHE_PATTERNS};
use crate::models::campaign::GeneratedCampaign;

/// Upper bound of the presentation scale.
pub const DISPLAY_MAX: f64 = 10.0;

/// Which bravery categories the text touched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BraveryBreakdown {
    pub physical_intervention: bool,
    pub institutional_challenge: bool,
    pub cultural_tension: bool,
    pub personal_risk: bool,
}

impl BraveryBreakdown {
    fn mark(&mut self, category: PatternCategory) {
        match category {
            PatternCategory::PhysicalIntervention => self.physical_intervention = true,
            PatternCategory::InstitutionalChallenge => self.institutional_challenge = true,
            PatternCategory::CulturalTension => self.cultural_tension = true,
            PatternCategory::PersonalRisk => self.personal_risk = true,
            PatternCategory::Cliche => {}
        }
    }

    /// One concrete nudge per missing category.
    pub fn suggestions(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.physical_intervention {
            out.push(
                "Add a physical intervention: occupy, take over or block a real-world space."
                    .to_string(),
            );
        }
        if !self.institutional_challenge {
            out.push("Name and challenge a specific institution or authority.".to_string());
        }
        if !self.cultural_tension {
            out.push(
                "Anchor the idea in a real cultural tension such as inequality, privilege or taboo."
                    .to_string(),
            );
        }
        if !self.personal_risk {
            out.push(
                "Ask people to put something personal at stake: a confession, a secret, a risk."
                    .to_string(),
            );
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BraveryAssessment {
    /// Raw net score, never negative.
    pub score: f64,
    pub breakdown: BraveryBreakdown,
    pub suggestions: Vec<String>,
    pub matched_patterns: Vec<String>,
    pub cliches: Vec<String>,
    pub table_version: u32,
}

impl BraveryAssessment {
    pub fn display_score(&self) -> f64 {
        display_score(self.score)
    }
}

/// Clamps a raw score to 0–10, rounded to one decimal.
pub fn display_score(score: f64) -> f64 {
    let clamped = score.clamp(0.0, DISPLAY_MAX);
    (clamped * 10.0).round() / 10.0
}

/// Scores arbitrary text with the bundled tables. Lowercases before matching.
pub fn assess_text(text: &str) -> BraveryAssessment {
    assess_with(text, &BRAVERY_PATTERNS, &CLICHE_PATTERNS)
}

pub fn assess_with(text: &str, bravery: &PatternTable, cliches: &PatternTable) -> BraveryAssessment {
    let text = text.to_lowercase();
    let mut breakdown = BraveryBreakdown::default();
    let mut matched_patterns = Vec::new();
    let mut raw = 0.0;

    for pattern in bravery.matching(&text) {
        raw += pattern.weight;
        breakdown.mark(pattern.category);
        matched_patterns.push(pattern.id.to_string());
    }

    let mut matched_cliches = Vec::new();
    for pattern in cliches.matching(&text) {
        raw -= pattern.weight;
        matched_cliches.push(pattern.id.to_string());
    }

    BraveryAssessment {
        score: f64::max(raw, 0.0),
        suggestions: breakdown.suggestions(),
        breakdown,
        matched_patterns,
        cliches: matched_cliches,
        table_version: bravery.version,
    }
}

/// Creative content of a campaign, minus references and prior evaluations, so
/// the catalog's own language never inflates a score.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CampaignText<'a> {
    campaign_name: &'a str,
    key_message: &'a str,
    creative_strategy: &'a [String],
    execution_plan: &'a [String],
    viral_hook: &'a Option<String>,
    viral_element: &'a Option<String>,
    pr_headline: &'a Option<String>,
    consumer_interaction: &'a Option<String>,
    call_to_action: &'a Option<String>,
    storytelling: &'a Option<String>,
    creative_insights: &'a [String],
}

impl<'a> From<&'a GeneratedCampaign> for CampaignText<'a> {
    fn from(c: &'a GeneratedCampaign) -> Self {
        Self {
            campaign_name: &c.campaign_name,
            key_message: &c.key_message,
            creative_strategy: &c.creative_strategy,
            execution_plan: &c.execution_plan,
            viral_hook: &c.viral_hook,
            viral_element: &c.viral_element,
            pr_headline: &c.pr_headline,
            consumer_interaction: &c.consumer_interaction,
            call_to_action: &c.call_to_action,
            storytelling: &c.storytelling,
            creative_insights: &c.creative_insights,
        }
    }
}

pub fn assess_campaign(campaign: &GeneratedCampaign) -> BraveryAssessment {
    let text = serde_json::to_string(&CampaignText::from(campaign)).unwrap_or_default();
    assess_text(&text)
}
