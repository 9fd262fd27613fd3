//! Similarity Scorer: multi-dimensional match between a brief and one catalog entry.
//!
//! Pure and deterministic: the same (brief, entry) pair always yields the same vector.

use serde::{Deserialize, Serialize};

use crate::matching::style::score_campaign_style;
use crate::matching::tone::{
    determine_sentiment, determine_tone, sentiment_score, tone_compatibility, Sentiment, Tone,
};
use crate::models::brief::Brief;
use crate::models::catalog::CatalogEntry;

/// Exact case-insensitive industry match.
pub const INDUSTRY_EXACT: u32 = 5;
/// Substring match in either direction.
pub const INDUSTRY_PARTIAL: u32 = 3;
/// Points per matched tag in the audience / objectives / emotion dimensions.
pub const TAG_MATCH_POINTS: u32 = 5;
/// Cap for the audience / objectives / emotion dimensions.
pub const TAG_DIMENSION_CAP: u32 = 15;

/// Per-dimension scores for one (brief, entry) pair. Every field is non-negative.
///
/// Bounds: industry ∈ {0, 3, 5}; audience, objectives, emotion ∈ [0, 15];
/// style ∈ [0, 10]; sentiment ∈ {0, 5, 10}; tone ∈ [0, 10].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub industry: u32,
    pub audience: u32,
    pub objectives: u32,
    pub emotion: u32,
    pub style: u32,
    pub sentiment: u32,
    pub tone: u32,
}

/// Named dimension accessor, used by the selector to iterate uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Industry,
    Audience,
    Objectives,
    Emotion,
    Style,
    Sentiment,
    Tone,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Industry,
        Dimension::Audience,
        Dimension::Objectives,
        Dimension::Emotion,
        Dimension::Style,
        Dimension::Sentiment,
        Dimension::Tone,
    ];
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Industry => self.industry,
            Dimension::Audience => self.audience,
            Dimension::Objectives => self.objectives,
            Dimension::Emotion => self.emotion,
            Dimension::Style => self.style,
            Dimension::Sentiment => self.sentiment,
            Dimension::Tone => self.tone,
        }
    }

    pub fn total(&self) -> u32 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }
}

/// A catalog entry together with its score vector against the current brief.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCampaign<'a> {
    pub entry: &'a CatalogEntry,
    pub scores: DimensionScores,
}

impl ScoredCampaign<'_> {
    pub fn total(&self) -> u32 {
        self.scores.total()
    }
}

/// Labels derived once per brief so scoring a whole catalog does not recompute them.
#[derive(Debug, Clone, Copy)]
struct BriefProfile {
    sentiment: Sentiment,
    tone: Tone,
}

impl BriefProfile {
    fn of(brief: &Brief) -> Self {
        Self {
            sentiment: determine_sentiment(&brief.emotional_appeal),
            tone: determine_tone(&brief.objectives, &brief.emotional_appeal),
        }
    }
}

/// Scores one entry against a brief.
pub fn score_entry(brief: &Brief, entry: &CatalogEntry) -> DimensionScores {
    score_with_profile(brief, &BriefProfile::of(brief), entry)
}

/// Scores every catalog entry, preserving catalog order.
pub fn score_catalog<'a>(brief: &Brief, entries: &'a [CatalogEntry]) -> Vec<ScoredCampaign<'a>> {
    let profile = BriefProfile::of(brief);
    entries
        .iter()
        .map(|entry| ScoredCampaign {
            entry,
            scores: score_with_profile(brief, &profile, entry),
        })
        .collect()
}

fn score_with_profile(brief: &Brief, profile: &BriefProfile, entry: &CatalogEntry) -> DimensionScores {
    let style = match brief.campaign_style {
        Some(style) => {
            let text = format!("{} {}", entry.strategy, entry.key_message).to_lowercase();
            score_campaign_style(&text, style)
        }
        None => 0,
    };

    let entry_sentiment = determine_sentiment(&entry.emotional_appeal);
    let entry_tone = determine_tone(&entry.objectives, &entry.emotional_appeal);

    DimensionScores {
        industry: industry_score(&brief.industry, &entry.industry),
        audience: tag_overlap_score(&brief.target_audience, &entry.target_audience),
        objectives: tag_overlap_score(&brief.objectives, &entry.objectives),
        emotion: tag_overlap_score(&brief.emotional_appeal, &entry.emotional_appeal),
        style,
        sentiment: sentiment_score(profile.sentiment, entry_sentiment),
        tone: tone_compatibility(profile.tone, entry_tone),
    }
}

/// 5 for a case-insensitive exact match, 3 when one contains the other, else 0.
pub fn industry_score(brief_industry: &str, entry_industry: &str) -> u32 {
    let a = brief_industry.trim().to_lowercase();
    let b = entry_industry.trim().to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        INDUSTRY_EXACT
    } else if a.contains(&b) || b.contains(&a) {
        INDUSTRY_PARTIAL
    } else {
        0
    }
}

/// Counts brief tags that overlap (substring, either direction, case-insensitive)
/// with any entry tag. Each match is worth 5 points, capped at 15.
pub fn tag_overlap_score(brief_tags: &[String], entry_tags: &[String]) -> u32 {
    let entry_lower: Vec<String> = entry_tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    let matches = brief_tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| {
            entry_lower
                .iter()
                .any(|e| e.contains(tag.as_str()) || tag.contains(e.as_str()))
        })
        .count() as u32;

    (matches * TAG_MATCH_POINTS).min(TAG_DIMENSION_CAP)
}
