//! Cultural trends: headlines in, LLM-derived trends out.
//!
//! Trends are cached process-wide and fed into campaign prompts, three at a
//! time. Trends tagged with emerging-tech platforms (AI, AR, VR, metaverse) are
//! only used when nothing else is available.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::generation::prompts::TREND_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{extract_json, TextGenerator};

/// Trends per campaign prompt.
pub const TRENDS_PER_PROMPT: usize = 3;

pub const MIN_TRENDS: usize = 3;
pub const MAX_TRENDS: usize = 10;

pub const UNCATEGORIZED: &str = "Uncategorized";

/// Categories the model is asked to choose from.
pub const TREND_CATEGORIES: [&str; 7] = [
    "Belonging & Identity",
    "Digital Life",
    "Sustainability",
    "Mental Health",
    "Social Fads",
    "Finance",
    "Innovation",
];

/// Off-list categories the model tends to invent, folded back into the list.
const CATEGORY_REMAP: &[(&str, &str)] = &[
    ("identity", "Belonging & Identity"),
    ("belonging", "Belonging & Identity"),
    ("youth culture", "Belonging & Identity"),
    ("online behavior", "Digital Life"),
    ("technology", "Innovation"),
    ("ai", "Innovation"),
    ("uncategorized", "Other"),
];

const EMERGING_TECH_TAGS: [&str; 3] = ["ai", "ar", "vr"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    pub title: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalTrend {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub source: String,
    pub platform_tags: Vec<String>,
    pub category: String,
    pub added_on: DateTime<Utc>,
}

impl CulturalTrend {
    fn is_emerging_tech(&self) -> bool {
        self.platform_tags.iter().any(|tag| {
            let tag = tag.to_lowercase();
            tag.contains("metaverse")
                || tag
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| EMERGING_TECH_TAGS.contains(&word))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmTrend {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    platform_tags: Vec<String>,
}

/// "Reddit" when the headlines come from subreddits, "NewsAPI" otherwise.
pub fn source_type(headlines: &[Headline]) -> &'static str {
    match headlines.first() {
        Some(h) if h.source.contains("r/") => "Reddit",
        _ => "NewsAPI",
    }
}

/// Half the headline count, kept within 3–10.
pub fn trend_count(headline_count: usize) -> usize {
    (headline_count / 2).clamp(MIN_TRENDS, MAX_TRENDS)
}

pub fn remap_category(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).filter(|c| !c.is_empty()).unwrap_or(UNCATEGORIZED);
    let key = raw.to_lowercase();
    CATEGORY_REMAP
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn build_trend_prompt(headlines: &[Headline]) -> String {
    let formatted = headlines
        .iter()
        .map(|h| format!("- \"{}\" ({})", h.title, h.source))
        .collect::<Vec<_>>()
        .join("\n");
    TREND_PROMPT_TEMPLATE
        .replace("{count}", &trend_count(headlines.len()).to_string())
        .replace("{headlines}", &formatted)
}

/// One trend per headline, used when the model cannot be reached or read.
pub fn fallback_trends(headlines: &[Headline], source: &str) -> Vec<CulturalTrend> {
    let now = Utc::now();
    headlines
        .iter()
        .map(|h| CulturalTrend {
            id: Uuid::new_v4(),
            title: h.title.clone(),
            description: format!("This trend is based on the headline \"{}\" from {source}.", h.title),
            source: source.to_string(),
            platform_tags: vec![source.to_string()],
            category: UNCATEGORIZED.to_string(),
            added_on: now,
        })
        .collect()
}

/// Turns headlines into cultural trends. Never fails: any LLM or parse
/// problem falls back to [`fallback_trends`].
pub async fn generate_cultural_trends(
    llm: &dyn TextGenerator,
    headlines: &[Headline],
) -> Vec<CulturalTrend> {
    if headlines.is_empty() {
        return vec![];
    }

    let source = source_type(headlines);
    info!("Generating cultural trends from {} {} headlines", headlines.len(), source);

    let raw = match llm.generate(&build_trend_prompt(headlines), JSON_ONLY_SYSTEM).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Trend generation failed, using headlines as trends: {e}");
            return fallback_trends(headlines, source);
        }
    };

    let parsed = extract_json(&raw)
        .ok()
        .and_then(|value| serde_json::from_value::<Vec<LlmTrend>>(value).ok());

    let Some(parsed) = parsed else {
        warn!("Could not parse {source} trend response, using headlines as trends");
        return fallback_trends(headlines, source);
    };

    let now = Utc::now();
    let trends: Vec<CulturalTrend> = parsed
        .into_iter()
        .filter(|t| !t.title.trim().is_empty())
        .map(|t| CulturalTrend {
            id: Uuid::new_v4(),
            category: remap_category(t.category.as_deref()),
            title: t.title.trim().to_string(),
            description: t.description,
            source: source.to_string(),
            platform_tags: t.platform_tags,
            added_on: now,
        })
        .collect();

    if trends.is_empty() {
        warn!("Trend response had no usable trends, using headlines as trends");
        return fallback_trends(headlines, source);
    }
    trends
}

/// Picks up to `count` trends at random, preferring trends that are not tied to
/// emerging-tech platforms.
pub fn select_relevant_trends<R: Rng + ?Sized>(
    trends: &[CulturalTrend],
    count: usize,
    rng: &mut R,
) -> Vec<CulturalTrend> {
    let (mut emerging, mut grounded): (Vec<&CulturalTrend>, Vec<&CulturalTrend>) =
        trends.iter().partition(|t| t.is_emerging_tech());
    grounded.shuffle(rng);
    emerging.shuffle(rng);

    grounded
        .into_iter()
        .chain(emerging)
        .take(count)
        .cloned()
        .collect()
}

/// Single-line rendering for the "Market Trends" line of the campaign prompt.
pub fn format_trends(trends: &[CulturalTrend]) -> String {
    trends
        .iter()
        .map(|t| {
            if t.platform_tags.is_empty() {
                format!("{}: {}", t.title, t.description)
            } else {
                format!("{} ({}): {}", t.title, t.platform_tags.join(", "), t.description)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Process-wide trend cache. Newly generated trends are appended.
#[derive(Debug, Default)]
pub struct TrendCache {
    trends: RwLock<Vec<CulturalTrend>>,
}

impl TrendCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn extend(&self, trends: &[CulturalTrend]) {
        self.trends.write().await.extend_from_slice(trends);
    }

    pub async fn snapshot(&self) -> Vec<CulturalTrend> {
        self.trends.read().await.clone()
    }

    pub async fn clear(&self) -> usize {
        let mut trends = self.trends.write().await;
        let cleared = trends.len();
        trends.clear();
        cleared
    }
}
