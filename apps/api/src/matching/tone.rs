//! Sentiment and tone classification: maps emotional-appeal and objective tags
//! to coarse labels used by the sentiment and tone dimensions of similarity scoring.
//!
//! All tables are fixed keyword lists matched by case-insensitive substring.

use serde::{Deserialize, Serialize};

/// Coarse sentiment of a tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

/// Coarse creative tone derived from objectives + emotional appeal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Playful,
    Inspirational,
    Empathetic,
    Provocative,
    Informative,
}

impl Tone {
    const ALL: [Tone; 5] = [
        Tone::Playful,
        Tone::Inspirational,
        Tone::Empathetic,
        Tone::Provocative,
        Tone::Informative,
    ];

    fn index(self) -> usize {
        match self {
            Tone::Playful => 0,
            Tone::Inspirational => 1,
            Tone::Empathetic => 2,
            Tone::Provocative => 3,
            Tone::Informative => 4,
        }
    }
}

const POSITIVE_KEYWORDS: &[&str] = &[
    "joy",
    "happ",
    "hope",
    "inspir",
    "empower",
    "pride",
    "love",
    "humor",
    "humour",
    "fun",
    "excite",
    "optimis",
    "belong",
    "warmth",
    "celebrat",
    "liberat",
    "trust",
    "relief",
    "self-worth",
];

const NEGATIVE_KEYWORDS: &[&str] = &[
    "fear",
    "anger",
    "outrage",
    "guilt",
    "sad",
    "shame",
    "grief",
    "urgen",
    "frustrat",
    "anxi",
    "disgust",
    "defian",
    "rebel",
];

/// Tone keyword families, in tie-break order.
const TONE_KEYWORDS: &[(Tone, &[&str])] = &[
    (
        Tone::Playful,
        &["humor", "humour", "fun", "mischief", "playful", "joy", "surprise"],
    ),
    (
        Tone::Inspirational,
        &["inspir", "empower", "pride", "hope", "aspiration", "loyalty", "achievement"],
    ),
    (
        Tone::Empathetic,
        &["empathy", "vulnerab", "love", "belong", "compassion", "care", "grief", "sad"],
    ),
    (
        Tone::Provocative,
        &["outrage", "anger", "defian", "rebel", "shock", "disgust", "policy change", "urgen"],
    ),
    (
        Tone::Informative,
        &["awareness", "education", "sales", "conversion", "trust", "curiosity", "download"],
    ),
];

/// Symmetric tone-compatibility matrix (rows/cols in `Tone::ALL` order).
/// Identical tones score 10; adjacent tones receive partial credit.
const TONE_COMPATIBILITY: [[u32; 5]; 5] = [
    //  Play Insp Emp  Prov Info
    [10, 6, 4, 6, 2],  // Playful
    [6, 10, 7, 5, 4],  // Inspirational
    [4, 7, 10, 3, 5],  // Empathetic
    [6, 5, 3, 10, 2],  // Provocative
    [2, 4, 5, 2, 10],  // Informative
];

fn count_hits(tags: &[String], keywords: &[&str]) -> usize {
    tags.iter()
        .map(|t| t.to_lowercase())
        .filter(|t| keywords.iter().any(|k| t.contains(k)))
        .count()
}

/// Classifies a set of emotional-appeal tags. Ties (including no hits) are neutral.
pub fn determine_sentiment(emotional_appeal: &[String]) -> Sentiment {
    let positive = count_hits(emotional_appeal, POSITIVE_KEYWORDS);
    let negative = count_hits(emotional_appeal, NEGATIVE_KEYWORDS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Sentiment dimension: equal labels → 10; exactly one side neutral → 5; else 0.
pub fn sentiment_score(brief: Sentiment, entry: Sentiment) -> u32 {
    if brief == entry {
        10
    } else if brief == Sentiment::Neutral || entry == Sentiment::Neutral {
        5
    } else {
        0
    }
}

/// Picks the tone with the most keyword hits across objectives and emotions.
/// Ties resolve in table order; no hits at all defaults to `Informative`.
pub fn determine_tone(objectives: &[String], emotional_appeal: &[String]) -> Tone {
    let mut best = Tone::Informative;
    let mut best_hits = 0;

    for (tone, keywords) in TONE_KEYWORDS {
        let hits = count_hits(objectives, keywords) + count_hits(emotional_appeal, keywords);
        if hits > best_hits {
            best = *tone;
            best_hits = hits;
        }
    }

    best
}

/// Tone dimension, read from the compatibility matrix. Range 0–10.
pub fn tone_compatibility(a: Tone, b: Tone) -> u32 {
    TONE_COMPATIBILITY[a.index()][b.index()]
}
