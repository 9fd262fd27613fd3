//! Versioned pattern tables for the bravery heuristic.
//!
//! Patterns run against lowercased text. Each pattern counts once, however many
//! times it matches. Bump the table version whenever a pattern or weight changes
//! so stored assessments can be traced back to the table that produced them.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const BRAVERY_TABLE_VERSION: u32 = 1;
pub const CLICHE_TABLE_VERSION: u32 = 1;

/// Points subtracted per matched cliché pattern.
pub const CLICHE_PENALTY: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PatternCategory {
    PhysicalIntervention,
    InstitutionalChallenge,
    PersonalRisk,
    CulturalTension,
    Cliche,
}

/// Uncompiled table row.
#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub id: &'static str,
    pub pattern: &'static str,
    pub category: PatternCategory,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct WeightedPattern {
    pub id: &'static str,
    pub regex: Regex,
    pub category: PatternCategory,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct PatternTable {
    pub version: u32,
    pub patterns: Vec<WeightedPattern>,
}

impl PatternTable {
    pub fn compile(version: u32, specs: &[PatternSpec]) -> Result<Self, regex::Error> {
        let patterns = specs
            .iter()
            .map(|spec| {
                Ok(WeightedPattern {
                    id: spec.id,
                    regex: Regex::new(spec.pattern)?,
                    category: spec.category,
                    weight: spec.weight,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self { version, patterns })
    }

    /// Patterns that match `text` at least once, in table order.
    pub fn matching<'t>(&'t self, text: &'t str) -> impl Iterator<Item = &'t WeightedPattern> + 't {
        self.patterns.iter().filter(move |p| p.regex.is_match(text))
    }
}

pub const BRAVERY_SPECS: &[PatternSpec] = &[
    PatternSpec {
        id: "physical-occupation",
        pattern: r"occupy|occupation|sit-ins?\b|takeover|take over|vandaliz|blockade|interventions?\b",
        category: PatternCategory::PhysicalIntervention,
        weight: 2.0,
    },
    PatternSpec {
        id: "physical-extreme",
        pattern: r"chained themselves|hunger strike|lock-in|trespass",
        category: PatternCategory::PhysicalIntervention,
        weight: 3.0,
    },
    PatternSpec {
        id: "institutional-authority",
        pattern: r"\b(government|ministry|police|universit(y|ies)|board of (trustees|directors)|parliament|congress|senate|courts?|regulators?|church)\b",
        category: PatternCategory::InstitutionalChallenge,
        weight: 3.0,
    },
    PatternSpec {
        id: "personal-exposure",
        pattern: r"confess|expos(e|ed|es|ing|ure)|\bsecrets?\b|vulnerab",
        category: PatternCategory::PersonalRisk,
        weight: 1.5,
    },
    PatternSpec {
        id: "personal-stakes",
        pattern: r"risking (their|your|our) (jobs?|careers?|reputations?)|whistleblow|put (themselves|yourself|ourselves) on the line",
        category: PatternCategory::PersonalRisk,
        weight: 2.0,
    },
    PatternSpec {
        id: "cultural-structural",
        pattern: r"inequality|privilege|racism|sexism|patriarchy|injustice",
        category: PatternCategory::CulturalTension,
        weight: 4.0,
    },
    PatternSpec {
        id: "cultural-taboo",
        pattern: r"taboo|stigma|censorship|gentrification|class divide|pay gap|gender gap",
        category: PatternCategory::CulturalTension,
        weight: 3.0,
    },
];

pub const CLICHE_SPECS: &[PatternSpec] = &[
    PatternSpec {
        id: "cliche-hashtag",
        pattern: r"\bhashtag\b|#[a-z0-9_]+",
        category: PatternCategory::Cliche,
        weight: CLICHE_PENALTY,
    },
    PatternSpec {
        id: "cliche-mural",
        pattern: r"\bmural\b",
        category: PatternCategory::Cliche,
        weight: CLICHE_PENALTY,
    },
    PatternSpec {
        id: "cliche-petition",
        pattern: r"\bpetition\b",
        category: PatternCategory::Cliche,
        weight: CLICHE_PENALTY,
    },
    PatternSpec {
        id: "cliche-viral-challenge",
        pattern: r"viral challenge",
        category: PatternCategory::Cliche,
        weight: CLICHE_PENALTY,
    },
];

pub static BRAVERY_PATTERNS: LazyLock<PatternTable> =
    LazyLock::new(|| PatternTable::compile(BRAVERY_TABLE_VERSION, BRAVERY_SPECS).unwrap());

pub static CLICHE_PATTERNS: LazyLock<PatternTable> =
    LazyLock::new(|| PatternTable::compile(CLICHE_TABLE_VERSION, CLICHE_SPECS).unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_compile() {
        assert_eq!(BRAVERY_PATTERNS.patterns.len(), BRAVERY_SPECS.len());
        assert_eq!(CLICHE_PATTERNS.patterns.len(), CLICHE_SPECS.len());
    }

    #[test]
    fn test_pattern_ids_are_unique() {
        let mut ids: Vec<&str> = BRAVERY_SPECS
            .iter()
            .chain(CLICHE_SPECS)
            .map(|s| s.id)
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_weights_stay_in_documented_ranges() {
        for spec in BRAVERY_SPECS {
            let range = match spec.category {
                PatternCategory::PhysicalIntervention => 2.0..=3.0,
                PatternCategory::InstitutionalChallenge => 3.0..=3.0,
                PatternCategory::PersonalRisk => 1.5..=2.0,
                PatternCategory::CulturalTension => 3.0..=4.0,
                PatternCategory::Cliche => panic!("cliché in bravery table: {}", spec.id),
            };
            assert!(range.contains(&spec.weight), "{} weight out of range", spec.id);
        }
    }

    #[test]
    fn test_cliche_patterns_are_singular() {
        let text = "avoid petitions and murals";
        assert_eq!(CLICHE_PATTERNS.matching(text).count(), 0);
        assert_eq!(CLICHE_PATTERNS.matching("sign the petition").count(), 1);
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let specs = [PatternSpec {
            id: "broken",
            pattern: "(unclosed",
            category: PatternCategory::Cliche,
            weight: 1.0,
        }];
        assert!(PatternTable::compile(1, &specs).is_err());
    }

    #[test]
    fn test_institutional_pattern_ignores_bank_and_ceo() {
        let text = "occupy bank branches. our ceo lies";
        assert!(BRAVERY_PATTERNS
            .matching(text)
            .all(|p| p.category != PatternCategory::InstitutionalChallenge));
    }
}
