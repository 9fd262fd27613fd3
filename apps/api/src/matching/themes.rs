//! Thematic Grouping: sorts reference campaigns into four fixed theme buckets.
//!
//! Buckets are independent: one campaign can land in several, or in none.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::catalog::CatalogEntry;

static RE_INSTITUTIONAL_REBELLION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)protest|activism|petition").unwrap());
static RE_PERSONAL_VULNERABILITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)confess|vulnerable|truth").unwrap());
static RE_CULTURAL_TENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)culture|society|inequality|privilege").unwrap());
static RE_SYSTEM_HACKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)subvert|glitch|hack").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeBucket {
    InstitutionalRebellion,
    PersonalVulnerability,
    CulturalTension,
    SystemHacking,
}

/// Which campaign field a bucket's pattern is applied to.
#[derive(Debug, Clone, Copy)]
enum ThemeField {
    KeyMessage,
    Strategy,
}

impl ThemeBucket {
    pub const ALL: [ThemeBucket; 4] = [
        ThemeBucket::InstitutionalRebellion,
        ThemeBucket::PersonalVulnerability,
        ThemeBucket::CulturalTension,
        ThemeBucket::SystemHacking,
    ];

    fn rule(self) -> (ThemeField, &'static LazyLock<Regex>) {
        match self {
            ThemeBucket::InstitutionalRebellion => {
                (ThemeField::KeyMessage, &RE_INSTITUTIONAL_REBELLION)
            }
            ThemeBucket::PersonalVulnerability => {
                (ThemeField::Strategy, &RE_PERSONAL_VULNERABILITY)
            }
            ThemeBucket::CulturalTension => (ThemeField::Strategy, &RE_CULTURAL_TENSION),
            ThemeBucket::SystemHacking => (ThemeField::Strategy, &RE_SYSTEM_HACKING),
        }
    }

    pub fn matches(self, entry: &CatalogEntry) -> bool {
        let (field, regex) = self.rule();
        let text = match field {
            ThemeField::KeyMessage => &entry.key_message,
            ThemeField::Strategy => &entry.strategy,
        };
        regex.is_match(text)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeGroups<'a> {
    pub institutional_rebellion: Vec<&'a CatalogEntry>,
    pub personal_vulnerability: Vec<&'a CatalogEntry>,
    pub cultural_tension: Vec<&'a CatalogEntry>,
    pub system_hacking: Vec<&'a CatalogEntry>,
}

impl<'a> ThemeGroups<'a> {
    pub fn bucket(&self, bucket: ThemeBucket) -> &[&'a CatalogEntry] {
        match bucket {
            ThemeBucket::InstitutionalRebellion => &self.institutional_rebellion,
            ThemeBucket::PersonalVulnerability => &self.personal_vulnerability,
            ThemeBucket::CulturalTension => &self.cultural_tension,
            ThemeBucket::SystemHacking => &self.system_hacking,
        }
    }

    fn bucket_mut(&mut self, bucket: ThemeBucket) -> &mut Vec<&'a CatalogEntry> {
        match bucket {
            ThemeBucket::InstitutionalRebellion => &mut self.institutional_rebellion,
            ThemeBucket::PersonalVulnerability => &mut self.personal_vulnerability,
            ThemeBucket::CulturalTension => &mut self.cultural_tension,
            ThemeBucket::SystemHacking => &mut self.system_hacking,
        }
    }
}

pub fn group_by_themes<'a>(campaigns: &[&'a CatalogEntry]) -> ThemeGroups<'a> {
    let mut groups = ThemeGroups::default();
    for campaign in campaigns {
        for bucket in ThemeBucket::ALL {
            if bucket.matches(campaign) {
                groups.bucket_mut(bucket).push(*campaign);
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::fixtures::entry;

    fn themed(id: &str, industry: &str, key_message: &str, strategy: &str) -> CatalogEntry {
        let mut e = entry(id, industry, &[]);
        e.key_message = key_message.to_string();
        e.strategy = strategy.to_string();
        e
    }

    #[test]
    fn test_single_bucket_assignment() {
        let e = themed("p", "Retail", "Join the PROTEST", "Street rally");
        let groups = group_by_themes(&[&e]);
        assert_eq!(groups.institutional_rebellion.len(), 1);
        assert!(groups.personal_vulnerability.is_empty());
        assert!(groups.cultural_tension.is_empty());
        assert!(groups.system_hacking.is_empty());
    }

    #[test]
    fn test_buckets_are_independent() {
        let e = themed(
            "multi",
            "Tech",
            "An activism moment",
            "Hack the feed to expose inequality and confess the truth",
        );
        let groups = group_by_themes(&[&e]);
        for bucket in ThemeBucket::ALL {
            assert_eq!(groups.bucket(bucket).len(), 1, "{bucket:?} should contain the entry");
        }
    }

    #[test]
    fn test_unmatched_campaign_lands_nowhere() {
        let e = themed("plain", "Retail", "Buy one get one", "Radio spots");
        let groups = group_by_themes(&[&e]);
        assert!(ThemeBucket::ALL.iter().all(|b| groups.bucket(*b).is_empty()));
    }

    #[test]
    fn test_strategy_patterns_ignore_key_message() {
        let e = themed("km", "Retail", "a glitch in the system", "Print ads");
        let groups = group_by_themes(&[&e]);
        assert!(groups.system_hacking.is_empty());
    }
}
