//! Reference matching pipeline: score the whole catalog, pick a diverse top five,
//! run the diversification post-pass and group the result by theme.

use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::matching::diversify::diversify_selection;
use crate::matching::selector::{select_diverse, SelectorConfig, DEFAULT_SELECTION_COUNT};
use crate::matching::similarity::{score_catalog, score_entry, DimensionScores};
use crate::matching::themes::{group_by_themes, ThemeGroups};
use crate::matching::wildcard::select_wildcards;
use crate::models::brief::Brief;
use crate::models::catalog::CatalogEntry;

/// Number of wildcards appended by `thematic_matches`.
pub const THEMATIC_WILDCARDS: usize = 2;

/// A reference campaign chosen for a brief, with the scores that put it there.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedReference<'a> {
    #[serde(flatten)]
    pub entry: &'a CatalogEntry,
    pub scores: DimensionScores,
    pub total_score: u32,
    /// True when the entry came from wildcard backfill rather than the selector.
    pub wildcard: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome<'a> {
    pub references: Vec<MatchedReference<'a>>,
    pub themes: ThemeGroups<'a>,
}

impl MatchOutcome<'_> {
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.references.iter().map(|r| r.entry.clone()).collect()
    }
}

pub fn find_similar_campaigns<'a, R: Rng + ?Sized>(
    brief: &Brief,
    catalog: &'a [CatalogEntry],
    rng: &mut R,
) -> MatchOutcome<'a> {
    let scored = score_catalog(brief, catalog);
    let selected = select_diverse(scored, DEFAULT_SELECTION_COUNT, &SelectorConfig::default());
    let selected_entries: Vec<&'a CatalogEntry> = selected.iter().map(|s| s.entry).collect();

    let final_entries = diversify_selection(&selected_entries, catalog, rng);

    let references: Vec<MatchedReference<'a>> = final_entries
        .iter()
        .map(|&entry| {
            let from_selector = selected.iter().find(|s| s.entry.id == entry.id);
            let scores = from_selector
                .map(|s| s.scores)
                .unwrap_or_else(|| score_entry(brief, entry));
            MatchedReference {
                entry,
                scores,
                total_score: scores.total(),
                wildcard: from_selector.is_none(),
            }
        })
        .collect();

    info!(
        "Matched {} reference campaigns for {} ({} wildcards)",
        references.len(),
        brief.brand,
        references.iter().filter(|r| r.wildcard).count()
    );

    let themes = group_by_themes(&final_entries);

    MatchOutcome { references, themes }
}

/// Institutional-rebellion references among the brief's matches, plus
/// wildcards from industries none of the matches cover.
pub fn thematic_matches<'a, R: Rng + ?Sized>(
    brief: &Brief,
    catalog: &'a [CatalogEntry],
    rng: &mut R,
) -> Vec<&'a CatalogEntry> {
    let similar = find_similar_campaigns(brief, catalog, rng);
    let matched: Vec<&'a CatalogEntry> = similar.references.iter().map(|r| r.entry).collect();

    let mut matches = similar.themes.institutional_rebellion;
    matches.extend(select_wildcards(catalog, &matched, THEMATIC_WILDCARDS, rng));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::brief::fixtures::brief;
    use crate::models::catalog::fixtures::entry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_bundled_catalog_yields_five_unique_references() {
        let catalog = Catalog::bundled().unwrap();
        let b = brief("Fast Food", &["Gen Z"], &["Humor"]);
        let mut rng = StdRng::seed_from_u64(11);

        let outcome = find_similar_campaigns(&b, catalog.entries(), &mut rng);
        assert_eq!(outcome.references.len(), 5);

        let mut ids: Vec<&str> = outcome.references.iter().map(|r| r.entry.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5, "references must not repeat");
    }

    #[test]
    fn test_first_reference_is_best_match() {
        let catalog = Catalog::bundled().unwrap();
        let b = brief("Travel", &["Travelers"], &["Curiosity"]);
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = find_similar_campaigns(&b, catalog.entries(), &mut rng);
        let best = score_catalog(&b, catalog.entries())
            .into_iter()
            .map(|s| s.total())
            .max()
            .unwrap();
        assert_eq!(outcome.references[0].total_score, best);
        assert!(!outcome.references[0].wildcard);
    }

    #[test]
    fn test_small_catalog_returns_everything() {
        let catalog = vec![
            entry("a", "Retail", &[]),
            entry("b", "Travel", &[]),
            entry("c", "Finance", &[]),
        ];
        let b = brief("Retail", &[], &[]);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = find_similar_campaigns(&b, &catalog, &mut rng);
        assert_eq!(outcome.references.len(), 3);
    }

    #[test]
    fn test_empty_catalog_returns_empty_outcome() {
        let b = brief("Retail", &[], &[]);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = find_similar_campaigns(&b, &[], &mut rng);
        assert!(outcome.references.is_empty());
        assert!(outcome.themes.institutional_rebellion.is_empty());
    }

    #[test]
    fn test_reference_serializes_flat_with_scores() {
        let catalog = vec![entry("a", "Retail", &["Joy"])];
        let b = brief("Retail", &[], &["Joy"]);
        let mut rng = StdRng::seed_from_u64(1);

        let outcome = find_similar_campaigns(&b, &catalog, &mut rng);
        let json = serde_json::to_value(&outcome).unwrap();
        let first = &json["references"][0];
        assert_eq!(first["id"], "a");
        assert_eq!(first["scores"]["industry"], 5);
        assert!(first["totalScore"].as_u64().unwrap() >= 10);
        assert!(json["themes"]["institutionalRebellion"].is_array());
    }

    fn protest(id: &str, industry: &str) -> CatalogEntry {
        let mut e = entry(id, industry, &[]);
        e.key_message = "Join the protest".to_string();
        e
    }

    #[test]
    fn test_thematic_matches_are_scoped_to_the_brief() {
        let industries = [
            "Retail", "Travel", "Finance", "Beauty", "Auto", "Gaming", "Telecom", "Sports",
        ];
        let catalog: Vec<CatalogEntry> = industries
            .iter()
            .enumerate()
            .map(|(i, industry)| protest(&format!("p{i}"), industry))
            .collect();
        let b = brief("Retail", &[], &[]);
        let mut rng = StdRng::seed_from_u64(3);

        let matches = thematic_matches(&b, &catalog, &mut rng);
        assert_eq!(matches.len(), DEFAULT_SELECTION_COUNT + THEMATIC_WILDCARDS);
        assert!(matches.iter().any(|e| e.industry == "Retail"));

        let mut ids: Vec<&str> = matches.iter().map(|e| e.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), matches.len());
    }

    #[test]
    fn test_thematic_wildcards_avoid_every_matched_industry() {
        let mut catalog = vec![
            protest("r", "Retail"),
            entry("t", "Travel", &[]),
            entry("f", "Finance", &[]),
            entry("b", "Beauty", &[]),
            entry("a", "Auto", &[]),
        ];
        catalog.extend([
            entry("g", "Gaming", &[]),
            entry("s", "Sports", &[]),
            entry("m", "Media", &[]),
        ]);
        let b = brief("Retail", &[], &[]);

        let mut rng = StdRng::seed_from_u64(21);
        let similar = find_similar_campaigns(&b, &catalog, &mut rng);
        let matched: Vec<String> = similar
            .references
            .iter()
            .map(|r| r.entry.industry.clone())
            .collect();

        let mut rng = StdRng::seed_from_u64(21);
        let matches = thematic_matches(&b, &catalog, &mut rng);
        assert_eq!(matches[0].id, "r");
        assert_eq!(matches.len(), 1 + THEMATIC_WILDCARDS);
        assert!(matches[1..].iter().all(|e| !matched.contains(&e.industry)));
    }
}
