//! Wildcard Backfill: random out-of-domain entries appended to a shortlist.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::catalog::CatalogEntry;

/// Returns up to `count` catalog entries whose industry does not appear in
/// `selected` (case-insensitive) and whose id is not already selected.
///
/// Shuffle-then-slice over the eligible entries, so every eligible entry is
/// equally likely regardless of catalog order. Returns fewer when the catalog
/// runs out of unused industries.
pub fn select_wildcards<'a, R: Rng + ?Sized>(
    catalog: &'a [CatalogEntry],
    selected: &[&CatalogEntry],
    count: usize,
    rng: &mut R,
) -> Vec<&'a CatalogEntry> {
    if count == 0 {
        return Vec::new();
    }

    let used_industries: HashSet<String> = selected
        .iter()
        .map(|e| e.industry.trim().to_lowercase())
        .collect();
    let used_ids: HashSet<&str> = selected.iter().map(|e| e.id.as_str()).collect();

    let mut eligible: Vec<&'a CatalogEntry> = catalog
        .iter()
        .filter(|e| !used_ids.contains(e.id.as_str()))
        .filter(|e| !used_industries.contains(&e.industry.trim().to_lowercase()))
        .collect();

    eligible.shuffle(rng);
    eligible.truncate(count);
    eligible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::fixtures::entry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Vec<CatalogEntry> {
        vec![
            entry("r1", "Retail", &[]),
            entry("r2", "retail", &[]),
            entry("t1", "Travel", &[]),
            entry("f1", "Finance", &[]),
            entry("b1", "Beauty", &[]),
        ]
    }

    #[test]
    fn test_excludes_selected_industries_case_insensitively() {
        let catalog = catalog();
        let selected = vec![&catalog[0]];
        let mut rng = StdRng::seed_from_u64(7);

        let picks = select_wildcards(&catalog, &selected, 10, &mut rng);
        assert_eq!(picks.len(), 3, "only Travel, Finance and Beauty remain");
        assert!(picks
            .iter()
            .all(|e| e.industry.to_lowercase() != "retail"));
    }

    #[test]
    fn test_respects_count() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(7);
        let picks = select_wildcards(&catalog, &[], 2, &mut rng);
        assert_eq!(picks.len(), 2);
    }

    #[test]
    fn test_returns_empty_when_every_industry_used() {
        let catalog = catalog();
        let selected: Vec<&CatalogEntry> = catalog.iter().collect();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_wildcards(&catalog, &selected, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_same_seed_same_output() {
        let catalog = catalog();
        let ids = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            select_wildcards(&catalog, &[], 3, &mut rng)
                .iter()
                .map(|e| e.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(42), ids(42));
    }

    #[test]
    fn test_empty_catalog_is_fine() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select_wildcards(&[], &[], 2, &mut rng).is_empty());
    }
}
