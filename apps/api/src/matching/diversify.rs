//! Final Diversification Post-Pass.
//!
//! Three passes over an ordered candidate list, stopping as soon as the cap is hit:
//! 1. keep each candidate that brings a new industry or at least one unseen emotional appeal
//! 2. append the remaining candidates in their original order
//! 3. backfill with wildcards from unused industries

use std::collections::HashSet;

use rand::Rng;

use crate::matching::wildcard::select_wildcards;
use crate::models::catalog::CatalogEntry;

pub const MAX_RESULTS: usize = 5;

pub fn diversify_selection<'a, R: Rng + ?Sized>(
    candidates: &[&'a CatalogEntry],
    catalog: &'a [CatalogEntry],
    rng: &mut R,
) -> Vec<&'a CatalogEntry> {
    let mut result: Vec<&'a CatalogEntry> = Vec::with_capacity(MAX_RESULTS);
    let mut used_ids: HashSet<&str> = HashSet::new();
    let mut industries: HashSet<String> = HashSet::new();
    let mut emotions: HashSet<String> = HashSet::new();

    for candidate in candidates {
        if result.len() >= MAX_RESULTS {
            break;
        }
        if used_ids.contains(candidate.id.as_str()) {
            continue;
        }

        let industry = candidate.industry.trim().to_lowercase();
        let candidate_emotions: Vec<String> = candidate
            .emotional_appeal
            .iter()
            .map(|e| e.trim().to_lowercase())
            .collect();

        let new_industry = !industries.contains(&industry);
        let new_emotion = candidate_emotions.iter().any(|e| !emotions.contains(e));

        if new_industry || new_emotion {
            used_ids.insert(candidate.id.as_str());
            industries.insert(industry);
            emotions.extend(candidate_emotions);
            result.push(candidate);
        }
    }

    for candidate in candidates {
        if result.len() >= MAX_RESULTS {
            break;
        }
        if used_ids.insert(candidate.id.as_str()) {
            result.push(candidate);
        }
    }

    if result.len() < MAX_RESULTS {
        let wildcards = select_wildcards(catalog, &result, MAX_RESULTS - result.len(), rng);
        result.extend(wildcards);
    }

    result
}
