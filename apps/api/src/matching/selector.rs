//! Diverse Top-K Selector: greedy pick of a small, non-redundant shortlist.
//!
//! Algorithm:
//! 1. Rank by total score (stable, so catalog order breaks ties) and keep the top `pool_size`.
//! 2. Seed with the single best candidate.
//! 3. Repeatedly pick the candidate maximizing complement + diversity:
//!    - complement = Σ (candidate_dim − avg_dim) over dimensions where the running
//!      average of the selection is below `weak_dimension_threshold` and the candidate beats it
//!    - diversity = `diversity_bonus` for an unseen industry, plus `diversity_bonus`
//!      when at least one of its emotional-appeal tags is unseen
//! 4. When no candidate improves on zero, take the next-ranked unselected candidate.
//!
//! Greedy with no backtracking. Entries ranked below the pool cutoff are never considered.

use std::collections::HashSet;

use crate::matching::similarity::{Dimension, ScoredCampaign};

/// Default shortlist size.
pub const DEFAULT_SELECTION_COUNT: usize = 5;
/// Candidate pool cutoff after ranking.
pub const CANDIDATE_POOL_SIZE: usize = 20;
/// Dimensions averaging at or above this are considered covered.
pub const WEAK_DIMENSION_THRESHOLD: f64 = 7.0;
/// Flat bonus per newly represented industry / emotional appeal.
pub const DIVERSITY_BONUS: f64 = 5.0;

/// Tunables for the selector. Defaults reproduce the reference constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorConfig {
    pub pool_size: usize,
    pub weak_dimension_threshold: f64,
    pub diversity_bonus: f64,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            pool_size: CANDIDATE_POOL_SIZE,
            weak_dimension_threshold: WEAK_DIMENSION_THRESHOLD,
            diversity_bonus: DIVERSITY_BONUS,
        }
    }
}

/// Sorts by total descending (stable), drops repeated ids and truncates to the pool size.
pub fn rank_candidates<'a>(
    mut scored: Vec<ScoredCampaign<'a>>,
    pool_size: usize,
) -> Vec<ScoredCampaign<'a>> {
    scored.sort_by(|a, b| b.total().cmp(&a.total()));
    dedup_by_id(&mut scored);
    scored.truncate(pool_size);
    scored
}

/// Returns up to `count` entries: the best overall match first, then the
/// candidates that best cover weak dimensions and unseen industries/emotions.
pub fn select_diverse<'a>(
    scored: Vec<ScoredCampaign<'a>>,
    count: usize,
    config: &SelectorConfig,
) -> Vec<ScoredCampaign<'a>> {
    let pool = rank_candidates(scored, config.pool_size);

    let mut selected: Vec<ScoredCampaign<'a>> = Vec::with_capacity(count.min(pool.len()));
    let mut taken = vec![false; pool.len()];

    if count == 0 || pool.is_empty() {
        return selected;
    }

    selected.push(pool[0]);
    taken[0] = true;

    while selected.len() < count && selected.len() < pool.len() {
        let averages = running_averages(&selected);
        let industries: HashSet<String> = selected
            .iter()
            .map(|s| normalize(&s.entry.industry))
            .collect();
        let emotions: HashSet<String> = selected
            .iter()
            .flat_map(|s| s.entry.emotional_appeal.iter().map(|e| normalize(e)))
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for (idx, candidate) in pool.iter().enumerate() {
            if taken[idx] {
                continue;
            }
            let value = complement_score(candidate, &averages, config)
                + diversity_score(candidate, &industries, &emotions, config);
            if value > best.map(|(_, v)| v).unwrap_or(0.0) {
                best = Some((idx, value));
            }
        }

        // No positive improvement: fall back to rank order.
        let next = match best {
            Some((idx, _)) => Some(idx),
            None => taken.iter().position(|t| !t),
        };

        match next {
            Some(idx) => {
                taken[idx] = true;
                selected.push(pool[idx]);
            }
            None => break,
        }
    }

    selected
}

/// Mean score per dimension across the current selection.
fn running_averages(selected: &[ScoredCampaign<'_>]) -> [f64; 7] {
    let mut averages = [0.0; 7];
    if selected.is_empty() {
        return averages;
    }
    for (slot, dimension) in averages.iter_mut().zip(Dimension::ALL) {
        let sum: u32 = selected.iter().map(|s| s.scores.get(dimension)).sum();
        *slot = sum as f64 / selected.len() as f64;
    }
    averages
}

fn complement_score(
    candidate: &ScoredCampaign<'_>,
    averages: &[f64; 7],
    config: &SelectorConfig,
) -> f64 {
    Dimension::ALL
        .iter()
        .zip(averages.iter())
        .filter(|(_, avg)| **avg < config.weak_dimension_threshold)
        .map(|(dimension, avg)| candidate.scores.get(*dimension) as f64 - avg)
        .filter(|gain| *gain > 0.0)
        .sum()
}

fn diversity_score(
    candidate: &ScoredCampaign<'_>,
    industries: &HashSet<String>,
    emotions: &HashSet<String>,
    config: &SelectorConfig,
) -> f64 {
    let mut score = 0.0;
    if !industries.contains(&normalize(&candidate.entry.industry)) {
        score += config.diversity_bonus;
    }
    if candidate
        .entry
        .emotional_appeal
        .iter()
        .any(|e| !emotions.contains(&normalize(e)))
    {
        score += config.diversity_bonus;
    }
    score
}

fn dedup_by_id(pool: &mut Vec<ScoredCampaign<'_>>) {
    let mut seen = HashSet::new();
    pool.retain(|s| seen.insert(s.entry.id.clone()));
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
