//! Execution-level heuristics applied to a campaign's execution plan.

use std::collections::HashMap;
use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use tracing::warn;

static RE_PROVOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)delete|burn|sacrifice|confront|risk|forced").unwrap());
static RE_SHOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)public|unexpected|hack|glitch|confession|live stream").unwrap()
});
static RE_FORMAT_SUBVERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bus stop|receipt|fridge|toilet|mirror|door|drone|ad blocker").unwrap()
});

pub const PROVOCATION_POINTS: u32 = 3;
pub const SHOCK_POINTS: u32 = 2;
pub const FORMAT_SUBVERSION_POINTS: u32 = 2;

/// Average execution score below which a spike idea is injected.
pub const SPIKE_THRESHOLD: f64 = 4.0;

pub const SPIKE_EXECUTIONS: &[&str] = &[
    "Turn receipts into breakup letters printed at checkout, based on abandoned carts.",
    "Let users burn a digital wishlist to unlock a limited drop.",
    "Set up a one-day 'Regret Museum' inside a flagship store, showcasing returned items and their breakup stories.",
    "Launch a hotline where users confess their worst adulting fail and get a room makeover inspired by it.",
];

const SAFE_FORMATS: &[&str] = &[
    "docuseries",
    "ar experience",
    "pop-up",
    "co-creation",
    "tiktok challenge",
];

pub const BRAVE_FALLBACK_EXECUTION: &str =
    "Create an experience that forces people to confront a personal truth in a public way.";

/// Maximum executions kept per recognised format.
pub const FORMAT_CAP: usize = 2;

static EXECUTION_FORMATS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("installation", r"(?i)installation|immersive|popup|display"),
        ("event", r"(?i)workshop|activation|live|flash mob"),
        ("parade", r"(?i)parade|march|protest"),
        ("swap", r"(?i)swap|exchange"),
        ("digital", r"(?i)\b(ar|vr)\b|virtual|online|filter|\bapp\b"),
        ("public speech", r"(?i)speech|monologue|storytelling"),
    ]
    .into_iter()
    .map(|(key, pattern)| (key, Regex::new(pattern).unwrap()))
    .collect()
});

/// Provocation +3, shock +2, format subversion +2. Each family counts once.
pub fn score_execution(idea: &str) -> u32 {
    let mut score = 0;
    if RE_PROVOCATION.is_match(idea) {
        score += PROVOCATION_POINTS;
    }
    if RE_SHOCK.is_match(idea) {
        score += SHOCK_POINTS;
    }
    if RE_FORMAT_SUBVERSION.is_match(idea) {
        score += FORMAT_SUBVERSION_POINTS;
    }
    score
}

/// Mean execution score; an empty plan averages 0.
pub fn average_execution_score(executions: &[String]) -> f64 {
    if executions.is_empty() {
        return 0.0;
    }
    let total: u32 = executions.iter().map(|e| score_execution(e)).sum();
    total as f64 / executions.len() as f64
}

/// Appends one spike idea when the plan is too flat. Returns the injected idea.
pub fn inject_spike<R: Rng + ?Sized>(executions: &mut Vec<String>, rng: &mut R) -> Option<String> {
    let average = average_execution_score(executions);
    if average >= SPIKE_THRESHOLD {
        return None;
    }
    let spike = SPIKE_EXECUTIONS.choose(rng)?.to_string();
    warn!("Execution ideas too flat (avg {:.1}), injecting spike", average);
    executions.push(spike.clone());
    Some(spike)
}

/// Any execution leaning on a safe, overused format earns a braver companion.
pub fn ensure_brave_execution(executions: &mut Vec<String>) -> bool {
    let too_safe = executions.iter().any(|e| {
        let lower = e.to_lowercase();
        SAFE_FORMATS.iter().any(|s| lower.contains(s))
    });
    if too_safe {
        warn!("Execution plan too safe, adding braver fallback");
        executions.push(BRAVE_FALLBACK_EXECUTION.to_string());
    }
    too_safe
}

/// Keeps at most `FORMAT_CAP` executions per format. An execution is classified by
/// the first format it matches; unclassified executions are always kept.
pub fn enforce_execution_diversity(executions: Vec<String>) -> Vec<String> {
    let mut used: HashMap<&'static str, usize> = HashMap::new();

    executions
        .into_iter()
        .filter(|execution| {
            let Some((key, _)) = EXECUTION_FORMATS
                .iter()
                .find(|(_, regex)| regex.is_match(execution))
            else {
                return true;
            };
            let count = used.entry(*key).or_insert(0);
            if *count >= FORMAT_CAP {
                return false;
            }
            *count += 1;
            true
        })
        .collect()
}
