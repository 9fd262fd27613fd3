pub mod diversify;
pub mod handlers;
pub mod matcher;
pub mod selector;
pub mod similarity;
pub mod style;
pub mod themes;
pub mod tone;
pub mod wildcard;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Random source for wildcard backfill and shuffling.
///
/// A configured seed makes every request reproducible; otherwise the clock seeds it.
pub fn match_rng(seed: Option<u64>) -> StdRng {
    let seed = seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    debug!("Matching rng seed: {}", seed);
    StdRng::seed_from_u64(seed)
}
