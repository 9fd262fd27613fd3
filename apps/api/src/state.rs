use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::generation::trends::TrendCache;
use crate::library::CampaignStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Text generation backend. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    /// Reference campaigns, loaded once at startup and never mutated.
    pub catalog: Arc<Catalog>,
    /// Campaign library. Postgres when configured, in memory otherwise.
    pub store: Arc<dyn CampaignStore>,
    /// Cultural trends derived from submitted headlines.
    pub trends: Arc<TrendCache>,
    pub config: Config,
}
