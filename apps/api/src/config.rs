use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub llm_timeout_secs: u64,
    /// Postgres URL for the campaign library. `None` keeps the library in memory.
    pub database_url: Option<String>,
    /// Override for the reference-campaign dataset. `None` uses the bundled catalog.
    pub catalog_path: Option<String>,
    /// Fixed seed for wildcard backfill and spike selection. `None` seeds from the clock per request.
    pub match_seed: Option<u64>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 60)?,
            database_url: optional_env("DATABASE_URL"),
            catalog_path: optional_env("CATALOG_PATH"),
            match_seed: optional_env("MATCH_SEED")
                .map(|s| s.parse::<u64>())
                .transpose()
                .context("MATCH_SEED must be an unsigned integer")?,
            port: parse_env("PORT", 8090)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("CAMPAIGN_API_TEST_UNSET_PORT", 8090).unwrap();
        assert_eq!(port, 8090);
    }

    #[test]
    fn test_optional_env_treats_blank_as_unset() {
        std::env::set_var("CAMPAIGN_API_TEST_BLANK", "   ");
        assert!(optional_env("CAMPAIGN_API_TEST_BLANK").is_none());
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("CAMPAIGN_API_TEST_BAD_TIMEOUT", "soon");
        let result: Result<u64> = parse_env("CAMPAIGN_API_TEST_BAD_TIMEOUT", 60);
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("CAMPAIGN_API_TEST_BAD_TIMEOUT"));
    }
}
