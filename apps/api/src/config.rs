use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::serp::client::{SerpProvider, DEFAULT_TIMEOUT};

/// Application configuration loaded from environment variables.
/// Missing SERP credentials are not an error: the service runs on fallback data.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub serp_provider: Option<SerpProvider>,
    pub serp_timeout: Duration,
    /// Overrides the provider's public endpoint (self-hosted proxy).
    pub serp_endpoint: Option<String>,
    pub keyword_cache_ttl: Duration,
    /// Pins every random flavour figure when set.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            serp_provider: None,
            serp_timeout: DEFAULT_TIMEOUT,
            serp_endpoint: None,
            keyword_cache_ttl: Duration::from_secs(3600),
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: parse_or(var("PORT"), defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or(defaults.rust_log),
            serp_provider: serp_provider(&var)?,
            serp_timeout: Duration::from_secs(
                parse_or(var("SERP_TIMEOUT_SECS"), defaults.serp_timeout.as_secs())
                    .context("SERP_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            serp_endpoint: var("SERP_ENDPOINT").map(|s| s.trim().to_string()),
            keyword_cache_ttl: Duration::from_secs(
                parse_or(
                    var("KEYWORD_CACHE_TTL_SECS"),
                    defaults.keyword_cache_ttl.as_secs(),
                )
                .context("KEYWORD_CACHE_TTL_SECS must be a whole number of seconds")?,
            ),
            seed: var("RANKCRAFT_SEED")
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .context("RANKCRAFT_SEED must be an unsigned integer")?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(v) => Ok(v.trim().parse::<T>()?),
        None => Ok(default),
    }
}

fn serp_provider(var: &impl Fn(&str) -> Option<String>) -> Result<Option<SerpProvider>> {
    let provider = var("SERP_PROVIDER").unwrap_or_else(|| "serpapi".to_string());
    match provider.trim().to_lowercase().as_str() {
        "serpapi" => Ok(var("SERPAPI_KEY").map(|api_key| SerpProvider::SerpApi { api_key })),
        "dataforseo" => Ok(var("DATAFORSEO_USER")
            .zip(var("DATAFORSEO_PASS"))
            .map(|(username, password)| SerpProvider::DataForSeo { username, password })),
        other => bail!("SERP_PROVIDER must be 'serpapi' or 'dataforseo', got '{other}'"),
    }
}
