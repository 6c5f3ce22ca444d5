use std::sync::Arc;

use crate::cache::TtlCache;
use crate::clusters::service::ClusterService;
use crate::config::Config;
use crate::content::generator::ContentService;
use crate::content::seo_score::{ContentScorer, HeuristicSeoScorer};
use crate::keywords::service::KeywordService;
use crate::rng::SharedRng;
use crate::serp::client::SerpClient;
use crate::serp::service::SerpService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub keywords: Arc<KeywordService>,
    pub serp: Arc<SerpService>,
    pub content: Arc<ContentService>,
    pub clusters: Arc<ClusterService>,
    /// Random source for the flavour figures; seeded from `RANKCRAFT_SEED` when set.
    pub rng: SharedRng,
}

impl AppState {
    /// Wires every service from config with the default heuristic scorer.
    pub fn from_config(config: Config) -> Self {
        Self::with_scorer(config, Arc::new(HeuristicSeoScorer))
    }

    pub fn with_scorer(config: Config, scorer: Arc<dyn ContentScorer>) -> Self {
        let rng = SharedRng::from_seed_option(config.seed);
        let keywords = Arc::new(KeywordService::new(
            Arc::new(TtlCache::with_ttl(config.keyword_cache_ttl)),
            rng.clone(),
        ));
        let mut client = SerpClient::new(config.serp_provider.clone(), config.serp_timeout);
        if let Some(endpoint) = &config.serp_endpoint {
            client = client.with_endpoint(endpoint.clone());
        }
        let serp = Arc::new(SerpService::new(client));
        let content = Arc::new(ContentService::new(
            keywords.clone(),
            serp.clone(),
            scorer,
            rng.clone(),
        ));
        let clusters = Arc::new(ClusterService::new(keywords.clone(), serp.clone()));

        Self {
            config,
            keywords,
            serp,
            content,
            clusters,
            rng,
        }
    }
}
