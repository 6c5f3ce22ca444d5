//! Keyword service — validates input, runs the estimator and expander, and caches
//! analyses by `(keyword, country, language)` for a freshness window.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::Cache;
use crate::errors::AppError;
use crate::keywords::estimator::{
    calculate_relevance, competition_level, estimate, estimate_cpc, estimate_difficulty,
    estimate_volume, find_opportunities,
};
use crate::keywords::expander::expand;
use crate::models::keyword::{KeywordAnalysis, RelatedKeyword};
use crate::rng::SharedRng;

pub const DEFAULT_COUNTRY: &str = "us";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const MAX_KEYWORD_LEN: usize = 200;
const RELATED_LIMIT: usize = 10;
const RECENT_LIMIT: usize = 50;

/// Rejects empty, oversized or multi-line keywords. Returns the trimmed keyword.
pub fn validate_keyword(keyword: &str) -> Result<&str, AppError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_KEYWORD_LEN {
        return Err(AppError::Validation(format!(
            "keyword cannot exceed {MAX_KEYWORD_LEN} characters"
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(AppError::Validation(
            "keyword cannot contain control characters".to_string(),
        ));
    }
    Ok(trimmed)
}

pub fn cache_key(keyword: &str, country: &str, language: &str) -> String {
    format!(
        "{}-{}-{}",
        keyword.trim().to_lowercase(),
        country.trim().to_lowercase(),
        language.trim().to_lowercase()
    )
}

pub struct KeywordService {
    cache: Arc<dyn Cache<String, KeywordAnalysis>>,
    rng: SharedRng,
}

impl KeywordService {
    pub fn new(cache: Arc<dyn Cache<String, KeywordAnalysis>>, rng: SharedRng) -> Self {
        Self { cache, rng }
    }

    /// Returns a fresh cached analysis or builds and caches a new one.
    pub fn analyze(
        &self,
        keyword: &str,
        country: &str,
        language: &str,
    ) -> Result<KeywordAnalysis, AppError> {
        let keyword = validate_keyword(keyword)?;
        let key = cache_key(keyword, country, language);

        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "Keyword analysis cache hit");
            return Ok(cached);
        }

        let analysis = self.build_analysis(keyword, country, language);
        info!(
            keyword = %analysis.keyword,
            volume = analysis.search_volume,
            difficulty = analysis.difficulty,
            intent = %analysis.intent,
            "Keyword analysed"
        );
        self.cache.set(key, analysis.clone());
        Ok(analysis)
    }

    fn build_analysis(&self, keyword: &str, country: &str, language: &str) -> KeywordAnalysis {
        self.rng.with(|rng| {
            let base = estimate(keyword, rng);

            let mut related_keywords: Vec<RelatedKeyword> = expand(keyword)
                .into_iter()
                .take(RELATED_LIMIT)
                .map(|term| RelatedKeyword {
                    search_volume: estimate_volume(&term, rng),
                    difficulty: estimate_difficulty(&term, rng),
                    relevance: calculate_relevance(keyword, &term),
                    keyword: term,
                })
                .collect();
            // Stable: equal relevance keeps template order
            related_keywords.sort_by(|a, b| b.relevance.cmp(&a.relevance));

            KeywordAnalysis {
                id: Uuid::new_v4(),
                keyword: keyword.to_string(),
                search_volume: base.search_volume,
                difficulty: base.difficulty,
                cpc: estimate_cpc(rng),
                competition: competition_level(base.difficulty),
                intent: base.intent,
                trend: base.trend,
                related_keywords,
                opportunities: find_opportunities(
                    keyword,
                    base.difficulty,
                    base.intent,
                    base.trend,
                ),
                seasonality: base.seasonality,
                country: country.to_string(),
                language: language.to_string(),
                timestamp: Utc::now(),
            }
        })
    }

    /// Cached analyses, newest first, at most 50.
    pub fn recent(&self) -> Vec<KeywordAnalysis> {
        let mut analyses = self.cache.values();
        analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        analyses.truncate(RECENT_LIMIT);
        analyses
    }

    pub fn get(&self, id: Uuid) -> Result<KeywordAnalysis, AppError> {
        self.cache
            .values()
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Keyword analysis {id} not found")))
    }

    /// Evicts an analysis so the next request rebuilds it.
    pub fn delete(&self, id: Uuid) -> Result<KeywordAnalysis, AppError> {
        let analysis = self.get(id)?;
        let key = cache_key(&analysis.keyword, &analysis.country, &analysis.language);
        self.cache.evict(&key);
        info!(keyword = %analysis.keyword, "Keyword analysis evicted");
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TtlCache;
    use crate::models::keyword::Intent;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn service() -> KeywordService {
        KeywordService::new(
            Arc::new(TtlCache::with_ttl(Duration::from_secs(3600))),
            SharedRng::seeded(11),
        )
    }

    #[test]
    fn test_analyze_rejects_empty_keyword() {
        let svc = service();
        let err = svc.analyze("   ", "us", "en").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_analyze_rejects_oversized_keyword() {
        let svc = service();
        let long = "k".repeat(MAX_KEYWORD_LEN + 1);
        assert!(matches!(
            svc.analyze(&long, "us", "en"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_keyword_rejects_control_characters() {
        assert!(matches!(
            validate_keyword("coffee\nmakers"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            validate_keyword("coffee\tmakers"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(validate_keyword("  coffee makers\n").unwrap(), "coffee makers");
    }

    #[test]
    fn test_analysis_takes_base_figures_from_estimate() {
        let expected = estimate("summer tires", &mut StdRng::seed_from_u64(11));
        let analysis = service().analyze("summer tires", "us", "en").unwrap();

        assert_eq!(analysis.search_volume, expected.search_volume);
        assert_eq!(analysis.difficulty, expected.difficulty);
        assert_eq!(analysis.intent, expected.intent);
        assert_eq!(analysis.trend, expected.trend);
        assert_eq!(analysis.seasonality, expected.seasonality);
        assert_eq!(analysis.competition, competition_level(expected.difficulty));
    }

    #[test]
    fn test_analyze_populates_fields() {
        let svc = service();
        let analysis = svc.analyze("  best coffee makers ", "us", "en").unwrap();

        assert_eq!(analysis.keyword, "best coffee makers");
        assert_eq!(analysis.intent, Intent::Commercial);
        assert!((10..=100).contains(&analysis.difficulty));
        assert!(analysis.search_volume >= 10);
        assert_eq!(analysis.related_keywords.len(), 10);
        assert!(analysis
            .related_keywords
            .windows(2)
            .all(|w| w[0].relevance >= w[1].relevance));
        assert!(analysis
            .related_keywords
            .iter()
            .all(|r| r.keyword != "best coffee makers"));
        assert!(!analysis.opportunities.is_empty());
    }

    #[test]
    fn test_cache_hit_returns_same_analysis() {
        let svc = service();
        let first = svc.analyze("seo tools", "us", "en").unwrap();
        let second = svc.analyze("SEO Tools", "US", "en").unwrap();
        assert_eq!(first.id, second.id);

        let other_market = svc.analyze("seo tools", "de", "de").unwrap();
        assert_ne!(first.id, other_market.id);
        assert_eq!(svc.recent().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_analysis_is_rebuilt() {
        let svc = service();
        let first = svc.analyze("seo tools", "us", "en").unwrap();
        tokio::time::advance(Duration::from_secs(3601)).await;
        let second = svc.analyze("seo tools", "us", "en").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_get_and_delete() {
        let svc = service();
        let analysis = svc.analyze("content marketing", "us", "en").unwrap();

        assert_eq!(svc.get(analysis.id).unwrap().keyword, "content marketing");
        svc.delete(analysis.id).unwrap();
        assert!(matches!(svc.get(analysis.id), Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(analysis.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_recent_newest_first() {
        let svc = service();
        svc.analyze("one", "us", "en").unwrap();
        svc.analyze("two", "us", "en").unwrap();
        let recent = svc.recent();
        assert!(recent.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
