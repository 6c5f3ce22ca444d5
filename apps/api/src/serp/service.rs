use tracing::{info, warn};

use crate::models::serp::{SerpLookup, SerpSource};
use crate::serp::client::{SerpClient, SerpQuery};
use crate::serp::error::SerpError;
use crate::serp::results::{fallback_results, process};

pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_LANGUAGE: &str = "en";

pub struct SerpService {
    client: SerpClient,
}

impl SerpService {
    pub fn new(client: SerpClient) -> Self {
        Self { client }
    }

    /// Live results only. Every provider failure is returned to the caller.
    pub async fn fetch_live(
        &self,
        keyword: &str,
        location: Option<&str>,
        language: Option<&str>,
    ) -> Result<SerpLookup, SerpError> {
        let query = SerpQuery {
            keyword,
            location: location.unwrap_or(DEFAULT_LOCATION),
            language: language.unwrap_or(DEFAULT_LANGUAGE),
        };
        let raw = self.client.fetch(query).await?;
        let (results, related_searches) = process(raw);
        info!(
            keyword = %keyword,
            provider = self.client.provider_name().unwrap_or("none"),
            results = results.len(),
            "Live SERP results"
        );
        Ok(SerpLookup {
            keyword: keyword.to_string(),
            results,
            related_searches,
            source: SerpSource::Live,
            notice: None,
        })
    }

    /// Never fails: any provider failure (or an empty live page) is replaced
    /// with generated results. Failures the user can act on carry a notice.
    pub async fn lookup(
        &self,
        keyword: &str,
        location: Option<&str>,
        language: Option<&str>,
    ) -> SerpLookup {
        if !self.client.is_configured() {
            info!(keyword = %keyword, "No SERP provider configured, using fallback");
            return fallback(keyword, None);
        }

        match self.fetch_live(keyword, location, language).await {
            Ok(lookup) if !lookup.results.is_empty() => lookup,
            Ok(_) => {
                warn!(keyword = %keyword, reason = "empty", "SERP provider returned no organic results, using fallback");
                fallback(keyword, None)
            }
            Err(e) => {
                warn!(keyword = %keyword, reason = e.reason(), error = %e, "SERP fetch failed, using fallback");
                fallback(keyword, e.user_notice())
            }
        }
    }
}

fn fallback(keyword: &str, notice: Option<&str>) -> SerpLookup {
    SerpLookup {
        keyword: keyword.to_string(),
        results: fallback_results(keyword),
        related_searches: Vec::new(),
        source: SerpSource::Fallback,
        notice: notice.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serp::client::{SerpProvider, DEFAULT_TIMEOUT};
    use crate::serp::results::FALLBACK_DOMAINS;
    use crate::serp::test_support::{spawn_server, unused_endpoint};
    use axum::{http::StatusCode, routing::get, Router};
    use std::time::Duration;

    fn service_at(endpoint: String) -> SerpService {
        service_with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    fn service_with_timeout(endpoint: String, timeout: Duration) -> SerpService {
        SerpService::new(
            SerpClient::new(
                Some(SerpProvider::SerpApi {
                    api_key: "k".to_string(),
                }),
                timeout,
            )
            .with_endpoint(endpoint),
        )
    }

    async fn status_server(status: StatusCode, body: &'static str) -> String {
        spawn_server(Router::new().route("/search", get(move || async move { (status, body) }))).await
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        let svc = service_at(unused_endpoint().await);
        let lookup = svc.lookup("email marketing", None, None).await;

        assert_eq!(lookup.source, SerpSource::Fallback);
        assert_eq!(lookup.results.len(), FALLBACK_DOMAINS.len());
        assert!(lookup.notice.is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_falls_back_quietly() {
        let svc = SerpService::new(SerpClient::new(None, DEFAULT_TIMEOUT));
        let lookup = svc.lookup("email marketing", None, None).await;
        assert_eq!(lookup.source, SerpSource::Fallback);
        assert_eq!(lookup.results.len(), 5);
        assert!(lookup.notice.is_none());
    }

    #[tokio::test]
    async fn test_slow_provider_falls_back_quietly() {
        let router = Router::new().route(
            "/search",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let svc = service_with_timeout(spawn_server(router).await, Duration::from_millis(100));

        let lookup = svc.lookup("email marketing", None, None).await;
        assert_eq!(lookup.source, SerpSource::Fallback);
        assert_eq!(lookup.results.len(), FALLBACK_DOMAINS.len());
        assert_eq!(lookup.results[0].position, 1);
        assert!(lookup.results[0].title.starts_with("email marketing - "));
        assert!(lookup.related_searches.is_empty());
        assert!(lookup.notice.is_none());

        assert!(matches!(
            svc.fetch_live("email marketing", None, None).await,
            Err(SerpError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back_with_notice() {
        let svc = service_at(status_server(StatusCode::TOO_MANY_REQUESTS, "").await);

        let lookup = svc.lookup("email marketing", None, None).await;
        assert_eq!(lookup.source, SerpSource::Fallback);
        assert!(lookup.notice.as_deref().unwrap_or_default().contains("retry"));

        assert!(matches!(
            svc.fetch_live("email marketing", None, None).await,
            Err(SerpError::RateLimited)
        ));
    }

    #[tokio::test]
    async fn test_auth_failure_falls_back_with_notice() {
        let svc = service_at(status_server(StatusCode::UNAUTHORIZED, "").await);
        let lookup = svc.lookup("email marketing", None, None).await;
        assert!(lookup
            .notice
            .as_deref()
            .unwrap_or_default()
            .contains("configuration"));
    }

    #[tokio::test]
    async fn test_garbage_and_server_errors_fall_back() {
        for (status, body) in [
            (StatusCode::OK, "<html>not json</html>"),
            (StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            (StatusCode::OK, "{}"),
        ] {
            let svc = service_at(status_server(status, body).await);
            let lookup = svc.lookup("email marketing", None, None).await;
            assert_eq!(lookup.source, SerpSource::Fallback);
            assert_eq!(lookup.results.len(), 5);
            assert!(lookup.notice.is_none());
        }
    }

    #[tokio::test]
    async fn test_live_results_pass_through() {
        let endpoint = status_server(
            StatusCode::OK,
            r#"{"organic_results":[{"title":"Best email tools","link":"https://x.com","snippet":"Compare"}]}"#,
        )
        .await;
        let lookup = service_at(endpoint).lookup("email marketing", None, None).await;
        assert_eq!(lookup.source, SerpSource::Live);
        assert_eq!(lookup.results.len(), 1);
        assert_eq!(lookup.results[0].url, "https://x.com");
    }
}
