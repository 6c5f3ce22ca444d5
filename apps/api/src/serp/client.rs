//! SERP Client — the only place that talks to third-party search-results APIs.
//!
//! Two providers: SerpAPI (GET + query parameters) and DataForSEO (POST JSON +
//! Basic auth). Both map to the provider-neutral `RawSerp`. Every request is
//! bounded by a timeout that drops (aborts) the in-flight future.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::serp::error::SerpError;

const SERPAPI_URL: &str = "https://serpapi.com/search";
const DATAFORSEO_URL: &str = "https://api.dataforseo.com/v3/serp/google/organic/live/advanced";
pub const RESULTS_PER_QUERY: u32 = 20;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub enum SerpProvider {
    SerpApi { api_key: String },
    DataForSeo { username: String, password: String },
}

impl SerpProvider {
    pub fn name(&self) -> &'static str {
        match self {
            SerpProvider::SerpApi { .. } => "serpapi",
            SerpProvider::DataForSeo { .. } => "dataforseo",
        }
    }

    fn default_endpoint(&self) -> &'static str {
        match self {
            SerpProvider::SerpApi { .. } => SERPAPI_URL,
            SerpProvider::DataForSeo { .. } => DATAFORSEO_URL,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SerpQuery<'a> {
    pub keyword: &'a str,
    pub location: &'a str,
    pub language: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrganicItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
}

/// Provider-neutral response.
#[derive(Debug, Clone, Default)]
pub struct RawSerp {
    pub organic: Vec<OrganicItem>,
    pub related_searches: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicItem>,
    #[serde(default)]
    related_searches: Vec<SerpApiRelated>,
}

#[derive(Debug, Deserialize)]
struct SerpApiRelated {
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoResponse {
    #[serde(default)]
    tasks: Vec<DataForSeoTask>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoTask {
    result: Option<Vec<DataForSeoResult>>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoResult {
    items: Option<Vec<DataForSeoItem>>,
}

#[derive(Debug, Deserialize)]
struct DataForSeoItem {
    #[serde(default, rename = "type")]
    item_type: String,
    title: Option<String>,
    url: Option<String>,
    description: Option<String>,
    /// Plain strings for `related_searches` items; other item types vary.
    items: Option<Value>,
}

#[derive(Clone)]
pub struct SerpClient {
    client: Client,
    provider: Option<SerpProvider>,
    endpoint: Option<String>,
    timeout: Duration,
}

impl SerpClient {
    /// `provider = None` means fallback-only mode: every fetch fails fast with `NotConfigured`.
    pub fn new(provider: Option<SerpProvider>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            provider,
            endpoint: None,
            timeout,
        }
    }

    /// Points the client at a different endpoint (self-hosted proxy, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(SerpProvider::name)
    }

    pub async fn fetch(&self, query: SerpQuery<'_>) -> Result<RawSerp, SerpError> {
        let provider = self.provider.as_ref().ok_or(SerpError::NotConfigured)?;
        match tokio::time::timeout(self.timeout, self.fetch_from(provider, query)).await {
            Ok(result) => result,
            Err(_) => Err(SerpError::Timeout(self.timeout)),
        }
    }

    async fn fetch_from(
        &self,
        provider: &SerpProvider,
        query: SerpQuery<'_>,
    ) -> Result<RawSerp, SerpError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .unwrap_or_else(|| provider.default_endpoint());

        let request = match provider {
            SerpProvider::SerpApi { api_key } => {
                let num = RESULTS_PER_QUERY.to_string();
                self.client.get(endpoint).query(&[
                    ("q", query.keyword),
                    ("api_key", api_key.as_str()),
                    ("location", query.location),
                    ("hl", query.language),
                    ("num", num.as_str()),
                ])
            }
            SerpProvider::DataForSeo { username, password } => self
                .client
                .post(endpoint)
                .basic_auth(username, Some(password))
                .json(&json!([{
                    "keyword": query.keyword,
                    "location_name": query.location,
                    "language_code": query.language,
                    "depth": RESULTS_PER_QUERY,
                }])),
        };

        let response = request
            .send()
            .await
            .map_err(|e| SerpError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SerpError::from_status(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SerpError::from_reqwest(e, self.timeout))?;

        let raw = match provider {
            SerpProvider::SerpApi { .. } => parse_serpapi(&body)?,
            SerpProvider::DataForSeo { .. } => parse_dataforseo(&body)?,
        };
        debug!(
            provider = provider.name(),
            organic = raw.organic.len(),
            related = raw.related_searches.len(),
            "SERP fetch succeeded"
        );
        Ok(raw)
    }
}

fn parse_serpapi(body: &str) -> Result<RawSerp, SerpError> {
    let parsed: SerpApiResponse =
        serde_json::from_str(body).map_err(|e| SerpError::Parse(e.to_string()))?;
    Ok(RawSerp {
        organic: parsed.organic_results,
        related_searches: parsed
            .related_searches
            .into_iter()
            .filter_map(|r| r.query)
            .collect(),
    })
}

fn parse_dataforseo(body: &str) -> Result<RawSerp, SerpError> {
    let parsed: DataForSeoResponse =
        serde_json::from_str(body).map_err(|e| SerpError::Parse(e.to_string()))?;

    let items = parsed
        .tasks
        .into_iter()
        .next()
        .and_then(|t| t.result)
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.items)
        .unwrap_or_default();

    let mut raw = RawSerp::default();
    for item in items {
        match item.item_type.as_str() {
            "organic" => raw.organic.push(OrganicItem {
                title: item.title,
                link: item.url,
                snippet: item.description,
            }),
            "related_searches" => {
                if let Some(Value::Array(values)) = item.items {
                    raw.related_searches.extend(
                        values
                            .into_iter()
                            .filter_map(|v| v.as_str().map(str::to_string)),
                    );
                }
            }
            _ => {}
        }
    }
    Ok(raw)
}
