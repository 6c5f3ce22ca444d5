use serde::{Deserialize, Serialize};

/// One ranked organic result. Order by `position` is rank order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerpResult {
    pub position: u32, // 1-based
    pub title: String,
    pub url: String,
    pub snippet: String,
    pub entities: Vec<String>,
    /// Expected click-through rate for this position, in percent.
    pub ctr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerpSource {
    Live,
    Fallback,
}

/// Results for one query, live or substituted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerpLookup {
    pub keyword: String,
    pub results: Vec<SerpResult>,
    pub related_searches: Vec<String>,
    pub source: SerpSource,
    /// User-facing hint when the fallback was caused by something the user can act on.
    pub notice: Option<String>,
}
