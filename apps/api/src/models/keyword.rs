use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Searcher purpose behind a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Informational,
    Commercial,
    Transactional,
    Navigational,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Informational => "informational",
            Intent::Commercial => "commercial",
            Intent::Transactional => "transactional",
            Intent::Navigational => "navigational",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competition {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedKeyword {
    pub keyword: String,
    pub search_volume: u32,
    pub difficulty: u8,
    /// Word-overlap with the seed keyword, 0 – 100.
    pub relevance: u8,
}

/// One keyword analysis. Never mutated after creation; a refresh replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub id: Uuid,
    pub keyword: String,
    pub search_volume: u32,
    pub difficulty: u8, // 10 – 100
    pub cpc: f64,
    pub competition: Competition,
    pub intent: Intent,
    pub trend: Trend,
    pub related_keywords: Vec<RelatedKeyword>,
    /// `stable` or a `<season>_peak` tag.
    pub seasonality: String,
    pub opportunities: Vec<String>,
    pub country: String,
    pub language: String,
    pub timestamp: DateTime<Utc>,
}

impl KeywordAnalysis {
    pub fn related_terms(&self, limit: usize) -> Vec<String> {
        self.related_keywords
            .iter()
            .take(limit)
            .map(|r| r.keyword.clone())
            .collect()
    }
}

fn default_search_volume() -> u32 {
    1000
}

fn default_difficulty() -> u8 {
    50
}

fn default_intent() -> Intent {
    Intent::Informational
}

fn default_cpc() -> f64 {
    2.5
}

/// The keyword figures templating and scoring work from. Missing fields take
/// neutral defaults so callers can score content against partial stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordStats {
    pub keyword: String,
    #[serde(default = "default_search_volume")]
    pub search_volume: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default = "default_intent")]
    pub intent: Intent,
    #[serde(default = "default_cpc")]
    pub cpc: f64,
    #[serde(default)]
    pub related_keywords: Vec<String>,
}

impl KeywordStats {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            search_volume: default_search_volume(),
            difficulty: default_difficulty(),
            intent: default_intent(),
            cpc: default_cpc(),
            related_keywords: Vec::new(),
        }
    }
}

impl From<&KeywordAnalysis> for KeywordStats {
    fn from(analysis: &KeywordAnalysis) -> Self {
        Self {
            keyword: analysis.keyword.clone(),
            search_volume: analysis.search_volume,
            difficulty: analysis.difficulty,
            intent: analysis.intent,
            cpc: analysis.cpc,
            related_keywords: analysis.related_terms(analysis.related_keywords.len()),
        }
    }
}
