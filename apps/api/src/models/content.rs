use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of content templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Service,
    Blog,
    Ecommerce,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Service => "service",
            ContentType::Blog => "blog",
            ContentType::Ecommerce => "ecommerce",
        }
    }

    /// Unknown names fall back to `Blog`.
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(content_type = %name, "Unknown content type, falling back to blog");
            ContentType::Blog
        })
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "service" => Ok(ContentType::Service),
            "blog" => Ok(ContentType::Blog),
            "ecommerce" => Ok(ContentType::Ecommerce),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// The scoreable parts of a piece of content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDraft {
    pub title: String,
    /// Markdown body.
    pub body: String,
    #[serde(default)]
    pub headings: Vec<String>,
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

/// Points awarded by one scoring factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub factor: String,
    pub points: u8,
}

impl ScoreFactor {
    pub fn new(factor: &str, points: u8) -> Self {
        Self {
            factor: factor.to_string(),
            points,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoReport {
    pub score: u8, // 0 – 100
    pub keyword_density: f64,
    pub word_count: usize,
    pub related_keywords_found: usize,
    /// Flesch reading ease, 0 – 100. Informational, not part of `score`.
    pub readability: f64,
    pub breakdown: Vec<ScoreFactor>,
}

/// A generated piece of content. The body is immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: Uuid,
    pub keyword: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub title: String,
    pub content: String,
    pub entities: Vec<String>, // deduplicated, ≤ 15
    pub headings: Vec<String>,
    pub faqs: Vec<Faq>,
    pub score: u8,
    pub recommendations: Vec<String>,
    pub seo_report: SeoReport,
    pub created_at: DateTime<Utc>,
}
