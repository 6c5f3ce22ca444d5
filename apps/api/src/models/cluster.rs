use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::keyword::{Intent, Trend};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

/// A suggested piece of content for one subtopic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentOpportunity {
    pub topic: String,
    pub content_type: String,
    pub keywords: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCluster {
    pub id: Uuid,
    pub main_topic: String,
    pub intent: Intent,
    pub subtopics: Vec<String>, // deduplicated, ≤ 12
    pub keywords: Vec<String>,  // deduplicated, ≤ 20
    pub semantic_relevance: u8, // 0 – 100
    pub search_volume: u32,
    pub difficulty: u8,
    pub competitor_topics: Vec<String>,
    pub semantic_phrases: Vec<String>,
    pub content_opportunities: Vec<ContentOpportunity>,
    pub seasonality: String,
    pub trend: Trend,
    pub created_at: DateTime<Utc>,
}
