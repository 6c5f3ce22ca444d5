//! Keyword Estimator — heuristic volume, difficulty, intent, trend and seasonality
//! from the keyword string alone.
//!
//! Never fails: every field degrades to a default base value. Volume and difficulty
//! carry random jitter; intent and seasonality are deterministic.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::keyword::{Competition, Intent, Trend};
use crate::text::jaccard;

const BASE_VOLUME: f64 = 10_000.0;
const MIN_VOLUME: u32 = 10;
const BASE_DIFFICULTY: f64 = 50.0;

/// Terms that raise difficulty.
pub const COMMERCIAL_TERMS: &[&str] = &["buy", "price", "cost", "cheap", "discount", "sale"];

// Intent cascade, checked in this order.
pub const TRANSACTIONAL_TERMS: &[&str] = &["buy", "purchase", "price", "cost", "discount", "sale"];
pub const COMMERCIAL_INTENT_TERMS: &[&str] = &["best", "top", "review", "compare", "vs", "alternative"];
pub const INFORMATIONAL_TERMS: &[&str] = &["what", "how", "why", "guide", "tutorial", "tips"];

pub const TRENDING_TERMS: &[&str] = &[
    "ai",
    "automation",
    "remote",
    "digital",
    "online",
    "virtual",
    "cloud",
];

pub const SEASONAL_TERMS: &[(&str, &str)] = &[
    ("christmas", "winter_peak"),
    ("summer", "summer_peak"),
    ("halloween", "fall_peak"),
    ("tax", "spring_peak"),
    ("vacation", "summer_peak"),
    ("school", "fall_peak"),
];

const SPECIAL_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', ',', '.', '?', '"', ':', '{', '}', '|', '<',
    '>',
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordEstimate {
    pub search_volume: u32,
    pub difficulty: u8,
    pub intent: Intent,
    pub trend: Trend,
    pub seasonality: String,
}

pub fn estimate<R: Rng + ?Sized>(keyword: &str, rng: &mut R) -> KeywordEstimate {
    KeywordEstimate {
        search_volume: estimate_volume(keyword, rng),
        difficulty: estimate_difficulty(keyword, rng),
        intent: classify_intent(keyword),
        trend: analyze_trend(keyword, rng),
        seasonality: analyze_seasonality(keyword).to_string(),
    }
}

fn word_count(keyword: &str) -> usize {
    keyword.split_whitespace().count()
}

fn contains_any(keyword: &str, terms: &[&str]) -> bool {
    let lower = keyword.to_lowercase();
    terms.iter().any(|t| lower.contains(t))
}

/// Base 10 000, ×2 for one word, ×0.3 above four words, ×1.5 under 5 chars,
/// ×0.5 over 20 chars, then ±20% jitter. Never below 10.
pub fn estimate_volume<R: Rng + ?Sized>(keyword: &str, rng: &mut R) -> u32 {
    let words = word_count(keyword);
    let length = keyword.trim().chars().count();

    let mut volume = BASE_VOLUME;
    if words == 1 {
        volume *= 2.0;
    }
    if words > 4 {
        volume *= 0.3;
    }
    if length < 5 {
        volume *= 1.5;
    }
    if length > 20 {
        volume *= 0.5;
    }

    let variation = (rng.gen::<f64>() - 0.5) * 0.4;
    ((volume * (1.0 + variation)).floor() as u32).max(MIN_VOLUME)
}

/// Base 50 adjusted by shape and commercial terms, ±10 jitter, clamped to [10, 100].
pub fn estimate_difficulty<R: Rng + ?Sized>(keyword: &str, rng: &mut R) -> u8 {
    let words = word_count(keyword);
    let mut difficulty = BASE_DIFFICULTY;

    if words == 1 {
        difficulty += 20.0;
    }
    if words > 3 {
        difficulty -= 15.0;
    }
    if keyword.chars().any(|c| c.is_ascii_digit()) {
        difficulty -= 10.0;
    }
    if keyword.contains(SPECIAL_CHARS) {
        difficulty -= 5.0;
    }
    if contains_any(keyword, COMMERCIAL_TERMS) {
        difficulty += 15.0;
    }

    let jittered = (difficulty + (rng.gen::<f64>() - 0.5) * 20.0).floor();
    jittered.clamp(10.0, 100.0) as u8
}

/// Fixed-priority substring cascade: transactional, commercial, informational,
/// else navigational.
pub fn classify_intent(keyword: &str) -> Intent {
    if contains_any(keyword, TRANSACTIONAL_TERMS) {
        Intent::Transactional
    } else if contains_any(keyword, COMMERCIAL_INTENT_TERMS) {
        Intent::Commercial
    } else if contains_any(keyword, INFORMATIONAL_TERMS) {
        Intent::Informational
    } else {
        Intent::Navigational
    }
}

pub fn analyze_trend<R: Rng + ?Sized>(keyword: &str, rng: &mut R) -> Trend {
    if contains_any(keyword, TRENDING_TERMS) {
        Trend::Rising
    } else if rng.gen::<f64>() > 0.5 {
        Trend::Stable
    } else {
        Trend::Declining
    }
}

pub fn analyze_seasonality(keyword: &str) -> &'static str {
    let lower = keyword.to_lowercase();
    SEASONAL_TERMS
        .iter()
        .find(|(term, _)| lower.contains(term))
        .map(|(_, season)| *season)
        .unwrap_or("stable")
}

/// Random cost-per-click in [0.5, 5.5), rounded to cents.
pub fn estimate_cpc<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    ((rng.gen::<f64>() * 5.0 + 0.5) * 100.0).round() / 100.0
}

pub fn competition_level(difficulty: u8) -> Competition {
    match difficulty {
        d if d > 70 => Competition::High,
        d if d > 40 => Competition::Medium,
        _ => Competition::Low,
    }
}

/// Word-overlap between the seed and a related keyword, 0 – 100.
pub fn calculate_relevance(original: &str, related: &str) -> u8 {
    (jaccard(original, related) * 100.0).round() as u8
}

pub fn find_opportunities(keyword: &str, difficulty: u8, intent: Intent, trend: Trend) -> Vec<String> {
    let mut opportunities = Vec::new();

    if difficulty < 30 {
        opportunities.push("Low competition opportunity".to_string());
    }
    if word_count(keyword) > 3 {
        opportunities.push("Long-tail keyword potential".to_string());
    }
    if intent == Intent::Commercial {
        opportunities.push("High conversion potential".to_string());
    }
    if trend == Trend::Rising {
        opportunities.push("Trending topic opportunity".to_string());
    }

    if opportunities.is_empty() {
        vec![
            "Content optimization".to_string(),
            "SERP analysis recommended".to_string(),
        ]
    } else {
        opportunities
    }
}
