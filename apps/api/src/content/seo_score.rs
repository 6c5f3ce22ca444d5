//! SEO Scorer — pluggable, trait-based scorer for a content draft against its keyword stats.
//!
//! Default: `HeuristicSeoScorer`, an additive point table (no factor can exceed
//! 20 of the 100 points). `AppState` holds an `Arc<dyn ContentScorer>`.

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::content::{ContentDraft, ScoreFactor, SeoReport};
use crate::models::keyword::KeywordStats;
use crate::text::{contains_phrase, flesch_reading_ease, keyword_density, word_count};

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching handlers or the
/// generation pipeline.
#[async_trait]
pub trait ContentScorer: Send + Sync {
    async fn score(&self, draft: &ContentDraft, stats: &KeywordStats) -> Result<SeoReport, AppError>;

    /// Backend name, for logs.
    fn name(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicSeoScorer
// ────────────────────────────────────────────────────────────────────────────

/// Point table:
///
/// | Factor | Condition → points |
/// |---|---|
/// | keyword density | 1–3% → 20, 0.5–4% → 15, >0 → 10 |
/// | word count | ≥2000 → 20, ≥1500 → 15, ≥1000 → 10, ≥500 → 5 |
/// | headings | ≥6 → 15, ≥4 → 12, ≥2 → 8 |
/// | entities | ≥12 → 15, ≥8 → 12, ≥4 → 8 |
/// | FAQs | ≥3 → 10, ≥1 → 5 |
/// | title contains keyword | 10 |
/// | related keywords in body | ≥4 → 10, ≥2 → 7, ≥1 → 3 |
pub struct HeuristicSeoScorer;

#[async_trait]
impl ContentScorer for HeuristicSeoScorer {
    async fn score(&self, draft: &ContentDraft, stats: &KeywordStats) -> Result<SeoReport, AppError> {
        Ok(score_draft(draft, stats))
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

fn density_points(density: f64) -> u8 {
    if (1.0..=3.0).contains(&density) {
        20
    } else if (0.5..=4.0).contains(&density) {
        15
    } else if density > 0.0 {
        10
    } else {
        0
    }
}

fn word_count_points(words: usize) -> u8 {
    match words {
        2000.. => 20,
        1500..=1999 => 15,
        1000..=1499 => 10,
        500..=999 => 5,
        _ => 0,
    }
}

fn heading_points(headings: usize) -> u8 {
    match headings {
        6.. => 15,
        4..=5 => 12,
        2..=3 => 8,
        _ => 0,
    }
}

fn entity_points(entities: usize) -> u8 {
    match entities {
        12.. => 15,
        8..=11 => 12,
        4..=7 => 8,
        _ => 0,
    }
}

fn faq_points(faqs: usize) -> u8 {
    match faqs {
        3.. => 10,
        1..=2 => 5,
        _ => 0,
    }
}

fn related_points(found: usize) -> u8 {
    match found {
        4.. => 10,
        2..=3 => 7,
        1 => 3,
        _ => 0,
    }
}

/// Pure scoring function behind `HeuristicSeoScorer`. Always within 0 – 100.
pub fn score_draft(draft: &ContentDraft, stats: &KeywordStats) -> SeoReport {
    let keyword = stats.keyword.trim();
    let density = keyword_density(&draft.body, keyword);
    let words = word_count(&draft.body);
    let related_found = stats
        .related_keywords
        .iter()
        .filter(|related| contains_phrase(&draft.body, related))
        .count();
    let title_points = if contains_phrase(&draft.title, keyword) { 10 } else { 0 };

    let breakdown = vec![
        ScoreFactor::new("keyword_density", density_points(density)),
        ScoreFactor::new("word_count", word_count_points(words)),
        ScoreFactor::new("headings", heading_points(draft.headings.len())),
        ScoreFactor::new("entities", entity_points(draft.entities.len())),
        ScoreFactor::new("faqs", faq_points(draft.faqs.len())),
        ScoreFactor::new("title_keyword", title_points),
        ScoreFactor::new("related_keywords", related_points(related_found)),
    ];
    let total: u32 = breakdown.iter().map(|f| u32::from(f.points)).sum();

    SeoReport {
        score: total.min(100) as u8,
        keyword_density: (density * 100.0).round() / 100.0,
        word_count: words,
        related_keywords_found: related_found,
        readability: (flesch_reading_ease(&draft.body) * 10.0).round() / 10.0,
        breakdown,
    }
}
