//! Content Generation — orchestrates the full generation pipeline.
//!
//! Flow: validate → keyword analysis → SERP lookup → competitor analysis →
//!       typed brief → template → entities + FAQs → SEO score → store.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;

use crate::content::competitor::{analyze_competitors, CompetitorInsights};
use crate::content::entities::extract_entities;
use crate::content::export::{export, ExportFile, ExportFormat};
use crate::content::faq::generate_faqs;
use crate::content::recommendations::recommendations;
use crate::content::seo_score::ContentScorer;
use crate::content::templates::{fallback_content, render, ContentBrief};
use crate::errors::AppError;
use crate::keywords::service::{validate_keyword, KeywordService, DEFAULT_COUNTRY, DEFAULT_LANGUAGE};
use crate::models::content::{ContentDraft, ContentType, GeneratedContent, SeoReport};
use crate::models::keyword::KeywordStats;
use crate::rng::SharedRng;
use crate::serp::service::SerpService;
use crate::store::{Record, RecordStore};

impl Record for GeneratedContent {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> chrono::DateTime<Utc> {
        self.created_at
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pure generation
// ────────────────────────────────────────────────────────────────────────────

/// Title, headings, body, entities and FAQs for one keyword and content type.
///
/// Deterministic apart from the flavour figures drawn from `rng`. A template
/// that renders an empty body is replaced by the minimal fallback content.
pub fn generate<R: Rng + ?Sized>(
    content_type: ContentType,
    stats: &KeywordStats,
    competitors: &CompetitorInsights,
    year: i32,
    rng: &mut R,
) -> ContentDraft {
    let brief = ContentBrief::build(content_type, stats, competitors, year, rng);
    let mut templated = render(&brief);
    if templated.body.trim().is_empty() {
        warn!(
            keyword = %brief.keyword(),
            content_type = %brief.content_type(),
            "Template rendered empty body, using fallback content"
        );
        templated = fallback_content(stats, brief.content_type());
    }

    ContentDraft {
        title: templated.title,
        body: templated.body,
        headings: templated.headings,
        entities: extract_entities(
            &stats.keyword,
            &stats.related_keywords,
            &competitors.common_topics,
        ),
        faqs: generate_faqs(content_type, stats, rng),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

pub struct ContentService {
    keywords: Arc<KeywordService>,
    serp: Arc<SerpService>,
    scorer: Arc<dyn ContentScorer>,
    store: RecordStore<GeneratedContent>,
    rng: SharedRng,
}

impl ContentService {
    pub fn new(
        keywords: Arc<KeywordService>,
        serp: Arc<SerpService>,
        scorer: Arc<dyn ContentScorer>,
        rng: SharedRng,
    ) -> Self {
        Self {
            keywords,
            serp,
            scorer,
            store: RecordStore::in_memory("Content"),
            rng,
        }
    }

    /// Runs the full pipeline and stores the result.
    ///
    /// Steps:
    /// 1. validate the keyword (the only user-visible failure)
    /// 2. keyword analysis (cached)
    /// 3. SERP lookup (never fails; fallback results on provider errors)
    /// 4. competitor insights from the top five results
    /// 5. draft: brief → template → entities → FAQs
    /// 6. SEO report + recommendations
    pub async fn generate(
        &self,
        keyword: &str,
        content_type: ContentType,
    ) -> Result<GeneratedContent, AppError> {
        // Step 1 + 2
        let keyword = validate_keyword(keyword)?;
        let analysis = self
            .keywords
            .analyze(keyword, DEFAULT_COUNTRY, DEFAULT_LANGUAGE)?;
        let stats = KeywordStats::from(&analysis);

        // Step 3
        let serp = self.serp.lookup(keyword, None, None).await;
        if let Some(notice) = &serp.notice {
            warn!(keyword = %keyword, notice = %notice, "Generating against fallback SERP data");
        }

        // Step 4
        let competitors = analyze_competitors(&serp.results);

        // Step 5
        let year = Utc::now().year();
        let draft = self
            .rng
            .with(|rng| generate(content_type, &stats, &competitors, year, rng));

        // Step 6
        let seo_report = self.scorer.score(&draft, &stats).await?;
        let recommendations = recommendations(&stats, &competitors);

        info!(
            keyword = %keyword,
            %content_type,
            score = seo_report.score,
            scorer = self.scorer.name(),
            words = seo_report.word_count,
            "Content generated"
        );

        let content = GeneratedContent {
            id: Uuid::new_v4(),
            keyword: keyword.to_string(),
            content_type,
            title: draft.title,
            content: draft.body,
            entities: draft.entities,
            headings: draft.headings,
            faqs: draft.faqs,
            score: seo_report.score,
            recommendations,
            seo_report,
            created_at: Utc::now(),
        };
        Ok(self.store.insert(content))
    }

    /// Scores arbitrary content without storing anything.
    pub async fn score(
        &self,
        draft: &ContentDraft,
        stats: &KeywordStats,
    ) -> Result<SeoReport, AppError> {
        validate_keyword(&stats.keyword)?;
        self.scorer.score(draft, stats).await
    }

    pub fn list(&self) -> Vec<GeneratedContent> {
        self.store.list()
    }

    pub fn get(&self, id: Uuid) -> Result<GeneratedContent, AppError> {
        self.store.get(id)
    }

    pub fn delete(&self, id: Uuid) -> Result<GeneratedContent, AppError> {
        let content = self.store.delete(id)?;
        info!(keyword = %content.keyword, "Content deleted");
        Ok(content)
    }

    pub fn export(&self, id: Uuid, format: ExportFormat) -> Result<ExportFile, AppError> {
        Ok(export(&self.store.get(id)?, format))
    }
}
