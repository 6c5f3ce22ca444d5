//! Topic Clusterer — turns a main topic, its keyword analysis and SERP page
//! into a named cluster of subtopics, keywords and content opportunities.
//!
//! Everything here is deterministic given its inputs.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::models::cluster::{ContentOpportunity, Priority, TopicCluster};
use crate::models::keyword::{Intent, KeywordAnalysis};
use crate::models::serp::SerpResult;
use crate::text::{has_punctuation_edge, is_stop_word, jaccard, push_unique, tokenize};

const MAX_SUBTOPICS: usize = 12;
const MAX_KEYWORDS: usize = 20;
const MAX_COMPETITOR_TOPICS: usize = 15;
const MAX_SEMANTIC_PHRASES: usize = 10;
const MAX_VARIATIONS: usize = 4;
const INTENT_SAMPLE: usize = 5;

const INFORMATIONAL_SIGNALS: &[&str] = &["how to", "what is", "guide", "tutorial", "tips", "learn"];
const COMMERCIAL_SIGNALS: &[&str] = &["best", "top", "review", "compare", "vs", "alternative"];
const TRANSACTIONAL_SIGNALS: &[&str] = &["buy", "price", "cost", "discount", "sale", "order"];

const SYNONYMS: &[(&str, [&str; 3])] = &[
    ("marketing", ["advertising", "promotion", "campaigns"]),
    ("strategy", ["approach", "plan", "methodology"]),
    ("optimization", ["improvement", "enhancement", "refinement"]),
    ("analysis", ["examination", "evaluation", "assessment"]),
    ("management", ["administration", "oversight", "coordination"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Intent
// ────────────────────────────────────────────────────────────────────────────

/// Whole-word (or plural) match of a single-word signal, phrase match otherwise.
fn has_signal(tokens: &[String], signal: &str) -> bool {
    let parts = tokenize(signal);
    if parts.len() > 1 {
        return tokens.windows(parts.len()).any(|w| w == parts.as_slice());
    }
    tokens
        .iter()
        .any(|t| t == signal || t.strip_suffix('s') == Some(signal))
}

/// Majority vote over the top five results: each result adds one to every
/// intent it shows a signal for. Ties go transactional, then commercial, then
/// informational. No signals at all reads as informational.
pub fn tally_intent(results: &[SerpResult]) -> Intent {
    let (mut info, mut commercial, mut transactional) = (0u32, 0u32, 0u32);
    for result in results.iter().take(INTENT_SAMPLE) {
        let tokens = tokenize(&format!("{} {}", result.title, result.snippet));
        let any = |signals: &[&str]| signals.iter().any(|s| has_signal(&tokens, s));
        info += u32::from(any(INFORMATIONAL_SIGNALS));
        commercial += u32::from(any(COMMERCIAL_SIGNALS));
        transactional += u32::from(any(TRANSACTIONAL_SIGNALS));
    }

    let top = info.max(commercial).max(transactional);
    if top == 0 {
        Intent::Informational
    } else if transactional == top {
        Intent::Transactional
    } else if commercial == top {
        Intent::Commercial
    } else {
        Intent::Informational
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Competitor topics
// ────────────────────────────────────────────────────────────────────────────

/// Most frequent salient words across results (ties keep first appearance),
/// plus two-word title phrases.
pub fn competitor_topics(results: &[SerpResult]) -> (Vec<String>, Vec<String>) {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut phrases = Vec::new();

    for result in results {
        let text = format!("{} {}", result.title, result.snippet).to_lowercase();
        for word in text.split_whitespace() {
            if word.chars().count() > 3 && !is_stop_word(word) && !has_punctuation_edge(word) {
                let next = counts.len();
                counts.entry(word.to_string()).or_insert((0, next)).0 += 1;
            }
        }

        let title_words: Vec<&str> = result.title.split_whitespace().collect();
        for pair in title_words.windows(2) {
            let phrase = format!("{} {}", pair[0], pair[1]).to_lowercase();
            if phrase.chars().count() > 6 {
                push_unique(&mut phrases, phrase);
            }
        }
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|(_, (ca, fa)), (_, (cb, fb))| cb.cmp(ca).then(fa.cmp(fb)));
    let topics = ranked
        .into_iter()
        .take(MAX_COMPETITOR_TOPICS)
        .map(|(word, _)| word)
        .collect();
    phrases.truncate(MAX_SEMANTIC_PHRASES);
    (topics, phrases)
}

// ────────────────────────────────────────────────────────────────────────────
// Subtopics & keywords
// ────────────────────────────────────────────────────────────────────────────

pub fn intent_subtopics(main_topic: &str, intent: Intent) -> Vec<String> {
    let templates: [&str; 6] = match intent {
        Intent::Commercial => [
            "best {} tools and software",
            "{} comparison and reviews",
            "top {} service providers",
            "{} features and benefits",
            "{} alternatives and options",
            "{} pricing and costs",
        ],
        Intent::Transactional => [
            "buy {} online",
            "{} pricing and packages",
            "{} discounts and deals",
            "{} subscription options",
            "{} trial and demo",
            "{} support and services",
        ],
        Intent::Informational | Intent::Navigational => [
            "{} basics and fundamentals",
            "how to get started with {}",
            "{} best practices and tips",
            "common {} mistakes to avoid",
            "advanced {} techniques",
            "{} trends and updates",
        ],
    };
    templates.iter().map(|t| t.replace("{}", main_topic)).collect()
}

/// Related keywords already mentioning the topic are kept, others are prefixed with it.
fn to_subtopic(related: &str, main_topic: &str) -> String {
    if related.to_lowercase().contains(&main_topic.to_lowercase()) {
        related.to_string()
    } else {
        format!("{main_topic} {related}")
    }
}

/// Topic with one word swapped for a synonym, at most four.
pub fn semantic_variations(main_topic: &str) -> Vec<String> {
    let words: Vec<&str> = main_topic.split_whitespace().collect();
    let mut variations = Vec::new();
    for (i, word) in words.iter().enumerate() {
        let lower = word.to_lowercase();
        let Some((_, synonyms)) = SYNONYMS.iter().find(|(w, _)| *w == lower) else {
            continue;
        };
        for synonym in synonyms {
            let mut swapped = words.clone();
            swapped[i] = *synonym;
            variations.push(swapped.join(" "));
        }
    }
    variations.truncate(MAX_VARIATIONS);
    variations
}

fn keyword_variations(subtopic: &str) -> [String; 4] {
    [
        format!("best {subtopic}"),
        format!("top {subtopic}"),
        format!("{subtopic} guide"),
        format!("{subtopic} tips"),
    ]
}

fn question_keywords(main_topic: &str) -> [String; 5] {
    [
        format!("what is {main_topic}"),
        format!("how does {main_topic} work"),
        format!("why use {main_topic}"),
        format!("when to implement {main_topic}"),
        format!("how to choose {main_topic}"),
    ]
}

fn commercial_keywords(main_topic: &str) -> [String; 6] {
    [
        format!("{main_topic} pricing"),
        format!("{main_topic} cost"),
        format!("best {main_topic} tools"),
        format!("{main_topic} services"),
        format!("{main_topic} solutions"),
        format!("{main_topic} software"),
    ]
}

/// Mean Jaccard overlap between the topic and each subtopic, as 0 – 100.
pub fn semantic_relevance(main_topic: &str, subtopics: &[String]) -> u8 {
    if subtopics.is_empty() {
        return 0;
    }
    let total: f64 = subtopics.iter().map(|s| jaccard(main_topic, s)).sum();
    (total / subtopics.len() as f64 * 100.0).round().clamp(0.0, 100.0) as u8
}

fn content_opportunities(
    subtopics: &[String],
    keywords: &[String],
    intent: Intent,
) -> Vec<ContentOpportunity> {
    let content_types: [&str; 4] = match intent {
        Intent::Commercial => ["comparison pages", "review articles", "feature pages", "case studies"],
        Intent::Transactional => ["product pages", "pricing pages", "landing pages", "checkout flows"],
        Intent::Informational | Intent::Navigational => {
            ["blog posts", "guides", "tutorials", "infographics"]
        }
    };

    subtopics
        .iter()
        .take(5)
        .enumerate()
        .map(|(i, subtopic)| {
            let needle = subtopic.to_lowercase();
            ContentOpportunity {
                topic: subtopic.clone(),
                content_type: content_types[i % content_types.len()].to_string(),
                keywords: keywords
                    .iter()
                    .filter(|k| k.to_lowercase().contains(&needle))
                    .take(3)
                    .cloned()
                    .collect(),
                priority: if i < 3 { Priority::High } else { Priority::Medium },
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Cluster assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds a cluster. `intent = None` derives it from the SERP page.
pub fn build_cluster(
    main_topic: &str,
    intent: Option<Intent>,
    analysis: &KeywordAnalysis,
    serp: &[SerpResult],
) -> TopicCluster {
    let main_topic = main_topic.trim();
    let intent = intent.unwrap_or_else(|| tally_intent(serp));
    let (topics, phrases) = competitor_topics(serp);

    let mut subtopics = Vec::new();
    for subtopic in intent_subtopics(main_topic, intent) {
        push_unique(&mut subtopics, subtopic);
    }
    for related in analysis.related_keywords.iter().take(8) {
        push_unique(&mut subtopics, to_subtopic(&related.keyword, main_topic));
    }
    for topic in topics.iter().take(6) {
        let subtopic = format!("{main_topic} {topic}");
        if subtopic.chars().count() < 60 {
            push_unique(&mut subtopics, subtopic);
        }
    }
    for variation in semantic_variations(main_topic) {
        push_unique(&mut subtopics, variation);
    }
    subtopics.truncate(MAX_SUBTOPICS);

    let mut keywords = vec![main_topic.to_string()];
    for related in &analysis.related_keywords {
        push_unique(&mut keywords, related.keyword.as_str());
    }
    for subtopic in &subtopics {
        for variation in keyword_variations(subtopic) {
            push_unique(&mut keywords, variation);
        }
    }
    for question in question_keywords(main_topic) {
        push_unique(&mut keywords, question);
    }
    if matches!(intent, Intent::Commercial | Intent::Transactional) {
        for keyword in commercial_keywords(main_topic) {
            push_unique(&mut keywords, keyword);
        }
    }
    keywords.truncate(MAX_KEYWORDS);

    TopicCluster {
        id: Uuid::new_v4(),
        main_topic: main_topic.to_string(),
        intent,
        semantic_relevance: semantic_relevance(main_topic, &subtopics),
        content_opportunities: content_opportunities(&subtopics, &keywords, intent),
        subtopics,
        keywords,
        search_volume: analysis.search_volume,
        difficulty: analysis.difficulty,
        competitor_topics: topics,
        semantic_phrases: phrases,
        seasonality: analysis.seasonality.clone(),
        trend: analysis.trend,
        created_at: Utc::now(),
    }
}
