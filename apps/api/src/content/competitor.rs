//! Competitor analysis over the top SERP results: shared topics, a rough
//! content-length estimate, and heading patterns mined from titles and snippets.

use serde::{Deserialize, Serialize};

use crate::models::serp::SerpResult;
use crate::text::{is_stop_word, push_unique, tokenize};

const TOP_RESULTS: usize = 5;
const MAX_COMMON_TOPICS: usize = 20;
const MAX_HEADINGS_PER_LEVEL: usize = 5;
const DEFAULT_AVERAGE_LENGTH: u32 = 1500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingPattern {
    pub level: HeadingLevel,
    pub common_headings: Vec<String>,
    /// Candidates seen at this level, duplicates included.
    pub frequency: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorInsights {
    pub common_topics: Vec<String>,
    /// Estimated words per competing page.
    pub average_length: u32,
    pub heading_patterns: Vec<HeadingPattern>,
}

impl Default for CompetitorInsights {
    fn default() -> Self {
        let pattern = |level, headings: &[&str], frequency| HeadingPattern {
            level,
            common_headings: headings.iter().map(|h| h.to_string()).collect(),
            frequency,
        };
        Self {
            common_topics: Vec::new(),
            average_length: DEFAULT_AVERAGE_LENGTH,
            heading_patterns: vec![
                pattern(HeadingLevel::H1, &["Complete Guide", "Best Practices"], 5),
                pattern(
                    HeadingLevel::H2,
                    &["Getting Started", "Advanced Techniques", "Common Mistakes"],
                    8,
                ),
                pattern(
                    HeadingLevel::H3,
                    &["Tips and Tricks", "Implementation Steps"],
                    12,
                ),
            ],
        }
    }
}

fn starts_with_any(text: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| text.starts_with(p))
}

pub fn classify_heading(text: &str) -> HeadingLevel {
    let lower = text.to_lowercase();
    if starts_with_any(&lower, &["how to", "guide", "complete", "ultimate", "best"]) {
        return HeadingLevel::H1;
    }
    let numbered = {
        let digits = lower.chars().take_while(char::is_ascii_digit).count();
        digits > 0 && lower[digits..].starts_with('.')
    };
    if numbered || starts_with_any(&lower, &["step", "part", "chapter"]) {
        HeadingLevel::H2
    } else {
        HeadingLevel::H3
    }
}

/// First six words of an action, question or benefit sentence, punctuation removed.
pub fn heading_from_sentence(sentence: &str) -> Option<String> {
    let lower = sentence.to_lowercase();
    let candidate = starts_with_any(
        &lower,
        &["learn", "discover", "understand", "explore", "master", "implement"],
    ) || starts_with_any(&lower, &["why", "how", "what", "when", "where"])
        || ["benefits", "advantages", "features", "solutions"]
            .iter()
            .any(|w| lower.contains(w));
    if !candidate {
        return None;
    }

    let heading: String = sentence
        .split(' ')
        .take(6)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let heading = heading.trim().to_string();
    (!heading.is_empty()).then_some(heading)
}

fn record(patterns: &mut Vec<(HeadingLevel, Vec<String>)>, level: HeadingLevel, heading: String) {
    match patterns.iter_mut().find(|(l, _)| *l == level) {
        Some((_, headings)) => headings.push(heading),
        None => patterns.push((level, vec![heading])),
    }
}

/// Insights from the top five results. An empty page yields the defaults.
pub fn analyze_competitors(results: &[SerpResult]) -> CompetitorInsights {
    let top = &results[..results.len().min(TOP_RESULTS)];
    if top.is_empty() {
        return CompetitorInsights::default();
    }

    let mut common_topics = Vec::new();
    let mut patterns: Vec<(HeadingLevel, Vec<String>)> = Vec::new();
    let mut total_length = 0usize;

    for result in top {
        let text = format!("{} {}", result.title, result.snippet);
        for word in tokenize(&text) {
            if word.chars().count() > 3 && !is_stop_word(&word) {
                push_unique(&mut common_topics, word);
            }
        }

        for part in result.title.split(['-', '|', ':']).map(str::trim) {
            if part.chars().count() > 5 {
                record(&mut patterns, classify_heading(part), part.to_string());
            }
        }

        for sentence in result.snippet.split(['.', '!', '?']).map(str::trim) {
            if sentence.chars().count() > 10 {
                if let Some(heading) = heading_from_sentence(sentence) {
                    record(&mut patterns, HeadingLevel::H3, heading);
                }
            }
        }

        total_length += result.snippet.chars().count() * 10;
    }

    common_topics.truncate(MAX_COMMON_TOPICS);
    let heading_patterns = patterns
        .into_iter()
        .map(|(level, headings)| {
            let frequency = headings.len();
            let mut common_headings = Vec::new();
            for heading in headings {
                if !common_headings.contains(&heading) {
                    common_headings.push(heading);
                }
            }
            common_headings.truncate(MAX_HEADINGS_PER_LEVEL);
            HeadingPattern {
                level,
                common_headings,
                frequency,
            }
        })
        .collect();

    CompetitorInsights {
        common_topics,
        average_length: (total_length / top.len()) as u32,
        heading_patterns,
    }
}
