//! Raw provider output → ranked `SerpResult`s, plus the locally generated
//! fallback used whenever a live fetch is not possible.

use crate::models::serp::SerpResult;
use crate::serp::client::RawSerp;
use crate::text::{is_stop_word, push_unique, tokenize};

pub const FALLBACK_DOMAINS: [&str; 5] = [
    "wikipedia.org",
    "medium.com",
    "hubspot.com",
    "moz.com",
    "searchengineland.com",
];

const CTR_BY_POSITION: [f64; 10] = [31.7, 24.7, 18.7, 13.7, 9.5, 6.1, 4.4, 3.1, 2.5, 2.2];
const MAX_RESULT_ENTITIES: usize = 5;

/// Expected click-through rate (percent) for a 1-based rank.
pub fn ctr(position: u32) -> f64 {
    match position {
        1..=10 => CTR_BY_POSITION[position as usize - 1],
        _ => (2.5 - position as f64 * 0.1).max(0.5),
    }
}

/// Up to five distinct salient words (> 3 chars, not stop words) from title then snippet.
pub fn result_entities(title: &str, snippet: &str) -> Vec<String> {
    let mut entities = Vec::new();
    for word in tokenize(title).into_iter().chain(tokenize(snippet)) {
        if entities.len() == MAX_RESULT_ENTITIES {
            break;
        }
        if word.chars().count() > 3 && !is_stop_word(&word) {
            push_unique(&mut entities, word);
        }
    }
    entities
}

fn to_result(position: u32, title: String, url: String, snippet: String) -> SerpResult {
    SerpResult {
        position,
        entities: result_entities(&title, &snippet),
        ctr: ctr(position),
        title,
        url,
        snippet,
    }
}

/// Ranks organic items in provider order and passes related searches through.
pub fn process(raw: RawSerp) -> (Vec<SerpResult>, Vec<String>) {
    let results = raw
        .organic
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            to_result(
                i as u32 + 1,
                item.title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| "No title".to_string()),
                item.link.unwrap_or_default(),
                item.snippet
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| "No description available".to_string()),
            )
        })
        .collect();

    let mut related = Vec::new();
    for query in raw.related_searches {
        push_unique(&mut related, query.trim());
    }
    (results, related)
}

/// One generated result per fallback domain, in fixed rank order.
pub fn fallback_results(keyword: &str) -> Vec<SerpResult> {
    let slug = keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();

    FALLBACK_DOMAINS
        .iter()
        .enumerate()
        .map(|(i, domain)| {
            let site = domain.split('.').next().unwrap_or(domain).to_uppercase();
            to_result(
                i as u32 + 1,
                format!("{keyword} - {site}"),
                format!("https://{domain}/{slug}"),
                format!(
                    "Learn about {keyword} with comprehensive guides and expert insights. \
                     Get the latest information and best practices."
                ),
            )
        })
        .collect()
}
