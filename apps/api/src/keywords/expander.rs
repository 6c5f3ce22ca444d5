//! Query Expander — deterministic template cross-product over a seed keyword,
//! plus buyer-journey stage classification for fan-out.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::keyword::Intent;

pub const PREFIXES: &[&str] = &["best", "top", "how to", "what is", "why", "when", "where"];
pub const SUFFIXES: &[&str] = &[
    "guide", "tips", "tutorial", "examples", "tools", "software", "services", "review",
];
pub const MODIFIERS: &[&str] = &["free", "online", "easy", "quick", "professional", "advanced"];

const DECISION_TERMS: &[&str] = &["buy", "price", "cost", "discount", "sale", "order"];
const CONSIDERATION_TERMS: &[&str] = &["best", "top", "review", "compare", "vs", "alternative"];

/// Expands `keyword` into related variants, in template order:
/// prefixes, suffixes, modifiers (both sides), then each drop-one-word variant.
///
/// Output is distinct and never contains the keyword itself.
pub fn expand(keyword: &str) -> Vec<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Vec::new();
    }

    let mut candidates = Vec::new();
    candidates.extend(PREFIXES.iter().map(|p| format!("{p} {keyword}")));
    candidates.extend(SUFFIXES.iter().map(|s| format!("{keyword} {s}")));
    for m in MODIFIERS {
        candidates.push(format!("{m} {keyword}"));
        candidates.push(format!("{keyword} {m}"));
    }

    let words: Vec<&str> = keyword.split_whitespace().collect();
    if words.len() > 1 {
        for skip in 0..words.len() {
            let without: Vec<&str> = words
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, w)| *w)
                .collect();
            candidates.push(without.join(" "));
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(keyword.to_string());
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.clone()))
        .collect()
}

/// Buyer-journey stage of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Awareness,
    Consideration,
    Decision,
}

impl JourneyStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyStage::Awareness => "awareness",
            JourneyStage::Consideration => "consideration",
            JourneyStage::Decision => "decision",
        }
    }

    pub fn intent(&self) -> Intent {
        match self {
            JourneyStage::Awareness => Intent::Informational,
            JourneyStage::Consideration => Intent::Commercial,
            JourneyStage::Decision => Intent::Transactional,
        }
    }
}

/// Substring rules: decision terms first, then consideration, else awareness.
pub fn classify_stage(query: &str) -> JourneyStage {
    let lower = query.to_lowercase();
    if DECISION_TERMS.iter().any(|t| lower.contains(t)) {
        JourneyStage::Decision
    } else if CONSIDERATION_TERMS.iter().any(|t| lower.contains(t)) {
        JourneyStage::Consideration
    } else {
        JourneyStage::Awareness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_excludes_seed_and_is_distinct() {
        for k in ["seo", "email marketing", "best coffee makers", "free online tools"] {
            let expanded = expand(k);
            assert!(!expanded.iter().any(|e| e == k), "{k} leaked into its expansion");
            let unique: HashSet<&String> = expanded.iter().collect();
            assert_eq!(unique.len(), expanded.len(), "duplicates for {k}");
        }
    }

    #[test]
    fn test_expand_single_word_count() {
        // 7 prefixes + 8 suffixes + 12 modifier variants, no drop-one variants
        let expanded = expand("seo");
        assert_eq!(expanded.len(), 27);
        assert_eq!(expanded[0], "best seo");
        assert_eq!(expanded[7], "seo guide");
        assert!(expanded.contains(&"free seo".to_string()));
        assert!(expanded.contains(&"seo free".to_string()));
    }

    #[test]
    fn test_expand_multiword_drop_one() {
        let expanded = expand("email marketing software");
        assert!(expanded.contains(&"marketing software".to_string()));
        assert!(expanded.contains(&"email software".to_string()));
        assert!(expanded.contains(&"email marketing".to_string()));
    }

    #[test]
    fn test_expand_dedups_collisions() {
        // "free tools" drop-one yields "tools"; "free free tools" etc. must stay unique
        let expanded = expand("free tools");
        let unique: HashSet<&String> = expanded.iter().collect();
        assert_eq!(unique.len(), expanded.len());
        assert!(!expanded.contains(&"free tools".to_string()));
    }

    #[test]
    fn test_expand_empty() {
        assert!(expand("   ").is_empty());
    }

    #[test]
    fn test_classify_stage() {
        assert_eq!(classify_stage("buy running shoes"), JourneyStage::Decision);
        assert_eq!(classify_stage("running shoes price"), JourneyStage::Decision);
        assert_eq!(classify_stage("best running shoes"), JourneyStage::Consideration);
        assert_eq!(classify_stage("nike vs adidas"), JourneyStage::Consideration);
        assert_eq!(classify_stage("what is pronation"), JourneyStage::Awareness);
    }

    #[test]
    fn test_stage_intent() {
        assert_eq!(JourneyStage::Awareness.intent(), Intent::Informational);
        assert_eq!(JourneyStage::Consideration.intent(), Intent::Commercial);
        assert_eq!(JourneyStage::Decision.intent(), Intent::Transactional);
    }
}
