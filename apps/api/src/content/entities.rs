use crate::text::push_unique;

pub const MAX_ENTITIES: usize = 15;
const RELATED_ENTITIES: usize = 4;
const TOPIC_ENTITIES: usize = 4;

pub const INDUSTRY_TERMS: [&str; 6] = [
    "SEO optimization",
    "content strategy",
    "digital marketing",
    "user experience",
    "conversion optimization",
    "analytics",
];

/// Keyword, then top related keywords, top competitor topics and the generic
/// industry terms. Deduplicated ignoring case, at most 15.
pub fn extract_entities(keyword: &str, related: &[String], competitor_topics: &[String]) -> Vec<String> {
    let mut entities = Vec::new();
    push_unique(&mut entities, keyword.trim());
    for term in related.iter().take(RELATED_ENTITIES) {
        push_unique(&mut entities, term.as_str());
    }
    for topic in competitor_topics.iter().take(TOPIC_ENTITIES) {
        push_unique(&mut entities, topic.as_str());
    }
    for term in INDUSTRY_TERMS {
        push_unique(&mut entities, term);
    }
    entities.truncate(MAX_ENTITIES);
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_first_and_deduplicated() {
        let entities = extract_entities(
            "Analytics",
            &strings(&["best analytics", "analytics"]),
            &strings(&["dashboards"]),
        );
        assert_eq!(entities[0], "Analytics");
        assert_eq!(entities[1], "best analytics");
        assert_eq!(entities[2], "dashboards");
        // "analytics" industry term collapses into the keyword
        assert_eq!(entities.len(), 3 + INDUSTRY_TERMS.len() - 1);
    }

    #[test]
    fn test_capped_at_fifteen() {
        let related = strings(&["a1", "a2", "a3", "a4", "a5", "a6"]);
        let topics = strings(&["t1", "t2", "t3", "t4", "t5", "t6"]);
        let entities = extract_entities("k", &related, &topics);
        assert_eq!(entities.len(), MAX_ENTITIES);
        assert!(!entities.contains(&"a5".to_string()));
        assert!(!entities.contains(&"t5".to_string()));
    }

    #[test]
    fn test_minimal_inputs() {
        let entities = extract_entities("cold brew", &[], &[]);
        assert_eq!(entities.len(), 1 + INDUSTRY_TERMS.len());
    }
}
