use crate::content::competitor::CompetitorInsights;
use crate::models::keyword::{Intent, KeywordStats};

const GENERIC_TIPS: [&str; 3] = [
    "Optimize content structure with clear headings",
    "Include relevant internal and external links",
    "Add visual elements to improve engagement",
];

/// Independent rules over the keyword figures and competitor insights. Falls
/// back to three generic tips when no rule fires.
pub fn recommendations(stats: &KeywordStats, competitors: &CompetitorInsights) -> Vec<String> {
    let mut out: Vec<&str> = Vec::new();

    if stats.difficulty > 70 {
        out.push("High competition detected - focus on long-tail variations");
        out.push("Consider building topical authority with supporting content");
    }
    if stats.search_volume > 10_000 {
        out.push("High search volume opportunity - optimize for featured snippets");
        out.push("Create comprehensive content to capture related searches");
    }
    if competitors.average_length > 2500 {
        out.push("Competitors use long-form content - ensure comprehensive coverage");
    }
    match stats.intent {
        Intent::Commercial => {
            out.push("Commercial intent detected - include comparison tables and CTAs")
        }
        Intent::Transactional => {
            out.push("Transactional intent detected - surface pricing, trust signals and a clear checkout path")
        }
        Intent::Informational => {
            out.push("Informational intent detected - answer the core question early and structure for featured snippets")
        }
        Intent::Navigational => {}
    }
    if stats.related_keywords.len() > 5 {
        out.push("Rich semantic opportunity - incorporate related keywords naturally");
    }

    if out.is_empty() {
        out.extend(GENERIC_TIPS);
    }
    out.into_iter().map(str::to_string).collect()
}
