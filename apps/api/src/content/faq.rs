//! Three contextual FAQs per content type. Questions are fixed; answers
//! interpolate the keyword figures plus a few random flavour percentages.

use rand::Rng;

use crate::models::content::{ContentType, Faq};
use crate::models::keyword::KeywordStats;
use crate::text::format_thousands;

/// Weeks until first results, by difficulty band.
pub fn timing_band(difficulty: u8) -> &'static str {
    match difficulty {
        71.. => "3-6",
        41..=70 => "2-4",
        _ => "1-3",
    }
}

pub fn competitiveness(difficulty: u8) -> &'static str {
    match difficulty {
        71.. => "advanced",
        41..=70 => "intermediate",
        _ => "basic",
    }
}

fn faq(question: String, answer: String) -> Faq {
    Faq { question, answer }
}

pub fn generate_faqs<R: Rng + ?Sized>(
    content_type: ContentType,
    stats: &KeywordStats,
    rng: &mut R,
) -> Vec<Faq> {
    let k = stats.keyword.trim();
    let volume = format_thousands(stats.search_volume);
    let d = u32::from(stats.difficulty);
    let intent = stats.intent;

    match content_type {
        ContentType::Service => vec![
            faq(
                format!("Why should I choose your {k} services over competitors?"),
                format!(
                    "Our {k} services are backed by data from {volume}+ successful implementations. \
                     We provide transparent reporting, dedicated support, and results that outperform \
                     industry averages by {}%.",
                    rng.gen_range(20..50)
                ),
            ),
            faq(
                format!("How quickly can I see results from {k}?"),
                format!(
                    "Based on keyword difficulty of {d}/100, most clients see initial improvements within \
                     {} weeks. Full optimization typically takes {}-{} months.",
                    timing_band(stats.difficulty),
                    d / 20 + 2,
                    d / 15 + 4
                ),
            ),
            faq(
                format!("What makes your {k} approach different?"),
                format!(
                    "We use proprietary analysis of {}+ ranking factors, real-time competitive \
                     intelligence, and {intent}-focused strategies tailored to your market position.",
                    d / 5 + 15
                ),
            ),
        ],
        ContentType::Blog => vec![
            faq(
                format!("What's the best way to get started with {k}?"),
                format!(
                    "Start by understanding your current position relative to the {volume} monthly \
                     searches in this space. Focus on {intent} intent optimization and gradually build \
                     complexity based on your results."
                ),
            ),
            faq(
                format!("How competitive is the {k} market?"),
                format!(
                    "With a difficulty score of {d}/100, this market requires {} strategies. Success \
                     depends on consistent implementation and data-driven optimization.",
                    competitiveness(stats.difficulty)
                ),
            ),
            faq(
                format!("What are the most important {k} metrics to track?"),
                format!(
                    "Focus on performance indicators that align with {intent} intent: conversion rates, \
                     engagement metrics, and ROI. Monitor {}+ key metrics for comprehensive insights.",
                    d / 10 + 5
                ),
            ),
        ],
        ContentType::Ecommerce => vec![
            faq(
                format!("Is this {k} worth the investment?"),
                format!(
                    "With {volume}+ monthly searches and {intent} buyer intent, this {k} represents \
                     excellent value. Customer satisfaction rates exceed {}% with average ROI of {}%.",
                    rng.gen_range(85..95),
                    rng.gen_range(150..350)
                ),
            ),
            faq(
                format!("How does this {k} compare to alternatives?"),
                format!(
                    "Our {k} outperforms {}+ competitor products in independent testing. Superior \
                     quality, {}% better performance, and a comprehensive warranty make it the smart choice.",
                    d / 25 + 3,
                    rng.gen_range(80..100)
                ),
            ),
            faq(
                format!("What support do you provide with {k}?"),
                format!(
                    "The complete support package includes setup assistance, a {}-year warranty, free \
                     updates, and 24/7 technical support.",
                    d / 20 + 2
                ),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn stats(difficulty: u8) -> KeywordStats {
        KeywordStats {
            difficulty,
            ..KeywordStats::new("seo audit")
        }
    }

    #[test]
    fn test_three_faqs_per_type() {
        for content_type in [ContentType::Service, ContentType::Blog, ContentType::Ecommerce] {
            let faqs = generate_faqs(content_type, &stats(50), &mut StepRng::new(0, 0));
            assert_eq!(faqs.len(), 3);
            assert!(faqs.iter().all(|f| f.question.contains("seo audit")));
        }
    }

    #[test]
    fn test_bands() {
        assert_eq!(timing_band(80), "3-6");
        assert_eq!(timing_band(71), "3-6");
        assert_eq!(timing_band(70), "2-4");
        assert_eq!(timing_band(41), "2-4");
        assert_eq!(timing_band(40), "1-3");
        assert_eq!(competitiveness(90), "advanced");
        assert_eq!(competitiveness(50), "intermediate");
        assert_eq!(competitiveness(10), "basic");
    }

    #[test]
    fn test_service_timing_answer() {
        let faqs = generate_faqs(ContentType::Service, &stats(75), &mut StepRng::new(0, 0));
        assert!(faqs[1].answer.contains("within 3-6 weeks"));
        // 75/20 + 2 = 5, 75/15 + 4 = 9
        assert!(faqs[1].answer.contains("5-9 months"));
    }
}
