//! Text heuristics shared by the estimator, scorer and clusterer:
//! tokenizing, stop words, syllables, readability, keyword density, word overlap.

use std::collections::HashSet;

pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "had", "have", "what", "were", "they", "how", "this", "that", "with", "from", "will",
    "would", "could", "should", "into", "than", "only", "other", "more", "very", "time", "just",
    "first", "over", "think", "also", "your", "work", "life", "way", "even", "back", "any",
    "good", "woman", "through", "world", "here", "where", "much", "go", "well", "long", "make",
    "may", "still",
];

pub fn is_stop_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    STOP_WORDS.contains(&lower.as_str())
}

/// True when the word starts or ends with something other than a letter/digit/underscore.
pub fn has_punctuation_edge(word: &str) -> bool {
    let edge = |c: char| !(c.is_alphanumeric() || c == '_' || c.is_whitespace());
    word.chars().next().map(edge).unwrap_or(false) || word.chars().last().map(edge).unwrap_or(false)
}

/// Lowercased word tokens. Anything that isn't alphanumeric or an inner
/// apostrophe is a separator, so markdown markup never glues onto a word.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\''))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    tokenize(text).len()
}

/// Counts non-overlapping whole-word occurrences of `phrase` in `tokens`.
pub fn count_phrase(tokens: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || tokens.len() < phrase.len() {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + phrase.len() <= tokens.len() {
        if tokens[i..i + phrase.len()] == *phrase {
            count += 1;
            i += phrase.len();
        } else {
            i += 1;
        }
    }
    count
}

pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    count_phrase(&tokenize(text), &tokenize(phrase)) > 0
}

/// Whole-word keyword matches over total words, as a percentage.
/// `"foo foo bar"` / `"foo"` → 66.67; `"foobar"` never matches `"foo"`.
pub fn keyword_density(text: &str, keyword: &str) -> f64 {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return 0.0;
    }
    let matches = count_phrase(&tokens, &tokenize(keyword));
    matches as f64 / tokens.len() as f64 * 100.0
}

/// Vowel-group syllable estimate with silent trailing `e`. Minimum one per word.
pub fn count_syllables(word: &str) -> usize {
    let word: Vec<char> = word
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect();
    if word.is_empty() {
        return 0;
    }
    if word.len() <= 3 {
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups: usize = 0;
    let mut prev_vowel = false;
    for &c in &word {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    let n = word.len();
    let consonant_le = word[n - 2] == 'l' && !is_vowel(word[n - 3]);
    if word[n - 1] == 'e' && !is_vowel(word[n - 2]) && !consonant_le {
        groups = groups.saturating_sub(1);
    }
    groups.max(1)
}

pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?', '\n'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
}

/// Flesch reading ease, clamped to [0, 100]. Empty text scores 0.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words = tokenize(text);
    let sentences = sentence_count(text);
    if words.is_empty() || sentences == 0 {
        return 0.0;
    }
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();
    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;
    (206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word).clamp(0.0, 100.0)
}

fn word_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of whitespace-separated words, 0.0 – 1.0.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let a = word_set(a);
    let b = word_set(b);
    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(&b).count() as f64 / union as f64
}

/// `12345` → `"12,345"`.
pub fn format_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Appends `item` unless an entry equal to it ignoring case is already present.
pub fn push_unique(items: &mut Vec<String>, item: impl Into<String>) -> bool {
    let item = item.into();
    if item.trim().is_empty() || items.iter().any(|e| e.eq_ignore_ascii_case(&item)) {
        return false;
    }
    items.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_counts_whole_words_only() {
        let density = keyword_density("foo foo bar", "foo");
        assert!((density - 66.666).abs() < 0.01, "density was {density}");

        assert_eq!(keyword_density("foobar barfoo", "foo"), 0.0);
    }

    #[test]
    fn test_density_multiword_phrase() {
        let text = "Best coffee makers. The best coffee makers are here. coffee";
        // 10 words, 2 phrase hits
        assert!((keyword_density(text, "best coffee makers") - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_density_empty_text() {
        assert_eq!(keyword_density("", "foo"), 0.0);
        assert_eq!(keyword_density("foo", ""), 0.0);
    }

    #[test]
    fn test_tokenize_strips_markdown() {
        let tokens = tokenize("## **Key** benefits: it's `fast`");
        assert_eq!(tokens, vec!["key", "benefits", "it's", "fast"]);
    }

    #[test]
    fn test_syllables() {
        assert_eq!(count_syllables("cat"), 1);
        assert_eq!(count_syllables("coffee"), 2);
        assert_eq!(count_syllables("table"), 2);
        assert_eq!(count_syllables("make"), 1);
        assert_eq!(count_syllables("optimization"), 5);
        assert_eq!(count_syllables("123"), 0);
    }

    #[test]
    fn test_readability_bounds() {
        assert_eq!(flesch_reading_ease(""), 0.0);
        let easy = flesch_reading_ease("The cat sat. The dog ran.");
        let hard = flesch_reading_ease(
            "Comprehensive organizational optimization necessitates multidimensional evaluation.",
        );
        assert!(easy > hard);
        assert!((0.0..=100.0).contains(&easy));
        assert!((0.0..=100.0).contains(&hard));
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard("email marketing", "email marketing"), 1.0);
        assert!((jaccard("email marketing", "email marketing tools") - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(jaccard("", ""), 0.0);
    }

    #[test]
    fn test_stop_words_and_punctuation() {
        assert!(is_stop_word("The"));
        assert!(!is_stop_word("coffee"));
        assert!(has_punctuation_edge("tools,"));
        assert!(has_punctuation_edge("(guide"));
        assert!(!has_punctuation_edge("guide"));
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_push_unique_ignores_case() {
        let mut items = vec!["SEO".to_string()];
        assert!(!push_unique(&mut items, "seo"));
        assert!(push_unique(&mut items, "content"));
        assert!(!push_unique(&mut items, "  "));
        assert_eq!(items.len(), 2);
    }
}
