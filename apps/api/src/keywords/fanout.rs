//! Query fan-out — grows one analysed keyword into a staged query list, and the
//! CSV export used for the downloadable `query-fanout.csv`.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::keywords::expander::{classify_stage, JourneyStage};
use crate::models::keyword::{Intent, KeywordAnalysis};

const MAX_QUERIES: usize = 30;

pub const CSV_HEADER: [&str; 5] = ["Query", "Stage", "Search Volume", "Difficulty", "Intent"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuerySource {
    KeywordAnalysis,
    IntentExpansion,
    Seasonal,
    Question,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanOutQuery {
    pub query: String,
    pub stage: JourneyStage,
    pub search_volume: u32,
    pub difficulty: u8,
    pub intent: Intent,
    pub source: QuerySource,
    pub relevance: u8,
}

fn intent_templates(keyword: &str, intent: Intent) -> Vec<String> {
    let templates: &[&str] = match intent {
        Intent::Informational => &[
            "how to {}",
            "{} tutorial",
            "{} guide",
            "{} tips",
            "{} best practices",
            "{} examples",
            "learn {}",
            "{} for beginners",
        ],
        Intent::Commercial => &[
            "best {}",
            "{} comparison",
            "{} reviews",
            "top {}",
            "{} vs",
            "{} alternatives",
            "{} features",
            "{} benefits",
        ],
        Intent::Transactional => &[
            "buy {}",
            "{} price",
            "{} cost",
            "{} discount",
            "{} deal",
            "{} sale",
            "order {}",
            "{} online",
        ],
        Intent::Navigational => &[
            "{} login",
            "{} website",
            "{} official",
            "{} app",
            "{} download",
            "{} platform",
        ],
    };
    templates.iter().map(|t| t.replace("{}", keyword)).collect()
}

/// Seasonal modifiers for a calendar month (1 = January).
fn seasonal_modifiers(month: u32) -> &'static [&'static str] {
    match month {
        1 => &["winter", "january", "new year"],
        2 => &["february", "valentine"],
        3 => &["march", "spring"],
        4 => &["april", "easter", "spring"],
        5 => &["may", "mother's day"],
        6 => &["june", "summer", "father's day"],
        7 => &["july", "summer"],
        8 => &["august", "back to school"],
        9 => &["september", "fall", "autumn"],
        10 => &["october", "halloween"],
        11 => &["november", "thanksgiving", "black friday"],
        12 => &["december", "christmas", "holiday", "winter"],
        _ => &[],
    }
}

const QUESTION_TEMPLATES: &[&str] = &[
    "what is {}",
    "how does {} work",
    "why use {}",
    "when to use {}",
    "where to find {}",
    "which {} is best",
    "who needs {}",
    "how to choose {}",
    "what are {} benefits",
    "how much does {} cost",
];

fn offset_difficulty(base: u8, delta: i32) -> u8 {
    (base as i32 + delta).clamp(0, 100) as u8
}

fn scaled_volume<R: Rng + ?Sized>(base: u32, low: f64, span: f64, rng: &mut R) -> u32 {
    (base as f64 * (rng.gen::<f64>() * span + low)).floor() as u32
}

/// Builds the staged query list for an analysed keyword.
///
/// Order of assembly: related keywords, intent templates, seasonal modifiers for
/// `month` and the month after, question templates. Deduplicated by query text,
/// capped at 30, then sorted by search volume descending.
pub fn fan_out<R: Rng + ?Sized>(
    analysis: &KeywordAnalysis,
    month: u32,
    rng: &mut R,
) -> Vec<FanOutQuery> {
    let keyword = analysis.keyword.as_str();
    let base_volume = analysis.search_volume.max(1);
    let base_difficulty = analysis.difficulty;
    let mut queries = Vec::new();

    for related in &analysis.related_keywords {
        let stage = classify_stage(&related.keyword);
        queries.push(FanOutQuery {
            query: related.keyword.clone(),
            stage,
            search_volume: related.search_volume,
            difficulty: related.difficulty,
            intent: stage.intent(),
            source: QuerySource::KeywordAnalysis,
            relevance: related.relevance,
        });
    }

    let template_stage = match analysis.intent {
        Intent::Informational => JourneyStage::Awareness,
        Intent::Commercial => JourneyStage::Consideration,
        Intent::Transactional | Intent::Navigational => JourneyStage::Decision,
    };
    for query in intent_templates(keyword, analysis.intent) {
        let jitter = rng.gen_range(-10..10);
        queries.push(FanOutQuery {
            query,
            stage: template_stage,
            search_volume: scaled_volume(base_volume, 0.2, 0.6, rng),
            difficulty: offset_difficulty(base_difficulty, jitter),
            intent: analysis.intent,
            source: QuerySource::IntentExpansion,
            relevance: 90,
        });
    }

    let next_month = month % 12 + 1;
    for modifier in seasonal_modifiers(month)
        .iter()
        .chain(seasonal_modifiers(next_month))
    {
        queries.push(FanOutQuery {
            query: format!("{keyword} {modifier}"),
            stage: JourneyStage::Consideration,
            search_volume: scaled_volume(base_volume, 0.1, 0.8, rng),
            difficulty: offset_difficulty(base_difficulty, -5),
            intent: Intent::Commercial,
            source: QuerySource::Seasonal,
            relevance: 75,
        });
    }

    for template in QUESTION_TEMPLATES {
        let query = template.replace("{}", keyword);
        let stage = if query.contains("cost") || query.contains("choose") {
            JourneyStage::Consideration
        } else {
            JourneyStage::Awareness
        };
        queries.push(FanOutQuery {
            query,
            stage,
            search_volume: scaled_volume(base_volume, 0.1, 0.4, rng),
            difficulty: offset_difficulty(base_difficulty, -10),
            intent: Intent::Informational,
            source: QuerySource::Question,
            relevance: 80,
        });
    }

    let mut seen = HashSet::new();
    let mut queries: Vec<FanOutQuery> = queries
        .into_iter()
        .filter(|q| seen.insert(q.query.to_lowercase()))
        .take(MAX_QUERIES)
        .collect();
    queries.sort_by(|a, b| b.search_volume.cmp(&a.search_volume));
    queries
}

// ────────────────────────────────────────────────────────────────────────────
// CSV export
// ────────────────────────────────────────────────────────────────────────────

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `Query,Stage,Search Volume,Difficulty,Intent` header plus one row per query.
pub fn to_csv(queries: &[FanOutQuery]) -> String {
    let mut lines = vec![CSV_HEADER.join(",")];
    for q in queries {
        let row = [
            escape_field(&q.query),
            q.stage.as_str().to_string(),
            q.search_volume.to_string(),
            q.difficulty.to_string(),
            q.intent.as_str().to_string(),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::keyword::{Competition, RelatedKeyword, Trend};
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use thiserror::Error;
    use uuid::Uuid;

    // Reads back what `to_csv` writes. Quoted fields may span lines.

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct CsvRow {
        query: String,
        stage: String,
        search_volume: String,
        difficulty: String,
        intent: String,
    }

    #[derive(Debug, Error, PartialEq, Eq)]
    enum CsvError {
        #[error("CSV is empty")]
        Empty,

        #[error("unexpected header: {0}")]
        Header(String),

        #[error("line {line}: expected 5 fields, found {found}")]
        FieldCount { line: usize, found: usize },

        #[error("line {0}: unterminated quoted field")]
        UnterminatedQuote(usize),
    }

    fn push_record(records: &mut Vec<(usize, Vec<String>)>, line: usize, fields: Vec<String>) {
        let blank = fields.len() == 1 && fields[0].trim().is_empty();
        if !blank {
            records.push((line, fields));
        }
    }

    fn split_records(input: &str) -> Result<Vec<(usize, Vec<String>)>, CsvError> {
        let mut records = Vec::new();
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut line = 1;
        let mut record_line = 1;
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match (c, in_quotes) {
                ('"', true) if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                ('"', true) => in_quotes = false,
                ('"', false) if current.is_empty() => in_quotes = true,
                (',', false) => fields.push(std::mem::take(&mut current)),
                ('\r', false) if chars.peek() == Some(&'\n') => {}
                ('\n', false) => {
                    fields.push(std::mem::take(&mut current));
                    push_record(&mut records, record_line, std::mem::take(&mut fields));
                    line += 1;
                    record_line = line;
                }
                (c, _) => {
                    if c == '\n' {
                        line += 1;
                    }
                    current.push(c);
                }
            }
        }
        if in_quotes {
            return Err(CsvError::UnterminatedQuote(record_line));
        }
        fields.push(current);
        push_record(&mut records, record_line, fields);
        Ok(records)
    }

    fn parse_csv(input: &str) -> Result<Vec<CsvRow>, CsvError> {
        let mut records = split_records(input)?.into_iter();
        let (_, header) = records.next().ok_or(CsvError::Empty)?;
        let header = header.join(",");
        if header.trim() != CSV_HEADER.join(",") {
            return Err(CsvError::Header(header));
        }

        records
            .map(|(line, fields)| match <[String; 5]>::try_from(fields) {
                Ok([query, stage, search_volume, difficulty, intent]) => Ok(CsvRow {
                    query,
                    stage,
                    search_volume,
                    difficulty,
                    intent,
                }),
                Err(fields) => Err(CsvError::FieldCount {
                    line,
                    found: fields.len(),
                }),
            })
            .collect()
    }

    fn make_analysis(keyword: &str, intent: Intent, related: Vec<&str>) -> KeywordAnalysis {
        KeywordAnalysis {
            id: Uuid::new_v4(),
            keyword: keyword.to_string(),
            search_volume: 5_000,
            difficulty: 50,
            cpc: 1.5,
            competition: Competition::Medium,
            intent,
            trend: Trend::Stable,
            related_keywords: related
                .into_iter()
                .map(|k| RelatedKeyword {
                    keyword: k.to_string(),
                    search_volume: 1_000,
                    difficulty: 40,
                    relevance: 50,
                })
                .collect(),
            seasonality: "stable".to_string(),
            opportunities: vec![],
            country: "us".to_string(),
            language: "en".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_fan_out_stages_related_keywords() {
        let analysis = make_analysis(
            "crm",
            Intent::Navigational,
            vec!["best crm", "crm price", "what is crm"],
        );
        let queries = fan_out(&analysis, 3, &mut StdRng::seed_from_u64(1));

        let find = |q: &str| queries.iter().find(|x| x.query == q).unwrap();
        assert_eq!(find("best crm").stage, JourneyStage::Consideration);
        assert_eq!(find("best crm").intent, Intent::Commercial);
        assert_eq!(find("crm price").stage, JourneyStage::Decision);
        assert_eq!(find("what is crm").stage, JourneyStage::Awareness);
        assert_eq!(find("what is crm").source, QuerySource::KeywordAnalysis);
    }

    #[test]
    fn test_fan_out_capped_sorted_and_distinct() {
        let analysis = make_analysis("crm", Intent::Commercial, vec!["best crm", "top crm"]);
        let queries = fan_out(&analysis, 12, &mut StdRng::seed_from_u64(9));

        assert!(queries.len() <= 30);
        assert!(queries
            .windows(2)
            .all(|w| w[0].search_volume >= w[1].search_volume));
        let unique: HashSet<&str> = queries.iter().map(|q| q.query.as_str()).collect();
        assert_eq!(unique.len(), queries.len());
        assert!(queries.iter().all(|q| q.difficulty <= 100));
    }

    #[test]
    fn test_fan_out_wraps_december_to_january() {
        let analysis = make_analysis("gifts", Intent::Navigational, vec![]);
        let queries = fan_out(&analysis, 12, &mut StdRng::seed_from_u64(2));
        assert!(queries.iter().any(|q| q.query == "gifts christmas"));
        assert!(queries.iter().any(|q| q.query == "gifts new year"));
    }

    #[test]
    fn test_question_stage_rules() {
        let analysis = make_analysis("crm", Intent::Informational, vec![]);
        let queries = fan_out(&analysis, 5, &mut StdRng::seed_from_u64(4));
        let cost = queries.iter().find(|q| q.query == "how much does crm cost");
        if let Some(cost) = cost {
            assert_eq!(cost.stage, JourneyStage::Consideration);
        }
        let why = queries.iter().find(|q| q.query == "why use crm").unwrap();
        assert_eq!(why.stage, JourneyStage::Awareness);
        assert_eq!(why.difficulty, 40);
    }

    #[test]
    fn test_csv_round_trip_preserves_queries() {
        let analysis = make_analysis(
            "coffee, tea",
            Intent::Commercial,
            vec!["best \"coffee\" grinders", "coffee vs tea"],
        );
        let queries = fan_out(&analysis, 6, &mut StdRng::seed_from_u64(5));
        let csv = to_csv(&queries);

        assert!(csv.starts_with("Query,Stage,Search Volume,Difficulty,Intent\n"));

        let rows = parse_csv(&csv).unwrap();
        let original: Vec<&str> = queries.iter().map(|q| q.query.as_str()).collect();
        let parsed: Vec<&str> = rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(original, parsed);
        assert_eq!(rows[0].stage, queries[0].stage.as_str());
        assert_eq!(rows[0].search_volume, queries[0].search_volume.to_string());
        assert_eq!(rows[0].intent, queries[0].intent.as_str());
    }

    #[test]
    fn test_parse_csv_rejects_bad_input() {
        assert_eq!(parse_csv(""), Err(CsvError::Empty));
        assert!(matches!(parse_csv("a,b\n"), Err(CsvError::Header(_))));
        let bad = "Query,Stage,Search Volume,Difficulty,Intent\nfoo,awareness,10";
        assert_eq!(
            parse_csv(bad),
            Err(CsvError::FieldCount { line: 2, found: 3 })
        );
        let open = "Query,Stage,Search Volume,Difficulty,Intent\n\"foo,awareness,10,5,informational";
        assert_eq!(parse_csv(open), Err(CsvError::UnterminatedQuote(2)));
    }

    #[test]
    fn test_csv_round_trip_with_multiline_keyword() {
        let analysis = make_analysis(
            "coffee\nmakers",
            Intent::Informational,
            vec!["coffee\nmakers, cheap"],
        );
        let queries = fan_out(&analysis, 4, &mut StdRng::seed_from_u64(8));
        let csv = to_csv(&queries);

        let rows = parse_csv(&csv).unwrap();
        let original: Vec<&str> = queries.iter().map(|q| q.query.as_str()).collect();
        let parsed: Vec<&str> = rows.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(original, parsed);
        assert!(parsed.iter().any(|q| q.contains('\n')));
    }

    #[test]
    fn test_parse_csv_reports_line_of_later_record() {
        let csv = "Query,Stage,Search Volume,Difficulty,Intent\n\"a\nb\",awareness,10,5,informational\nfoo,awareness";
        assert_eq!(
            parse_csv(csv),
            Err(CsvError::FieldCount { line: 4, found: 2 })
        );
    }
}
