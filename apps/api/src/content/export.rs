//! Plain-text downloads of a generated body: `<keyword>-<type>.<ext>`.

use std::str::FromStr;

use crate::errors::AppError;
use crate::models::content::GeneratedContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Md,
    Txt,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Md => "md",
            ExportFormat::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Md => "text/markdown; charset=utf-8",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "md" | "markdown" => Ok(ExportFormat::Md),
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(AppError::Validation(format!(
                "unsupported export format '{other}', expected md or txt"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub body: String,
}

/// Keyword kept as typed; only characters unsafe in a header or path are dropped.
pub fn export_filename(content: &GeneratedContent, format: ExportFormat) -> String {
    let keyword: String = content
        .keyword
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '\\' | '/'))
        .collect();
    format!(
        "{}-{}.{}",
        keyword.trim(),
        content.content_type,
        format.extension()
    )
}

/// Markdown with heading hashes and emphasis markers removed.
fn strip_markdown(body: &str) -> String {
    body.lines()
        .map(|line| {
            line.trim_start_matches('#')
                .trim_start()
                .replace("**", "")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export(content: &GeneratedContent, format: ExportFormat) -> ExportFile {
    let body = match format {
        ExportFormat::Md => content.content.clone(),
        ExportFormat::Txt => strip_markdown(&content.content),
    };
    ExportFile {
        filename: export_filename(content, format),
        mime_type: format.mime_type(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{ContentType, SeoReport};
    use chrono::Utc;
    use uuid::Uuid;

    fn content(keyword: &str) -> GeneratedContent {
        GeneratedContent {
            id: Uuid::new_v4(),
            keyword: keyword.to_string(),
            content_type: ContentType::Ecommerce,
            title: "t".to_string(),
            content: "# Premium grinder\n\n**Quality**: tested".to_string(),
            entities: vec![],
            headings: vec![],
            faqs: vec![],
            score: 0,
            recommendations: vec![],
            seo_report: SeoReport {
                score: 0,
                keyword_density: 0.0,
                word_count: 0,
                related_keywords_found: 0,
                readability: 0.0,
                breakdown: vec![],
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filename_pattern() {
        let c = content("coffee grinder");
        assert_eq!(export_filename(&c, ExportFormat::Md), "coffee grinder-ecommerce.md");
        assert_eq!(export_filename(&c, ExportFormat::Txt), "coffee grinder-ecommerce.txt");
        assert_eq!(
            export_filename(&content("a/b \"c\""), ExportFormat::Md),
            "ab c-ecommerce.md"
        );
    }

    #[test]
    fn test_markdown_export_is_verbatim() {
        let c = content("grinder");
        assert_eq!(export(&c, ExportFormat::Md).body, c.content);
    }

    #[test]
    fn test_text_export_strips_markup() {
        let file = export(&content("grinder"), ExportFormat::Txt);
        assert_eq!(file.body, "Premium grinder\n\nQuality: tested");
        assert_eq!(file.mime_type, "text/plain; charset=utf-8");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("MD".parse::<ExportFormat>().unwrap(), ExportFormat::Md);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Txt);
        assert!(matches!("pdf".parse::<ExportFormat>(), Err(AppError::Validation(_))));
    }
}
