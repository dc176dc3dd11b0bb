// Report export: Markdown, standalone HTML and PDF.
// Exporters only borrow the finished report; nothing here mutates a session.

pub mod handlers;
pub mod html;
pub mod markdown;
pub mod outline;
pub mod pdf;

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;
use tracing::info;

use crate::locale::Language;
use crate::models::profile::Profile;
use crate::models::report::Report;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported export format '{0}' (expected pdf, html or markdown)")]
    UnsupportedFormat(String),

    #[error("PDF export does not support {0} text; use the HTML export instead")]
    UnsupportedScript(String),

    #[error("Template rendering failed: {0}")]
    Render(String),

    #[error("PDF assembly failed: {0}")]
    Pdf(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything an exporter needs, borrowed from a completed session.
#[derive(Debug, Clone, Copy)]
pub struct ReportDocument<'a> {
    pub profile: &'a Profile,
    pub report: &'a Report,
    pub language: Language,
    pub duration_minutes: Option<i64>,
    pub response_word_count: usize,
}

#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Renders `document` in `format`. Same input, same bytes.
pub fn export(
    document: &ReportDocument<'_>,
    format: ExportFormat,
) -> Result<ExportedDocument, ExportError> {
    let body = match format {
        ExportFormat::Markdown => Bytes::from(markdown::render(document)),
        ExportFormat::Html => Bytes::from(html::render(document)?),
        ExportFormat::Pdf => Bytes::from(pdf::render(document)?),
    };
    let filename = file_name(document, format);
    info!("Exported {filename} ({} bytes)", body.len());

    Ok(ExportedDocument {
        filename,
        content_type: format.content_type(),
        body,
    })
}

/// `leadership_assessment_<name>_<YYYYMMDD>.<ext>`, dated by report generation.
pub fn file_name(document: &ReportDocument<'_>, format: ExportFormat) -> String {
    let name: String = document
        .profile
        .name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!(
        "leadership_assessment_{name}_{}.{}",
        document.report.generated_at.format("%Y%m%d"),
        format.extension()
    )
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::testing::Fixture;
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!("md".parse::<ExportFormat>().unwrap(), ExportFormat::Markdown);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(f)) if f == "docx"
        ));
    }

    #[test]
    fn test_file_name_uses_underscored_name_and_report_date() {
        let mut fixture = Fixture::new(Language::En);
        fixture.profile.name = "Amina Haddad".to_string();
        fixture.report.generated_at = chrono::Utc.with_ymd_and_hms(2026, 3, 9, 14, 0, 0).unwrap();
        let doc = fixture.document(Language::En);

        assert_eq!(
            file_name(&doc, ExportFormat::Pdf),
            "leadership_assessment_Amina_Haddad_20260309.pdf"
        );
        assert!(file_name(&doc, ExportFormat::Markdown).ends_with(".md"));
    }

    #[test]
    fn test_export_is_read_only_and_deterministic() {
        let fixture = Fixture::new(Language::En);
        let before = fixture.report.clone();
        let doc = fixture.document(Language::En);

        for format in [ExportFormat::Markdown, ExportFormat::Html, ExportFormat::Pdf] {
            let first = export(&doc, format).unwrap();
            let second = export(&doc, format).unwrap();
            assert_eq!(first.body, second.body, "{format} export changed between runs");
            assert_eq!(first.content_type, format.content_type());
        }
        assert_eq!(fixture.report, before);
    }

    #[test]
    fn test_failed_export_leaves_report_intact() {
        let fixture = Fixture::new(Language::Ar);
        let before = fixture.report.clone();
        let doc = fixture.document(Language::Ar);

        assert!(matches!(
            export(&doc, ExportFormat::Pdf),
            Err(ExportError::UnsupportedScript(_))
        ));
        assert_eq!(fixture.report, before);
        assert!(export(&doc, ExportFormat::Html).is_ok());
    }
}
