//! Format-neutral outline of a report. Every exporter walks the same block
//! list, so the three formats always carry the same content.

use serde::Serialize;

use crate::export::ReportDocument;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title { text: String },
    Heading { text: String },
    Subheading { text: String },
    Field { label: String, value: String },
    Paragraph { text: String },
    Bullet { text: String },
    Numbered { index: usize, text: String },
}

pub fn score_text(score: f64) -> String {
    format!("{score:.1}/10")
}

pub fn build(document: &ReportDocument<'_>) -> Vec<Block> {
    let labels = document.language.labels();
    let profile = document.profile;
    let report = document.report;
    let mut out = Outline::default();

    out.push(Block::Title {
        text: labels.report_title.to_string(),
    });
    out.field(labels.name, &profile.name);
    out.field(labels.position, &profile.current_position);
    out.field(labels.industry, &profile.industry);
    out.field(labels.country, &profile.country);
    out.field(
        labels.generated,
        &report.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    if let Some(minutes) = document.duration_minutes {
        out.field(labels.duration, &format!("{minutes} {}", labels.minutes));
    }

    out.heading(labels.executive_summary);
    out.paragraphs(&report.executive_summary);

    out.heading(labels.overall_score);
    out.field(labels.overall_score, &score_text(report.overall_score));
    out.field(labels.leadership_level, &report.leadership_level);
    out.field(labels.total_questions, "15 (7+7+1)");
    out.field(
        labels.writing_response,
        &format!("{} {}", document.response_word_count, labels.words),
    );
    out.subheading(labels.score_justification);
    out.paragraphs(&report.score_justification);

    out.heading(labels.pillar_breakdown);
    for (pillar, assessment) in &report.pillars {
        out.subheading(&format!(
            "{}: {}",
            pillar.label(document.language),
            score_text(assessment.score)
        ));
        out.paragraphs(&assessment.analysis);
        if !assessment.evidence.is_empty() {
            out.push(Block::Paragraph {
                text: format!("{}:", labels.evidence),
            });
            out.bullets(&assessment.evidence);
        }
    }

    out.heading(labels.strengths);
    out.paragraphs(&report.strengths);
    out.heading(labels.development_areas);
    out.paragraphs(&report.development_areas);

    out.heading(labels.response_patterns);
    out.subheading(labels.yes_no_patterns);
    out.paragraphs(&report.response_insights.yes_no_patterns);
    out.subheading(labels.mcq_patterns);
    out.paragraphs(&report.response_insights.mcq_patterns);
    out.subheading(labels.writing_quality);
    out.paragraphs(&report.response_insights.writing_quality);

    out.heading(labels.recommendations);
    for (i, text) in report.recommendations.iter().enumerate() {
        out.push(Block::Numbered {
            index: i + 1,
            text: text.clone(),
        });
    }

    out.heading(labels.development_plan);
    out.subheading(labels.goals_30_day);
    out.bullets(&report.development_plan.near_term);
    out.subheading(labels.goals_90_day);
    out.bullets(&report.development_plan.mid_term);
    out.subheading(labels.goals_6_month);
    out.bullets(&report.development_plan.long_term);

    out.heading(labels.contextual_notes);
    out.paragraphs(&report.contextual_notes);
    out.heading(labels.closing_remarks);
    out.paragraphs(&report.closing_remarks);

    out.blocks
}

#[derive(Default)]
struct Outline {
    blocks: Vec<Block>,
}

impl Outline {
    fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    fn heading(&mut self, text: &str) {
        self.push(Block::Heading {
            text: text.to_string(),
        });
    }

    fn subheading(&mut self, text: &str) {
        self.push(Block::Subheading {
            text: text.to_string(),
        });
    }

    fn field(&mut self, label: &str, value: &str) {
        self.push(Block::Field {
            label: label.to_string(),
            value: value.to_string(),
        });
    }

    /// One paragraph per non-blank line.
    fn paragraphs(&mut self, text: &str) {
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.push(Block::Paragraph {
                text: line.to_string(),
            });
        }
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.push(Block::Bullet { text: item.clone() });
        }
    }
}
