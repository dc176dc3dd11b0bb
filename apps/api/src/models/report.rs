use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::pillar::Pillar;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;
/// Substituted for any score the model leaves missing or out of range.
pub const NEUTRAL_SCORE: f64 = 7.0;

/// Final scored assessment. Built once from the complete answer set and
/// never modified afterwards; exports only borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub executive_summary: String,
    pub overall_score: f64,
    pub score_justification: String,
    pub leadership_level: String,
    /// Always holds all six pillars.
    pub pillars: BTreeMap<Pillar, PillarAssessment>,
    pub strengths: String,
    pub development_areas: String,
    pub response_insights: ResponseInsights,
    pub recommendations: Vec<String>,
    pub development_plan: DevelopmentPlan,
    pub contextual_notes: String,
    pub closing_remarks: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarAssessment {
    pub score: f64,
    pub analysis: String,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseInsights {
    pub yes_no_patterns: String,
    pub mcq_patterns: String,
    pub writing_quality: String,
}

/// Three-horizon goal plan. Field names match the JSON keys the model is
/// asked to produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
    #[serde(rename = "30_day_goals")]
    pub near_term: Vec<String>,
    #[serde(rename = "90_day_goals")]
    pub mid_term: Vec<String>,
    #[serde(rename = "6_month_goals")]
    pub long_term: Vec<String>,
}

impl Report {
    /// True when every score sits inside the 1.0–10.0 scale.
    pub fn scores_in_range(&self) -> bool {
        let in_range = |s: f64| (MIN_SCORE..=MAX_SCORE).contains(&s);
        in_range(self.overall_score) && self.pillars.values().all(|p| in_range(p.score))
    }
}

#[cfg(test)]
pub(crate) fn sample_report() -> Report {
    let pillars = Pillar::ALL
        .into_iter()
        .enumerate()
        .map(|(i, pillar)| {
            (
                pillar,
                PillarAssessment {
                    score: 5.0 + i as f64 * 0.5,
                    analysis: format!("Analysis of {}", pillar.key()),
                    evidence: vec![format!("Answered q{i} with conviction")],
                },
            )
        })
        .collect();

    Report {
        executive_summary: "A thoughtful leader with clear strategic instincts.".to_string(),
        overall_score: 7.5,
        score_justification: "Consistent answers backed by a detailed scenario response."
            .to_string(),
        leadership_level: "Emerging Senior Leader".to_string(),
        pillars,
        strengths: "Listens before acting.".to_string(),
        development_areas: "Delegation under pressure.".to_string(),
        response_insights: ResponseInsights {
            yes_no_patterns: "Mostly decisive.".to_string(),
            mcq_patterns: "Prefers collaborative options.".to_string(),
            writing_quality: "Structured and specific.".to_string(),
        },
        recommendations: vec![
            "Run a monthly strategy review.".to_string(),
            "Pair with a mentor on stakeholder management.".to_string(),
        ],
        development_plan: DevelopmentPlan {
            near_term: vec!["Map key stakeholders".to_string()],
            mid_term: vec!["Delegate one recurring decision".to_string()],
            long_term: vec!["Lead a cross-team initiative".to_string()],
        },
        contextual_notes: "Context of a growing technology team in Jordan.".to_string(),
        closing_remarks: "Keep building on your strengths.".to_string(),
        generated_at: DateTime::parse_from_rfc3339("2026-03-01T10:00:00Z")
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap(),
    }
}
