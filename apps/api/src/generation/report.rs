//! Report decoding with soft repair.
//!
//! Unlike the question contracts, the report is accepted whenever the reply
//! is a JSON object. Missing or ill-typed fields become the localized
//! "not available" placeholder and unusable scores become `NEUTRAL_SCORE`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::GenerationError;
use crate::generation::questions::json_kind;
use crate::llm_client::parser::parse_json;
use crate::locale::Language;
use crate::models::pillar::Pillar;
use crate::models::report::{
    DevelopmentPlan, PillarAssessment, Report, ResponseInsights, MAX_SCORE, MIN_SCORE,
    NEUTRAL_SCORE,
};

const REPORT_CONTRACT: &str = "final report";

pub fn decode_report(
    raw: &str,
    language: Language,
    generated_at: DateTime<Utc>,
) -> Result<Report, GenerationError> {
    let root = match parse_json(raw)? {
        Value::Object(map) => map,
        other => {
            return Err(GenerationError::validation(
                REPORT_CONTRACT,
                format!("expected a JSON object, got {}", json_kind(&other)),
            ))
        }
    };

    let repair = Repair::new(language);
    let empty = Map::new();

    let breakdown = root
        .get("pillar_breakdown")
        .or_else(|| root.get("pillar_scores"))
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let pillars: BTreeMap<Pillar, PillarAssessment> = Pillar::ALL
        .into_iter()
        .map(|pillar| {
            let entry = [pillar.label(language), pillar.label(Language::En), pillar.key()]
                .into_iter()
                .find_map(|name| breakdown.get(name));
            (pillar, repair.pillar(pillar, entry))
        })
        .collect();

    let insights = object_at(&root, "response_insights").unwrap_or(&empty);
    let plan = object_at(&root, "development_plan").unwrap_or(&empty);

    Ok(Report {
        executive_summary: repair.text(
            &root,
            legacy_fallback(&root, "executive_summary", "detailed_analysis"),
        ),
        overall_score: repair.score("overall_score", root.get("overall_score")),
        score_justification: repair.text(&root, "score_justification"),
        leadership_level: repair.text(&root, "leadership_level"),
        pillars,
        strengths: repair.text(&root, "strengths"),
        development_areas: repair.text(&root, "development_areas"),
        response_insights: ResponseInsights {
            yes_no_patterns: repair.text(insights, "yes_no_patterns"),
            mcq_patterns: repair.text(insights, "mcq_patterns"),
            writing_quality: repair.text(insights, "writing_quality"),
        },
        recommendations: repair.list(
            &root,
            legacy_fallback(&root, "recommendations", "personalized_recommendations"),
        ),
        development_plan: DevelopmentPlan {
            near_term: repair.list(plan, "30_day_goals"),
            mid_term: repair.list(plan, "90_day_goals"),
            long_term: repair.list(plan, "6_month_goals"),
        },
        contextual_notes: repair.text(&root, "contextual_notes"),
        closing_remarks: repair.text(&root, "closing_remarks"),
        generated_at,
    })
}

/// `legacy` when `key` holds nothing usable but `legacy` does, else `key`.
fn legacy_fallback<'k>(map: &Map<String, Value>, key: &'k str, legacy: &'k str) -> &'k str {
    let usable = |k: &str| match map.get(k) {
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !strings(items).is_empty(),
        _ => false,
    };
    if !usable(key) && usable(legacy) {
        legacy
    } else {
        key
    }
}

fn object_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

struct Repair {
    placeholder: &'static str,
}

impl Repair {
    fn new(language: Language) -> Self {
        Self {
            placeholder: language.labels().not_available,
        }
    }

    /// A string, or a list of strings joined by newlines.
    fn text(&self, map: &Map<String, Value>, key: &str) -> String {
        let text = match map.get(key) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Array(items)) => strings(items).join("\n"),
            _ => String::new(),
        };
        if text.is_empty() {
            warn!("Report field '{key}' missing or unusable, using placeholder");
            self.placeholder.to_string()
        } else {
            text
        }
    }

    fn list(&self, map: &Map<String, Value>, key: &str) -> Vec<String> {
        let items = match map.get(key) {
            Some(Value::Array(items)) => strings(items),
            Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
            _ => Vec::new(),
        };
        if items.is_empty() {
            warn!("Report list '{key}' missing or empty, using placeholder");
            vec![self.placeholder.to_string()]
        } else {
            items
        }
    }

    fn score(&self, field: &str, value: Option<&Value>) -> f64 {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(s) if s.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&s) => s,
            _ => {
                warn!("Score '{field}' missing or out of range ({value:?}), using {NEUTRAL_SCORE}");
                NEUTRAL_SCORE
            }
        }
    }

    fn pillar(&self, pillar: Pillar, entry: Option<&Value>) -> PillarAssessment {
        let empty = Map::new();
        match entry {
            Some(Value::Object(map)) => PillarAssessment {
                score: self.score(pillar.key(), map.get("score")),
                analysis: self.text(map, "analysis"),
                evidence: self.list(map, "evidence"),
            },
            // A bare number (or numeric string) is taken as the score.
            Some(bare @ (Value::Number(_) | Value::String(_))) => PillarAssessment {
                score: self.score(pillar.key(), Some(bare)),
                analysis: self.text(&empty, "analysis"),
                evidence: self.list(&empty, "evidence"),
            },
            _ => PillarAssessment {
                score: self.score(pillar.key(), None),
                analysis: self.text(&empty, "analysis"),
                evidence: self.list(&empty, "evidence"),
            },
        }
    }
}

fn strings(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::fixtures::*;
    use super::*;

    fn decode(value: Value, language: Language) -> Report {
        decode_report(&value.to_string(), language, Utc::now()).unwrap()
    }

    #[test]
    fn test_compliant_report_decodes_all_six_pillars() {
        let report = decode_report(&report_reply(Language::En), Language::En, Utc::now()).unwrap();
        assert_eq!(report.overall_score, 7.8);
        assert_eq!(report.pillars.len(), 6);
        assert_eq!(report.pillars[&Pillar::StrategicThinking].score, 6.0);
        assert_eq!(report.development_plan.mid_term, vec!["Delegate the release process"]);
        assert!(report.scores_in_range());
    }

    #[test]
    fn test_array_reply_is_a_validation_failure() {
        let err = decode_report("[1, 2]", Language::En, Utc::now()).unwrap_err();
        assert!(matches!(err, GenerationError::Validation { .. }));
    }

    #[test]
    fn test_out_of_range_scores_become_neutral() {
        let mut value = report_value(Language::En);
        value["overall_score"] = json!(42);
        value["pillar_breakdown"]["Strategic Thinking"]["score"] = json!(0.2);
        value["pillar_breakdown"]["Leading Change & Adaptability"]["score"] = json!("n/a");

        let report = decode(value, Language::En);
        assert_eq!(report.overall_score, NEUTRAL_SCORE);
        assert_eq!(report.pillars[&Pillar::StrategicThinking].score, NEUTRAL_SCORE);
        assert_eq!(report.pillars[&Pillar::LeadingChange].score, NEUTRAL_SCORE);
        assert!(report.scores_in_range());
    }

    #[test]
    fn test_numeric_string_score_is_accepted() {
        let mut value = report_value(Language::En);
        value["overall_score"] = json!(" 8.5 ");
        assert_eq!(decode(value, Language::En).overall_score, 8.5);
    }

    #[test]
    fn test_missing_fields_get_localized_placeholder() {
        let report = decode(json!({}), Language::Ar);
        let placeholder = Language::Ar.labels().not_available;
        assert_eq!(report.executive_summary, placeholder);
        assert_eq!(report.response_insights.writing_quality, placeholder);
        assert_eq!(report.recommendations, vec![placeholder.to_string()]);
        assert_eq!(report.development_plan.long_term, vec![placeholder.to_string()]);
        assert_eq!(report.pillars.len(), 6);
        assert!(report
            .pillars
            .values()
            .all(|p| p.score == NEUTRAL_SCORE && p.analysis == placeholder));
    }

    #[test]
    fn test_pillars_fall_back_to_english_label_then_key() {
        let value = json!({
            "pillar_breakdown": {
                "Strategic Thinking": {"score": 9.0, "analysis": "Sharp"},
                "innovation_improvement": 4,
            }
        });
        let report = decode(value, Language::Ar);
        assert_eq!(report.pillars[&Pillar::StrategicThinking].score, 9.0);
        assert_eq!(report.pillars[&Pillar::StrategicThinking].analysis, "Sharp");
        assert_eq!(report.pillars[&Pillar::InnovationImprovement].score, 4.0);
    }

    #[test]
    fn test_arabic_labels_are_matched_first() {
        let report = decode(report_value(Language::Ar), Language::Ar);
        assert_eq!(report.pillars[&Pillar::InnovationImprovement].score, 8.5);
    }

    #[test]
    fn test_narrative_list_is_joined_by_newline() {
        let mut value = report_value(Language::En);
        value["strengths"] = json!(["Calm in crises", "Clear writer"]);
        value["recommendations"] = json!("Find a mentor");
        let report = decode(value, Language::En);
        assert_eq!(report.strengths, "Calm in crises\nClear writer");
        assert_eq!(report.recommendations, vec!["Find a mentor"]);
    }

    #[test]
    fn test_legacy_pillar_scores_key_is_read() {
        let value = json!({"pillar_scores": {"Empowerment & Motivation": {"score": 5.5}}});
        let report = decode(value, Language::En);
        assert_eq!(report.pillars[&Pillar::EmpowermentMotivation].score, 5.5);
    }

    #[test]
    fn test_older_summary_and_recommendation_keys_are_read() {
        let value = json!({
            "detailed_analysis": "Reads the room well before acting.",
            "personalized_recommendations": ["Shadow the CFO for a quarter"],
        });
        let report = decode(value, Language::En);
        assert_eq!(report.executive_summary, "Reads the room well before acting.");
        assert_eq!(report.recommendations, vec!["Shadow the CFO for a quarter"]);
    }

    #[test]
    fn test_current_keys_win_over_older_ones() {
        let value = json!({
            "executive_summary": "Current summary.",
            "detailed_analysis": "Older analysis.",
            "recommendations": ["Current"],
            "personalized_recommendations": ["Older"],
        });
        let report = decode(value, Language::En);
        assert_eq!(report.executive_summary, "Current summary.");
        assert_eq!(report.recommendations, vec!["Current"]);
    }
}
