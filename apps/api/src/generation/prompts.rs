// Prompt templates and pure prompt builders for the content generators.
// Builders take only data and return the prompt text: no I/O, no clock.

use crate::generation::AssessmentResponses;
use crate::locale::Language;
use crate::models::answers::word_count;
use crate::models::pillar::{overall_effectiveness_label, Pillar};
use crate::models::profile::Profile;
use crate::models::question::question_key;

/// Yes/No/Maybe prompt template.
/// Replace: {lang}, {profile}, {pillars}, {example}
pub const YES_NO_PROMPT_TEMPLATE: &str = r#"You are an expert leadership psychologist creating a comprehensive assessment. Generate exactly 7 unique Yes/No/Maybe questions {lang} that cover all leadership competencies.

PERSONALIZATION CONTEXT:
{profile}

LEADERSHIP PILLARS TO COVER (one question each, in this order):
{pillars}

REQUIREMENTS:
1. Each question must be HIGHLY SPECIFIC to their role, industry, and experience level
2. Questions should test different leadership competencies
3. Reference their actual work context and challenges
4. Use industry-specific terminology and situations
5. Consider cultural context from their country
6. Questions should feel personally relevant and challenging

Return ONLY a JSON array of exactly 7 objects in this exact format:
{example}

CRITICAL: All content must be {lang}. No explanations, just the JSON."#;

/// Multiple-choice prompt template.
/// Replace: {lang}, {profile}, {example}
pub const MCQ_PROMPT_TEMPLATE: &str = r#"Create exactly 7 multiple choice questions for comprehensive leadership assessment {lang}, completely personalized for this professional.

PERSONALIZATION CONTEXT:
{profile}

REQUIREMENTS:
1. Each question must present a realistic scenario they would actually face in their role
2. Options must reflect real choices they would consider
3. Questions should test different leadership competencies comprehensively
4. Use industry-specific language and contexts
5. Difficulty appropriate for their experience level
6. Cover various leadership situations: crisis, growth, team conflicts, strategic decisions, etc.
7. Every question has EXACTLY 4 options

Return ONLY a JSON array of exactly 7 objects in this exact format:
{example}

CRITICAL: All content must be {lang}."#;

/// Writing-scenario prompt template.
/// Replace: {lang}, {profile}
pub const SCENARIO_PROMPT_TEMPLATE: &str = r#"Create one highly comprehensive, complex leadership scenario {lang} for this specific professional that requires detailed written analysis.

PERSONALIZATION CONTEXT:
{profile}

REQUIREMENTS:
1. Scenario must be HIGHLY SPECIFIC to their actual role and industry
2. Include multiple realistic stakeholders, constraints, and competing priorities
3. Test ALL leadership competencies simultaneously
4. Reflect current industry trends and challenges
5. Consider cultural and regional business context
6. Require 200-300 word response to address properly
7. Include specific metrics, timelines, budget constraints, and business outcomes
8. Present a complex situation with no obvious "right" answer
9. Require strategic thinking, change management, communication, team leadership, accountability, and innovation

Return ONLY the comprehensive scenario text {lang}. No formatting, explanations, or additional text."#;

/// Final report prompt template.
/// Replace: {lang}, {profile}, {responses}, {schema}
pub const REPORT_PROMPT_TEMPLATE: &str = r#"Perform a comprehensive, personalized leadership analysis {lang} based on this individual's specific responses to 7 Yes/No/Maybe questions, 7 multiple choice questions, and 1 writing scenario.

INDIVIDUAL PROFILE:
{profile}

ACTUAL RESPONSES TO ANALYZE:
{responses}

ANALYSIS REQUIREMENTS:
1. Analyze ACTUAL response patterns across all 15 questions
2. Scores must reflect their specific answers and demonstrate clear reasoning
3. Identify specific behavioral patterns from their Yes/No, multiple choice, and writing responses
4. Provide insights relevant to their role and industry
5. Consider their experience level in scoring and recommendations
6. Reference specific responses as evidence
7. Weight the writing scenario more heavily in final scoring
8. Every score is a number from 1.0 to 10.0

Return ONLY a valid JSON object {lang} with this EXACT schema:
{schema}

CRITICAL: Base everything on their ACTUAL responses with specific examples. All content must be {lang}."#;

/// Renders the profile as the bullet block shared by every prompt.
pub fn profile_block(profile: &Profile) -> String {
    let mut lines = vec![
        format!("- Name: {}", profile.name),
        format!("- Age: {}", profile.age),
        format!("- Position: {}", profile.current_position),
        format!("- Industry: {}", profile.industry),
        format!("- Country: {}", profile.country),
        format!("- Experience: {} years", profile.experience_years),
        format!("- Leadership Experience: {} years", profile.leadership_experience),
        format!("- Team Size: {}", profile.team_size),
        format!("- Company Size: {}", profile.company_size),
        format!("- Education: {}", profile.education),
    ];
    if !profile.current_challenges.is_empty() {
        lines.push(format!("- Current Challenges: {}", profile.current_challenges));
    }
    lines.join("\n")
}

pub fn build_yes_no_prompt(profile: &Profile, language: Language) -> String {
    let mut pillars: Vec<&str> = Pillar::ALL.iter().map(|p| p.label(language)).collect();
    pillars.push(overall_effectiveness_label(language));

    let pillar_list = pillars
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}. {p}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    let example = serde_json::Value::Array(
        pillars
            .iter()
            .enumerate()
            .map(|(i, p)| {
                serde_json::json!({
                    "question": format!("Highly personalized question {}", i + 1),
                    "pillar": p,
                })
            })
            .collect(),
    );

    fill(
        YES_NO_PROMPT_TEMPLATE,
        &[
            ("lang", language.instruction()),
            ("profile", profile_block(profile).as_str()),
            ("pillars", pillar_list.as_str()),
            ("example", pretty(&example).as_str()),
        ],
    )
}

pub fn build_mcq_prompt(profile: &Profile, language: Language) -> String {
    let example = serde_json::Value::Array(
        (1..=7)
            .map(|i| {
                serde_json::json!({
                    "question": format!("Personalized scenario question {i}"),
                    "options": ["Option A", "Option B", "Option C", "Option D"],
                    "pillar": "Leadership competency being tested",
                })
            })
            .collect(),
    );

    fill(
        MCQ_PROMPT_TEMPLATE,
        &[
            ("lang", language.instruction()),
            ("profile", profile_block(profile).as_str()),
            ("example", pretty(&example).as_str()),
        ],
    )
}

pub fn build_scenario_prompt(profile: &Profile, language: Language) -> String {
    fill(
        SCENARIO_PROMPT_TEMPLATE,
        &[
            ("lang", language.instruction()),
            ("profile", profile_block(profile).as_str()),
        ],
    )
}

pub fn build_report_prompt(
    profile: &Profile,
    responses: &AssessmentResponses<'_>,
    language: Language,
) -> String {
    fill(
        REPORT_PROMPT_TEMPLATE,
        &[
            ("lang", language.instruction()),
            ("profile", profile_block(profile).as_str()),
            ("responses", render_responses(responses).as_str()),
            ("schema", report_schema(language).as_str()),
        ],
    )
}

/// Lists every answer next to the question at the same position.
///
/// Pairing is purely positional: answer `q3` is shown under whatever
/// question currently sits at index 3.
pub fn render_responses(responses: &AssessmentResponses<'_>) -> String {
    let mut out = String::from("PART 1 - YES/NO/MAYBE:\n");
    for (i, q) in responses.yes_no_questions.iter().enumerate() {
        let key = question_key(i);
        let answer = responses
            .answers
            .yes_no
            .get(&key)
            .map(|a| a.label(Language::En))
            .unwrap_or("(no answer)");
        out.push_str(&format!("{key} [{}] {}\n  Answer: {answer}\n", q.pillar, q.question));
    }

    out.push_str("\nPART 2 - MULTIPLE CHOICE:\n");
    for (i, q) in responses.mcq_questions.iter().enumerate() {
        let key = question_key(i);
        let answer = responses
            .answers
            .mcq
            .get(&key)
            .map(String::as_str)
            .unwrap_or("(no answer)");
        out.push_str(&format!(
            "{key} [{}] {}\n  Options: {}\n  Answer: {answer}\n",
            q.pillar,
            q.question,
            q.options.join(" | ")
        ));
    }

    let written = responses.answers.scenario.as_deref().unwrap_or("");
    out.push_str(&format!(
        "\nPART 3 - WRITING SCENARIO:\nScenario: {}\nResponse ({} words): {}\n",
        responses.scenario,
        word_count(written),
        written
    ));
    out
}

fn report_schema(language: Language) -> String {
    let pillars: serde_json::Map<String, serde_json::Value> = Pillar::ALL
        .iter()
        .map(|p| {
            (
                p.label(language).to_string(),
                serde_json::json!({
                    "score": "[1.0-10.0 based on responses]",
                    "analysis": "analysis of this pillar referencing actual responses",
                    "evidence": ["specific response cited as evidence"],
                }),
            )
        })
        .collect();

    let schema = serde_json::json!({
        "executive_summary": "short overview of the leader's profile",
        "overall_score": "[1.0-10.0 calculated from actual responses]",
        "score_justification": "clear reasoning for the overall score",
        "leadership_level": "[based on scores and experience]",
        "pillar_breakdown": pillars,
        "strengths": "narrative of specific strengths from actual responses with examples",
        "development_areas": "narrative of specific development areas with examples",
        "response_insights": {
            "yes_no_patterns": "analysis of their Yes/No/Maybe response patterns",
            "mcq_patterns": "analysis of their multiple choice patterns",
            "writing_quality": "analysis of their writing scenario response quality and depth",
        },
        "recommendations": ["specific recommendations based on their responses and role"],
        "development_plan": {
            "30_day_goals": ["specific 30-day actions"],
            "90_day_goals": ["specific 90-day actions"],
            "6_month_goals": ["specific 6-month actions"],
        },
        "contextual_notes": "notes on industry, company and regional context",
        "closing_remarks": "encouraging closing remarks",
    });
    pretty(&schema)
}

/// Substitutes `{name}` placeholders in one pass over the template.
/// Inserted values are never scanned again, so user text that happens to
/// contain `{lang}` or `{schema}` stays literal.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let hit = values.iter().find_map(|(name, value)| {
            let placeholder_len = name.len() + 2;
            let matches = tail.len() >= placeholder_len
                && tail[1..].starts_with(name)
                && tail[placeholder_len - 1..].starts_with('}');
            matches.then_some((placeholder_len, *value))
        });
        match hit {
            Some((len, value)) => {
                out.push_str(value);
                rest = &tail[len..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::answers::AnswerSet;
    use crate::models::profile::sample_form;
    use crate::models::question::{McqQuestion, YesNoMaybe, YesNoQuestion};

    fn profile() -> Profile {
        sample_form().validate(Language::En).unwrap()
    }

    #[test]
    fn test_yes_no_prompt_embeds_profile_and_language() {
        let prompt = build_yes_no_prompt(&profile(), Language::En);
        assert!(prompt.contains("- Name: Amina"));
        assert!(prompt.contains("- Position: Engineering Manager"));
        assert!(prompt.contains("- Country: Jordan"));
        assert!(prompt.contains("in English language only"));
        assert!(prompt.contains("Overall Leadership Effectiveness"));
        assert!(!prompt.contains("{profile}"));
    }

    #[test]
    fn test_arabic_prompts_use_arabic_directive_and_pillars() {
        let prompt = build_yes_no_prompt(&profile(), Language::Ar);
        assert!(prompt.contains("in Arabic language only"));
        assert!(prompt.contains(Pillar::StrategicThinking.label(Language::Ar)));
    }

    #[test]
    fn test_mcq_prompt_demands_four_options() {
        let prompt = build_mcq_prompt(&profile(), Language::En);
        assert!(prompt.contains("EXACTLY 4 options"));
        assert!(prompt.contains("\"Option D\""));
    }

    #[test]
    fn test_challenges_only_rendered_when_present() {
        let mut p = profile();
        assert!(!profile_block(&p).contains("Current Challenges"));
        p.current_challenges = "Hiring freeze".to_string();
        assert!(profile_block(&p).contains("- Current Challenges: Hiring freeze"));
    }

    #[test]
    fn test_scenario_prompt_is_deterministic() {
        let p = profile();
        assert_eq!(
            build_scenario_prompt(&p, Language::En),
            build_scenario_prompt(&p, Language::En)
        );
    }

    #[test]
    fn test_report_prompt_pairs_answers_with_questions_by_position() {
        let yes_no = vec![
            YesNoQuestion {
                question: "Do you set quarterly goals?".to_string(),
                pillar: "Strategic Thinking".to_string(),
            },
            YesNoQuestion {
                question: "Do you delegate budget decisions?".to_string(),
                pillar: "Empowerment & Motivation".to_string(),
            },
        ];
        let mcq = vec![McqQuestion {
            question: "A key engineer resigns. What first?".to_string(),
            options: ["Talk", "Hire", "Wait", "Escalate"].map(String::from).to_vec(),
            pillar: "Leading Change & Adaptability".to_string(),
        }];
        let answers = AnswerSet {
            yes_no: BTreeMap::from([("q1".to_string(), YesNoMaybe::Maybe)]),
            mcq: BTreeMap::from([("q0".to_string(), "Talk".to_string())]),
            scenario: Some("I would meet the team first.".to_string()),
        };
        let responses = AssessmentResponses {
            yes_no_questions: &yes_no,
            mcq_questions: &mcq,
            scenario: "Budget cut scenario",
            answers: &answers,
        };

        let rendered = render_responses(&responses);
        assert!(rendered.contains("q0 [Strategic Thinking] Do you set quarterly goals?\n  Answer: (no answer)"));
        assert!(rendered.contains("q1 [Empowerment & Motivation] Do you delegate budget decisions?\n  Answer: Maybe"));
        assert!(rendered.contains("Answer: Talk"));
        assert!(rendered.contains("Response (6 words): I would meet the team first."));

        let prompt = build_report_prompt(&profile(), &responses, Language::En);
        assert!(prompt.contains("\"pillar_breakdown\""));
        assert!(prompt.contains("Innovation & Continuous Improvement"));
        assert!(prompt.contains("\"6_month_goals\""));
    }

    #[test]
    fn test_fill_leaves_unknown_braces_alone() {
        let out = fill("{a} {b} {\"x\": 1} {", &[("a", "1"), ("b", "{a}")]);
        assert_eq!(out, "1 {a} {\"x\": 1} {");
    }

    #[test]
    fn test_user_text_with_placeholder_names_is_not_expanded() {
        let mut p = profile();
        p.name = "{schema}".to_string();
        let answers = AnswerSet {
            scenario: Some("My plan: {lang} and {profile}".to_string()),
            ..AnswerSet::default()
        };
        let responses = AssessmentResponses {
            yes_no_questions: &[],
            mcq_questions: &[],
            scenario: "Budget cut scenario",
            answers: &answers,
        };

        let prompt = build_report_prompt(&p, &responses, Language::En);

        assert!(prompt.contains("- Name: {schema}"));
        assert!(prompt.contains("My plan: {lang} and {profile}"));
        assert_eq!(prompt.matches("\"pillar_breakdown\"").count(), 1);
        assert!(!prompt.contains("{responses}"));

        let scenario_prompt = build_scenario_prompt(&p, Language::Ar);
        assert!(scenario_prompt.contains("- Name: {schema}"));
        assert!(scenario_prompt.contains("in Arabic language only"));
    }
}
