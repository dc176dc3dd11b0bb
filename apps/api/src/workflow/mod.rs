//! The assessment phase machine.
//!
//! One `Session` per user run. Every trigger checks the current phase first
//! and returns `InvalidTransition` without touching the session when the
//! trigger is not allowed there.
//!
//! Transitions:
//!   setup    --begin-->           profile
//!   profile  --submit_profile-->  yes_no     (generates yes/no questions)
//!   yes_no   --advance-->         mcq        (generates MCQ questions)
//!   mcq      --back-->            yes_no
//!   mcq      --advance-->         scenario   (generates the scenario)
//!   scenario --back-->            mcq
//!   scenario --submit_scenario--> complete   (generates the report)
//!   complete --reset-->           setup
//!
//! Generation only runs when the phase's cached content is empty. A failed
//! generation leaves the session in the phase it just entered.

pub mod handlers;
pub mod store;
pub mod view;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ReportDocument;
use crate::generation::{AssessmentResponses, ContentGenerator};
use crate::locale::Language;
use crate::models::answers::AnswerSet;
use crate::models::profile::{Profile, ProfileForm};
use crate::models::question::{McqQuestion, YesNoMaybe, YesNoQuestion};
use crate::models::report::Report;

/// Fewest words accepted for the written scenario response.
pub const MIN_RESPONSE_WORDS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Setup,
    Profile,
    YesNo,
    Mcq,
    Scenario,
    Complete,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Setup => "setup",
            SessionPhase::Profile => "profile",
            SessionPhase::YesNo => "yes_no",
            SessionPhase::Mcq => "mcq",
            SessionPhase::Scenario => "scenario",
            SessionPhase::Complete => "complete",
        }
    }

    /// Position among the three question phases, counted from 1.
    pub fn step(&self) -> Option<u8> {
        match self {
            SessionPhase::YesNo => Some(1),
            SessionPhase::Mcq => Some(2),
            SessionPhase::Scenario => Some(3),
            _ => None,
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All state of one assessment run.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub phase: SessionPhase,
    pub language: Language,
    pub profile: Option<Profile>,
    pub yes_no_questions: Vec<YesNoQuestion>,
    pub mcq_questions: Vec<McqQuestion>,
    pub scenario: Option<String>,
    pub answers: AnswerSet,
    pub report: Option<Report>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(id: Uuid, language: Language) -> Self {
        Self {
            id,
            phase: SessionPhase::Setup,
            language,
            profile: None,
            yes_no_questions: Vec::new(),
            mcq_questions: Vec::new(),
            scenario: None,
            answers: AnswerSet::default(),
            report: None,
            started_at: None,
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Triggers
    // ────────────────────────────────────────────────────────────────────────

    pub fn begin(&mut self) -> Result<(), AppError> {
        self.require_phase(SessionPhase::Setup, "begin")?;
        self.phase = SessionPhase::Profile;
        self.started_at = Some(Utc::now());
        info!("Session {} started", self.id);
        Ok(())
    }

    /// Validates the form and enters the yes/no phase. A form error keeps
    /// the session on the profile phase.
    pub async fn submit_profile(
        &mut self,
        form: ProfileForm,
        generator: &ContentGenerator,
    ) -> Result<(), AppError> {
        self.require_phase(SessionPhase::Profile, "submit a profile")?;
        let profile = form.validate(self.language)?;
        info!("Session {} profile accepted for {}", self.id, profile.name);

        self.profile = Some(profile);
        self.phase = SessionPhase::YesNo;
        self.ensure_phase_content(generator).await
    }

    /// Generates the current phase's content if it is not cached yet.
    /// Outside the three question phases this does nothing.
    pub async fn ensure_phase_content(
        &mut self,
        generator: &ContentGenerator,
    ) -> Result<(), AppError> {
        let language = self.language;
        match self.phase {
            SessionPhase::YesNo if self.yes_no_questions.is_empty() => {
                let questions = generator
                    .yes_no_questions(self.profile()?, language)
                    .await
                    .inspect_err(|e| warn!("Session {}: yes/no generation failed: {e}", self.id))?;
                self.yes_no_questions = questions;
            }
            SessionPhase::Mcq if self.mcq_questions.is_empty() => {
                let questions = generator
                    .mcq_questions(self.profile()?, language)
                    .await
                    .inspect_err(|e| warn!("Session {}: MCQ generation failed: {e}", self.id))?;
                self.mcq_questions = questions;
            }
            SessionPhase::Scenario if self.scenario.is_none() => {
                let scenario = generator
                    .scenario(self.profile()?, language)
                    .await
                    .inspect_err(|e| warn!("Session {}: scenario generation failed: {e}", self.id))?;
                self.scenario = Some(scenario);
            }
            _ => {}
        }
        Ok(())
    }

    /// Merges answers for the current question phase. Values are the
    /// canonical `yes`/`no`/`maybe` in the yes/no phase and option text in
    /// the MCQ phase.
    pub fn record_answers(&mut self, answers: BTreeMap<String, String>) -> Result<(), AppError> {
        match self.phase {
            SessionPhase::YesNo => {
                self.require_content("record answers")?;
                let parsed = answers
                    .into_iter()
                    .map(|(key, value)| {
                        value
                            .parse::<YesNoMaybe>()
                            .map(|v| (key.clone(), v))
                            .map_err(|e| AppError::Validation(format!("{key}: {e}")))
                    })
                    .collect::<Result<BTreeMap<_, _>, _>>()?;
                self.answers.record_yes_no(&self.yes_no_questions, parsed)
            }
            SessionPhase::Mcq => {
                self.require_content("record answers")?;
                self.answers.record_mcq(&self.mcq_questions, answers)
            }
            phase => Err(AppError::InvalidTransition(format!(
                "cannot record answers in phase '{phase}'"
            ))),
        }
    }

    /// Forward navigation: yes_no → mcq → scenario.
    pub async fn advance(&mut self, generator: &ContentGenerator) -> Result<(), AppError> {
        let next = match self.phase {
            SessionPhase::YesNo => SessionPhase::Mcq,
            SessionPhase::Mcq => SessionPhase::Scenario,
            phase => {
                return Err(AppError::InvalidTransition(format!(
                    "cannot continue from phase '{phase}'"
                )))
            }
        };
        self.require_content("continue")?;
        self.phase = next;
        self.ensure_phase_content(generator).await
    }

    /// Backward navigation: mcq → yes_no, scenario → mcq. Never regenerates
    /// and never discards answers.
    pub fn back(&mut self) -> Result<(), AppError> {
        self.phase = match self.phase {
            SessionPhase::Mcq => SessionPhase::YesNo,
            SessionPhase::Scenario => SessionPhase::Mcq,
            phase => {
                return Err(AppError::InvalidTransition(format!(
                    "cannot go back from phase '{phase}'"
                )))
            }
        };
        Ok(())
    }

    /// Saves the written response, then checks its length and generates the
    /// report. The response is kept whatever happens next.
    pub async fn submit_scenario(
        &mut self,
        response: String,
        generator: &ContentGenerator,
    ) -> Result<(), AppError> {
        self.require_phase(SessionPhase::Scenario, "submit a scenario response")?;
        self.require_content("submit a scenario response")?;

        self.answers.record_scenario(response);
        let words = self.answers.scenario_word_count();
        if words < MIN_RESPONSE_WORDS {
            return Err(AppError::Validation(format!(
                "{} ({words}/{MIN_RESPONSE_WORDS})",
                self.language.labels().scenario_too_short_error
            )));
        }

        let report = {
            let responses = AssessmentResponses {
                yes_no_questions: &self.yes_no_questions,
                mcq_questions: &self.mcq_questions,
                scenario: self.scenario.as_deref().unwrap_or_default(),
                answers: &self.answers,
            };
            generator
                .report(self.profile()?, &responses, self.language)
                .await
                .inspect_err(|e| warn!("Session {}: report generation failed: {e}", self.id))?
        };

        self.report = Some(report);
        self.phase = SessionPhase::Complete;
        info!("Session {} complete ({words} words written)", self.id);
        Ok(())
    }

    /// Starts a new assessment. Only the id survives; the language goes back
    /// to `default_language`.
    pub fn reset(&mut self, default_language: Language) -> Result<(), AppError> {
        self.require_phase(SessionPhase::Complete, "start a new assessment")?;
        *self = Session::new(self.id, default_language);
        info!("Session {} reset", self.id);
        Ok(())
    }

    /// Allowed in every phase. Content already generated stays in the
    /// language it was generated in.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    // ────────────────────────────────────────────────────────────────────────
    // Queries
    // ────────────────────────────────────────────────────────────────────────

    /// Whether the current phase has its generated content.
    pub fn has_content(&self) -> bool {
        match self.phase {
            SessionPhase::YesNo => !self.yes_no_questions.is_empty(),
            SessionPhase::Mcq => !self.mcq_questions.is_empty(),
            SessionPhase::Scenario => self.scenario.is_some(),
            SessionPhase::Complete => self.report.is_some(),
            SessionPhase::Setup | SessionPhase::Profile => true,
        }
    }

    /// Whole minutes from `begin` to report generation.
    pub fn duration_minutes(&self) -> Option<i64> {
        let started = self.started_at?;
        let finished = self.report.as_ref()?.generated_at;
        Some((finished - started).num_minutes().max(0))
    }

    /// Borrowed view of the finished assessment for the exporters.
    pub fn report_document(&self) -> Result<ReportDocument<'_>, AppError> {
        match (&self.profile, &self.report) {
            (Some(profile), Some(report)) if self.phase == SessionPhase::Complete => {
                Ok(ReportDocument {
                    profile,
                    report,
                    language: self.language,
                    duration_minutes: self.duration_minutes(),
                    response_word_count: self.answers.scenario_word_count(),
                })
            }
            _ => Err(AppError::InvalidTransition(format!(
                "no report to export in phase '{}'",
                self.phase
            ))),
        }
    }

    fn profile(&self) -> Result<&Profile, AppError> {
        self.profile
            .as_ref()
            .ok_or_else(|| AppError::InvalidTransition("profile has not been submitted".to_string()))
    }

    fn require_phase(&self, expected: SessionPhase, action: &str) -> Result<(), AppError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(format!(
                "cannot {action} in phase '{}'",
                self.phase
            )))
        }
    }

    fn require_content(&self, action: &str) -> Result<(), AppError> {
        if self.has_content() {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(format!(
                "cannot {action} before the {} content is generated",
                self.phase
            )))
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::*;
    use super::*;
    use crate::errors::GenerationError;
    use crate::generation::questions::fixtures::yes_no_reply;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::profile::sample_form;

    fn session() -> Session {
        Session::new(Uuid::new_v4(), Language::En)
    }

    #[tokio::test]
    async fn test_profile_submission_enters_yes_no_with_seven_questions() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();

        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();

        assert_eq!(s.phase, SessionPhase::YesNo);
        assert_eq!(s.yes_no_questions.len(), 7);
        assert_eq!(s.profile.as_ref().unwrap().name, "Amina");
        assert!(script.prompts()[0].contains("Engineering Manager"));
    }

    #[tokio::test]
    async fn test_missing_required_field_stays_on_profile() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();

        let mut form = sample_form();
        form.country = "  ".to_string();
        let err = s.submit_profile(form, &generator).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(s.phase, SessionPhase::Profile);
        assert!(s.profile.is_none());
        assert_eq!(script.calls(), 0);
    }

    #[tokio::test]
    async fn test_six_questions_fail_and_phase_stays_yes_no() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(yes_no_reply(6));
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();

        let err = s.submit_profile(sample_form(), &generator).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Generation(GenerationError::Validation { .. })
        ));
        assert_eq!(s.phase, SessionPhase::YesNo);
        assert!(s.yes_no_questions.is_empty());
        assert!(!s.has_content());

        // Retry succeeds once the model behaves.
        script.push_ok(yes_no_reply(7));
        s.ensure_phase_content(&generator).await.unwrap();
        assert_eq!(s.yes_no_questions.len(), 7);
    }

    #[tokio::test]
    async fn test_full_flow_reaches_complete_with_six_pillars() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();

        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.record_answers((0..7).map(|i| (format!("q{i}"), "yes".to_string())).collect())
            .unwrap();
        s.advance(&generator).await.unwrap();
        assert_eq!(s.phase, SessionPhase::Mcq);

        let picks = s
            .mcq_questions
            .iter()
            .enumerate()
            .map(|(i, q)| (format!("q{i}"), q.options[0].clone()))
            .collect();
        s.record_answers(picks).unwrap();
        s.advance(&generator).await.unwrap();
        assert_eq!(s.phase, SessionPhase::Scenario);
        assert!(s.scenario.is_some());

        s.submit_scenario(words(120), &generator).await.unwrap();

        assert_eq!(s.phase, SessionPhase::Complete);
        let report = s.report.as_ref().unwrap();
        assert_eq!(report.pillars.len(), 6);
        assert!(report.scores_in_range());
        assert_eq!(script.calls(), 4);
        assert!(s.duration_minutes().is_some());
    }

    #[tokio::test]
    async fn test_short_response_is_saved_but_rejected() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.advance(&generator).await.unwrap();
        s.advance(&generator).await.unwrap();

        let err = s.submit_scenario(words(99), &generator).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m.contains("99/100")));
        assert_eq!(s.phase, SessionPhase::Scenario);
        assert_eq!(s.answers.scenario_word_count(), 99);
        assert_eq!(script.calls(), 3);
    }

    #[tokio::test]
    async fn test_report_failure_keeps_response_and_phase() {
        let script = Arc::new(ScriptedGenerator::default());
        script.push_ok(yes_no_reply(7));
        script.push_ok(crate::generation::questions::fixtures::mcq_reply(7));
        script.push_ok(crate::generation::scenario::sample_scenario());
        script.push_ok("[\"not\", \"an object\"]");
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.advance(&generator).await.unwrap();
        s.advance(&generator).await.unwrap();

        let response = words(150);
        assert!(s.submit_scenario(response.clone(), &generator).await.is_err());

        assert_eq!(s.phase, SessionPhase::Scenario);
        assert_eq!(s.answers.scenario.as_deref(), Some(response.as_str()));
        assert!(s.report.is_none());
    }

    #[tokio::test]
    async fn test_back_navigation_keeps_answers_and_never_regenerates() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.record_answers([("q2".to_string(), "maybe".to_string())].into())
            .unwrap();
        s.advance(&generator).await.unwrap();
        let first_option = s.mcq_questions[0].options[1].clone();
        s.record_answers([("q0".to_string(), first_option.clone())].into())
            .unwrap();

        s.back().unwrap();
        assert_eq!(s.phase, SessionPhase::YesNo);
        s.advance(&generator).await.unwrap();
        assert_eq!(s.phase, SessionPhase::Mcq);

        assert_eq!(s.answers.yes_no["q2"], YesNoMaybe::Maybe);
        assert_eq!(s.answers.mcq["q0"], first_option);
        assert_eq!(script.calls(), 2);
    }

    #[tokio::test]
    async fn test_answers_follow_position_not_question_identity() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.record_answers([("q0".to_string(), "no".to_string())].into())
            .unwrap();

        // Swapping the cached list re-pairs the stored answer with whatever
        // question now sits at index 0.
        s.yes_no_questions.swap(0, 1);
        let moved = s.yes_no_questions[0].question.clone();
        let responses = AssessmentResponses {
            yes_no_questions: &s.yes_no_questions,
            mcq_questions: &s.mcq_questions,
            scenario: "",
            answers: &s.answers,
        };
        let rendered = crate::generation::prompts::render_responses(&responses);
        assert!(rendered.contains(&format!("q0 [Strategic Thinking] {moved}\n  Answer: No")));
    }

    #[test]
    fn test_triggers_outside_table_leave_session_unchanged() {
        let mut s = session();
        assert!(matches!(s.back(), Err(AppError::InvalidTransition(_))));
        assert!(matches!(s.reset(Language::En), Err(AppError::InvalidTransition(_))));
        assert!(matches!(
            s.record_answers(BTreeMap::new()),
            Err(AppError::InvalidTransition(_))
        ));
        assert_eq!(s.phase, SessionPhase::Setup);
        assert!(s.started_at.is_none());

        s.begin().unwrap();
        assert!(matches!(s.begin(), Err(AppError::InvalidTransition(_))));
        assert_eq!(s.phase, SessionPhase::Profile);
    }

    #[tokio::test]
    async fn test_continue_requires_generated_content() {
        let script = Arc::new(ScriptedGenerator::default());
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        assert!(s.submit_profile(sample_form(), &generator).await.is_err());

        let err = s.advance(&generator).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
        assert_eq!(s.phase, SessionPhase::YesNo);
    }

    #[tokio::test]
    async fn test_invalid_yes_no_value_is_rejected() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();

        let err = s
            .record_answers([("q0".to_string(), "sometimes".to_string())].into())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(s.answers.yes_no.is_empty());
    }

    #[tokio::test]
    async fn test_reset_clears_everything_including_language() {
        let script = compliant_script();
        let generator = scripted(&script);
        let mut s = session();
        s.set_language(Language::Ar);
        s.begin().unwrap();
        s.submit_profile(sample_form(), &generator).await.unwrap();
        s.advance(&generator).await.unwrap();
        s.advance(&generator).await.unwrap();
        s.submit_scenario(words(100), &generator).await.unwrap();
        let id = s.id;

        s.reset(Language::En).unwrap();

        assert_eq!(s.phase, SessionPhase::Setup);
        assert_eq!(s.language, Language::En);
        assert!(s.started_at.is_none());
        assert_eq!(s.id, id);
        assert!(s.profile.is_none());
        assert!(s.report.is_none());
        assert_eq!(s.answers, AnswerSet::default());
    }

    #[test]
    fn test_language_switch_is_allowed_in_any_phase() {
        let mut s = session();
        s.set_language(Language::Ar);
        s.begin().unwrap();
        s.set_language(Language::En);
        assert_eq!(s.language, Language::En);
        assert_eq!(s.phase, SessionPhase::Profile);
    }
}
