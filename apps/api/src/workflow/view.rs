//! JSON views of a session, one shape per phase. The client renders these
//! directly: every user-facing string comes from the localized label table.

use serde::Serialize;
use uuid::Uuid;

use crate::locale::{Labels, Language, ProfileOptions};
use crate::models::profile::Profile;
use crate::models::question::{question_key, YesNoMaybe};
use crate::models::report::Report;
use crate::workflow::{Session, SessionPhase, MIN_RESPONSE_WORDS};

const QUESTION_PHASES: u8 = 3;
const TOTAL_QUESTIONS: &str = "15 (7+7+1)";
const GOOD_RESPONSE_WORDS: usize = 200;

#[derive(Debug, Serialize)]
pub struct SessionView<'a> {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub language: Language,
    pub direction: &'static str,
    pub labels: &'static Labels,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<Progress>,
    /// False while a question phase still waits for its content. The client
    /// offers `POST /generate` in that case.
    pub content_ready: bool,
    pub content: PhaseContent<'a>,
}

#[derive(Debug, Serialize)]
pub struct Progress {
    pub step: u8,
    pub total: u8,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhaseContent<'a> {
    Welcome,
    ProfileForm {
        options: &'static ProfileOptions,
    },
    YesNo {
        questions: Vec<YesNoItem<'a>>,
        choices: Vec<Choice>,
    },
    Mcq {
        questions: Vec<McqItem<'a>>,
    },
    Scenario {
        scenario: Option<&'a str>,
        response: Option<&'a str>,
        word_count: usize,
        min_words: usize,
        feedback: WordCountFeedback,
    },
    Report(ReportView<'a>),
}

#[derive(Debug, Serialize)]
pub struct YesNoItem<'a> {
    pub key: String,
    pub question: &'a str,
    pub pillar: &'a str,
    pub answer: Option<YesNoMaybe>,
}

#[derive(Debug, Serialize)]
pub struct McqItem<'a> {
    pub key: String,
    pub question: &'a str,
    pub options: &'a [String],
    pub pillar: &'a str,
    pub answer: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct Choice {
    pub value: YesNoMaybe,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCountFeedback {
    TooShort,
    Fair,
    Good,
}

impl WordCountFeedback {
    pub fn for_count(words: usize) -> Self {
        if words < MIN_RESPONSE_WORDS {
            WordCountFeedback::TooShort
        } else if words < GOOD_RESPONSE_WORDS {
            WordCountFeedback::Fair
        } else {
            WordCountFeedback::Good
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportView<'a> {
    pub profile: &'a Profile,
    pub report: &'a Report,
    pub pillar_labels: Vec<PillarLabel>,
    pub duration_minutes: Option<i64>,
    pub total_questions: &'static str,
    pub response_word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct PillarLabel {
    pub key: &'static str,
    pub label: &'static str,
}

impl<'a> SessionView<'a> {
    pub fn of(session: &'a Session) -> Self {
        let language = session.language;
        Self {
            session_id: session.id,
            phase: session.phase,
            language,
            direction: language.direction().as_str(),
            labels: language.labels(),
            progress: session.phase.step().map(|step| Progress {
                step,
                total: QUESTION_PHASES,
            }),
            content_ready: session.has_content(),
            content: phase_content(session),
        }
    }
}

fn phase_content(session: &Session) -> PhaseContent<'_> {
    let language = session.language;
    match session.phase {
        SessionPhase::Setup => PhaseContent::Welcome,
        SessionPhase::Profile => PhaseContent::ProfileForm {
            options: language.profile_options(),
        },
        SessionPhase::YesNo => PhaseContent::YesNo {
            questions: session
                .yes_no_questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let key = question_key(i);
                    YesNoItem {
                        answer: session.answers.yes_no.get(&key).copied(),
                        key,
                        question: &q.question,
                        pillar: &q.pillar,
                    }
                })
                .collect(),
            choices: YesNoMaybe::ALL
                .into_iter()
                .map(|value| Choice {
                    value,
                    label: value.label(language),
                })
                .collect(),
        },
        SessionPhase::Mcq => PhaseContent::Mcq {
            questions: session
                .mcq_questions
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let key = question_key(i);
                    McqItem {
                        answer: session.answers.mcq.get(&key).map(String::as_str),
                        key,
                        question: &q.question,
                        options: &q.options,
                        pillar: &q.pillar,
                    }
                })
                .collect(),
        },
        SessionPhase::Scenario => {
            let word_count = session.answers.scenario_word_count();
            PhaseContent::Scenario {
                scenario: session.scenario.as_deref(),
                response: session.answers.scenario.as_deref(),
                word_count,
                min_words: MIN_RESPONSE_WORDS,
                feedback: WordCountFeedback::for_count(word_count),
            }
        }
        SessionPhase::Complete => match (&session.profile, &session.report) {
            (Some(profile), Some(report)) => PhaseContent::Report(ReportView {
                profile,
                report,
                pillar_labels: crate::models::pillar::Pillar::ALL
                    .iter()
                    .map(|p| PillarLabel {
                        key: p.key(),
                        label: p.label(language),
                    })
                    .collect(),
                duration_minutes: session.duration_minutes(),
                total_questions: TOTAL_QUESTIONS,
                response_word_count: session.answers.scenario_word_count(),
            }),
            // Complete is only ever entered together with a report.
            _ => PhaseContent::Welcome,
        },
    }
}
