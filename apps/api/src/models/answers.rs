use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::question::{parse_question_key, McqQuestion, YesNoMaybe, YesNoQuestion};

/// Answers collected so far, keyed by phase and then by positional question
/// key (`q0`, `q1`, ...). The scenario phase holds a single string.
///
/// Keys carry no question identity: they only line up with the cached
/// question list by position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    #[serde(default)]
    pub yes_no: BTreeMap<String, YesNoMaybe>,
    #[serde(default)]
    pub mcq: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl AnswerSet {
    /// Merges yes/no/maybe answers. All keys are checked before any is stored.
    pub fn record_yes_no(
        &mut self,
        questions: &[YesNoQuestion],
        answers: BTreeMap<String, YesNoMaybe>,
    ) -> Result<(), AppError> {
        for key in answers.keys() {
            check_key(key, questions.len())?;
        }
        self.yes_no.extend(answers);
        Ok(())
    }

    /// Merges multiple-choice answers. Each value must be one of the options
    /// of the question at the key's position.
    pub fn record_mcq(
        &mut self,
        questions: &[McqQuestion],
        answers: BTreeMap<String, String>,
    ) -> Result<(), AppError> {
        for (key, choice) in &answers {
            let index = check_key(key, questions.len())?;
            if !questions[index].options.iter().any(|o| o == choice) {
                return Err(AppError::Validation(format!(
                    "'{choice}' is not an option of question {key}"
                )));
            }
        }
        self.mcq.extend(answers);
        Ok(())
    }

    pub fn record_scenario(&mut self, response: String) {
        self.scenario = Some(response);
    }

    pub fn scenario_word_count(&self) -> usize {
        self.scenario.as_deref().map(word_count).unwrap_or(0)
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn check_key(key: &str, question_count: usize) -> Result<usize, AppError> {
    match parse_question_key(key) {
        Some(index) if index < question_count => Ok(index),
        _ => Err(AppError::Validation(format!(
            "unknown question key '{key}' (expected q0..q{})",
            question_count.saturating_sub(1)
        ))),
    }
}
