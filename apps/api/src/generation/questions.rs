//! Typed decoding and validation of the two question sets.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::GenerationError;
use crate::llm_client::parser::parse_json;
use crate::models::question::{McqQuestion, YesNoQuestion};

pub const QUESTIONS_PER_PHASE: usize = 7;
pub const MCQ_OPTIONS: usize = 4;

const YES_NO_CONTRACT: &str = "yes/no questions";
const MCQ_CONTRACT: &str = "multiple-choice questions";

/// Decodes a yes/no/maybe question list. Exactly 7 items, each with a
/// non-empty `question` and `pillar`.
pub fn decode_yes_no(raw: &str) -> Result<Vec<YesNoQuestion>, GenerationError> {
    let mut questions: Vec<YesNoQuestion> = decode_list(raw, YES_NO_CONTRACT)?;

    for (i, q) in questions.iter_mut().enumerate() {
        q.question = required_text(&q.question, YES_NO_CONTRACT, i, "question")?;
        q.pillar = required_text(&q.pillar, YES_NO_CONTRACT, i, "pillar")?;
    }
    Ok(questions)
}

/// Decodes a multiple-choice question list. Same rules as yes/no plus
/// exactly 4 non-empty options per question.
pub fn decode_mcq(raw: &str) -> Result<Vec<McqQuestion>, GenerationError> {
    let mut questions: Vec<McqQuestion> = decode_list(raw, MCQ_CONTRACT)?;

    for (i, q) in questions.iter_mut().enumerate() {
        q.question = required_text(&q.question, MCQ_CONTRACT, i, "question")?;
        q.pillar = required_text(&q.pillar, MCQ_CONTRACT, i, "pillar")?;

        if q.options.len() != MCQ_OPTIONS {
            return Err(GenerationError::validation(
                MCQ_CONTRACT,
                format!(
                    "item {i} must have exactly {MCQ_OPTIONS} options, got {}",
                    q.options.len()
                ),
            ));
        }
        for option in q.options.iter_mut() {
            *option = required_text(option, MCQ_CONTRACT, i, "option")?;
        }
    }
    Ok(questions)
}

fn decode_list<T: DeserializeOwned>(
    raw: &str,
    contract: &'static str,
) -> Result<Vec<T>, GenerationError> {
    let items = match parse_json(raw)? {
        Value::Array(items) => items,
        other => {
            return Err(GenerationError::validation(
                contract,
                format!("expected a JSON array, got {}", json_kind(&other)),
            ))
        }
    };

    if items.len() != QUESTIONS_PER_PHASE {
        return Err(GenerationError::validation(
            contract,
            format!(
                "expected exactly {QUESTIONS_PER_PHASE} items, got {}",
                items.len()
            ),
        ));
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| GenerationError::validation(contract, format!("item {i}: {e}")))
        })
        .collect()
}

fn required_text(
    value: &str,
    contract: &'static str,
    index: usize,
    field: &str,
) -> Result<String, GenerationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GenerationError::validation(
            contract,
            format!("item {index} has an empty {field}"),
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
