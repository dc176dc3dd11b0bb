use crate::errors::GenerationError;
use crate::llm_client::parser::strip_fences;

/// Shortest scenario text accepted from the model, in characters.
pub const MIN_SCENARIO_CHARS: usize = 150;

/// Cleans a scenario reply: fences stripped, whitespace trimmed, length
/// checked. The text itself is not interpreted.
pub fn decode_scenario(raw: &str) -> Result<String, GenerationError> {
    let text = strip_fences(raw).trim();
    let chars = text.chars().count();
    if chars < MIN_SCENARIO_CHARS {
        return Err(GenerationError::validation(
            "writing scenario",
            format!("scenario must be at least {MIN_SCENARIO_CHARS} characters, got {chars}"),
        ));
    }
    Ok(text.to_string())
}

#[cfg(test)]
pub(crate) fn sample_scenario() -> String {
    "Your company has just acquired a smaller competitor in Amman. Within 90 days you must \
     merge two engineering teams of 12 and 9 people, keep a flagship release on schedule, \
     and cut cloud spend by 15% while two senior engineers threaten to resign."
        .to_string()
}
