//! Turns raw model text into structured data.
//!
//! Strips markdown fence tokens and surrounding whitespace, then decodes
//! strictly. No repair is attempted: malformed output is always a
//! `GenerationError::Parse`.

use serde_json::Value;
use tracing::error;

use crate::errors::GenerationError;

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_fences(text: &str) -> &str {
    let text = text.trim();
    let body = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```JSON"))
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text)
        .trim();
    body.strip_suffix("```").map(str::trim).unwrap_or(body)
}

/// Strips fences and decodes the remainder as JSON.
pub fn parse_json(raw: &str) -> Result<Value, GenerationError> {
    let text = strip_fences(raw);
    serde_json::from_str(text).map_err(|e| {
        error!(
            "JSON parsing failed: {e}; raw text: {:?}",
            text.chars().take(500).collect::<String>()
        );
        GenerationError::Parse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert_eq!(strip_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_unterminated_fence() {
        let input = "```json\n[1, 2, 3]";
        assert_eq!(strip_fences(input), "[1, 2, 3]");
    }

    #[test]
    fn test_parse_json_decodes_fenced_array() {
        let value = parse_json("```json\n[{\"question\": \"Q\"}]\n```").unwrap();
        assert_eq!(value[0]["question"], "Q");
    }

    #[test]
    fn test_parse_json_rejects_prose_around_json() {
        let result = parse_json("Here you go: {\"a\": 1}");
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }

    #[test]
    fn test_parse_json_does_not_repair_trailing_commas() {
        assert!(parse_json("[1, 2,]").is_err());
    }
}
