// Shared prompt constants.
// Each generator defines its own templates in generation::prompts.
// This file contains cross-cutting fragments.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text output (the writing scenario).
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert leadership psychologist. \
    Respond with the requested text only. \
    Do NOT use markdown formatting, headings or code fences. \
    Do NOT include explanations or apologies.";

/// Fixed connectivity probe sent once when the generation client starts.
pub const PROBE_PROMPT: &str = "Respond with: API_TEST_SUCCESS";

/// Substring a probe reply must contain.
pub const PROBE_MARKER: &str = "API_TEST_SUCCESS";
