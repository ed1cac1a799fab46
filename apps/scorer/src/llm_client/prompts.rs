// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Closing instruction for any prompt whose reply is parsed as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Return only the JSON object, no additional text.";
