// Resume evaluation: job description, system prompt, and the LLM-backed evaluator.
// All LLM calls go through llm_client.

pub mod evaluator;
pub mod job_description;
pub mod prompts;
