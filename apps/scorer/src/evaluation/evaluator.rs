//! Evaluator — sends resume text to the LLM and turns the reply into a sanitized `EvaluationResult`.
//!
//! A reply that is not a JSON object yields the parse-failure sentinel. Service errors and
//! scores that cannot be read as a number (or are NaN) are returned to the caller.
//! Infinite scores clamp like any other out-of-range value. A numeric literal too large for
//! f64 (e.g. `1e400`) is rejected by serde_json, so that reply gets the parse-failure sentinel.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::AppError;
use crate::evaluation::prompts::SystemPrompt;
use crate::llm_client::{strip_code_fences, LlmClient};
use crate::models::evaluation::{
    EvaluationResult, DEFAULT_NOTES, UNKNOWN_EMAIL, UNKNOWN_NAME,
};

/// Scores one resume. The batch orchestrator only sees this trait.
#[async_trait]
pub trait ResumeEvaluator: Send + Sync {
    async fn evaluate(&self, resume_text: &str) -> Result<EvaluationResult, AppError>;
}

/// Gemini-backed evaluator. The system prompt is fixed for the lifetime of the evaluator.
pub struct LlmEvaluator {
    llm: LlmClient,
    system_prompt: SystemPrompt,
}

impl LlmEvaluator {
    pub fn new(llm: LlmClient, system_prompt: SystemPrompt) -> Self {
        Self { llm, system_prompt }
    }
}

#[async_trait]
impl ResumeEvaluator for LlmEvaluator {
    async fn evaluate(&self, resume_text: &str) -> Result<EvaluationResult, AppError> {
        let raw = self
            .llm
            .call_text(resume_text, self.system_prompt.as_str())
            .await?;
        parse_evaluation(&raw)
    }
}

/// Parses a raw LLM reply into an `EvaluationResult`, applying field defaults and score clamping.
pub fn parse_evaluation(raw: &str) -> Result<EvaluationResult, AppError> {
    let cleaned = strip_code_fences(raw);

    let fields = match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            warn!("AI response was JSON but not an object");
            return Ok(EvaluationResult::parse_failure());
        }
        Err(e) => {
            warn!("AI response was not valid JSON: {e}");
            return Ok(EvaluationResult::parse_failure());
        }
    };

    Ok(EvaluationResult {
        name: text_field(&fields, "name", UNKNOWN_NAME),
        email: text_field(&fields, "email", UNKNOWN_EMAIL),
        score: score_field(&fields)?,
        notes: text_field(&fields, "notes", DEFAULT_NOTES),
    })
}

pub fn clamp_score(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

fn text_field(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// A missing or `null` score is 0.0, not an error.
fn score_field(fields: &Map<String, Value>) -> Result<f64, AppError> {
    let value = match fields.get("score") {
        None | Some(Value::Null) => return Ok(0.0),
        Some(value) => value,
    };

    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match score {
        Some(score) if !score.is_nan() => Ok(clamp_score(score)),
        _ => Err(AppError::InvalidScore(value.to_string())),
    }
}
