use thiserror::Error;

use crate::llm_client::LlmError;

/// Scorer-level error type.
/// Anything returned from evaluation ends up in a sentinel report row via its `Display`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid score in AI response: {0}")]
    InvalidScore(String),

    #[error("Report error: {0}")]
    Report(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
