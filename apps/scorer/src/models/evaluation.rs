pub const UNKNOWN_NAME: &str = "Unknown";
pub const UNKNOWN_EMAIL: &str = "Not found";
pub const DEFAULT_NOTES: &str = "No notes provided";
pub const PARSE_FAILURE_NOTES: &str = "Error: Failed to parse AI response";

/// Sanitized verdict for one resume. `score` is always within [0.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub name: String,
    pub email: String,
    pub score: f64,
    pub notes: String,
}

impl EvaluationResult {
    /// Placeholder used when the AI reply is not a JSON object.
    pub fn parse_failure() -> Self {
        Self::sentinel(PARSE_FAILURE_NOTES.to_string())
    }

    /// Placeholder carrying an evaluation error message in `notes`.
    pub fn failed(error: &impl std::fmt::Display) -> Self {
        Self::sentinel(format!("Error: {error}"))
    }

    fn sentinel(notes: String) -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            email: UNKNOWN_EMAIL.to_string(),
            score: 0.0,
            notes,
        }
    }
}

/// One spreadsheet row: an evaluation plus the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub filename: String,
    pub name: String,
    pub email: String,
    pub score: f64,
    pub notes: String,
}

impl ReportRow {
    pub fn new(filename: impl Into<String>, result: EvaluationResult) -> Self {
        Self {
            filename: filename.into(),
            name: result.name,
            email: result.email,
            score: result.score,
            notes: result.notes,
        }
    }
}
