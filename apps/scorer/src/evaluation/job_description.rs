use std::path::Path;

use tracing::warn;

pub const DEFAULT_JOB_DESCRIPTION: &str =
    "No specific job description provided. Evaluate based on general professional standards.";

/// The job description every resume in a run is scored against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobDescription {
    fn default() -> Self {
        Self::new(DEFAULT_JOB_DESCRIPTION)
    }
}

/// Reads the job description from `path`, trimmed.
/// Falls back to a generic description (with a warning) when the file is missing, unreadable or blank.
pub fn load_job_description(path: &Path) -> JobDescription {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                "{} not found. Using generic evaluation.",
                path.display()
            );
            return JobDescription::default();
        }
        Err(e) => {
            warn!(
                "Could not read {}: {e}. Using generic evaluation.",
                path.display()
            );
            return JobDescription::default();
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!("{} is empty. Using generic evaluation.", path.display());
        return JobDescription::default();
    }

    JobDescription::new(trimmed)
}
