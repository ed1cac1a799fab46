use crate::evaluation::job_description::JobDescription;
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;

/// System prompt for resume evaluation.
/// Replace: {job_description}, {json_only_instruction}
pub const EVALUATION_SYSTEM_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) resume evaluator. Analyze the provided resume and extract the following information in JSON text format:
{
  "name": "Full name of the candidate",
  "email": "Email address found in the resume",
  "score": "Score number from 0.0 to 1.0",
  "notes": "Brief evaluation notes (max 50 words)"
}

JOB DESCRIPTION:
{job_description}

{json_only_instruction}"#;

/// The rendered system instruction, built once per run and shared by every evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompt(String);

impl SystemPrompt {
    pub fn build(job_description: &JobDescription) -> Self {
        Self(
            EVALUATION_SYSTEM_TEMPLATE
                .replace("{json_only_instruction}", JSON_ONLY_INSTRUCTION)
                .replace("{job_description}", job_description.as_str()),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
