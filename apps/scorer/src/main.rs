mod batch;
mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod models;
mod report;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::batch::{BatchOrchestrator, BatchRun};
use crate::config::Config;
use crate::evaluation::evaluator::LlmEvaluator;
use crate::evaluation::job_description::load_job_description;
use crate::evaluation::prompts::SystemPrompt;
use crate::extraction::DocumentExtractor;
use crate::llm_client::LlmClient;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}=info", env!("CARGO_PKG_NAME")))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Starting ATS Resume Scorer v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(50));

    // Failures are reported, never turned into a non-zero exit status.
    match run().await {
        Ok(()) => println!("\nATS Resume Scorer completed successfully!"),
        Err(e) => error!("{e:#}"),
    }

    Ok(())
}

async fn run() -> Result<()> {
    let config = Config::from_env().context("Configuration error")?;

    let llm = LlmClient::new(config.gemini_api_key.clone(), config.model.clone())
        .context("Configuration error: could not build HTTP client")?
        .with_base_url(config.api_base_url.clone());
    info!("LLM client initialized (model: {})", llm.model());

    let job_description = load_job_description(&config.job_description_path);
    let system_prompt = SystemPrompt::build(&job_description);

    let evaluator = LlmEvaluator::new(llm, system_prompt);
    let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

    match orchestrator.run(&config.resumes_dir).await {
        BatchRun::Aborted(reason) => {
            println!("Nothing to score: {reason}");
        }
        BatchRun::Completed { rows, omitted } => {
            for file in &omitted {
                println!("Skipped {}: {}", file.filename, file.reason);
            }
            let path = report::write_report(&config.output_dir, &rows)
                .context("Failed to write report")?;
            report::print_summary(&path, &rows);
        }
    }

    Ok(())
}
