//! Batch Orchestrator — discovers resume files and drives extraction and evaluation for each,
//! strictly one file at a time.
//!
//! Row emission is decided by `FileOutcome::from_stage`:
//! - extraction failed  → Omitted (no row; listed in `BatchRun::Completed::omitted`)
//! - evaluated          → Recorded(row)
//! - evaluation failed  → Recorded(sentinel row, score 0.0, error text in notes)

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::evaluation::evaluator::ResumeEvaluator;
use crate::extraction::{ExtractionError, TextExtractor};
use crate::models::evaluation::{EvaluationResult, ReportRow};

pub mod discovery;

pub use discovery::{discover_resumes, ResumeFile};

/// Why a batch stopped before processing any file.
#[derive(Debug)]
pub enum AbortReason {
    MissingDirectory(PathBuf),
    Unreadable { dir: PathBuf, error: std::io::Error },
    NoResumes(PathBuf),
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbortReason::MissingDirectory(dir) => {
                write!(f, "resumes directory not found: {}", dir.display())
            }
            AbortReason::Unreadable { dir, error } => {
                write!(f, "could not list {}: {error}", dir.display())
            }
            AbortReason::NoResumes(dir) => write!(f, "no resume files found in {}", dir.display()),
        }
    }
}

/// Result of one pass over the resumes directory.
#[derive(Debug)]
pub enum BatchRun {
    /// Nothing was processed and no report should be written.
    Aborted(AbortReason),
    /// Rows in discovery order, plus the files whose text could not be extracted.
    Completed {
        rows: Vec<ReportRow>,
        omitted: Vec<OmittedFile>,
    },
}

/// A file left out of the report because extraction failed.
#[derive(Debug)]
pub struct OmittedFile {
    pub filename: String,
    pub reason: ExtractionError,
}

/// Terminal state of one file's trip through the pipeline.
#[derive(Debug)]
pub enum FileStage {
    ExtractionFailed(ExtractionError),
    Evaluated(EvaluationResult),
    EvaluationFailed(AppError),
}

#[derive(Debug)]
pub enum FileOutcome {
    Recorded(ReportRow),
    Omitted(OmittedFile),
}

impl FileOutcome {
    pub fn from_stage(filename: &str, stage: FileStage) -> Self {
        match stage {
            FileStage::ExtractionFailed(reason) => FileOutcome::Omitted(OmittedFile {
                filename: filename.to_string(),
                reason,
            }),
            FileStage::Evaluated(result) => FileOutcome::Recorded(ReportRow::new(filename, result)),
            FileStage::EvaluationFailed(e) => {
                FileOutcome::Recorded(ReportRow::new(filename, EvaluationResult::failed(&e)))
            }
        }
    }
}

pub struct BatchOrchestrator<'a> {
    extractor: &'a dyn TextExtractor,
    evaluator: &'a dyn ResumeEvaluator,
}

impl<'a> BatchOrchestrator<'a> {
    pub fn new(extractor: &'a dyn TextExtractor, evaluator: &'a dyn ResumeEvaluator) -> Self {
        Self {
            extractor,
            evaluator,
        }
    }

    /// Processes every resume in `resumes_dir` in discovery order.
    pub async fn run(&self, resumes_dir: &Path) -> BatchRun {
        let files = match list_resumes(resumes_dir) {
            Ok(files) => files,
            Err(reason) => {
                error!("Batch aborted: {reason}");
                return BatchRun::Aborted(reason);
            }
        };

        info!("Found {} resume files to process", files.len());

        let mut rows = Vec::with_capacity(files.len());
        let mut omitted = Vec::new();

        for (i, file) in files.iter().enumerate() {
            let filename = file.file_name();
            info!("Processing ({}/{}): {}", i + 1, files.len(), filename);

            let stage = self.process_file(file).await;
            match FileOutcome::from_stage(&filename, stage) {
                FileOutcome::Recorded(row) => rows.push(row),
                FileOutcome::Omitted(skipped) => omitted.push(skipped),
            }
        }

        if !omitted.is_empty() {
            let names: Vec<_> = omitted.iter().map(|f| f.filename.as_str()).collect();
            warn!(
                "{} file(s) omitted from the report: {}",
                omitted.len(),
                names.join(", ")
            );
        }

        BatchRun::Completed { rows, omitted }
    }

    async fn process_file(&self, file: &ResumeFile) -> FileStage {
        let filename = file.file_name();

        let text = match self.extractor.extract(&file.path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to extract text from {filename}: {e}");
                return FileStage::ExtractionFailed(e);
            }
        };

        match self.evaluator.evaluate(&text).await {
            Ok(result) => {
                info!("Score: {:.2} | Name: {}", result.score, result.name);
                FileStage::Evaluated(result)
            }
            Err(e) => {
                error!("Error processing {filename}: {e}");
                FileStage::EvaluationFailed(e)
            }
        }
    }
}

fn list_resumes(resumes_dir: &Path) -> Result<Vec<ResumeFile>, AbortReason> {
    if !resumes_dir.is_dir() {
        return Err(AbortReason::MissingDirectory(resumes_dir.to_path_buf()));
    }

    let files = discover_resumes(resumes_dir).map_err(|error| AbortReason::Unreadable {
        dir: resumes_dir.to_path_buf(),
        error,
    })?;

    if files.is_empty() {
        return Err(AbortReason::NoResumes(resumes_dir.to_path_buf()));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::evaluation::evaluator::parse_evaluation;
    use crate::extraction::docx::tests::write_docx;
    use crate::extraction::{DocumentExtractor, ResumeFormat};
    use crate::llm_client::LlmError;

    /// Real extraction for DOCX/DOC, fixed text for every PDF.
    struct FixedPdfExtractor(&'static str);

    impl TextExtractor for FixedPdfExtractor {
        fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
            match ResumeFormat::from_path(path) {
                Some(ResumeFormat::Pdf) => Ok(self.0.to_string()),
                _ => DocumentExtractor.extract(path),
            }
        }
    }

    enum Reply {
        Raw(&'static str),
        ServiceError,
    }

    /// Answers with the reply whose key appears in the resume text; records every call.
    struct ScriptedEvaluator {
        replies: Vec<(&'static str, Reply)>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedEvaluator {
        fn new(replies: Vec<(&'static str, Reply)>) -> Self {
            Self {
                replies,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResumeEvaluator for ScriptedEvaluator {
        async fn evaluate(&self, resume_text: &str) -> Result<EvaluationResult, AppError> {
            self.calls.lock().unwrap().push(resume_text.to_string());
            let reply = self
                .replies
                .iter()
                .find(|(key, _)| resume_text.contains(key))
                .map(|(_, reply)| reply);
            match reply {
                Some(Reply::Raw(raw)) => parse_evaluation(raw),
                Some(Reply::ServiceError) | None => Err(AppError::Llm(LlmError::Api {
                    status: 429,
                    message: "quota exceeded".to_string(),
                })),
            }
        }
    }

    fn completed(run: BatchRun) -> (Vec<ReportRow>, Vec<OmittedFile>) {
        match run {
            BatchRun::Completed { rows, omitted } => (rows, omitted),
            BatchRun::Aborted(reason) => panic!("batch aborted: {reason:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_directory_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let evaluator = ScriptedEvaluator::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

        let run = orchestrator.run(&dir.path().join("resumes")).await;
        assert!(matches!(
            run,
            BatchRun::Aborted(AbortReason::MissingDirectory(_))
        ));
        assert!(evaluator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_directory_aborts_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let evaluator = ScriptedEvaluator::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

        let run = orchestrator.run(dir.path()).await;
        assert!(matches!(run, BatchRun::Aborted(AbortReason::NoResumes(_))));
    }

    #[tokio::test]
    async fn test_pdf_score_above_one_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jane.pdf"), b"%PDF-1.4").unwrap();

        let extractor = FixedPdfExtractor("Jane Doe, jane@x.com, 8 years of Rust");
        let evaluator = ScriptedEvaluator::new(vec![(
            "Jane Doe",
            Reply::Raw(r#"{"name":"Jane Doe","email":"jane@x.com","score":1.4,"notes":"Strong fit"}"#),
        )]);
        let orchestrator = BatchOrchestrator::new(&extractor, &evaluator);

        let (rows, omitted) = completed(orchestrator.run(dir.path()).await);
        assert!(omitted.is_empty());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].filename, "jane.pdf");
        assert_eq!(rows[0].name, "Jane Doe");
        assert_eq!(rows[0].email, "jane@x.com");
        assert_eq!(rows[0].score, 1.0);
        assert_eq!(rows[0].notes, "Strong fit");
    }

    #[tokio::test]
    async fn test_doc_is_omitted_while_siblings_are_processed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jane.pdf"), b"%PDF-1.4").unwrap();
        write_docx(&dir.path().join("john.docx"), &["John Roe", "john@y.org"]);
        std::fs::write(dir.path().join("old.doc"), b"\xD0\xCF\x11\xE0").unwrap();

        let extractor = FixedPdfExtractor("Jane Doe, jane@x.com");
        let evaluator = ScriptedEvaluator::new(vec![
            (
                "Jane Doe",
                Reply::Raw(r#"{"name":"Jane Doe","email":"jane@x.com","score":0.9,"notes":"Good"}"#),
            ),
            (
                "John Roe",
                Reply::Raw("```json\n{\"name\":\"John Roe\",\"email\":\"john@y.org\",\"score\":0.4}\n```"),
            ),
        ]);
        let orchestrator = BatchOrchestrator::new(&extractor, &evaluator);

        let (rows, omitted) = completed(orchestrator.run(dir.path()).await);
        let filenames: Vec<_> = rows.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, vec!["jane.pdf", "john.docx"]);
        assert_eq!(rows[1].notes, "No notes provided");
        assert_eq!(omitted.len(), 1);
        assert_eq!(omitted[0].filename, "old.doc");
        assert!(matches!(omitted[0].reason, ExtractionError::LegacyDoc));
        assert_eq!(evaluator.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_evaluation_error_records_sentinel_row() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("a.docx"), &["Alice Example"]);
        write_docx(&dir.path().join("b.docx"), &["Bob Example"]);

        let evaluator = ScriptedEvaluator::new(vec![
            ("Alice", Reply::ServiceError),
            (
                "Bob",
                Reply::Raw(r#"{"name":"Bob Example","email":"bob@x.com","score":0.6,"notes":"ok"}"#),
            ),
        ]);
        let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

        let (rows, omitted) = completed(orchestrator.run(dir.path()).await);
        assert!(omitted.is_empty());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].filename, "a.docx");
        assert_eq!(rows[0].name, "Unknown");
        assert_eq!(rows[0].email, "Not found");
        assert_eq!(rows[0].score, 0.0);
        assert_eq!(
            rows[0].notes,
            "Error: LLM error: API error (status 429): quota exceeded"
        );
        assert_eq!(rows[1].name, "Bob Example");
    }

    #[tokio::test]
    async fn test_extraction_failure_is_not_a_zero_score_row() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("blank.docx"), &[" "]);

        let evaluator = ScriptedEvaluator::new(vec![]);
        let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

        let (rows, omitted) = completed(orchestrator.run(dir.path()).await);
        assert!(rows.is_empty());
        assert_eq!(omitted.len(), 1);
        assert_eq!(omitted[0].filename, "blank.docx");
        assert!(matches!(omitted[0].reason, ExtractionError::Empty));
        assert!(evaluator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_reply_is_recorded_with_parse_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        write_docx(&dir.path().join("c.docx"), &["Carol Example"]);

        let evaluator =
            ScriptedEvaluator::new(vec![("Carol", Reply::Raw("Sorry, I cannot help with that."))]);
        let orchestrator = BatchOrchestrator::new(&DocumentExtractor, &evaluator);

        let (rows, _) = completed(orchestrator.run(dir.path()).await);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].notes, "Error: Failed to parse AI response");
        assert_eq!(rows[0].score, 0.0);
    }

    #[test]
    fn test_abort_reason_messages() {
        let reason = AbortReason::MissingDirectory(PathBuf::from("./resumes"));
        assert_eq!(reason.to_string(), "resumes directory not found: ./resumes");
        let reason = AbortReason::NoResumes(PathBuf::from("./resumes"));
        assert_eq!(reason.to_string(), "no resume files found in ./resumes");
    }

    #[test]
    fn test_emission_rule() {
        match FileOutcome::from_stage("x.doc", FileStage::ExtractionFailed(ExtractionError::LegacyDoc)) {
            FileOutcome::Omitted(file) => assert_eq!(file.filename, "x.doc"),
            FileOutcome::Recorded(row) => panic!("extraction failures must not produce a row: {row:?}"),
        }

        let evaluated = EvaluationResult {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            score: 0.7,
            notes: "fit".to_string(),
        };
        match FileOutcome::from_stage("jane.pdf", FileStage::Evaluated(evaluated.clone())) {
            FileOutcome::Recorded(row) => assert_eq!(row, ReportRow::new("jane.pdf", evaluated)),
            FileOutcome::Omitted(file) => panic!("unexpected omission: {file:?}"),
        }

        match FileOutcome::from_stage(
            "bob.pdf",
            FileStage::EvaluationFailed(AppError::InvalidScore("\"high\"".to_string())),
        ) {
            FileOutcome::Recorded(row) => {
                assert_eq!(row.filename, "bob.pdf");
                assert_eq!(row.score, 0.0);
                assert_eq!(row.notes, "Error: Invalid score in AI response: \"high\"");
            }
            FileOutcome::Omitted(_) => panic!("evaluation failures must be recorded"),
        }
    }
}
