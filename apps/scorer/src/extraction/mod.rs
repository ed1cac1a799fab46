//! Text Extractor — turns a resume file into plain text, dispatching on its extension.
//!
//! Failures come back as `ExtractionError`; nothing here panics out to the caller.
//! Blank output is a failure, so downstream never evaluates an empty resume.

use std::path::Path;

use thiserror::Error;
use tracing::warn;

pub mod docx;
pub mod pdf;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("unsupported file format: .{0}")]
    Unsupported(String),

    #[error("legacy .doc files are not supported; convert to PDF or DOCX")]
    LegacyDoc,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no text could be extracted")]
    Empty,
}

/// Resume formats recognised by extension. Only lowercase extensions match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Doc,
}

impl ResumeFormat {
    /// Discovery order: all PDFs, then DOCX, then DOC.
    pub const ALL: [ResumeFormat; 3] = [ResumeFormat::Pdf, ResumeFormat::Docx, ResumeFormat::Doc];

    pub fn extension(self) -> &'static str {
        match self {
            ResumeFormat::Pdf => "pdf",
            ResumeFormat::Docx => "docx",
            ResumeFormat::Doc => "doc",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Seam between the batch orchestrator and document parsing.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Default extractor backed by pdf-extract / lopdf and docx-rs.
pub struct DocumentExtractor;

impl TextExtractor for DocumentExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        extract_text(path)
    }
}

/// Extracts trimmed, non-blank text from `path`.
pub fn extract_text(path: &Path) -> Result<String, ExtractionError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();

    let text = match ResumeFormat::from_extension(&ext) {
        Some(ResumeFormat::Pdf) => pdf::extract_pdf_text(path)?,
        Some(ResumeFormat::Docx) => docx::extract_docx_text(path)?,
        Some(ResumeFormat::Doc) => {
            warn!(
                "DOC files require additional setup. Consider converting {} to PDF or DOCX",
                path.display()
            );
            return Err(ExtractionError::LegacyDoc);
        }
        None => {
            warn!("Unsupported file format: .{ext}");
            return Err(ExtractionError::Unsupported(ext));
        }
    };

    non_blank(text)
}

fn non_blank(text: String) -> Result<String, ExtractionError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(ExtractionError::Empty)
    } else {
        Ok(trimmed.to_string())
    }
}
